use anyhow::{anyhow, Context};
use chrono::Utc;
use hugs_client::{
    api::{CommentId, HugTarget, PostId},
    CommentTree, HttpRemote, MutationService,
};

mod render;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Root url of the remote store
    #[structopt(short, long, env = "HUGS_HOST", default_value = "http://localhost:3000")]
    host: String,

    /// Name new comments are signed with
    #[structopt(short, long, env = "HUGS_DISPLAY_NAME", default_value = "MDandMe")]
    name: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List all posts
    List,

    /// Show a post and its comments
    Show {
        post: i64,

        /// Only show the replies to this comment
        #[structopt(long)]
        thread: Option<i64>,
    },

    /// Comment on a post, or reply to a comment
    Comment {
        post: i64,

        /// Comment to reply to
        #[structopt(long)]
        parent: Option<i64>,

        text: Vec<String>,
    },

    /// Send a hug to a post, or to one of its comments
    Hug {
        post: i64,

        #[structopt(long)]
        comment: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let mut service = MutationService::new(HttpRemote::new(opt.host.clone()));
    service
        .refresh()
        .await
        .with_context(|| format!("fetching posts from {}", opt.host))?;
    tracing::info!(host = %opt.host, num_posts = service.store().len(), "loaded posts");
    let now = Utc::now();

    match opt.cmd {
        Command::List => {
            for p in service.store().posts() {
                println!("{}", render::post_line(p, now));
            }
        }
        Command::Show { post, thread } => {
            let p = service
                .store()
                .post(PostId(post))
                .ok_or_else(|| anyhow!("no post {post}"))?;
            let root = thread.map(CommentId);
            match root {
                None => println!("{}", render::post_detail(&p, now)?),
                Some(id) if !p.has_comment(id) => {
                    return Err(anyhow!("post {post} has no comment {id}"))
                }
                Some(_) => (),
            }
            let tree = CommentTree::build(&p.comments, root);
            tracing::debug!(post, ?thread, num_comments = tree.len(), "built comment tree");
            print!("{}", render::thread(&tree, now)?);
        }
        Command::Comment { post, parent, text } => {
            let text = text.join(" ");
            let c = service
                .add_comment(PostId(post), parent.map(CommentId), &opt.name, &text)
                .await
                .with_context(|| format!("commenting on post {post}"))?;
            tracing::info!(post, comment = %c.id, ?parent, "posted comment");
            println!("added comment {}", c.id);
        }
        Command::Hug { post, comment } => {
            let target = match comment {
                None => HugTarget::Post,
                Some(c) => HugTarget::Comment(CommentId(c)),
            };
            let hugs = service
                .add_hug(PostId(post), target)
                .await
                .with_context(|| format!("hugging {target:?} of post {post}"))?;
            tracing::info!(post, ?target, hugs, "sent hug");
            println!("{hugs}");
        }
    }

    Ok(())
}
