use std::{collections::HashMap, sync::Arc};

use crate::api::{Comment, Error, HugTarget, Post, PostId};

/// Changes every time a post is replaced or mutated. Views compare it to know
/// whether what they derived from a post is stale.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Revision(u64);

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    ApplyHug { post: PostId, target: HugTarget },
    InsertComment { post: PostId, comment: Comment },
    ReplacePost(Post),
}

impl Command {
    pub fn post_id(&self) -> PostId {
        match self {
            Command::ApplyHug { post, .. } => *post,
            Command::InsertComment { post, .. } => *post,
            Command::ReplacePost(p) => p.id,
        }
    }

    fn run(&self, post: &mut Post) -> Result<(), Error> {
        match self {
            Command::ApplyHug { target, .. } => post.hug(*target).map(|_| ()),
            Command::InsertComment { comment, .. } => post.insert_comment(comment.clone()),
            Command::ReplacePost(p) => {
                *post = p.clone();
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    post: Arc<Post>,
    revision: Revision,
}

/// The single source of truth for the posts of a session. Readers get `Arc`
/// snapshots; the only way to change a post is [`PostStore::apply`] (or
/// [`PostStore::commit`] for an already-computed post).
#[derive(Clone, Debug, Default)]
pub struct PostStore {
    loaded: bool,
    order: Vec<PostId>,
    posts: HashMap<PostId, Entry>,
    last_revision: u64,
}

impl PostStore {
    pub fn new() -> PostStore {
        PostStore::default()
    }

    /// Whether a fetch ever succeeded. An empty loaded store is not the same as
    /// a store still waiting for its data.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn next_revision(&mut self) -> Revision {
        self.last_revision += 1;
        Revision(self.last_revision)
    }

    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.order.clear();
        self.posts.clear();
        for p in posts {
            let revision = self.next_revision();
            if self.posts.contains_key(&p.id) {
                tracing::warn!(post = %p.id, "duplicate post id in fetched data, keeping the last");
            } else {
                self.order.push(p.id);
            }
            self.posts.insert(
                p.id,
                Entry {
                    post: Arc::new(p),
                    revision,
                },
            );
        }
        self.loaded = true;
    }

    /// Posts in the order they were fetched
    pub fn posts(&self) -> impl Iterator<Item = &Arc<Post>> {
        self.order
            .iter()
            .filter_map(move |id| self.posts.get(id).map(|e| &e.post))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn post(&self, id: PostId) -> Option<Arc<Post>> {
        self.posts.get(&id).map(|e| e.post.clone())
    }

    pub fn revision(&self, id: PostId) -> Option<Revision> {
        self.posts.get(&id).map(|e| e.revision)
    }

    /// Computes what the post would look like after `cmd`, without changing
    /// anything
    pub fn preview(&self, cmd: &Command) -> Result<Post, Error> {
        let id = cmd.post_id();
        let mut post = Post::clone(&self.posts.get(&id).ok_or(Error::PostNotFound(id))?.post);
        cmd.run(&mut post)?;
        Ok(post)
    }

    /// Replaces a known post wholesale
    pub fn commit(&mut self, post: Post) -> Result<Arc<Post>, Error> {
        let revision = self.next_revision();
        let entry = self
            .posts
            .get_mut(&post.id)
            .ok_or(Error::PostNotFound(post.id))?;
        entry.post = Arc::new(post);
        entry.revision = revision;
        Ok(entry.post.clone())
    }

    pub fn apply(&mut self, cmd: Command) -> Result<Arc<Post>, Error> {
        let post = self.preview(&cmd)?;
        tracing::debug!(post = %post.id, ?cmd, "applying command");
        self.commit(post)
    }
}
