use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use hugs_mock_server::{data, router, AppState, MockServer};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Json file to load posts from: an array of posts, or an object with a
    /// `posts` array. Starts with no posts if absent.
    #[structopt(short, long, env = "HUGS_DATA")]
    data: Option<PathBuf>,

    #[structopt(short, long, default_value = "3000")]
    port: u16,

    /// Write the data file back after every edit
    #[structopt(long, requires = "data")]
    persist: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let mut state = AppState::new(MockServer::new(Vec::new()));
    if let Some(path) = opt.data {
        let file = data::load(&path).await?;
        let shape = file.with_posts(Vec::new());
        tracing::info!(num_posts = file.posts().len(), ?path, "loaded data file");
        state = AppState::new(MockServer::new(file.into_posts()));
        if opt.persist {
            state = state.persisting_to(path, shape);
        }
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], opt.port));
    tracing::info!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await
        .context("serving axum webserver")
}
