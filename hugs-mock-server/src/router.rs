use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use hugs_api::{Post, PostId};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::{
    data::{self, DataFile},
    error::Error,
    MockServer,
};

#[derive(Clone)]
pub struct AppState {
    pub server: Arc<Mutex<MockServer>>,

    /// Where to write the posts back after each successful edit, and the
    /// shape to write them in
    pub persist_to: Option<Arc<(PathBuf, DataFile)>>,
}

impl AppState {
    pub fn new(server: MockServer) -> AppState {
        AppState {
            server: Arc::new(Mutex::new(server)),
            persist_to: None,
        }
    }

    pub fn persisting_to(mut self, path: PathBuf, shape: DataFile) -> AppState {
        self.persist_to = Some(Arc::new((path, shape)));
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(fetch_posts))
        .route("/posts/:id", get(fetch_post).put(edit_post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fetch_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, Error> {
    Ok(Json(state.server.lock().await.fetch_posts()?))
}

async fn fetch_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> Result<Json<Post>, Error> {
    Ok(Json(state.server.lock().await.fetch_post(id)?))
}

async fn edit_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(post): Json<Post>,
) -> Result<Json<Post>, Error> {
    if post.id != id {
        return Err(Error::post_id_mismatch(id, post.id));
    }
    // keep the lock while writing so that the file sees edits in order
    let mut server = state.server.lock().await;
    let previous = server.post(id).cloned();
    let post = server.edit_post(post)?;
    if let Some(persist) = &state.persist_to {
        let (path, shape) = &**persist;
        let saved = data::save(path, &shape.with_posts(server.posts().to_vec()))
            .await
            .with_context(|| format!("persisting edit of post {id}"));
        if let Err(err) = saved {
            // a failed edit must leave no trace
            if let Some(previous) = previous {
                server.undo_edit(previous);
            }
            tracing::warn!(post = %id, ?err, "failed persisting edit, reverted it");
            return Err(err.into());
        }
    }
    tracing::info!(post = %id, num_comments = post.comments.len(), "edited post");
    Ok(Json(post))
}
