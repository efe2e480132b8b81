use async_trait::async_trait;

use crate::Post;

/// The store every post lives in. Writes always replace the whole post.
#[async_trait]
pub trait Remote {
    async fn fetch_posts(&self) -> anyhow::Result<Vec<Post>>;
    async fn edit_post(&self, post: &Post) -> anyhow::Result<Post>;
}
