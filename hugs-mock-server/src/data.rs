//! The json file the mock server is seeded from, in either of the shapes
//! seen in the wild: a bare array of posts, or a `json-server` database with
//! a `posts` collection.

use std::path::Path;

use anyhow::Context;
use hugs_api::Post;

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum DataFile {
    Posts(Vec<Post>),
    Db { posts: Vec<Post> },
}

impl DataFile {
    pub fn posts(&self) -> &[Post] {
        match self {
            DataFile::Posts(p) => p,
            DataFile::Db { posts } => posts,
        }
    }

    pub fn into_posts(self) -> Vec<Post> {
        match self {
            DataFile::Posts(p) => p,
            DataFile::Db { posts } => posts,
        }
    }

    /// Same shape as `self`, with other contents
    pub fn with_posts(&self, posts: Vec<Post>) -> DataFile {
        match self {
            DataFile::Posts(_) => DataFile::Posts(posts),
            DataFile::Db { .. } => DataFile::Db { posts },
        }
    }
}

pub async fn load(path: &Path) -> anyhow::Result<DataFile> {
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading data file {path:?}"))?;
    serde_json::from_slice(&contents).with_context(|| format!("parsing data file {path:?}"))
}

pub async fn save(path: &Path, data: &DataFile) -> anyhow::Result<()> {
    let contents = serde_json::to_vec_pretty(data).context("serializing posts")?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("writing data file {path:?}"))
}
