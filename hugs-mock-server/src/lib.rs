use std::sync::Arc;

use async_trait::async_trait;
use hugs_api::{Error, Post, PostId, Remote};
use tokio::sync::Mutex;

pub mod data;

mod error;

mod router;
pub use router::{router, AppState};

/// An in-memory remote store, with knobs to make it misbehave
#[derive(Debug, Default)]
pub struct MockServer {
    posts: Vec<Post>,
    failing: bool,
    fail_next: usize,
    num_edits: usize,
}

impl MockServer {
    pub fn new(posts: Vec<Post>) -> MockServer {
        MockServer {
            posts,
            ..MockServer::default()
        }
    }

    /// Makes every request fail until turned off again
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Makes the next `n` requests fail
    pub fn fail_next(&mut self, n: usize) {
        self.fail_next = n;
    }

    fn maybe_fail(&mut self) -> Result<(), Error> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(Error::Unknown(String::from("injected failure")));
        }
        if self.failing {
            return Err(Error::Unknown(String::from("injected failure")));
        }
        Ok(())
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Number of successful edits so far
    pub fn test_num_edits(&self) -> usize {
        self.num_edits
    }

    pub fn fetch_posts(&mut self) -> Result<Vec<Post>, Error> {
        self.maybe_fail()?;
        Ok(self.posts.clone())
    }

    pub fn fetch_post(&mut self, id: PostId) -> Result<Post, Error> {
        self.maybe_fail()?;
        self.post(id).cloned().ok_or(Error::PostNotFound(id))
    }

    pub fn edit_post(&mut self, post: Post) -> Result<Post, Error> {
        self.maybe_fail()?;
        hugs_api::validate_string(&post.title)?;
        let slot = self
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(Error::PostNotFound(post.id))?;
        *slot = post.clone();
        self.num_edits += 1;
        Ok(post)
    }

    /// Puts back the version of a post an edit replaced
    pub(crate) fn undo_edit(&mut self, previous: Post) {
        if let Some(slot) = self.posts.iter_mut().find(|p| p.id == previous.id) {
            *slot = previous;
            self.num_edits = self.num_edits.saturating_sub(1);
        }
    }
}

/// A [`MockServer`] used directly as a [`Remote`], without going through HTTP
#[derive(Clone, Debug, Default)]
pub struct MockRemote(pub Arc<Mutex<MockServer>>);

impl MockRemote {
    pub fn new(server: MockServer) -> MockRemote {
        MockRemote(Arc::new(Mutex::new(server)))
    }
}

#[async_trait]
impl Remote for MockRemote {
    async fn fetch_posts(&self) -> anyhow::Result<Vec<Post>> {
        self.0
            .lock()
            .await
            .fetch_posts()
            .map_err(|e| anyhow::Error::new(e).context("fetching posts from mock server"))
    }

    async fn edit_post(&self, post: &Post) -> anyhow::Result<Post> {
        self.0
            .lock()
            .await
            .edit_post(post.clone())
            .map_err(|e| anyhow::Error::new(e).context(format!("editing post {}", post.id)))
    }
}
