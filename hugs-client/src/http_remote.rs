use anyhow::{anyhow, Context};
use async_trait::async_trait;

use crate::api::{self, Post, Remote};

/// The remote store, reached over HTTP. Requests are not retried and carry
/// no timeout beyond reqwest's defaults.
#[derive(Clone, Debug)]
pub struct HttpRemote {
    base: String,
    client: reqwest::Client,
}

impl HttpRemote {
    /// `base` is the server root, e.g. `http://localhost:3000`
    pub fn new(base: impl Into<String>) -> HttpRemote {
        HttpRemote::with_client(base, reqwest::Client::new())
    }

    pub fn with_client(base: impl Into<String>, client: reqwest::Client) -> HttpRemote {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        HttpRemote { base, client }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

async fn check_status(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.bytes().await.unwrap_or_default();
    match api::Error::parse(&body) {
        Ok(err) => Err(anyhow::Error::new(err).context(format!("server answered {status}"))),
        Err(_) => Err(anyhow!("server answered {status}")),
    }
}

#[async_trait]
impl Remote for HttpRemote {
    async fn fetch_posts(&self) -> anyhow::Result<Vec<Post>> {
        let url = format!("{}/posts", self.base);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("fetching {url}"))?;
        check_status(resp)
            .await?
            .json()
            .await
            .context("parsing post list")
    }

    async fn edit_post(&self, post: &Post) -> anyhow::Result<Post> {
        let url = format!("{}/posts/{}", self.base, post.id);
        let resp = self
            .client
            .put(&url)
            .json(post)
            .send()
            .await
            .with_context(|| format!("sending post to {url}"))?;
        check_status(resp)
            .await?
            .json()
            .await
            .context("parsing edited post")
    }
}
