use std::sync::Arc;

use chrono::{SubsecRound, Utc};

use crate::{
    api::{self, Comment, CommentId, HugTarget, Post, PostId, Remote},
    Command, Error, PostStore,
};

/// When a local change becomes visible relative to the remote write
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UpdatePolicy {
    /// The store only changes once the remote accepted the new post
    #[default]
    Confirmed,

    /// The store changes first and is left as-is if the remote write fails,
    /// so the local view may show changes the remote never saw
    Optimistic,
}

/// Every mutation goes through here: it computes the new post, writes the
/// whole of it to the remote, and updates the store according to the
/// [`UpdatePolicy`].
pub struct MutationService<R> {
    remote: R,
    store: PostStore,
    policy: UpdatePolicy,
}

impl<R: Remote> MutationService<R> {
    pub fn new(remote: R) -> MutationService<R> {
        MutationService::with_policy(remote, UpdatePolicy::default())
    }

    pub fn with_policy(remote: R, policy: UpdatePolicy) -> MutationService<R> {
        MutationService {
            remote,
            store: PostStore::new(),
            policy,
        }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    /// Refetches every post. On failure the store keeps what it had.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        match self.remote.fetch_posts().await {
            Ok(posts) => {
                tracing::info!(num_posts = posts.len(), "fetched posts");
                self.store.replace_all(posts);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(?err, "failed fetching posts, keeping current data");
                Err(Error::Network(err))
            }
        }
    }

    /// Adds a comment under `parent` (or directly under the post) and returns
    /// it as stored.
    pub async fn add_comment(
        &mut self,
        post: PostId,
        parent: Option<CommentId>,
        author: &str,
        text: &str,
    ) -> Result<Comment, Error> {
        api::validate_comment_text(text)?;
        api::validate_string(author)?;
        let current = self.store.post(post).ok_or(api::Error::PostNotFound(post))?;
        let comment = Comment {
            id: current.next_comment_id(),
            parent_id: parent,
            display_name: String::from(author),
            text: String::from(text),
            // the wire format only carries milliseconds
            created_at: Utc::now().trunc_subsecs(3).into(),
            num_hugs: 0,
        };
        let updated = self
            .persist(Command::InsertComment {
                post,
                comment: comment.clone(),
            })
            .await?;
        tracing::info!(%post, comment = %comment.id, ?parent, "added comment");
        Ok(updated
            .comment(comment.id)
            .cloned()
            .unwrap_or(comment))
    }

    /// Adds exactly one hug and returns the new count
    pub async fn add_hug(&mut self, post: PostId, target: HugTarget) -> Result<u64, Error> {
        let updated = self.persist(Command::ApplyHug { post, target }).await?;
        let hugs = updated
            .hugs(target)
            .ok_or_else(|| match target {
                HugTarget::Post => api::Error::PostNotFound(post),
                HugTarget::Comment(c) => api::Error::UnknownComment(c),
            })?;
        tracing::info!(%post, ?target, hugs, "added hug");
        Ok(hugs)
    }

    async fn persist(&mut self, cmd: Command) -> Result<Arc<Post>, Error> {
        let post = cmd.post_id();
        match self.policy {
            UpdatePolicy::Confirmed => {
                let updated = self.store.preview(&cmd)?;
                if let Err(err) = self.remote.edit_post(&updated).await {
                    tracing::warn!(%post, ?err, "remote refused update, local state left untouched");
                    return Err(Error::Network(err));
                }
                Ok(self.store.commit(updated)?)
            }
            UpdatePolicy::Optimistic => {
                let updated = self.store.apply(cmd)?;
                if let Err(err) = self.remote.edit_post(&updated).await {
                    tracing::warn!(%post, ?err, "remote refused update, local state kept anyway");
                    return Err(Error::Network(err));
                }
                Ok(updated)
            }
        }
    }
}
