use crate::{
    api::{CommentId, PostId},
    CommentForest, PostStore, Revision,
};

/// What one level of a comment thread shows: the comments directly under
/// `parent` (or under the post itself) and their reply counts.
///
/// The forest is only rebuilt when the store's revision of the post moved,
/// which happens on every refetch and every successful mutation, at any
/// depth. Views at different nesting levels need no coordination between
/// them: they all watch the same revision.
#[derive(Clone, Debug)]
pub struct ThreadView {
    post: PostId,
    parent: Option<CommentId>,
    built_at: Option<Revision>,
    forest: CommentForest,
}

impl ThreadView {
    pub fn new(post: PostId, parent: Option<CommentId>) -> ThreadView {
        ThreadView {
            post,
            parent,
            built_at: None,
            forest: CommentForest::default(),
        }
    }

    pub fn post_id(&self) -> PostId {
        self.post
    }

    pub fn parent(&self) -> Option<CommentId> {
        self.parent
    }

    /// Returns `None` while the post is not (or no longer) in the store
    pub fn refresh(&mut self, store: &PostStore) -> Option<&CommentForest> {
        let revision = store.revision(self.post)?;
        if self.built_at != Some(revision) {
            let post = store.post(self.post)?;
            tracing::debug!(post = %self.post, parent = ?self.parent, ?revision, "rebuilding thread view");
            self.forest = CommentForest::build(&post.comments, self.parent);
            self.built_at = Some(revision);
        }
        Some(&self.forest)
    }

    /// Whether the next [`ThreadView::refresh`] will rebuild
    pub fn is_stale(&self, store: &PostStore) -> bool {
        store.revision(self.post) != self.built_at
    }

    /// Reply count as of the last refresh
    pub fn reply_count(&self, id: CommentId) -> usize {
        self.forest.reply_count(id)
    }
}
