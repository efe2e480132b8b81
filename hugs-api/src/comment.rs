use std::fmt;

use crate::Timestamp;

/// Identifies a comment within its post. Ids are 1-based and only unique per
/// post.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,

    /// `None` for comments attached directly to the post
    pub parent_id: Option<CommentId>,

    pub display_name: String,
    pub text: String,

    pub created_at: Timestamp,

    pub num_hugs: u64,
}
