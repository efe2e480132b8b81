use crate::CommentId;

/// What a hug is being given to, within one post
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum HugTarget {
    Post,
    Comment(CommentId),
}
