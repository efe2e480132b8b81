use anyhow::{anyhow, Context};
use serde_json::json;

use crate::{CommentId, PostId};

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Post {0} not found")]
    PostNotFound(PostId),

    #[error("Comment {0} not found")]
    UnknownComment(CommentId),

    #[error("Parent comment {0} does not exist")]
    UnknownParent(CommentId),

    #[error("Comment id {0} already used")]
    CommentIdAlreadyUsed(CommentId),

    #[error("Post id in path ({path}) does not match post id in body ({body})")]
    PostIdMismatch { path: PostId, body: PostId },

    #[error("Comment text is empty")]
    EmptyText,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PostNotFound(_) => StatusCode::NOT_FOUND,
            Error::UnknownComment(_) => StatusCode::NOT_FOUND,
            Error::UnknownParent(_) => StatusCode::BAD_REQUEST,
            Error::CommentIdAlreadyUsed(_) => StatusCode::CONFLICT,
            Error::PostIdMismatch { .. } => StatusCode::BAD_REQUEST,
            Error::EmptyText => StatusCode::BAD_REQUEST,
            Error::NullByteInString(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::PostNotFound(id) => json!({
                "message": "post not found",
                "type": "post-not-found",
                "post": id,
            }),
            Error::UnknownComment(id) => json!({
                "message": "comment not found",
                "type": "unknown-comment",
                "comment": id,
            }),
            Error::UnknownParent(id) => json!({
                "message": "parent comment does not exist",
                "type": "unknown-parent",
                "comment": id,
            }),
            Error::CommentIdAlreadyUsed(id) => json!({
                "message": "comment id conflict",
                "type": "conflict-comment-id",
                "comment": id,
            }),
            Error::PostIdMismatch { path, body } => json!({
                "message": "post id in path does not match post id in body",
                "type": "post-id-mismatch",
                "path": path,
                "body": body,
            }),
            Error::EmptyText => json!({
                "message": "comment text is empty",
                "type": "empty-text",
            }),
            Error::NullByteInString(s) => json!({
                "message": "there was a null byte in argument string",
                "type": "null-byte",
                "string": s,
            }),
        })
        .expect("serializing json values cannot fail")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let id = |field: &str| {
            data.get(field)
                .and_then(|id| id.as_i64())
                .ok_or_else(|| anyhow!("error has no integer {field:?} field"))
        };
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(String::from(
                    data.get("message")
                        .and_then(|msg| msg.as_str())
                        .unwrap_or(""),
                )),
                "post-not-found" => Error::PostNotFound(PostId(id("post")?)),
                "unknown-comment" => Error::UnknownComment(CommentId(id("comment")?)),
                "unknown-parent" => Error::UnknownParent(CommentId(id("comment")?)),
                "conflict-comment-id" => Error::CommentIdAlreadyUsed(CommentId(id("comment")?)),
                "post-id-mismatch" => Error::PostIdMismatch {
                    path: PostId(id("path")?),
                    body: PostId(id("body")?),
                },
                "empty-text" => Error::EmptyText,
                "null-byte" => Error::NullByteInString(String::from(
                    data.get("string").and_then(|s| s.as_str()).ok_or_else(|| {
                        anyhow!("error is a null-byte-in-string without a string")
                    })?,
                )),
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}
