mod comment;
pub use comment::{Comment, CommentId};

mod error;
pub use error::Error;

mod hug;
pub use hug::HugTarget;

mod post;
pub use post::{Post, PostId};

mod remote;
pub use remote::Remote;

pub mod time;
pub use time::{Time, Timestamp};

// The remote store accepts any string, but a null byte is never something a
// user meant to type and breaks some json consumers.
pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        return Err(Error::NullByteInString(String::from(s)));
    }
    Ok(())
}

/// Comment text must contain something other than whitespace
pub fn validate_comment_text(text: &str) -> Result<(), Error> {
    if text.trim().is_empty() {
        return Err(Error::EmptyText);
    }
    validate_string(text)
}
