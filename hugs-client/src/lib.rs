mod error;
pub use error::Error;

mod forest;
pub use forest::{comment_count_label, CommentForest};

mod http_remote;
pub use http_remote::HttpRemote;

mod service;
pub use service::{MutationService, UpdatePolicy};

mod store;
pub use store::{Command, PostStore, Revision};

mod thread;
pub use thread::ThreadView;

mod time_since;
pub use time_since::{time_since, time_since_now};

mod tree;
pub use tree::{CommentNode, CommentTree};

pub mod api {
    pub use hugs_api::*;
}
