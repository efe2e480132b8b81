use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashMap},
};

use crate::api::{Comment, CommentId};

/// One level of a comment thread: the direct children of `parent`, newest
/// first, plus the number of replies every comment of the post has.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentForest {
    parent: Option<CommentId>,
    children: Vec<Comment>,
    reply_counts: HashMap<CommentId, usize>,
}

impl CommentForest {
    /// Single pass over the whole collection. Reply counts are computed for
    /// every comment of the post, not only for the requested level, so that
    /// each child can show its own reply badge without another pass.
    ///
    /// Children sharing a creation time keep the map order (ascending id,
    /// i.e. insertion order).
    pub fn build(
        comments: &BTreeMap<CommentId, Comment>,
        parent: Option<CommentId>,
    ) -> CommentForest {
        let mut children = Vec::new();
        let mut reply_counts = HashMap::new();
        for c in comments.values() {
            if c.parent_id == parent {
                children.push(c.clone());
            }
            if let Some(p) = c.parent_id {
                *reply_counts.entry(p).or_insert(0) += 1;
            }
        }
        // sort_by_key is stable
        children.sort_by_key(|c| Reverse(c.created_at.time()));
        tracing::trace!(
            ?parent,
            num_children = children.len(),
            num_comments = comments.len(),
            "built comment forest"
        );
        CommentForest {
            parent,
            children,
            reply_counts,
        }
    }

    pub fn parent(&self) -> Option<CommentId> {
        self.parent
    }

    pub fn direct_children(&self) -> &[Comment] {
        &self.children
    }

    pub fn reply_count(&self, id: CommentId) -> usize {
        self.reply_counts.get(&id).copied().unwrap_or(0)
    }

    pub fn reply_counts(&self) -> &HashMap<CommentId, usize> {
        &self.reply_counts
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Header shown above a list of `n` comments
pub fn comment_count_label(n: usize) -> String {
    match n {
        0 => String::new(),
        1 => String::from("1 Comment"),
        n => format!("{n} Comments"),
    }
}
