use std::collections::{BTreeMap, HashSet};

use crate::{
    api::{Comment, CommentId},
    CommentForest,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub reply_count: usize,

    /// Newest first
    pub replies: Vec<CommentNode>,
}

/// A fully expanded thread, built by applying [`CommentForest::build`] again
/// at every comment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentTree {
    pub root: Option<CommentId>,
    pub nodes: Vec<CommentNode>,
}

impl CommentTree {
    /// Comments whose parent does not exist are never reachable and thus not
    /// part of the tree.
    pub fn build(comments: &BTreeMap<CommentId, Comment>, root: Option<CommentId>) -> CommentTree {
        let mut visited = HashSet::new();
        if let Some(r) = root {
            visited.insert(r);
        }
        CommentTree {
            root,
            nodes: build_level(comments, root, &mut visited),
        }
    }

    /// Number of comments in the tree, at any depth
    pub fn len(&self) -> usize {
        fn count(nodes: &[CommentNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.replies)).sum()
        }
        count(&self.nodes)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first walk, yielding each node along with its nesting depth
    /// (0 for the nodes directly under the root)
    pub fn walk(&self) -> Vec<(usize, &CommentNode)> {
        fn go<'a>(nodes: &'a [CommentNode], depth: usize, res: &mut Vec<(usize, &'a CommentNode)>) {
            for n in nodes {
                res.push((depth, n));
                go(&n.replies, depth + 1, res);
            }
        }
        let mut res = Vec::new();
        go(&self.nodes, 0, &mut res);
        res
    }
}

fn build_level(
    comments: &BTreeMap<CommentId, Comment>,
    parent: Option<CommentId>,
    visited: &mut HashSet<CommentId>,
) -> Vec<CommentNode> {
    let forest = CommentForest::build(comments, parent);
    let mut res = Vec::with_capacity(forest.len());
    for c in forest.direct_children() {
        // the remote store does not prevent cycles, so do not trust it
        if !visited.insert(c.id) {
            tracing::warn!(comment = %c.id, "comment reachable twice, ignoring");
            continue;
        }
        res.push(CommentNode {
            comment: c.clone(),
            reply_count: forest.reply_count(c.id),
            replies: build_level(comments, Some(c.id), visited),
        });
    }
    res
}
