use std::{collections::BTreeMap, fmt};

use crate::{Comment, CommentId, Error, HugTarget, Timestamp};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: PostId,

    #[serde(default)]
    pub post_url: String,

    pub title: String,

    pub created_at: Timestamp,

    pub num_hugs: u64,
    pub patient_description: String,

    /// Markdown
    pub assessment: String,

    #[serde(default)]
    pub question: String,

    /// On the wire this is a json object keyed by the stringified id
    #[serde(default)]
    pub comments: BTreeMap<CommentId, Comment>,
}

impl Post {
    /// Ids are handed out as `count + 1`, which only stays unique because
    /// comments are never deleted.
    pub fn next_comment_id(&self) -> CommentId {
        CommentId(self.comments.len() as i64 + 1)
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.get(&id)
    }

    pub fn has_comment(&self, id: CommentId) -> bool {
        self.comments.contains_key(&id)
    }

    /// Inserts `comment` under its own id, refusing to overwrite an existing
    /// one or to attach it to a comment that does not exist.
    pub fn insert_comment(&mut self, comment: Comment) -> Result<(), Error> {
        if self.comments.contains_key(&comment.id) {
            return Err(Error::CommentIdAlreadyUsed(comment.id));
        }
        if let Some(parent) = comment.parent_id {
            if !self.comments.contains_key(&parent) {
                return Err(Error::UnknownParent(parent));
            }
        }
        self.comments.insert(comment.id, comment);
        Ok(())
    }

    /// Adds one hug to the target and returns its new count
    pub fn hug(&mut self, target: HugTarget) -> Result<u64, Error> {
        let counter = match target {
            HugTarget::Post => &mut self.num_hugs,
            HugTarget::Comment(id) => {
                &mut self
                    .comments
                    .get_mut(&id)
                    .ok_or(Error::UnknownComment(id))?
                    .num_hugs
            }
        };
        *counter += 1;
        Ok(*counter)
    }

    pub fn hugs(&self, target: HugTarget) -> Option<u64> {
        match target {
            HugTarget::Post => Some(self.num_hugs),
            HugTarget::Comment(id) => self.comments.get(&id).map(|c| c.num_hugs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time;

    fn sample_json() -> &'static str {
        r#"{
            "id": 7,
            "post_url": "example-post",
            "title": "Persistent headache",
            "created_at": "2024-02-15T19:43:03.999084",
            "num_hugs": 4,
            "patient_description": "Headache for a week.",
            "assessment": "**Likely** tension headache.",
            "question": "Should I worry?",
            "comments": {
                "1": {
                    "id": 1,
                    "parent_id": null,
                    "display_name": "Bob",
                    "text": "Hang in there",
                    "created_at": "2024-02-16T10:00:00Z",
                    "num_hugs": 2
                },
                "2": {
                    "id": 2,
                    "parent_id": 1,
                    "display_name": "Alice",
                    "text": "Same here",
                    "created_at": "2024-02-16T11:00:00.123Z",
                    "num_hugs": 0
                }
            }
        }"#
    }

    #[test]
    fn decodes_wire_format() {
        let p: Post = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(p.id, PostId(7));
        assert_eq!(p.comments.len(), 2);
        let reply = &p.comments[&CommentId(2)];
        assert_eq!(reply.parent_id, Some(CommentId(1)));
        assert_eq!(
            reply.created_at.time(),
            time::parse("2024-02-16T11:00:00.123Z").unwrap()
        );
        assert_eq!(p.next_comment_id(), CommentId(3));
    }

    #[test]
    fn encodes_comment_keys_as_strings() {
        let p: Post = serde_json::from_str(sample_json()).unwrap();
        let v = serde_json::to_value(&p).unwrap();
        assert!(v["comments"]["1"].is_object());
        assert_eq!(v["comments"]["2"]["parent_id"], 1);
        assert_eq!(v["created_at"], "2024-02-15T19:43:03.999084");
    }

    #[test]
    fn edits_keep_every_timestamp() {
        let mut p: Post = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "t",
                "created_at": "2024-02-15T19:43:03.5",
                "num_hugs": 0,
                "patient_description": "",
                "assessment": "",
                "comments": {
                    "1": {
                        "id": 1,
                        "parent_id": null,
                        "display_name": "a",
                        "text": "first",
                        "created_at": "2024-02-15T19:43:03.999084",
                        "num_hugs": 0
                    },
                    "2": {
                        "id": 2,
                        "parent_id": null,
                        "display_name": "b",
                        "text": "second",
                        "created_at": "2024-02-15T19:43:03.999884",
                        "num_hugs": 0
                    }
                }
            }"#,
        )
        .unwrap();
        p.hug(HugTarget::Post).unwrap();
        p.hug(HugTarget::Comment(CommentId(1))).unwrap();

        let sent: Post = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        assert_eq!(sent.created_at.as_str(), "2024-02-15T19:43:03.5");
        let first = &sent.comments[&CommentId(1)].created_at;
        let second = &sent.comments[&CommentId(2)].created_at;
        assert_eq!(first.as_str(), "2024-02-15T19:43:03.999084");
        assert_eq!(second.as_str(), "2024-02-15T19:43:03.999884");
        assert!(first < second);
        assert_eq!(sent.num_hugs, 1);
    }

    #[test]
    fn optional_fields_default() {
        let p: Post = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "t",
                "created_at": "2024-01-01T00:00:00Z",
                "num_hugs": 0,
                "patient_description": "",
                "assessment": ""
            }"#,
        )
        .unwrap();
        assert!(p.comments.is_empty());
        assert_eq!(p.post_url, "");
        assert_eq!(p.next_comment_id(), CommentId(1));
    }

    #[test]
    fn insert_checks_parent_and_id() {
        let mut p: Post = serde_json::from_str(sample_json()).unwrap();
        let mut c = p.comments[&CommentId(2)].clone();
        assert_eq!(
            p.insert_comment(c.clone()),
            Err(Error::CommentIdAlreadyUsed(CommentId(2)))
        );
        c.id = p.next_comment_id();
        c.parent_id = Some(CommentId(42));
        assert_eq!(
            p.insert_comment(c.clone()),
            Err(Error::UnknownParent(CommentId(42)))
        );
        c.parent_id = Some(CommentId(2));
        p.insert_comment(c).unwrap();
        assert_eq!(p.comments.len(), 3);
    }

    #[test]
    fn hugs_increment_by_one() {
        let mut p: Post = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(p.hug(HugTarget::Post), Ok(5));
        assert_eq!(p.hug(HugTarget::Comment(CommentId(2))), Ok(1));
        assert_eq!(p.hug(HugTarget::Comment(CommentId(2))), Ok(2));
        assert_eq!(
            p.hug(HugTarget::Comment(CommentId(9))),
            Err(Error::UnknownComment(CommentId(9)))
        );
        assert_eq!(p.hugs(HugTarget::Comment(CommentId(1))), Some(2));
        assert_eq!(p.hugs(HugTarget::Post), Some(5));
    }
}
