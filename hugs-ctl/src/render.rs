use std::fmt::{self, Write};

use hugs_client::{
    api::{Post, Time},
    comment_count_label, time_since, CommentTree,
};

fn count(n: u64, one: &str, many: &str) -> String {
    match n {
        1 => format!("1 {one}"),
        n => format!("{n} {many}"),
    }
}

pub fn post_line(post: &Post, now: Time) -> String {
    format!(
        "#{} {} ({}, {}, {})",
        post.id,
        post.title,
        time_since(post.created_at.time(), now),
        count(post.num_hugs, "hug", "hugs"),
        count(post.comments.len() as u64, "comment", "comments"),
    )
}

pub fn post_detail(post: &Post, now: Time) -> Result<String, fmt::Error> {
    let mut res = String::new();
    writeln!(res, "{}", post.title)?;
    writeln!(
        res,
        "{} - {}",
        time_since(post.created_at.time(), now),
        count(post.num_hugs, "hug", "hugs")
    )?;
    writeln!(res)?;
    writeln!(res, "Patient Description: {}", post.patient_description)?;
    if !post.question.is_empty() {
        writeln!(res, "Question: {}", post.question)?;
    }
    writeln!(res)?;
    writeln!(res, "Assessment:")?;
    writeln!(res, "{}", post.assessment.trim_end())?;
    Ok(res)
}

pub fn thread(tree: &CommentTree, now: Time) -> Result<String, fmt::Error> {
    let mut res = String::new();
    let label = comment_count_label(tree.nodes.len());
    if !label.is_empty() {
        writeln!(res, "{label}")?;
    }
    for (depth, node) in tree.walk() {
        let indent = "    ".repeat(depth);
        let c = &node.comment;
        writeln!(
            res,
            "{indent}[{}] {} - {}",
            c.id,
            c.display_name,
            time_since(c.created_at.time(), now)
        )?;
        for line in c.text.lines() {
            writeln!(res, "{indent}  {line}")?;
        }
        writeln!(
            res,
            "{indent}  {}, {}",
            count(c.num_hugs, "hug", "hugs"),
            count(node.reply_count as u64, "reply", "replies")
        )?;
    }
    Ok(res)
}
