use std::collections::BTreeMap;

use chrono::{Duration, SubsecRound, Utc};
use hugs_api::{Comment, CommentId, Post, PostId};
use rand::Rng;

const NUM_POSTS: i64 = 20;
const MAX_COMMENTS_PER_POST: i64 = 25;
const MAX_HUGS: u64 = 40;

// Chance for a comment to be a reply rather than a top-level comment
const REPLY_PROBABILITY: f64 = 0.6;

const DESCRIPTION_WORD_COUNT: usize = 40;
const ASSESSMENT_PARAGRAPH_COUNT: usize = 3;
const ASSESSMENT_PARAGRAPH_WORDS: usize = 30;
const COMMENT_MAX_WORDS: usize = 25;

const NAMES: &[&str] = &["MDandMe", "Alice", "Bob", "Carol", "Dan", "Erin"];

fn gen_assessment(rng: &mut impl Rng) -> String {
    let mut res = format!("## {}\n", lipsum::lipsum_title());
    for _ in 0..ASSESSMENT_PARAGRAPH_COUNT {
        res += &format!("\n{}\n", lipsum::lipsum_words(ASSESSMENT_PARAGRAPH_WORDS));
        if rng.gen_bool(0.5) {
            res += &format!("\n- **{}**\n- {}\n", lipsum::lipsum_words(3), lipsum::lipsum_words(5));
        }
    }
    res
}

fn gen_comments(
    rng: &mut impl Rng,
    post_date: hugs_api::Time,
    now: hugs_api::Time,
) -> BTreeMap<CommentId, Comment> {
    let mut comments = BTreeMap::new();
    let mut date = post_date;
    for i in 1..=rng.gen_range(0..=MAX_COMMENTS_PER_POST) {
        // comments come in id order, so a reply is always younger than its parent
        date = (date + Duration::minutes(rng.gen_range(1..600))).min(now);
        let parent_id = match i > 1 && rng.gen_bool(REPLY_PROBABILITY) {
            true => Some(CommentId(rng.gen_range(1..i))),
            false => None,
        };
        comments.insert(
            CommentId(i),
            Comment {
                id: CommentId(i),
                parent_id,
                display_name: String::from(NAMES[rng.gen_range(0..NAMES.len())]),
                text: lipsum::lipsum_words(rng.gen_range(1..=COMMENT_MAX_WORDS)),
                created_at: date.into(),
                num_hugs: rng.gen_range(0..=MAX_HUGS / 4),
            },
        );
    }
    comments
}

fn main() {
    let mut rng = rand::thread_rng();
    let now = Utc::now().trunc_subsecs(3);
    let posts = (1..=NUM_POSTS)
        .map(|id| {
            let created_at = now - Duration::minutes(rng.gen_range(60..60 * 24 * 90));
            Post {
                id: PostId(id),
                post_url: format!("post-{id}"),
                title: lipsum::lipsum_title(),
                created_at: created_at.into(),
                num_hugs: rng.gen_range(0..=MAX_HUGS),
                patient_description: lipsum::lipsum_words(DESCRIPTION_WORD_COUNT),
                assessment: gen_assessment(&mut rng),
                question: format!("{}?", lipsum::lipsum_words(8)),
                comments: gen_comments(&mut rng, created_at, now),
            }
        })
        .collect::<Vec<_>>();
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({ "posts": posts }))
            .expect("serializing generated posts")
    );
}
