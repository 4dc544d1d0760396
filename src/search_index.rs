//! The `data/posts.json` post index consumed by the browser-side search and
//! tag filtering scripts.

use serde::Serialize;

use crate::post::Post;

/// The output path of the post index, relative to the output directory.
pub const POST_INDEX_PATH: &str = "data/posts.json";

#[derive(Serialize)]
struct PostIndex<'a> {
    posts: Vec<Entry<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Entry<'a> {
    id: &'a str,
    title: &'a str,
    date: String,
    author: &'a str,
    excerpt: &'a str,
    tags: &'a [String],
    read_time: &'a str,
    url: &'a str,
}

/// Serializes `posts` (in the order given) as pretty-printed JSON.
pub fn post_index(posts: &[Post], default_read_time: &str) -> serde_json::Result<String> {
    let index = PostIndex {
        posts: posts
            .iter()
            .map(|post| Entry {
                id: &post.slug,
                title: &post.title,
                date: post.date.format("%Y-%m-%d").to_string(),
                author: &post.author,
                excerpt: post.excerpt(),
                tags: &post.tags,
                read_time: post.read_time(default_read_time),
                url: &post.url,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&index)
}
