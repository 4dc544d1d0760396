//! Defines the [`TagIndex`] type, which groups [`Post`]s by tag.

use std::collections::HashMap;

use crate::post::{Post, HTML_EXTENSION};

/// The posts carrying a single tag.
#[derive(Debug)]
pub struct TagGroup<'a> {
    /// The tag exactly as it appears in front matter.
    pub name: &'a str,

    /// The posts carrying the tag, in the order they were indexed.
    pub posts: Vec<&'a Post>,
}

impl TagGroup<'_> {
    /// The output file name of the tag page, e.g. `tag-python.html`.
    pub fn file_name(&self) -> String {
        file_name(self.name)
    }
}

/// The site-relative URL of a tag page, e.g. `/tag-python.html`.
pub fn url(tag: &str) -> String {
    format!("/{}", file_name(tag))
}

fn file_name(tag: &str) -> String {
    format!("tag-{}.{}", tag, HTML_EXTENSION)
}

/// A mapping from tag name to the posts carrying it. Tags iterate in the
/// order they were first encountered; see [`TagIndex::sorted`] for
/// alphabetical order.
#[derive(Debug, Default)]
pub struct TagIndex<'a> {
    groups: Vec<TagGroup<'a>>,
    positions: HashMap<&'a str, usize>,
}

impl<'a> TagIndex<'a> {
    /// Indexes `posts` by tag. For each post, for each of its tags in listed
    /// order, the post is appended to that tag's list. Since `posts` is
    /// normally sorted newest first, so is every tag's list.
    pub fn from_posts(posts: &'a [Post]) -> TagIndex<'a> {
        let mut index = TagIndex::default();
        for post in posts {
            for tag in &post.tags {
                match index.positions.get(tag.as_str()) {
                    Some(&i) => index.groups[i].posts.push(post),
                    None => {
                        index.positions.insert(tag.as_str(), index.groups.len());
                        index.groups.push(TagGroup {
                            name: tag.as_str(),
                            posts: vec![post],
                        });
                    }
                }
            }
        }
        index
    }

    /// The number of distinct tags.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The posts carrying `tag`, if any post does.
    pub fn get(&self, tag: &str) -> Option<&[&'a Post]> {
        self.positions
            .get(tag)
            .map(|&i| self.groups[i].posts.as_slice())
    }

    /// Iterates over tag groups in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &TagGroup<'a>> {
        self.groups.iter()
    }

    /// Returns the tag groups sorted alphabetically, case-insensitively, with
    /// exact-case order breaking ties.
    pub fn sorted(&self) -> Vec<&TagGroup<'a>> {
        let mut groups: Vec<&TagGroup<'a>> = self.groups.iter().collect();
        groups.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(b.name))
        });
        groups
    }
}
