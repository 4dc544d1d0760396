//! Defines the [`Post`] type and its [`Frontmatter`] source representation.
//! Posts are created once by [`crate::parser::Parser`] and are read-only for
//! the rest of the build.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// The file extension for post source files.
pub const MARKDOWN_EXTENSION: &str = "md";

/// The file extension for rendered pages.
pub const HTML_EXTENSION: &str = "html";

/// A single blog post.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The file name of the source file less its extension. Unique across
    /// all posts and used to form output paths.
    pub slug: String,

    /// The title of the post.
    pub title: String,

    /// The author of the post. Falls back to the site author when the
    /// front matter doesn't name one.
    pub author: String,

    /// The publication date. Date-only front matter values are midnight.
    pub date: NaiveDateTime,

    /// The explicit description from the front matter, if any.
    pub description: Option<String>,

    /// The explicit excerpt from the front matter, if any.
    pub excerpt: Option<String>,

    /// The tags associated with the post, in the order they were listed.
    pub tags: Vec<String>,

    /// The rendered HTML body.
    pub body: String,

    /// The site-relative URL of the post page, e.g. `/hello-world.html`.
    pub url: String,

    /// The read-time label from the front matter, if any.
    pub read_time: Option<String>,
}

impl Post {
    /// The excerpt shown on list pages: the explicit excerpt, else the
    /// description, else nothing. Empty values count as unset.
    pub fn excerpt(&self) -> &str {
        non_empty(&self.excerpt)
            .or_else(|| non_empty(&self.description))
            .unwrap_or_default()
    }

    /// The description used for page metadata and feed items: the explicit
    /// description, else the excerpt, else nothing. Empty values count as
    /// unset.
    pub fn description(&self) -> &str {
        non_empty(&self.description)
            .or_else(|| non_empty(&self.excerpt))
            .unwrap_or_default()
    }

    /// The read-time label, or `default` when the post doesn't set one or
    /// sets it empty.
    pub fn read_time<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(&self.read_time).unwrap_or(default)
    }

    /// The output file name of the post page, e.g. `hello-world.html`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.slug, HTML_EXTENSION)
    }

    /// The date in long US form, e.g. `January 5, 2024`.
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// The YAML metadata block at the top of a post source file.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Frontmatter {
    pub title: String,

    pub date: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default, rename = "readTime")]
    pub read_time: Option<String>,
}

/// Parses a front matter date. Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`
/// and RFC 3339 timestamps (normalized to UTC).
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|datetime| datetime.naive_utc())
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Builds a post with the given slug, date and tags for tests across
    /// the crate.
    pub fn post(slug: &str, date: &str, tags: &[&str]) -> Post {
        Post {
            slug: slug.to_owned(),
            title: slug.to_uppercase(),
            author: String::from("Ada"),
            date: parse_date(date).unwrap(),
            description: None,
            excerpt: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            body: String::new(),
            url: format!("/{}.html", slug),
            read_time: None,
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let midnight = day.and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-01-05"), Some(midnight));
        assert_eq!(parse_date("2024-01-05 13:30:00"), day.and_hms_opt(13, 30, 0));
        assert_eq!(
            parse_date("2024-01-05T02:00:00+02:00"),
            Some(midnight)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_excerpt_falls_back_to_description() {
        let mut p = post("a", "2024-01-01", &[]);
        assert_eq!(p.excerpt(), "");
        assert_eq!(p.description(), "");

        p.description = Some(String::from("desc"));
        assert_eq!(p.excerpt(), "desc");

        p.excerpt = Some(String::from("exc"));
        assert_eq!(p.excerpt(), "exc");
        assert_eq!(p.description(), "desc");
    }

    #[test]
    fn test_read_time_default() {
        let mut p = post("a", "2024-01-01", &[]);
        assert_eq!(p.read_time("5 min read"), "5 min read");
        p.read_time = Some(String::from("8 min read"));
        assert_eq!(p.read_time("5 min read"), "8 min read");
    }

    #[test]
    fn test_empty_values_fall_back() {
        let mut p = post("a", "2024-01-01", &[]);
        p.excerpt = Some(String::new());
        p.description = Some(String::from("D"));
        p.read_time = Some(String::new());
        assert_eq!(p.excerpt(), "D");
        assert_eq!(p.read_time("5 min read"), "5 min read");

        p.description = Some(String::new());
        p.excerpt = Some(String::from("E"));
        assert_eq!(p.description(), "E");
    }

    #[test]
    fn test_display_date() {
        assert_eq!(post("a", "2024-01-05", &[]).display_date(), "January 5, 2024");
    }
}
