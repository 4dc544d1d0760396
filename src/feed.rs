//! Support for creating RSS 2.0 feeds from a list of posts.

use std::io::{Cursor, Write};

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::{
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use thiserror::Error;
use url::Url;

use crate::post::Post;

/// The number of posts in a feed unless configured otherwise.
pub const DEFAULT_FEED_SIZE: usize = 10;

/// Bundled configuration for creating a feed.
pub struct FeedConfig<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub language: &'a str,

    /// The site root. Item links are post URLs resolved against it.
    pub home_page: &'a Url,

    /// The maximum number of items.
    pub size: usize,
}

/// Renders the feed for the first `config.size` of `posts`, which should be
/// sorted newest first. `build_date` becomes the channel's `lastBuildDate`.
/// Every text node escapes exactly `<`, `>`, `&`, `'` and `"`.
pub fn feed(config: &FeedConfig, posts: &[Post], build_date: DateTime<Utc>) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    write_event(&mut writer, Event::Start(rss))?;
    write_event(&mut writer, Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", config.title)?;
    text_element(&mut writer, "link", config.home_page.as_str())?;
    text_element(&mut writer, "description", config.description)?;
    text_element(&mut writer, "language", config.language)?;
    text_element(&mut writer, "lastBuildDate", &rfc2822(build_date.naive_utc()))?;

    for post in posts.iter().take(config.size) {
        let link = post_link(config.home_page, post)?;
        write_event(&mut writer, Event::Start(BytesStart::new("item")))?;
        text_element(&mut writer, "title", &post.title)?;
        text_element(&mut writer, "link", link.as_str())?;
        text_element(&mut writer, "description", post.description())?;
        text_element(&mut writer, "pubDate", &rfc2822(post.date))?;
        text_element(&mut writer, "guid", link.as_str())?;
        write_event(&mut writer, Event::End(BytesEnd::new("item")))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("channel")))?;
    write_event(&mut writer, Event::End(BytesEnd::new("rss")))?;

    let mut xml = String::from_utf8(writer.into_inner().into_inner()).map_err(Error::xml)?;
    xml.push('\n');
    Ok(xml)
}

/// Resolves the post page against the site root. The file name is pushed as
/// a single path segment, so `#`, `?` and `/` in a slug are percent-encoded.
fn post_link(home_page: &Url, post: &Post) -> Result<Url> {
    let mut link = home_page.clone();
    link.path_segments_mut()
        .map_err(|()| Error::NotABase(home_page.to_string()))?
        .pop_if_empty()
        .push(&post.file_name());
    Ok(link)
}

/// Formats a UTC date-time the way HTTP and RSS readers expect, e.g.
/// `Mon, 01 Jan 2024 00:00:00 GMT`.
fn rfc2822(date: NaiveDateTime) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new(tag)))?;
    write_event(writer, Event::Text(BytesText::from_escaped(escape(text))))?;
    write_event(writer, Event::End(BytesEnd::new(tag)))
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event) -> Result<()> {
    writer.write_event(event).map_err(Error::xml)
}

/// The result of a fallible feed operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the XML document can't be produced.
    #[error("serializing feed: {0}")]
    Xml(Box<dyn std::error::Error + Send + Sync>),

    /// Returned when post links can't be resolved against the site URL.
    #[error("site url `{0}` cannot be a base for post links")]
    NotABase(String),
}

impl Error {
    fn xml<E: std::error::Error + Send + Sync + 'static>(err: E) -> Error {
        Error::Xml(Box::new(err))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::post::test::post;
    use chrono::TimeZone;

    fn build_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
    }

    fn render(posts: &[Post]) -> String {
        let home_page = Url::parse("https://example.com/").unwrap();
        let config = FeedConfig {
            title: "ML Blog",
            description: "A minimalist Machine Learning blog",
            language: "en-us",
            home_page: &home_page,
            size: DEFAULT_FEED_SIZE,
        };
        feed(&config, posts, build_date()).unwrap()
    }

    #[test]
    fn test_channel() {
        let xml = render(&[]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains("<title>ML Blog</title>"));
        assert!(xml.contains("<link>https://example.com/</link>"));
        assert!(xml.contains("<language>en-us</language>"));
        assert!(xml.contains("<lastBuildDate>Mon, 06 May 2024 07:08:09 GMT</lastBuildDate>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_item() {
        let mut p = post("hello", "2024-01-01", &["x"]);
        p.title = String::from("Hello");
        p.excerpt = Some(String::from("An excerpt"));
        let xml = render(&[p]);

        assert!(xml.contains("<title>Hello</title>"));
        assert!(xml.contains("<link>https://example.com/hello.html</link>"));
        assert!(xml.contains("<guid>https://example.com/hello.html</guid>"));
        assert!(xml.contains("<description>An excerpt</description>"));
        assert!(xml.contains("<pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>"));
    }

    #[test]
    fn test_item_count_is_capped() {
        let posts: Vec<Post> = (1..=12)
            .map(|day| post(&format!("p{}", day), &format!("2024-01-{:02}", 13 - day), &[]))
            .collect();
        assert_eq!(render(&posts).matches("<item>").count(), 10);
        assert_eq!(render(&posts[..3]).matches("<item>").count(), 3);

        // The first ten of the sorted list, not any ten.
        let xml = render(&posts);
        assert!(xml.contains("/p10.html"));
        assert!(!xml.contains("/p11.html"));
    }

    #[test]
    fn test_item_link_encodes_slug() {
        let xml = render(&[
            post("c#-tips", "2024-01-02", &[]),
            post("what?", "2024-01-01", &[]),
        ]);
        assert!(xml.contains("<link>https://example.com/c%23-tips.html</link>"));
        assert!(xml.contains("<guid>https://example.com/c%23-tips.html</guid>"));
        assert!(xml.contains("<link>https://example.com/what%3F.html</link>"));
    }

    #[test]
    fn test_item_link_under_subpath() {
        let home_page = Url::parse("https://example.com/blog/").unwrap();
        let config = FeedConfig {
            title: "",
            description: "",
            language: "",
            home_page: &home_page,
            size: DEFAULT_FEED_SIZE,
        };
        let xml = feed(&config, &[post("hello", "2024-01-01", &[])], build_date()).unwrap();
        assert!(xml.contains("<link>https://example.com/blog/hello.html</link>"));
    }

    #[test]
    fn test_escaping() {
        let mut p = post("e", "2024-01-01", &[]);
        p.title = String::from("a < b > c & d");
        p.description = Some(String::from("it's \"quoted\" é"));
        let xml = render(&[p]);

        assert!(xml.contains("<title>a &lt; b &gt; c &amp; d</title>"));
        assert!(xml.contains("<description>it&apos;s &quot;quoted&quot; é</description>"));
    }
}
