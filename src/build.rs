//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: parsing the posts
//! ([`crate::parser`]), indexing them by tag ([`crate::tag`]), rendering
//! pages through the layout template ([`crate::pages`]), writing them
//! ([`crate::write`]), and generating the RSS feed ([`crate::feed`]) and the
//! post index ([`crate::search_index`]).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::{
    config::{Config, Error as ConfigError},
    feed::{self, Error as FeedError, FeedConfig},
    pages::{self, Page, Settings},
    parser::{Error as ParseError, Parser as PostParser},
    post::Post,
    search_index::{self, POST_INDEX_PATH},
    tag::TagIndex,
    template::{Error as TemplateError, Template},
    write::{Error as WriteError, Writer},
};

/// The output path of the feed, relative to the output directory.
pub const FEED_PATH: &str = "feed.xml";

/// What a successful build produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// The number of posts (and therefore post pages).
    pub posts: usize,

    /// The number of distinct tags (and therefore tag pages).
    pub tags: usize,
}

/// Builds the site described by `config`, stamping the feed with the current
/// time.
pub fn build_site(config: &Config) -> Result<Summary> {
    build_site_at(config, Utc::now())
}

/// Builds the site with an explicit build time. Two builds of unchanged
/// input with the same `build_date` produce byte-identical output.
///
/// The phases run in order and each completes before the next starts: load
/// posts, index tags, load the layout, render pages, create the output
/// directory, write pages, write the feed, write the post index. The first
/// error aborts the build. A post whose page would land on the same path as
/// another page aborts the build before anything is written.
pub fn build_site_at(config: &Config, build_date: DateTime<Utc>) -> Result<Summary> {
    info!("building site into `{}`", config.output_directory.display());

    let posts = PostParser::new(&config.author, config.on_parse_error)
        .parse_posts(&config.posts_directory)?;
    let tags = TagIndex::from_posts(&posts);
    let template = Template::load(&config.layout_template)?;

    let settings = Settings {
        description: &config.description,
        default_read_time: &config.default_read_time,
    };
    let pages = pages::all_pages(&template, &settings, &posts, &tags);
    check_conflicts(&pages, &posts)?;

    let writer = Writer::create(&config.output_directory)?;
    writer.write_pages(&pages)?;
    info!("wrote {} pages", pages.len());

    let feed = feed::feed(
        &FeedConfig {
            title: &config.title,
            description: &config.description,
            language: &config.language,
            home_page: &config.site_url,
            size: config.feed_size,
        },
        &posts,
        build_date,
    )?;
    writer.write_file(FEED_PATH, feed.as_bytes())?;
    info!("wrote {}", FEED_PATH);

    if config.post_index {
        let index = search_index::post_index(&posts, &config.default_read_time)?;
        writer.write_file(POST_INDEX_PATH, index.as_bytes())?;
        info!("wrote {}", POST_INDEX_PATH);
    }

    Ok(Summary {
        posts: posts.len(),
        tags: tags.len(),
    })
}

fn check_conflicts(pages: &[Page], posts: &[Post]) -> Result<()> {
    let mut seen = HashSet::with_capacity(pages.len());
    for page in pages {
        if !seen.insert(page.file_name.as_str()) {
            // Generated page names never repeat, so one side is a post.
            let post = posts
                .iter()
                .find(|post| post.file_name() == page.file_name)
                .map_or_else(|| page.file_name.clone(), |post| post.slug.clone());
            return Err(Error::Conflict {
                file_name: page.file_name.clone(),
                post,
            });
        }
    }
    Ok(())
}

/// The two kinds of fatal build failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A directory or file couldn't be read or written.
    Io,

    /// Input was malformed: front matter, a date, the configuration, or a
    /// post whose output path collides with another page.
    Parse,
}

/// Represents the result of a build.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Every variant is fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned for errors loading the configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Returned for errors parsing posts.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Returned for errors loading the layout template.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Returned for errors writing output files.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Returned for errors rendering the feed.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Returned when two pages would be written to the same file, e.g. a
    /// post named `index`.
    #[error("post `{post}` conflicts with another page at `{file_name}`")]
    Conflict { file_name: String, post: String },

    /// Returned for errors serializing the post index.
    #[error("serializing post index: {0}")]
    PostIndex(#[from] serde_json::Error),
}

impl Error {
    /// Classifies the error as an I/O or a parse failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(err) => err.kind(),
            Error::Parse(err) => err.kind(),
            Error::Template(_) | Error::Write(_) => ErrorKind::Io,
            Error::Conflict { .. } => ErrorKind::Parse,
            Error::Feed(FeedError::NotABase(_)) => ErrorKind::Parse,
            Error::Feed(_) => ErrorKind::Io,
            Error::PostIndex(_) => ErrorKind::Io,
        }
    }
}
