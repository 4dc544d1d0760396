//! Defines the [`Parser`] and [`Error`] types: the logic for loading posts
//! from the file system into memory. Each source file is split into its
//! YAML front matter and markdown body, the body is rendered to HTML, and
//! the resulting [`Post`]s are returned newest first.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    build::ErrorKind,
    markdown,
    post::{parse_date, Frontmatter, Post, HTML_EXTENSION, MARKDOWN_EXTENSION},
};

/// What to do when a post fails to parse.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorPolicy {
    /// Stop at the first post that fails to parse.
    #[default]
    FailFast,

    /// Parse every post, then report all failures together.
    Collect,
}

/// Parses [`Post`] objects from source files.
pub struct Parser<'a> {
    /// The author assigned to posts whose front matter doesn't name one.
    default_author: &'a str,

    /// How to treat posts that fail to parse.
    policy: ParseErrorPolicy,
}

impl<'a> Parser<'a> {
    /// Constructs a new parser. See fields on [`Parser`] for argument
    /// descriptions.
    pub fn new(default_author: &'a str, policy: ParseErrorPolicy) -> Parser<'a> {
        Parser {
            default_author,
            policy,
        }
    }

    /// Searches `source_directory` (not recursively) for post files
    /// (extension = `.md`) and returns them sorted by date, most recent
    /// first. Posts with equal dates keep file-name order. Each post file
    /// must be structured as follows:
    ///
    /// 1. Initial frontmatter fence (`---`) on its own line
    /// 2. YAML frontmatter with fields `title`, `date`, and optionally
    ///    `author`, `tags`, `description`, `excerpt` and `readTime`
    /// 3. Terminal frontmatter fence (`---`) on its own line
    /// 4. Post body
    ///
    /// For example:
    ///
    /// ```md
    /// ---
    /// title: Hello, world!
    /// date: 2024-04-16
    /// tags: [greet]
    /// ---
    /// # Hello
    ///
    /// World
    /// ```
    pub fn parse_posts(&self, source_directory: &Path) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        let mut errors = Vec::new();

        for result in WalkDir::new(source_directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = result?;
            if !entry.file_type().is_file()
                || entry.path().extension() != Some(OsStr::new(MARKDOWN_EXTENSION))
            {
                continue;
            }

            match self.parse_post(entry.path()) {
                Ok(post) => posts.push(post),
                Err(err) => match self.policy {
                    ParseErrorPolicy::FailFast => return Err(err),
                    ParseErrorPolicy::Collect => {
                        warn!("{}", err);
                        errors.push(err);
                    }
                },
            }
        }

        match errors.len() {
            0 => {}
            1 => return Err(errors.remove(0)),
            _ => return Err(Error::Multiple(errors)),
        }

        // `sort_by` is stable, so ties keep their file-name order.
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        info!(
            "loaded {} posts from `{}`",
            posts.len(),
            source_directory.display()
        );
        Ok(posts)
    }

    /// Parses the post at `path`, annotating any error with the path.
    fn parse_post(&self, path: &Path) -> Result<Post> {
        debug!("parsing `{}`", path.display());
        self._parse_post(path)
            .map_err(|err| Error::Annotated(path.to_owned(), Box::new(err)))
    }

    fn _parse_post(&self, path: &Path) -> Result<Post> {
        let contents = fs::read_to_string(path).map_err(|err| Error::Io {
            path: path.to_owned(),
            err,
        })?;

        let slug = path
            .file_stem()
            .and_then(OsStr::to_str)
            .ok_or_else(|| Error::InvalidFileName(path.to_owned()))?;

        self.parse_source(slug, &contents)
    }

    /// Parses a single [`Post`] from its `slug` and source text.
    pub fn parse_source(&self, slug: &str, input: &str) -> Result<Post> {
        let (yaml, body) = split_frontmatter(input)?;
        let frontmatter: Frontmatter = serde_yaml::from_str(yaml)?;
        let date = parse_date(&frontmatter.date)
            .ok_or_else(|| Error::InvalidDate(frontmatter.date.clone()))?;

        let mut post = Post {
            slug: slug.to_owned(),
            title: frontmatter.title,
            author: frontmatter
                .author
                .unwrap_or_else(|| self.default_author.to_owned()),
            date,
            description: frontmatter.description,
            excerpt: frontmatter.excerpt,
            tags: frontmatter.tags,
            body: String::new(),
            url: format!("/{}.{}", slug, HTML_EXTENSION),
            read_time: frontmatter.read_time,
        };
        markdown::to_html(&mut post.body, body);
        Ok(post)
    }
}

/// Splits `input` into its YAML front matter and its markdown body. The
/// fences must sit on their own lines; trailing whitespace and `\r\n` line
/// endings are tolerated.
fn split_frontmatter(input: &str) -> Result<(&str, &str)> {
    const FENCE: &str = "---";

    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines = input.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == FENCE => {
            let yaml_start = first.len();
            let mut offset = yaml_start;
            for line in lines {
                if line.trim_end() == FENCE {
                    return Ok((&input[yaml_start..offset], &input[offset + line.len()..]));
                }
                offset += line.len();
            }
            Err(Error::FrontmatterMissingEndFence)
        }
        _ => Err(Error::FrontmatterMissingStartFence),
    }
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing [`Post`] objects.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a post source file is missing its starting frontmatter
    /// fence (`---`).
    #[error("post must begin with `---`")]
    FrontmatterMissingStartFence,

    /// Returned when the starting fence was found but the ending one was
    /// missing.
    #[error("missing closing `---`")]
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    #[error("invalid front matter: {0}")]
    DeserializeYaml(#[from] serde_yaml::Error),

    /// Returned when the `date` field isn't a calendar date.
    #[error("invalid date `{0}`; expected `YYYY-MM-DD` or an RFC 3339 timestamp")]
    InvalidDate(String),

    /// Returned when a source file name isn't valid UTF-8.
    #[error("invalid file name: {0:?}")]
    InvalidFileName(PathBuf),

    /// Returned when a post file can't be read.
    #[error("reading `{}`: {}", path.display(), err)]
    Io { path: PathBuf, err: std::io::Error },

    /// Returned when the posts directory can't be read.
    #[error("reading posts directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// An error with the path of the post that caused it.
    #[error("parsing post `{}`: {}", .0.display(), .1)]
    Annotated(PathBuf, Box<Error>),

    /// Every failure from a build using [`ParseErrorPolicy::Collect`].
    #[error("{} posts failed to parse:\n{}", .0.len(), list(.0))]
    Multiple(Vec<Error>),
}

impl Error {
    /// Classifies the error. A batch of collected errors is an I/O error
    /// only when every one of them is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } | Error::WalkDir(_) => ErrorKind::Io,
            Error::Annotated(_, err) => err.kind(),
            Error::Multiple(errs) if errs.iter().all(|e| e.kind() == ErrorKind::Io) => {
                ErrorKind::Io
            }
            _ => ErrorKind::Parse,
        }
    }
}

fn list(errs: &[Error]) -> String {
    errs.iter()
        .map(|err| format!("  - {}", err))
        .collect::<Vec<_>>()
        .join("\n")
}
