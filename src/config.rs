//! Loads the site [`Config`] from a `folio.yaml` project file. Every key is
//! optional; a project without the file builds with the defaults below,
//! relative to the project root.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::{build::ErrorKind, feed::DEFAULT_FEED_SIZE, parser::ParseErrorPolicy};

/// The name of the project file.
pub const PROJECT_FILE: &str = "folio.yaml";

/// The name of the layout template inside the templates directory.
pub const LAYOUT_TEMPLATE: &str = "layout.html";

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Project {
    title: String,
    description: String,
    url: String,
    language: String,
    author: String,
    posts_directory: PathBuf,
    templates_directory: PathBuf,
    output_directory: PathBuf,
    feed_size: usize,
    default_read_time: String,
    on_parse_error: ParseErrorPolicy,
    post_index: bool,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            title: String::from("ML Blog"),
            description: String::from("A minimalist Machine Learning blog"),
            url: String::from("https://yourdomain.github.io"),
            language: String::from("en-us"),
            author: String::new(),
            posts_directory: PathBuf::from("posts"),
            templates_directory: PathBuf::from("templates"),
            output_directory: PathBuf::from("public"),
            feed_size: DEFAULT_FEED_SIZE,
            default_read_time: String::from("5 min read"),
            on_parse_error: ParseErrorPolicy::default(),
            post_index: true,
        }
    }
}

/// The resolved configuration for a build. Paths are joined onto the
/// project root.
#[derive(Clone, Debug)]
pub struct Config {
    pub title: String,
    pub description: String,

    /// The site root. Always ends in `/`, so post URLs resolve beneath it.
    pub site_url: Url,

    pub language: String,

    /// The author of posts that don't name one.
    pub author: String,

    pub posts_directory: PathBuf,
    pub layout_template: PathBuf,
    pub output_directory: PathBuf,

    /// The maximum number of feed items.
    pub feed_size: usize,

    /// The read-time label of posts that don't set one.
    pub default_read_time: String,

    pub on_parse_error: ParseErrorPolicy,

    /// Whether to write `data/posts.json`.
    pub post_index: bool,
}

impl Config {
    /// Looks for [`PROJECT_FILE`] in `dir` and then in each of its parents.
    /// When no project file exists, returns the defaults rooted at `dir`.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        match dir
            .ancestors()
            .map(|ancestor| ancestor.join(PROJECT_FILE))
            .find(|path| path.is_file())
        {
            Some(path) => Config::from_project_file(&path),
            None => {
                info!(
                    "no `{}` found; using defaults rooted at `{}`",
                    PROJECT_FILE,
                    dir.display()
                );
                Config::from_project(Project::default(), dir)
            }
        }
    }

    /// Loads the project file at `path`. Relative paths inside it are
    /// resolved against the file's directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        debug!("loading project file `{}`", path.display());
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file).map_err(|err| Error::Parse {
            path: path.to_owned(),
            err,
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Config::from_project(project, root)
    }

    fn from_project(project: Project, root: &Path) -> Result<Config> {
        Ok(Config {
            site_url: site_url(&project.url)?,
            title: project.title,
            description: project.description,
            language: project.language,
            author: project.author,
            posts_directory: root.join(project.posts_directory),
            layout_template: root
                .join(project.templates_directory)
                .join(LAYOUT_TEMPLATE),
            output_directory: root.join(project.output_directory),
            feed_size: project.feed_size,
            default_read_time: project.default_read_time,
            on_parse_error: project.on_parse_error,
            post_index: project.post_index,
        })
    }
}

/// Parses the site URL and gives it a trailing slash.
fn site_url(s: &str) -> Result<Url> {
    let mut url = Url::parse(s).map_err(|err| Error::Url {
        url: s.to_owned(),
        err,
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::NotABase(s.to_owned()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("opening project file `{}`: {}", path.display(), err)]
    Open { path: PathBuf, err: std::io::Error },

    #[error("parsing project file `{}`: {}", path.display(), err)]
    Parse {
        path: PathBuf,
        err: serde_yaml::Error,
    },

    #[error("invalid site url `{url}`: {err}")]
    Url { url: String, err: url::ParseError },

    #[error("invalid site url `{0}`: not a base URL")]
    NotABase(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. } => ErrorKind::Io,
            _ => ErrorKind::Parse,
        }
    }
}
