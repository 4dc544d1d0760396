//! The layout [`Template`]: a single HTML file with `{{title}}`,
//! `{{description}}` and `{{content}}` placeholders.
//!
//! All placeholders are substituted together from a [`Context`] in a single
//! left-to-right pass. Every occurrence of a placeholder is replaced, and
//! substituted text is never scanned again, so a post whose body contains
//! `{{title}}` renders that text literally. Values are inserted verbatim:
//! nothing is HTML-escaped, so titles and descriptions must be trusted.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::warn;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// The placeholders a layout is expected to contain.
pub const PLACEHOLDERS: [&str; 3] = ["title", "description", "content"];

/// The page-specific strings substituted into a [`Template`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Context<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub content: &'a str,
}

impl<'a> Context<'a> {
    fn lookup(&self, name: &str) -> Option<&'a str> {
        match name {
            "title" => Some(self.title),
            "description" => Some(self.description),
            "content" => Some(self.content),
            _ => None,
        }
    }
}

/// A parsed layout template. Read-only once loaded, so one instance renders
/// every page of a build.
#[derive(Clone, Debug)]
pub struct Template {
    source: String,
}

impl Template {
    /// Loads the layout at `path`. Logs a warning for every expected
    /// placeholder the layout lacks.
    pub fn load(path: &Path) -> Result<Template> {
        let source = fs::read_to_string(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let template = Template::new(source);
        for name in template.missing_placeholders() {
            warn!(
                "layout `{}` has no `{{{{{}}}}}` placeholder",
                path.display(),
                name
            );
        }
        Ok(template)
    }

    /// Creates a template from layout source already in memory.
    pub fn new(source: impl Into<String>) -> Template {
        Template {
            source: source.into(),
        }
    }

    /// The expected placeholders that never appear in the template.
    pub fn missing_placeholders(&self) -> Vec<&'static str> {
        PLACEHOLDERS
            .iter()
            .copied()
            .filter(|name| !self.source.contains(&format!("{}{}{}", OPEN, name, CLOSE)))
            .collect()
    }

    /// Renders the template with `context`. Tokens naming unknown
    /// placeholders, and unterminated `{{`, are copied through unchanged.
    pub fn render(&self, context: &Context) -> String {
        let mut out = String::with_capacity(
            self.source.len() + context.title.len() + context.description.len() + context.content.len(),
        );
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            match after_open.find(CLOSE) {
                Some(end) => match context.lookup(after_open[..end].trim()) {
                    Some(value) => {
                        out.push_str(value);
                        rest = &after_open[end + CLOSE.len()..];
                    }
                    None => {
                        out.push_str(OPEN);
                        rest = after_open;
                    }
                },
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a [`Template`].
#[derive(Debug, Error)]
pub enum Error {
    /// Returned for I/O problems while opening template files.
    #[error("opening template file `{}`: {}", path.display(), err)]
    Open { path: PathBuf, err: std::io::Error },
}

#[cfg(test)]
mod test {
    use super::*;

    fn context() -> Context<'static> {
        Context {
            title: "T",
            description: "D",
            content: "<p>C</p>",
        }
    }

    #[test]
    fn test_render() {
        let template = Template::new(
            "<title>{{title}}</title><meta content=\"{{description}}\"><main>{{content}}</main>",
        );
        assert_eq!(
            template.render(&context()),
            "<title>T</title><meta content=\"D\"><main><p>C</p></main>"
        );
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let template = Template::new("{{title}} | {{title}}");
        assert_eq!(template.render(&context()), "T | T");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let template = Template::new("<h1>{{title}}</h1>{{content}}");
        let ctx = Context {
            title: "{{content}}",
            description: "",
            content: "{{title}}",
        };
        assert_eq!(template.render(&ctx), "<h1>{{content}}</h1>{{title}}");
    }

    #[test]
    fn test_render_leaves_unknown_tokens() {
        let template = Template::new("{{ title }} {{author}} {{ {{content}} {{");
        assert_eq!(template.render(&context()), "T {{author}} {{ <p>C</p> {{");
    }

    #[test]
    fn test_render_does_not_escape() {
        let template = Template::new("{{title}}");
        let ctx = Context {
            title: "<script>&",
            ..Context::default()
        };
        assert_eq!(template.render(&ctx), "<script>&");
    }

    #[test]
    fn test_missing_placeholders() {
        assert_eq!(
            Template::new("{{title}}").missing_placeholders(),
            vec!["description", "content"]
        );
        assert!(Template::new("{{title}}{{description}}{{content}}")
            .missing_placeholders()
            .is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Template::load(&dir.path().join("layout.html")).unwrap_err();
        assert!(err.to_string().contains("layout.html"));
    }
}
