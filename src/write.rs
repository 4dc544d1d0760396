use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::pages::Page;

/// Writes output files beneath a single output directory.
pub struct Writer<'a> {
    /// The directory in which every output file is written.
    output_directory: &'a Path,
}

impl<'a> Writer<'a> {
    /// Creates the output directory (recursively; an existing directory is
    /// fine) and returns a writer for it.
    pub fn create(output_directory: &'a Path) -> Result<Writer<'a>> {
        create_dir_all(output_directory)?;
        Ok(Writer { output_directory })
    }

    /// Writes every page, stopping at the first failure.
    pub fn write_pages(&self, pages: &[Page]) -> Result<()> {
        pages
            .iter()
            .try_for_each(|page| self.write_file(&page.file_name, page.contents.as_bytes()))
    }

    /// Writes `contents` to `relative_path` beneath the output directory,
    /// creating parent directories as needed.
    pub fn write_file(&self, relative_path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
        let path = self.output_directory.join(relative_path);
        if let Some(parent) = path.parent() {
            if parent != self.output_directory {
                create_dir_all(parent)?;
            }
        }
        debug!("writing `{}`", path.display());
        fs::write(&path, contents).map_err(|err| Error::Write { path, err })
    }
}

fn create_dir_all(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|err| Error::CreateDir {
        path: dir.to_owned(),
        err,
    })
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug, Error)]
pub enum Error {
    /// An error creating an output directory.
    #[error("creating directory `{}`: {}", path.display(), err)]
    CreateDir { path: PathBuf, err: io::Error },

    /// An error writing an output file.
    #[error("writing `{}`: {}", path.display(), err)]
    Write { path: PathBuf, err: io::Error },
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_pages() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("public").join("nested");
        let writer = Writer::create(&output)?;
        writer.write_pages(&[
            Page {
                file_name: String::from("index.html"),
                contents: String::from("home"),
            },
            Page {
                file_name: String::from("a.html"),
                contents: String::from("a"),
            },
        ])?;

        assert_eq!(fs::read_to_string(output.join("index.html")).unwrap(), "home");
        assert_eq!(fs::read_to_string(output.join("a.html")).unwrap(), "a");
        Ok(())
    }

    #[test]
    fn test_create_is_idempotent() -> Result<()> {
        let dir = TempDir::new().unwrap();
        Writer::create(dir.path())?;
        Writer::create(dir.path())?;
        Ok(())
    }

    #[test]
    fn test_write_file_creates_parents() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let writer = Writer::create(dir.path())?;
        writer.write_file("data/posts.json", b"{}")?;
        assert_eq!(
            fs::read_to_string(dir.path().join("data").join("posts.json")).unwrap(),
            "{}"
        );
        Ok(())
    }

    #[test]
    fn test_create_fails_on_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            Writer::create(&file),
            Err(Error::CreateDir { .. })
        ));
    }
}
