//! The library code for the `folio` static blog generator. A build is a
//! single sequential pass:
//!
//! 1. Parsing posts from markdown source files on disk ([`crate::parser`])
//! 2. Indexing the posts by tag ([`crate::tag`])
//! 3. Rendering pages through the layout template ([`crate::pages`],
//!    [`crate::template`]) and writing them to disk ([`crate::write`])
//! 4. Generating the RSS feed ([`crate::feed`]) and the JSON post index
//!    consumed by the site's scripts ([`crate::search_index`])
//!
//! Posts are loaded once and are read-only from then on; every later step
//! borrows them. [`crate::build::build_site`] runs the whole pipeline.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod feed;
pub mod markdown;
pub mod pages;
pub mod parser;
pub mod post;
pub mod search_index;
pub mod tag;
pub mod template;
pub mod write;
