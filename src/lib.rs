//! # termfolio
//!
//! A static site generator for personal portfolios that look and behave like
//! a terminal text editor. A YAML config and a directory of Markdown files go
//! in; a single self-contained `index.html` comes out.
//!
//! # Architecture: Compile, Then Run
//!
//! ```text
//! 1. Config    config.yaml        →  SiteConfig     (parse + resolve defaults)
//! 2. Compile   SiteConfig, content/ → ViewPayload   (everything becomes lines)
//! 3. Generate  ViewPayload        →  index.html     (chrome + JSON + runtime)
//! ```
//!
//! The payload is the contract between build time and the browser: every
//! view, whether it came from the menu config, a Markdown page, a blog post or
//! the socials list, is a `Vec<LineRecord>`. The in-page runtime only walks
//! lines and never knows where they came from.
//!
//! The runtime itself (views, cursors, command mode, theme picker) also
//! exists in Rust as [`session::Session`], a headless model that
//! `termfolio replay` drives and the tests exercise.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.yaml` loading and resolution into [`config::SiteConfig`] |
//! | [`view`] | [`view::ViewId`], the closed set of view kinds, and reserved container ids |
//! | [`types`] | Payload types serialized into the page (`LineRecord`, `ViewPayload`, ...) |
//! | [`naming`] | Blog ids from filenames and the title-case fallback |
//! | [`markdown`] | Front matter, Markdown → HTML → lines |
//! | [`compile`] | Content compiler: config + content directory → payload |
//! | [`session`] | Navigation state machine mirrored by `static/terminal.js` |
//! | [`generate`] | Renders the page with Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Failure Policy
//!
//! Only two things stop a build: a config file that cannot be loaded, and an
//! output file that cannot be written. Everything per item (a missing page,
//! a post with broken front matter, a navigation entry without a target) is
//! logged with `log::warn!` and skipped or left empty.

pub mod compile;
pub mod config;
pub mod generate;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod session;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
