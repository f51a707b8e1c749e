//! Content compilation.
//!
//! Turns a resolved [`SiteConfig`] plus the content directory into the
//! [`ViewPayload`] embedded in the page. This is a pure function of its
//! inputs: the same config and files always give a byte-identical payload.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── about.md                     # backs `about-view` (via main_navigation)
//! ├── projects.md                  # backs `projects-view`
//! └── blogs/                       # read only if a nav entry targets blogs-list-view
//!     ├── 2024-06-01-rewrite.md    # newest first: sorted by filename, descending
//!     └── 2023-12-31-hello.md
//! ```
//!
//! ## Failure Policy
//!
//! Every per-item problem is recovered here and logged: a missing page gives
//! an empty view, a broken post is left out of the index, a missing blog
//! directory gives an empty index. Nothing in this module can fail the
//! build; only config loading (before) and writing output (after) can.

use crate::config::SiteConfig;
use crate::markdown::{self, BACK_HINT, BLOG_BACK_HINT, MarkdownError};
use crate::naming;
use crate::types::{BlogPost, BlogSummary, LineKind, LineRecord, NavigationEntry, SocialLink, ViewPayload};
use crate::view::ViewId;
use log::{debug, warn};
use maud::html;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("content file not found at '{0}'")]
    NotFound(PathBuf),
    #[error("IO error on '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to process '{path}': {source}")]
    Markdown {
        path: PathBuf,
        source: MarkdownError,
    },
}

/// Where content is read from.
#[derive(Debug, Clone)]
pub struct ContentPaths {
    pub content_dir: PathBuf,
    pub blog_dir: PathBuf,
}

impl ContentPaths {
    /// Standard layout: blogs live in `<content>/blogs`.
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        let content_dir = content_dir.into();
        let blog_dir = content_dir.join("blogs");
        Self {
            content_dir,
            blog_dir,
        }
    }
}

fn read_file(path: &Path) -> Result<String, CompileError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CompileError::NotFound(path.to_path_buf()),
        _ => CompileError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn read_document(path: &Path) -> Result<markdown::Document, CompileError> {
    let content = read_file(path)?;
    markdown::parse_document(&content).map_err(|source| CompileError::Markdown {
        path: path.to_path_buf(),
        source,
    })
}

fn try_load_content_view(entry: &NavigationEntry, content_dir: &Path) -> Result<Vec<LineRecord>, CompileError> {
    let Some(filename) = entry.source_file.as_deref().filter(|f| naming::is_markdown(f)) else {
        return Ok(Vec::new());
    };
    let path = content_dir.join(filename);
    if !path.is_file() {
        return Err(CompileError::NotFound(path));
    }
    let doc = read_document(&path)?;
    let mut lines = markdown::render_markdown_to_lines(&doc.body);
    lines.push(markdown::info_line(BACK_HINT));
    Ok(lines)
}

/// Lines for an ordinary Markdown-backed view.
///
/// A missing or unreadable file gives an empty view and a warning.
pub fn load_content_view(entry: &NavigationEntry, content_dir: &Path) -> Vec<LineRecord> {
    debug!("processing content page '{}' for view '{}'", entry.source_file.as_deref().unwrap_or(""), entry.view);
    try_load_content_view(entry, content_dir).unwrap_or_else(|e| {
        warn!("view '{}': {e}", entry.view);
        Vec::new()
    })
}

/// Build one post from its file.
pub fn load_blog_post(path: &Path, id: &str) -> Result<BlogPost, CompileError> {
    let doc = read_document(path)?;
    let title = doc
        .front_matter
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| naming::title_case(id));
    let date = doc.front_matter.date_string();

    let mut body = Vec::new();
    if let Some(date) = &date {
        body.push(LineRecord::literal(date.as_str()).with_kind(LineKind::BlogDate));
    }
    body.push(LineRecord::literal(title.as_str()).with_kind(LineKind::BlogTitle));
    body.push(LineRecord::spacer());
    body.extend(markdown::render_markdown_to_lines(&doc.body));
    body.push(markdown::info_line(BLOG_BACK_HINT));

    Ok(BlogPost {
        id: id.to_string(),
        title,
        date,
        body,
    })
}

/// Markdown filenames in `blog_dir`, sorted descending.
fn blog_filenames(blog_dir: &Path) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(blog_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| naming::blog_id(name).is_some())
        .collect();
    names.sort_unstable_by(|a, b| b.cmp(a));
    Ok(names)
}

/// All posts in `blog_dir`, newest filename first.
///
/// A post that fails to load is skipped; the rest are still processed.
pub fn load_blogs(blog_dir: &Path) -> Vec<BlogPost> {
    if !blog_dir.is_dir() {
        warn!("blog directory '{}' not found or not a directory", blog_dir.display());
        return Vec::new();
    }
    let filenames = match blog_filenames(blog_dir) {
        Ok(names) => names,
        Err(e) => {
            warn!("cannot list blog directory '{}': {e}", blog_dir.display());
            return Vec::new();
        }
    };

    filenames
        .iter()
        .filter_map(|filename| {
            let id = naming::blog_id(filename)?;
            match load_blog_post(&blog_dir.join(filename), id) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!("skipping blog post: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Render one social link as markup. Name and display text are escaped.
pub fn social_link_markup(link: &SocialLink) -> String {
    html! {
        span.link-name { (link.name) ":" }
        " "
        a href=(link.url) target="_blank" rel="noopener noreferrer" { (link.display_text) }
    }
    .into_string()
}

/// Lines for the socials view: heading, spacer, one item per link, hint.
pub fn load_socials(heading: &str, links: &[SocialLink]) -> Vec<LineRecord> {
    let mut lines = Vec::with_capacity(links.len() + 3);
    lines.push(LineRecord::literal(heading).with_kind(LineKind::Heading));
    lines.push(LineRecord::spacer());
    lines.extend(
        links
            .iter()
            .map(|link| LineRecord::markup(social_link_markup(link)).with_kind(LineKind::ListItem)),
    );
    lines.push(markdown::info_line(BACK_HINT));
    lines
}

/// Build the full payload.
///
/// Blogs and socials are only processed when a navigation entry routes to
/// them. Each content view key is the target of exactly one navigation entry;
/// a second entry for the same view reuses the first one's content.
pub fn assemble(config: &SiteConfig, paths: &ContentPaths) -> ViewPayload {
    let mut content_views = BTreeMap::new();
    for entry in &config.navigation {
        let ViewId::Content(id) = &entry.view else {
            continue;
        };
        if content_views.contains_key(id) {
            warn!("view '{id}' is targeted by more than one navigation entry; using the first");
            continue;
        }
        content_views.insert(id.clone(), load_content_view(entry, &paths.content_dir));
    }

    let posts = if config.routes_to(&ViewId::BlogIndex) {
        load_blogs(&paths.blog_dir)
    } else {
        Vec::new()
    };
    let blog_index = posts.iter().map(BlogSummary::from).collect();
    let blog_bodies = posts.into_iter().map(|p| (p.id, p.body)).collect();

    let socials_lines = if config.routes_to(&ViewId::Socials) {
        load_socials(&config.socials_heading, &config.socials_links)
    } else {
        Vec::new()
    };

    ViewPayload {
        navigation: config.navigation.clone(),
        blog_index,
        blog_bodies,
        content_views,
        socials_lines,
        themes: config.themes.clone(),
        default_theme_class_name: config.default_theme.clone(),
        username: config.username.clone(),
        site_title: config.site_title.clone(),
    }
}
