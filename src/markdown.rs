//! Markdown normalization into view lines.
//!
//! Every content source ends up as a `Vec<LineRecord>`. For Markdown that
//! means: render to HTML, then split the HTML on physical newlines and keep
//! each non-blank line as one markup-flagged record.
//!
//! ## Line splitting is a layout heuristic
//!
//! Splitting rendered HTML on `\n` is not an HTML-to-lines algorithm. It
//! works because the renderer puts block elements on their own lines, and it
//! is what gives each paragraph, heading and list item its own line number
//! in the editor UI. Multi-line blocks (fenced code, tables) become several
//! records whose fragments are only balanced as a group; that is accepted.
//!
//! ## Rendering
//!
//! pulldown-cmark with tables enabled (fenced code is core CommonMark). Soft
//! breaks are turned into hard breaks so line breaks in the source survive
//! into the output, the way authors of short portfolio pages expect.
//!
//! If the renderer panics on malformed input the raw text is used instead,
//! one literal record per non-blank source line. A bad file degrades to plain
//! text; it never fails the build.

use crate::types::{LineKind, LineRecord};
use log::warn;
use pulldown_cmark::{Event, Options, Parser, html::push_html};
use serde::Deserialize;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Hint appended to content views.
pub const BACK_HINT: &str = "-- Press Esc to go back --";
/// Hint appended to blog posts.
pub const BLOG_BACK_HINT: &str = "-- Press Esc to return to blog list --";

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("markdown renderer panicked: {0}")]
    Panicked(String),
    #[error("bad front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}

/// Metadata block at the top of a content file.
#[derive(Debug, Default, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    /// Kept as a YAML value: `date: 2024-06-01` and `date: "June 2024"` are
    /// both accepted and shown as written.
    #[serde(default)]
    pub date: Option<serde_yaml::Value>,
}

impl FrontMatter {
    pub fn date_string(&self) -> Option<String> {
        let text = match self.date.as_ref()? {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        Some(text).filter(|t| !t.trim().is_empty())
    }
}

/// A content file split into its metadata and Markdown body.
#[derive(Debug)]
pub struct Document {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Split a leading `---` fenced block off `content`.
///
/// Returns `("", content)` when there is no complete front matter block.
pub fn split_front_matter(content: &str) -> (&str, &str) {
    let trimmed = content.trim_start();
    let Some(after) = trimmed.strip_prefix("---") else {
        return ("", content);
    };
    // The opening fence must be the whole first line.
    let Some(after) = after
        .strip_prefix('\n')
        .or_else(|| after.strip_prefix("\r\n"))
    else {
        return ("", content);
    };
    if let Some(rest) = after.strip_prefix("---") {
        return ("", rest.trim_start_matches(['\r', '\n']));
    }
    match after.find("\n---") {
        Some(end) => {
            let body = &after[end + 4..];
            let body = body.trim_start_matches(['\r', '\n']);
            (&after[..end], body)
        }
        None => ("", content),
    }
}

/// Parse front matter and body out of a content file.
pub fn parse_document(content: &str) -> Result<Document, MarkdownError> {
    let (yaml, body) = split_front_matter(content);
    let front_matter = if yaml.trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    Ok(Document {
        front_matter,
        body: body.to_string(),
    })
}

/// Render Markdown to an HTML string.
pub fn render_html(markdown: &str) -> Result<String, MarkdownError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });
        let mut html = String::with_capacity(markdown.len() * 2);
        push_html(&mut html, parser);
        html
    }))
    .map_err(|payload| {
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        MarkdownError::Panicked(msg)
    })
}

/// Convert Markdown into view lines, dropping blank lines.
pub fn render_markdown_to_lines(markdown: &str) -> Vec<LineRecord> {
    if markdown.is_empty() {
        return Vec::new();
    }
    match render_html(markdown) {
        Ok(html) => html_to_lines(&html),
        Err(e) => {
            warn!("Markdown processing error, falling back to plain text: {e}");
            plain_lines(markdown)
        }
    }
}

/// One markup record per non-blank line of rendered HTML.
pub fn html_to_lines(html: &str) -> Vec<LineRecord> {
    html.lines()
        .filter(|line| !line.trim().is_empty())
        .map(LineRecord::markup)
        .collect()
}

/// One literal record per non-blank line of raw text.
pub fn plain_lines(text: &str) -> Vec<LineRecord> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(LineRecord::literal)
        .collect()
}

/// The navigation hint every content view ends with.
pub fn info_line(text: &str) -> LineRecord {
    LineRecord::literal(text).with_kind(LineKind::Info)
}
