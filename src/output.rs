//! CLI output formatting for the build and replay commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (menu entry, post, theme) is its semantic identity:
//! positional index and title. Filesystem paths and view ids are secondary
//! context on indented lines, so the output reads as a content inventory
//! while still pointing back at the files behind it.
//!
//! # Output Format
//!
//! ## Build / Check
//!
//! ```text
//! Menu
//! 001 About → about-view
//!     Source: about.md (4 lines)
//! 002 Blogs → blogs-list-view (3 posts)
//! 003 Socials → socials-view (3 links)
//!
//! Posts
//! 001 A Portfolio That Looks Like a Terminal
//!     Source: 2024-06-01-terminal-portfolio.md
//!     Date: 2024-06-01
//!
//! Themes
//! 001 Dracula (default)
//! 002 Gruvbox Dark
//!     --- Light ---
//!
//! Compiled 3 views, 1 post, 2 themes
//! ```
//!
//! ## Replay
//!
//! ```text
//! Mode:   NORMAL
//! View:   blog-content-view#2024-06-01-terminal-portfolio
//! Status: 2024-06-01-terminal-portfolio.md 2/9 [+] R
//! Line:   A Portfolio That Looks Like a Terminal
//! Theme:  theme-gruvbox
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::session::Session;
use crate::types::{LineKind, NavigationEntry, ViewPayload};
use crate::view::ViewId;
use std::path::Path;

const PREVIEW_CHARS: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

// ============================================================================
// Build output
// ============================================================================

/// One menu entry: header line plus context.
fn menu_entry_lines(index: usize, entry: &NavigationEntry, payload: &ViewPayload) -> Vec<String> {
    let header = format!("{} {} → {}", format_index(index), entry.label, entry.view);
    match &entry.view {
        ViewId::BlogIndex => {
            vec![format!("{header} ({})", plural(payload.blog_index.len(), "post", "posts"))]
        }
        ViewId::Socials => {
            // heading, spacer and back hint wrap the links
            let links = payload.socials_lines.len().saturating_sub(3);
            vec![format!("{header} ({})", plural(links, "link", "links"))]
        }
        ViewId::Content(id) => {
            let source = entry.source_file.as_deref().unwrap_or("");
            let detail = match payload.content_views.get(id) {
                Some(lines) if !lines.is_empty() => plural(lines.len(), "line", "lines"),
                _ => "empty".to_string(),
            };
            vec![header, format!("{}Source: {source} ({detail})", indent(1))]
        }
        _ => vec![header],
    }
}

/// Format the compiled payload as a content inventory.
pub fn format_build_output(payload: &ViewPayload) -> Vec<String> {
    let mut lines = vec!["Menu".to_string()];
    for (i, entry) in payload.navigation.iter().enumerate() {
        lines.extend(menu_entry_lines(i + 1, entry, payload));
    }

    if !payload.blog_index.is_empty() {
        lines.push(String::new());
        lines.push("Posts".to_string());
        for (i, post) in payload.blog_index.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), post.title));
            lines.push(format!("{}Source: {}.md", indent(1), post.id));
            let date = payload
                .blog_bodies
                .get(&post.id)
                .and_then(|body| body.first())
                .filter(|l| l.kind == Some(LineKind::BlogDate));
            if let Some(date) = date {
                lines.push(format!("{}Date: {}", indent(1), date.text));
            }
        }
    }

    if !payload.themes.is_empty() {
        lines.push(String::new());
        lines.push("Themes".to_string());
        let mut position = 0;
        for theme in &payload.themes {
            if theme.disabled {
                lines.push(format!("{}{}", indent(1), theme.name));
                continue;
            }
            position += 1;
            let marker = if theme.class_name == payload.default_theme_class_name {
                " (default)"
            } else {
                ""
            };
            lines.push(format!("{} {}{marker}", format_index(position), theme.name));
        }
    }

    lines.push(String::new());
    lines.push(format_summary(payload));
    lines
}

/// One-line totals.
pub fn format_summary(payload: &ViewPayload) -> String {
    let themes = payload.themes.iter().filter(|t| !t.disabled).count();
    format!(
        "Compiled {}, {}, {}",
        plural(payload.navigation.len(), "view", "views"),
        plural(payload.blog_index.len(), "post", "posts"),
        plural(themes, "theme", "themes"),
    )
}

pub fn print_build_output(payload: &ViewPayload) {
    for line in format_build_output(payload) {
        println!("{}", line);
    }
}

/// The line printed after the page is written.
pub fn format_written(path: &Path, bytes: usize) -> String {
    format!("Wrote {} ({bytes} bytes)", path.display())
}

// ============================================================================
// Replay output
// ============================================================================

/// Format the state a key replay ended in.
pub fn format_session(session: &Session<'_>) -> Vec<String> {
    let status = session.status();
    let mut status_line = format!("{} {}", status.filename, status.indicator());
    if !status.extra.is_empty() {
        status_line.push(' ');
        status_line.push_str(status.extra);
    }

    let mut lines = vec![
        format!("Mode:   {}", status.mode),
        format!("View:   {}", session.active_view()),
        format!("Status: {status_line}"),
    ];
    if let Some(line) = session.view_state().and_then(|s| s.current()) {
        let text = strip_html_tags(&line.record.text);
        lines.push(format!("Line:   {}", truncate(text.trim(), PREVIEW_CHARS)));
    }
    lines.push(format!("Theme:  {}", session.displayed_theme()));
    if session.displayed_theme() != session.applied_theme() {
        lines.push(format!("{}(previewing; applied: {})", indent(2), session.applied_theme()));
    }
    if session.should_quit() {
        lines.push("Quit requested".to_string());
    }
    lines
}

pub fn print_session(session: &Session<'_>) {
    for line in format_session(session) {
        println!("{}", line);
    }
}
