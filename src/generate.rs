//! HTML page generation.
//!
//! Final stage of the build. Takes the assembled [`ViewPayload`] and renders
//! the single self-contained page: editor chrome, one empty container per
//! view, the payload as JSON, and the runtime script that fills the
//! containers in the browser.
//!
//! ## Document Layout
//!
//! ```text
//! <body class="{default theme}">
//!   div.neovim-editor
//!   ├── div#editor-pane
//!   │   ├── div#about-view.view.content-view      # sorted by id
//!   │   ├── div#blog-content-view.view.content-view
//!   │   ├── div#blogs-list-view.view
//!   │   └── div#main-view.view.active              # starts active
//!   ├── div.status-bar                             # mode, filename, user, N/M
//!   ├── div#command-line                           # shown in command mode
//!   └── div#theme-popup                            # shown by :themes
//!   script: const PAYLOAD = {...}; + static/terminal.js
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: editor chrome and one class per theme
//! - `static/terminal.js`: keyboard/mouse runtime, see [`crate::session`]
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! The title, username and body class are escaped by maud. The payload is
//! embedded raw, with every `</` written as `<\/` so no string inside it can
//! close the script element.

use crate::types::ViewPayload;
use crate::view::{BLOG_INDEX_VIEW, BLOG_POST_VIEW, ROOT_VIEW};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to write '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/terminal.js");

/// Serialize the payload for embedding inside a `<script>` element.
pub fn payload_json(payload: &ViewPayload) -> Result<String, GenerateError> {
    let json = serde_json::to_string(payload)?;
    Ok(json.replace("</", "<\\/"))
}

/// Container ids to emit, sorted: every navigation target plus the root menu
/// and the blog post container.
pub fn view_containers(payload: &ViewPayload) -> Vec<&str> {
    let mut ids: BTreeSet<&str> = BTreeSet::from([ROOT_VIEW, BLOG_POST_VIEW]);
    ids.extend(payload.navigation.iter().map(|e| e.view.container()));
    ids.into_iter().collect()
}

fn container_class(id: &str) -> String {
    let mut class = String::from("view");
    if id != ROOT_VIEW && id != BLOG_INDEX_VIEW {
        class.push_str(" content-view");
    }
    if id == ROOT_VIEW {
        class.push_str(" active");
    }
    class
}

/// Render the complete page.
pub fn render_document(payload: &ViewPayload) -> Result<String, GenerateError> {
    let json = payload_json(payload)?;
    let content = html! {
        div.neovim-editor {
            div.editor-pane #editor-pane {
                @for id in view_containers(payload) {
                    div id=(id) class=(container_class(id)) {}
                }
            }
            (status_bar(&payload.username))
            (command_line())
            (theme_popup())
        }
        script {
            (PreEscaped(format!("const PAYLOAD = {json};\n")))
            (PreEscaped(JS))
        }
    };
    let doc = base_document(&payload.site_title, &payload.default_theme_class_name, content);
    Ok(doc.into_string())
}

/// Write `html` to `path`, creating parent directories.
pub fn write_output(path: &Path, html: &str) -> Result<(), GenerateError> {
    let io_err = |source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, html).map_err(io_err)
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

/// Mode badge, current file, username and line indicator. The runtime keeps
/// the `#status-*` spans current.
fn status_bar(username: &str) -> Markup {
    html! {
        div.status-bar {
            div.status-left {
                span.mode { "NORMAL" }
                span.icon.list-icon { "☰" }
                span.filename #status-filename { "index" }
            }
            div.status-right {
                span.icon.folder-icon {}
                span.username #status-username { (username) }
                span.icon.file-status-icon { "☰" }
                span.file-count #line-indicator { "--" }
                span.file-status-extra #status-extra {}
            }
        }
    }
}

fn command_line() -> Markup {
    html! {
        div #command-line {
            span #command-prompt { ":" }
            span #command-input-text {}
            span #command-line-cursor {}
        }
    }
}

fn theme_popup() -> Markup {
    html! {
        div #theme-popup {
            div #theme-list {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::LineRecord;
    use tempfile::TempDir;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn document_starts_with_doctype() {
        let html = render_document(&sample_payload()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn body_carries_default_theme() {
        let html = render_document(&sample_payload()).unwrap();
        assert!(html.contains(r#"<body class="theme-dracula">"#));
    }

    #[test]
    fn title_and_username_are_escaped() {
        let mut payload = sample_payload();
        payload.site_title = "<b>Me</b>".into();
        payload.username = "a&b".into();
        let html = render_document(&payload).unwrap();
        assert!(html.contains("<title>&lt;b&gt;Me&lt;/b&gt;</title>"));
        assert!(html.contains(">a&amp;b</span>"));
    }

    #[test]
    fn containers_sorted_with_reserved_views() {
        let payload = sample_payload();
        assert_eq!(
            view_containers(&payload),
            ["about-view", "blog-content-view", "blogs-list-view", "main-view", "socials-view"]
        );
    }

    #[test]
    fn containers_exist_without_navigation() {
        let mut payload = sample_payload();
        payload.navigation.clear();
        assert_eq!(view_containers(&payload), ["blog-content-view", "main-view"]);
    }

    #[test]
    fn only_main_view_starts_active() {
        let html = render_document(&sample_payload()).unwrap();
        assert_eq!(count(&html, " active\""), 1);
        assert!(html.contains(r#"<div id="main-view" class="view active">"#));
        assert!(html.contains(r#"<div id="blogs-list-view" class="view">"#));
        assert!(html.contains(r#"<div id="about-view" class="view content-view">"#));
        assert!(html.contains(r#"<div id="socials-view" class="view content-view">"#));
    }

    #[test]
    fn payload_cannot_close_script() {
        let mut payload = sample_payload();
        payload
            .content_views
            .insert("evil-view".into(), vec![LineRecord::literal("</script><script>alert(1)")]);
        let json = payload_json(&payload).unwrap();
        assert!(!json.contains("</"));
        let html = render_document(&payload).unwrap();
        assert_eq!(count(&html, "</script>"), 1);
    }

    #[test]
    fn escaped_payload_is_still_valid_json() {
        let payload = sample_payload();
        let json = payload_json(&payload).unwrap();
        let back: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, serde_json::to_value(&payload).unwrap());
    }

    #[test]
    fn embeds_payload_and_runtime() {
        let html = render_document(&sample_payload()).unwrap();
        assert!(html.contains("const PAYLOAD = {"));
        assert!(html.contains("function switchView"));
        assert!(html.contains(".theme-gruvbox"));
    }

    #[test]
    fn output_is_deterministic() {
        let tmp = setup_fixtures();
        let first = render_document(&assemble_fixture(tmp.path())).unwrap();
        let second = render_document(&assemble_fixture(tmp.path())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn write_output_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("public/site/index.html");
        write_output(&path, "<!DOCTYPE html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<!DOCTYPE html>");
    }

    #[test]
    fn write_output_reports_path_on_failure() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("file"), "x").unwrap();
        let err = write_output(&tmp.path().join("file/index.html"), "x").unwrap_err();
        assert!(matches!(err, GenerateError::Io { .. }));
        assert!(err.to_string().contains("index.html"));
    }
}
