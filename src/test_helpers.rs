//! Shared test utilities for the termfolio test suite.
//!
//! Provides fixture setup, a small hand-built payload for runtime tests, and
//! lookup helpers that panic with a useful message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let payload = assemble_fixture(tmp.path());
//!
//! assert_eq!(blog_ids(&payload)[0], "2024-06-01-terminal-portfolio");
//! let about = find_content_view(&payload, "about-view");
//! assert!(!about.is_empty());
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

use crate::compile::{ContentPaths, assemble};
use crate::config::load_config;
use crate::session::RenderedLine;
use crate::types::{BlogSummary, LineKind, LineRecord, NavigationEntry, ThemeDescriptor, ViewPayload};
use crate::view::ViewId;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// The copy holds `config.yaml` and `content/`. Tests can mutate it without
/// affecting other tests or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Load `<root>/config.yaml` and compile `<root>/content`.
pub fn assemble_fixture(root: &Path) -> ViewPayload {
    let config = load_config(&root.join("config.yaml")).unwrap();
    assemble(&config, &ContentPaths::new(root.join("content")))
}

// =========================================================================
// Hand-built payload
// =========================================================================

fn theme(name: &str, class_name: &str, disabled: bool) -> ThemeDescriptor {
    ThemeDescriptor {
        name: name.to_string(),
        class_name: class_name.to_string(),
        disabled,
    }
}

fn nav(label: &str, view: ViewId, source_file: Option<&str>) -> NavigationEntry {
    NavigationEntry {
        label: label.to_string(),
        view,
        source_file: source_file.map(str::to_string),
    }
}

/// A payload with no filesystem behind it.
///
/// - menu: About (`about-view`), Blogs, Socials
/// - blog index: `2024-06-01-c`, `2024-01-01-a`
/// - themes: Dracula, Gruvbox, a disabled separator, GitHub Light
pub fn sample_payload() -> ViewPayload {
    let post = |title: &str, body: &str| {
        vec![
            LineRecord::literal(title).with_kind(LineKind::BlogTitle),
            LineRecord::spacer(),
            LineRecord::markup(format!("<p>{body}</p>")),
        ]
    };

    let mut blog_bodies = BTreeMap::new();
    blog_bodies.insert("2024-06-01-c".to_string(), post("C", "newest"));
    blog_bodies.insert("2024-01-01-a".to_string(), post("A", "older"));

    let mut content_views = BTreeMap::new();
    content_views.insert(
        "about-view".to_string(),
        vec![
            LineRecord::markup("<h1>About</h1>"),
            LineRecord::markup("<p>One.</p>"),
            LineRecord::markup("<p>Two.</p>"),
            LineRecord::literal("-- Press Esc to go back --").with_kind(LineKind::Info),
        ],
    );

    ViewPayload {
        navigation: vec![
            nav("About", ViewId::Content("about-view".into()), Some("about.md")),
            nav("Blogs", ViewId::BlogIndex, None),
            nav("Socials", ViewId::Socials, None),
        ],
        blog_index: vec![
            BlogSummary {
                title: "C".into(),
                id: "2024-06-01-c".into(),
            },
            BlogSummary {
                title: "A".into(),
                id: "2024-01-01-a".into(),
            },
        ],
        blog_bodies,
        content_views,
        socials_lines: vec![LineRecord::literal("Socials").with_kind(LineKind::Heading)],
        themes: vec![
            theme("Dracula", "theme-dracula", false),
            theme("Gruvbox", "theme-gruvbox", false),
            theme("--- light ---", "", true),
            theme("GitHub Light", "theme-github-light", false),
        ],
        default_theme_class_name: "theme-dracula".into(),
        username: "ada".into(),
        site_title: "Ada's Portfolio".into(),
    }
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Blog ids in index order.
pub fn blog_ids(payload: &ViewPayload) -> Vec<&str> {
    payload.blog_index.iter().map(|b| b.id.as_str()).collect()
}

/// Lines of a content view. Panics if not found.
pub fn find_content_view<'a>(payload: &'a ViewPayload, id: &str) -> &'a [LineRecord] {
    payload
        .content_views
        .get(id)
        .map(Vec::as_slice)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = payload.content_views.keys().map(String::as_str).collect();
            panic!("content view '{id}' not found. Available: {ids:?}")
        })
}

/// Records as the session realizes them for a non-list view.
pub fn lines_of(records: &[LineRecord]) -> Vec<RenderedLine> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| RenderedLine {
            number: i + 1,
            record: record.clone(),
            target: None,
        })
        .collect()
}
