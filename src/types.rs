//! Payload types shared by the compiler, the session model and the page.
//!
//! Everything here is serialized into the generated page as JSON, so field
//! names are camelCase to match what `static/terminal.js` reads.

use crate::view::ViewId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Presentation tag for a line. Rendered as an `is-<kind>` CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    Heading,
    Info,
    ListItem,
    BlogTitle,
    BlogDate,
}

/// The atomic renderable unit: one line of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    pub text: String,
    /// True when `text` is HTML to be injected as markup, false for literal text.
    pub is_markup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<LineKind>,
}

impl LineRecord {
    pub fn markup(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_markup: true,
            kind: None,
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_markup: false,
            kind: None,
        }
    }

    /// Synthesized empty spacer line (never produced from source content).
    pub fn spacer() -> Self {
        Self::literal("")
    }

    pub fn with_kind(mut self, kind: LineKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// One entry of the root menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEntry {
    pub label: String,
    #[serde(rename = "targetView")]
    pub view: ViewId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// A post from the blog directory.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    /// Filename with `.md` stripped.
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    /// Full view lines: date, title, spacer, rendered body, back hint.
    pub body: Vec<LineRecord>,
}

/// What the blog index shows for each post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogSummary {
    pub title: String,
    pub id: String,
}

impl From<&BlogPost> for BlogSummary {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            id: post.id.clone(),
        }
    }
}

/// A resolved social link; `display_text` is always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub display_text: String,
}

/// An entry of the theme picker. Disabled entries are separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub name: String,
    pub class_name: String,
    pub disabled: bool,
}

/// Everything the page runtime needs, produced once at build time.
///
/// Maps are `BTreeMap` so the serialized payload is byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPayload {
    pub navigation: Vec<NavigationEntry>,
    pub blog_index: Vec<BlogSummary>,
    pub blog_bodies: BTreeMap<String, Vec<LineRecord>>,
    pub content_views: BTreeMap<String, Vec<LineRecord>>,
    pub socials_lines: Vec<LineRecord>,
    pub themes: Vec<ThemeDescriptor>,
    pub default_theme_class_name: String,
    pub username: String,
    pub site_title: String,
}

impl ViewPayload {
    /// The navigation entry routing to `view`, if any.
    pub fn entry_for(&self, view: &ViewId) -> Option<&NavigationEntry> {
        self.navigation.iter().find(|e| &e.view == view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_record_json_shape() {
        let line = LineRecord::literal("-- back --").with_kind(LineKind::Info);
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"text":"-- back --","isMarkup":false,"kind":"info"}"#);
    }

    #[test]
    fn line_record_without_kind_omits_field() {
        let json = serde_json::to_string(&LineRecord::markup("<p>x</p>")).unwrap();
        assert_eq!(json, r#"{"text":"<p>x</p>","isMarkup":true}"#);
    }

    #[test]
    fn kinds_are_kebab_case() {
        let json = serde_json::to_string(&LineKind::ListItem).unwrap();
        assert_eq!(json, r#""list-item""#);
        let json = serde_json::to_string(&LineKind::BlogDate).unwrap();
        assert_eq!(json, r#""blog-date""#);
    }

    #[test]
    fn navigation_entry_json_shape() {
        let entry = NavigationEntry {
            label: "About".into(),
            view: ViewId::Content("about-view".into()),
            source_file: Some("about.md".into()),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"label":"About","targetView":"about-view","sourceFile":"about.md"}"#
        );
    }
}
