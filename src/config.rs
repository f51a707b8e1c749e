//! Site configuration module.
//!
//! Loads `config.yaml` and resolves it into fully populated internal records.
//! Loading happens in two steps:
//!
//! 1. **Parse** into [`RawConfig`]: every field optional, defaults applied by
//!    serde, unknown keys rejected to catch typos early.
//! 2. **Resolve** into [`SiteConfig`]: navigation targets become [`ViewId`]s,
//!    social links get their `display_text`, themes get `disabled`. Invalid
//!    navigation entries are dropped here, with a warning, so nothing
//!    downstream has to re-check them.
//!
//! ## Configuration Options
//!
//! ```yaml
//! site_title: "Portfolio"
//! username: "user"
//! default_theme: "theme-dracula"
//! themes:
//!   - { name: "Dracula", className: "theme-dracula" }
//!   - { name: "--- Light ---", className: "", disabled: true }
//! main_navigation:
//!   - { text: "About", targetView: "about-view", filename: "about.md" }
//!   - { text: "Blogs", targetView: "blogs-list-view" }
//! socials_heading: "Socials & Links"
//! socials_links:
//!   - { name: "GitHub", url: "https://github.com/me", display_text: "github.com/me" }
//! ```
//!
//! A missing, empty, or unparseable config file is fatal: the build stops
//! before anything is written.

use crate::naming;
use crate::types::{NavigationEntry, SocialLink, ThemeDescriptor};
use crate::view::{BLOG_POST_VIEW, ViewId};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found at '{0}'")]
    NotFound(PathBuf),
    #[error("IO error reading '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("configuration file '{0}' is empty")]
    Empty(PathBuf),
    #[error("failed to parse YAML configuration '{path}': {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// `config.yaml` as written by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub site_title: String,
    pub username: String,
    pub default_theme: String,
    pub themes: Vec<RawTheme>,
    pub main_navigation: Vec<RawNavItem>,
    pub socials_heading: String,
    pub socials_links: Vec<RawSocialLink>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            site_title: "Portfolio".to_string(),
            username: "user".to_string(),
            default_theme: "theme-dracula".to_string(),
            themes: Vec::new(),
            main_navigation: Vec::new(),
            socials_heading: "Socials & Links".to_string(),
            socials_links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTheme {
    pub name: String,
    #[serde(rename = "className", default)]
    pub class_name: String,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawNavItem {
    #[serde(alias = "label")]
    pub text: Option<String>,
    #[serde(rename = "targetView")]
    pub target_view: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSocialLink {
    pub name: Option<String>,
    pub url: Option<String>,
    pub display_text: Option<String>,
}

/// Fully resolved configuration. Every optional field has been decided.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub site_title: String,
    pub username: String,
    pub default_theme: String,
    pub themes: Vec<ThemeDescriptor>,
    pub navigation: Vec<NavigationEntry>,
    pub socials_heading: String,
    pub socials_links: Vec<SocialLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        RawConfig::default().resolve()
    }
}

impl SiteConfig {
    /// Whether any navigation entry routes to `view`.
    pub fn routes_to(&self, view: &ViewId) -> bool {
        self.navigation.iter().any(|e| &e.view == view)
    }
}

impl RawConfig {
    /// Resolve optional fields and drop navigation entries that cannot work.
    pub fn resolve(self) -> SiteConfig {
        let navigation = self
            .main_navigation
            .into_iter()
            .filter_map(resolve_nav_item)
            .collect();

        let themes = self
            .themes
            .into_iter()
            .map(|t| ThemeDescriptor {
                name: t.name,
                class_name: t.class_name,
                disabled: t.disabled,
            })
            .collect();

        let socials_links = self
            .socials_links
            .into_iter()
            .map(|link| {
                let url = link.url.unwrap_or_else(|| "#".to_string());
                SocialLink {
                    name: link.name.unwrap_or_default(),
                    display_text: link.display_text.unwrap_or_else(|| url.clone()),
                    url,
                }
            })
            .collect();

        SiteConfig {
            site_title: self.site_title,
            username: self.username,
            default_theme: self.default_theme,
            themes,
            navigation,
            socials_heading: self.socials_heading,
            socials_links,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn resolve_nav_item(item: RawNavItem) -> Option<NavigationEntry> {
    let label = item.text.unwrap_or_default();
    let display = if label.is_empty() { "N/A" } else { label.as_str() };

    let Some(target) = non_blank(item.target_view) else {
        warn!("skipping navigation item '{display}': missing 'targetView'");
        return None;
    };
    let Some(view) = ViewId::from_target(&target) else {
        warn!(
            "skipping navigation item '{display}': '{BLOG_POST_VIEW}' is only reachable from the blog list"
        );
        return None;
    };
    let filename = non_blank(item.filename);
    if !view.is_special() && filename.is_none() {
        warn!("skipping navigation item '{display}': missing 'filename' for view '{target}'");
        return None;
    }
    if let Some(name) = filename.as_deref().filter(|_| !view.is_special()) {
        if !naming::is_markdown(name) {
            warn!("navigation item '{display}': '{name}' is not a Markdown file, view '{target}' will be empty");
        }
    }

    Some(NavigationEntry {
        label,
        view,
        source_file: filename,
    })
}

/// Parse config text. Empty or whitespace-only text is an error.
pub fn parse_config(content: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    if content.trim().is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and resolve the config file at `path`.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(parse_config(&content, path)?.resolve())
}

/// Returns a fully-commented stock `config.yaml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_yaml() -> &'static str {
    r##"# termfolio configuration
# =======================
# Every key is optional; values below are the defaults unless noted.
# Unknown keys are rejected.

# Browser tab title.
site_title: "Portfolio"

# Shown in the status bar.
username: "user"

# CSS class applied to <body> on load. Must match a theme's className.
default_theme: "theme-dracula"

# Entries of the :themes picker, in display order.
# Entries with `disabled: true` are separators and cannot be selected.
themes:
  - { name: "Dracula", className: "theme-dracula" }
  - { name: "Gruvbox Dark", className: "theme-gruvbox" }
  - { name: "Tokyo Night", className: "theme-tokyo-night" }
  - { name: "--- Light ---", className: "", disabled: true }
  - { name: "GitHub Light", className: "theme-github-light" }

# Root menu, in display order.
#   text        label shown in the menu (`label` is accepted too)
#   targetView  view to open. Reserved: blogs-list-view, socials-view.
#               Anything else is a page rendered from `filename`.
#   filename    Markdown file under the content directory
main_navigation:
  - { text: "About", targetView: "about-view", filename: "about.md" }
  - { text: "Blogs", targetView: "blogs-list-view" }
  - { text: "Socials", targetView: "socials-view" }

# Heading of the socials view.
socials_heading: "Socials & Links"

# One line per link. display_text defaults to url.
socials_links: []
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolve(yaml: &str) -> SiteConfig {
        parse_config(yaml, Path::new("config.yaml")).unwrap().resolve()
    }

    #[test]
    fn defaults_when_keys_absent() {
        let config = resolve("username: ada\n");
        assert_eq!(config.username, "ada");
        assert_eq!(config.site_title, "Portfolio");
        assert_eq!(config.default_theme, "theme-dracula");
        assert_eq!(config.socials_heading, "Socials & Links");
        assert!(config.navigation.is_empty());
    }

    #[test]
    fn nav_entry_resolves_view() {
        let config = resolve(
            r#"
main_navigation:
  - { text: "About", targetView: "about-view", filename: "about.md" }
  - { label: "Blogs", targetView: "blogs-list-view" }
"#,
        );
        assert_eq!(config.navigation.len(), 2);
        assert_eq!(config.navigation[0].view, ViewId::Content("about-view".into()));
        assert_eq!(config.navigation[0].source_file.as_deref(), Some("about.md"));
        assert_eq!(config.navigation[1].label, "Blogs");
        assert_eq!(config.navigation[1].view, ViewId::BlogIndex);
    }

    #[test]
    fn nav_entry_without_target_is_dropped() {
        let config = resolve(
            r#"
main_navigation:
  - { text: "Broken", filename: "x.md" }
  - { text: "Socials", targetView: "socials-view" }
"#,
        );
        assert_eq!(config.navigation.len(), 1);
        assert_eq!(config.navigation[0].view, ViewId::Socials);
    }

    #[test]
    fn content_entry_without_filename_is_dropped() {
        let config = resolve(
            r#"
main_navigation:
  - { text: "Projects", targetView: "projects-view" }
  - { text: "Blank", targetView: "blank-view", filename: "  " }
"#,
        );
        assert!(config.navigation.is_empty());
    }

    #[test]
    fn direct_post_target_is_dropped() {
        let config = resolve(
            r#"
main_navigation:
  - { text: "Post", targetView: "blog-content-view", filename: "x.md" }
"#,
        );
        assert!(config.navigation.is_empty());
    }

    #[test]
    fn social_display_text_defaults_to_url() {
        let config = resolve(
            r#"
socials_links:
  - { name: "GitHub", url: "https://github.com/ada" }
  - { name: "Mail", url: "mailto:a@b.c", display_text: "a@b.c" }
  - { name: "Nowhere" }
"#,
        );
        let links = &config.socials_links;
        assert_eq!(links[0].display_text, "https://github.com/ada");
        assert_eq!(links[1].display_text, "a@b.c");
        assert_eq!(links[2].url, "#");
        assert_eq!(links[2].display_text, "#");
    }

    #[test]
    fn theme_disabled_defaults_to_false() {
        let config = resolve(
            r#"
themes:
  - { name: "Dracula", className: "theme-dracula" }
  - { name: "---", className: "", disabled: true }
"#,
        );
        assert!(!config.themes[0].disabled);
        assert!(config.themes[1].disabled);
    }

    #[test]
    fn unknown_key_rejected() {
        let result = parse_config("site_titel: x\n", Path::new("config.yaml"));
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn empty_config_is_error() {
        let result = parse_config("  \n\n", Path::new("config.yaml"));
        assert!(matches!(result, Err(ConfigError::Empty(_))));
    }

    #[test]
    fn load_config_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("config.yaml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_config_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "main_navigation: [ {").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "site_title: \"Ada's terminal\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.site_title, "Ada's terminal");
    }

    #[test]
    fn routes_to_checks_navigation() {
        let config = resolve(
            r#"
main_navigation:
  - { text: "Blogs", targetView: "blogs-list-view" }
"#,
        );
        assert!(config.routes_to(&ViewId::BlogIndex));
        assert!(!config.routes_to(&ViewId::Socials));
    }

    #[test]
    fn stock_config_parses() {
        let config = resolve(stock_config_yaml());
        assert_eq!(config.site_title, "Portfolio");
        assert_eq!(config.navigation.len(), 3);
        assert_eq!(config.themes.iter().filter(|t| t.disabled).count(), 1);
    }
}
