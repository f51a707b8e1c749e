//! View identity.
//!
//! Every screen of the generated page is one view. Navigation config refers to
//! views by their DOM container id (`about-view`, `blogs-list-view`, ...);
//! those strings are resolved once, at config load time, into the closed
//! [`ViewId`] variant so the compiler and the session never branch on raw
//! strings afterwards.
//!
//! ## Reserved identifiers
//!
//! | Container id | Variant | Behaviour |
//! |---|---|---|
//! | `main-view` | [`ViewId::RootMenu`] | the navigation menu, always present |
//! | `blogs-list-view` | [`ViewId::BlogIndex`] | list of posts from `content/blogs/` |
//! | `blog-content-view` | [`ViewId::BlogPost`] | one post; shared container for all posts |
//! | `socials-view` | [`ViewId::Socials`] | links from `socials_links` |
//!
//! Any other id is an ordinary Markdown-backed [`ViewId::Content`] view.

use serde::{Serialize, Serializer};
use std::fmt;

pub const ROOT_VIEW: &str = "main-view";
pub const BLOG_INDEX_VIEW: &str = "blogs-list-view";
pub const BLOG_POST_VIEW: &str = "blog-content-view";
pub const SOCIALS_VIEW: &str = "socials-view";

/// Suffix shown in the status bar for read-only content views.
pub const READ_ONLY_MARKER: &str = "[+] R";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    RootMenu,
    BlogIndex,
    /// A single post, identified by its blog id.
    BlogPost(String),
    Socials,
    /// A Markdown-backed page, identified by its container id.
    Content(String),
}

impl ViewId {
    /// Resolve a container id from config.
    ///
    /// `blog-content-view` cannot be resolved on its own because it needs a
    /// post id, so it returns `None`; callers decide how to report that.
    pub fn from_target(target: &str) -> Option<ViewId> {
        match target {
            ROOT_VIEW => Some(ViewId::RootMenu),
            BLOG_INDEX_VIEW => Some(ViewId::BlogIndex),
            SOCIALS_VIEW => Some(ViewId::Socials),
            BLOG_POST_VIEW => None,
            other => Some(ViewId::Content(other.to_string())),
        }
    }

    /// The DOM container this view renders into.
    pub fn container(&self) -> &str {
        match self {
            ViewId::RootMenu => ROOT_VIEW,
            ViewId::BlogIndex => BLOG_INDEX_VIEW,
            ViewId::BlogPost(_) => BLOG_POST_VIEW,
            ViewId::Socials => SOCIALS_VIEW,
            ViewId::Content(id) => id,
        }
    }

    /// Reserved views have built-in behaviour and never read a content file.
    pub fn is_special(&self) -> bool {
        !matches!(self, ViewId::Content(_))
    }

    /// List views are the only ones where "activate" does something.
    pub fn is_list(&self) -> bool {
        matches!(self, ViewId::RootMenu | ViewId::BlogIndex)
    }

    /// Where "back" goes from this view. `None` means back is a no-op.
    pub fn back_target(&self) -> Option<ViewId> {
        match self {
            ViewId::RootMenu => None,
            ViewId::BlogPost(_) => Some(ViewId::BlogIndex),
            _ => Some(ViewId::RootMenu),
        }
    }

    /// Status-bar suffix: content views are shown as read-only buffers.
    pub fn status_extra(&self) -> &'static str {
        if self.is_list() { "" } else { READ_ONLY_MARKER }
    }

    /// File name shown in the status bar when no navigation entry names one.
    pub fn default_filename(&self) -> String {
        match self {
            ViewId::RootMenu => "index".to_string(),
            ViewId::BlogIndex => "blogs.list".to_string(),
            ViewId::BlogPost(id) => format!("{id}.md"),
            ViewId::Socials => "socials.md".to_string(),
            ViewId::Content(id) => id.replacen("-view", ".md", 1),
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewId::BlogPost(id) => write!(f, "{BLOG_POST_VIEW}#{id}"),
            other => f.write_str(other.container()),
        }
    }
}

/// Views serialize as their container id, which is what the page script
/// looks up with `getElementById`.
impl Serialize for ViewId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.container())
    }
}
