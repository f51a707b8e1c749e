//! Filename conventions for blog posts.
//!
//! A post's id is its filename with the `.md` extension stripped, so
//! `2024-06-01-hello-world.md` becomes `2024-06-01-hello-world`. Filenames
//! are expected to be date-prefixed; sorting ids descending then lists the
//! newest post first.
//!
//! ## Fallback Titles
//!
//! A post without a `title` in its front matter is displayed under a
//! title-cased form of its id: dashes become spaces and each word starts with
//! an uppercase letter, the rest lowercased.
//! - `2024-06-01-hello-world` → "2024 06 01 Hello World"
//! - `my-FIRST-post` → "My First Post"

const MARKDOWN_EXTENSION: &str = ".md";

/// Returns the blog id for a Markdown filename, or `None` for any other file.
///
/// The extension check is case-sensitive: `notes.MD` is not a post.
pub fn blog_id(filename: &str) -> Option<&str> {
    filename
        .strip_suffix(MARKDOWN_EXTENSION)
        .filter(|stem| !stem.is_empty())
}

/// Whether a content filename names a Markdown file.
pub fn is_markdown(filename: &str) -> bool {
    filename.ends_with(MARKDOWN_EXTENSION)
}

/// Title-case an id: dashes to spaces, capitalise each word.
pub fn title_case(id: &str) -> String {
    id.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
