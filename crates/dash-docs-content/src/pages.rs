// crates/dash-docs-content/src/pages.rs
// ============================================================================
// Module: Docs Pages Collection
// Description: Markdown pages with YAML frontmatter keyed by slug.
// Purpose: Load and validate the documentation pages collection.
// Dependencies: serde, serde_yaml
// ============================================================================

//! ## Overview
//! Every `.md` and `.mdx` file under the docs root is one page. A page must
//! open with a `---` fenced YAML frontmatter block that carries at least a
//! `title`. The slug is the path relative to the root, lowercased, without
//! extension, with a trailing `index` segment collapsed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Component;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::ContentError;
use crate::files::collect_files;
use crate::files::relative_display;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File extensions recognized as pages.
pub const PAGE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Frontmatter fence line.
const FENCE: &str = "---";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Page layout template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageTemplate {
    /// Standard documentation layout with sidebar.
    #[default]
    Doc,
    /// Landing layout without sidebar.
    Splash,
}

/// Per-page sidebar hints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageSidebar {
    /// Sort position within an autogenerated group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Label overriding the page title in the sidebar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Validated page frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFrontmatter {
    /// Page title.
    pub title: String,
    /// Optional summary used for meta tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional sidebar hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<PageSidebar>,
    /// Optional layout template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PageTemplate>,
}

/// One loaded docs page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsPage {
    /// Slug the page is routed under.
    pub slug: String,
    /// Path relative to the docs root.
    pub path: String,
    /// Parsed frontmatter.
    pub frontmatter: PageFrontmatter,
    /// Markdown body after the frontmatter block.
    pub body: String,
}

impl DocsPage {
    /// Returns the sidebar order hint, if any.
    #[must_use]
    pub fn order(&self) -> Option<i64> {
        self.frontmatter.sidebar.as_ref().and_then(|sidebar| sidebar.order)
    }
}

/// Docs pages keyed by slug.
///
/// # Invariants
/// - Slugs are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocsCollection {
    /// Pages ordered by slug.
    pages: BTreeMap<String, DocsPage>,
}

impl DocsCollection {
    /// Loads every page under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Io`] when the root cannot be walked and
    /// [`ContentError::Invalid`] listing every page that failed validation.
    pub fn load(root: &Path) -> Result<Self, ContentError> {
        let files = collect_files(root, PAGE_EXTENSIONS)?;
        let mut pages: BTreeMap<String, DocsPage> = BTreeMap::new();
        let mut issues = Vec::new();
        for file in files {
            let path = relative_display(root, &file);
            let text = match fs::read_to_string(&file) {
                Ok(text) => text,
                Err(err) => {
                    issues.push(format!("{path}: {err}"));
                    continue;
                }
            };
            match parse_page(&path, &text) {
                Ok(page) => {
                    if let Some(existing) = pages.get(&page.slug) {
                        issues.push(format!(
                            "{path}: slug `{}` already defined by {}",
                            page.slug, existing.path
                        ));
                        continue;
                    }
                    pages.insert(page.slug.clone(), page);
                }
                Err(message) => issues.push(format!("{path}: {message}")),
            }
        }
        if issues.is_empty() { Ok(Self { pages }) } else { Err(ContentError::Invalid(issues)) }
    }

    /// Returns the page registered under `slug`.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&DocsPage> {
        self.pages.get(slug)
    }

    /// Returns true when a page is registered under `slug`.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.pages.contains_key(slug)
    }

    /// Returns the number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true when the collection holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates pages in slug order.
    pub fn pages(&self) -> impl Iterator<Item = &DocsPage> {
        self.pages.values()
    }

    /// Returns pages whose slug lies under `directory`, ordered by their
    /// sidebar order hint and then by slug.
    #[must_use]
    pub fn pages_in(&self, directory: &str) -> Vec<&DocsPage> {
        let prefix = format!("{}/", directory.trim_matches('/'));
        let mut pages: Vec<&DocsPage> =
            self.pages.values().filter(|page| page.slug.starts_with(&prefix)).collect();
        pages.sort_by(|left, right| {
            let left_order = left.order().unwrap_or(i64::MAX);
            let right_order = right.order().unwrap_or(i64::MAX);
            left_order.cmp(&right_order).then_with(|| left.slug.cmp(&right.slug))
        });
        pages
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses one page from its relative path and text.
pub(crate) fn parse_page(path: &str, text: &str) -> Result<DocsPage, String> {
    let (frontmatter, body) =
        split_frontmatter(text).ok_or_else(|| "missing frontmatter block".to_string())?;
    if frontmatter.trim().is_empty() {
        return Err("missing field `title`".to_string());
    }
    let frontmatter: PageFrontmatter =
        serde_yaml::from_str(frontmatter).map_err(|err| err.to_string())?;
    if frontmatter.title.trim().is_empty() {
        return Err("title must be non-empty".to_string());
    }
    Ok(DocsPage {
        slug: slug_for(Path::new(path)),
        path: path.to_string(),
        frontmatter,
        body: body.to_string(),
    })
}

/// Splits `---` fenced frontmatter from the body.
fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text.strip_prefix(FENCE)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Some((&rest[.. offset], &rest[offset + line.len() ..]));
        }
        offset += line.len();
    }
    None
}

/// Derives the routing slug from a relative page path.
pub(crate) fn slug_for(relative: &Path) -> String {
    let without_extension = relative.with_extension("");
    let mut segments: Vec<String> = without_extension
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().to_lowercase()),
            _ => None,
        })
        .collect();
    if segments.last().is_some_and(|last| last == "index") {
        segments.pop();
    }
    segments.join("/")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
