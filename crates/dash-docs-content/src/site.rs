// crates/dash-docs-content/src/site.rs
// ============================================================================
// Module: Site Configuration
// Description: Declarative site metadata and sidebar navigation.
// Purpose: Describe the docs site and check its sidebar against the pages.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`SiteConfig::gh_dash`] returns the dashboard docs site: title, URL,
//! stylesheets, component overrides, social links, and the sidebar tree.
//! [`SiteConfig::check_links`] resolves every sidebar slug against a loaded
//! [`DocsCollection`] and reports each one that has no page.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::ContentError;
use crate::pages::DocsCollection;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Custom component replacing a built-in site component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentOverride {
    /// Built-in component name.
    pub name: String,
    /// Replacement component path.
    pub path: String,
}

/// Social link shown in the site header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Icon identifier.
    pub icon: String,
    /// Accessible label.
    pub label: String,
    /// Link target.
    pub href: String,
}

/// Directory whose pages form an autogenerated sidebar group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutogenerateDirectory {
    /// Directory relative to the docs root.
    pub directory: String,
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Bare page slug.
    Slug(String),
    /// Page slug with an optional label override.
    Link {
        /// Label shown instead of the page title.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        /// Target page slug.
        slug: String,
    },
    /// Group generated from a directory of pages.
    Autogenerate {
        /// Group label.
        label: String,
        /// Source directory.
        autogenerate: AutogenerateDirectory,
    },
    /// Labelled group of nested entries.
    Group {
        /// Group label.
        label: String,
        /// Nested entries.
        items: Vec<SidebarEntry>,
    },
}

impl SidebarEntry {
    /// Creates a bare slug entry.
    #[must_use]
    pub fn slug(slug: &str) -> Self {
        Self::Slug(slug.to_string())
    }

    /// Creates a slug entry without a label override.
    #[must_use]
    pub fn link(slug: &str) -> Self {
        Self::Link {
            label: None,
            slug: slug.to_string(),
        }
    }

    /// Creates an autogenerated directory group.
    #[must_use]
    pub fn autogenerate(label: &str, directory: &str) -> Self {
        Self::Autogenerate {
            label: label.to_string(),
            autogenerate: AutogenerateDirectory {
                directory: directory.to_string(),
            },
        }
    }

    /// Creates a labelled group.
    #[must_use]
    pub fn group(label: &str, items: Vec<Self>) -> Self {
        Self::Group {
            label: label.to_string(),
            items,
        }
    }
}

/// Broken-link checker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCheckConfig {
    /// File that receives broken-link reports.
    pub log_file_path: String,
    /// Whether external links are checked.
    pub check_external_links: bool,
}

/// Site metadata and navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Canonical site URL.
    pub site: String,
    /// Stylesheets loaded on every page.
    pub custom_css: Vec<String>,
    /// Component overrides.
    pub components: Vec<ComponentOverride>,
    /// Header social links.
    pub social: Vec<SocialLink>,
    /// Sidebar tree.
    pub sidebar: Vec<SidebarEntry>,
    /// Broken-link checker settings.
    pub link_check: LinkCheckConfig,
}

// ============================================================================
// SECTION: Dashboard Site
// ============================================================================

impl SiteConfig {
    /// Returns the dashboard docs site configuration.
    #[must_use]
    pub fn gh_dash() -> Self {
        Self {
            title: "DASH".to_string(),
            site: "https://gh-dash.dev".to_string(),
            custom_css: vec![
                "./src/styles/custom.css".to_string(),
                "./src/fonts/font-face.css".to_string(),
            ],
            components: vec![
                ComponentOverride {
                    name: "Header".to_string(),
                    path: "./src/components/Header.astro".to_string(),
                },
                ComponentOverride {
                    name: "PageTitle".to_string(),
                    path: "./src/components/Title.astro".to_string(),
                },
            ],
            social: vec![SocialLink {
                icon: "github".to_string(),
                label: "GitHub".to_string(),
                href: "https://github.com/dlvhdr/gh-dash".to_string(),
            }],
            sidebar: vec![
                SidebarEntry::group(
                    "Getting Started",
                    vec![
                        SidebarEntry::slug("getting-started"),
                        SidebarEntry::slug("getting-started/usage"),
                        SidebarEntry::autogenerate("Keybindings", "getting-started/keybindings"),
                    ],
                ),
                SidebarEntry::group(
                    "Configuration",
                    vec![
                        SidebarEntry::slug("configuration"),
                        SidebarEntry::slug("configuration/examples"),
                        SidebarEntry::slug("configuration/schema"),
                        SidebarEntry::slug("configuration/defaults"),
                        SidebarEntry::slug("configuration/searching"),
                        SidebarEntry::slug("configuration/pr-section"),
                        SidebarEntry::slug("configuration/issue-section"),
                        SidebarEntry::slug("configuration/repo-paths"),
                        SidebarEntry::slug("configuration/keybindings"),
                        SidebarEntry::slug("configuration/theme"),
                        SidebarEntry::group(
                            "Layout",
                            vec![
                                SidebarEntry::slug("configuration/layout/options"),
                                SidebarEntry::slug("configuration/layout/pr"),
                                SidebarEntry::slug("configuration/layout/issue"),
                            ],
                        ),
                    ],
                ),
                SidebarEntry::link("contributing"),
                SidebarEntry::link("donating"),
            ],
            link_check: LinkCheckConfig {
                log_file_path: "broken-links.log".to_string(),
                check_external_links: false,
            },
        }
    }

    /// Returns every slug referenced by the sidebar, in tree order.
    #[must_use]
    pub fn sidebar_slugs(&self) -> Vec<&str> {
        let mut slugs = Vec::new();
        collect_slugs(&self.sidebar, &mut slugs);
        slugs
    }

    /// Checks the sidebar against the loaded docs pages.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::BrokenLinks`] naming every sidebar slug with
    /// no page and every autogenerated directory with no pages.
    pub fn check_links(&self, docs: &DocsCollection) -> Result<(), ContentError> {
        let mut broken = Vec::new();
        check_entries(&self.sidebar, "sidebar", docs, &mut broken);
        if broken.is_empty() { Ok(()) } else { Err(ContentError::BrokenLinks(broken)) }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends slugs under `entries` in tree order.
fn collect_slugs<'a>(entries: &'a [SidebarEntry], slugs: &mut Vec<&'a str>) {
    for entry in entries {
        match entry {
            SidebarEntry::Slug(slug) | SidebarEntry::Link { slug, .. } => slugs.push(slug),
            SidebarEntry::Autogenerate { .. } => {}
            SidebarEntry::Group { items, .. } => collect_slugs(items, slugs),
        }
    }
}

/// Records broken links found under `entries`.
fn check_entries(
    entries: &[SidebarEntry],
    location: &str,
    docs: &DocsCollection,
    broken: &mut Vec<String>,
) {
    for entry in entries {
        match entry {
            SidebarEntry::Slug(slug) | SidebarEntry::Link { slug, .. } => {
                if !docs.contains(normalize_slug(slug)) {
                    broken.push(format!("{location}: /{slug} has no page"));
                }
            }
            SidebarEntry::Autogenerate { label, autogenerate } => {
                if docs.pages_in(&autogenerate.directory).is_empty() {
                    broken.push(format!(
                        "{location} > {label}: directory {} has no pages",
                        autogenerate.directory
                    ));
                }
            }
            SidebarEntry::Group { label, items } => {
                check_entries(items, &format!("{location} > {label}"), docs, broken);
            }
        }
    }
}

/// Strips surrounding slashes from a sidebar slug.
fn normalize_slug(slug: &str) -> &str {
    slug.trim_matches('/')
}
