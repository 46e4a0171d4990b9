// crates/dash-docs-schema/src/documents.rs
// ============================================================================
// Module: Schema Documents
// Description: Canonical schema documents for the dashboard configuration.
// Purpose: Define every registered document and the path it is served from.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Each function in this module builds one schema document. Documents link
//! to each other with `$ref` paths relative to their own served path, so
//! `./layout/pr.json` inside `/schema/pr-section.json` names
//! `/schema/layout/pr.json`. [`builtin_documents`] lists them all.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use crate::node::SchemaNode;
use crate::node::SchemaType;
use crate::node::Schematize;
use crate::registry::SchemaDocument;

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Served path of the root configuration schema.
pub const ROOT_PATH: &str = "/schema.json";
/// Served path of the PR section schema.
pub const PR_SECTION_PATH: &str = "/schema/pr-section.json";
/// Served path of the issue section schema.
pub const ISSUE_SECTION_PATH: &str = "/schema/issue-section.json";
/// Served path of the defaults schema.
pub const DEFAULTS_PATH: &str = "/schema/defaults.json";
/// Served path of the theme schema.
pub const THEME_PATH: &str = "/schema/theme.json";
/// Served path of the PR layout schema.
pub const PR_LAYOUT_PATH: &str = "/schema/layout/pr.json";
/// Served path of the issue layout schema.
pub const ISSUE_LAYOUT_PATH: &str = "/schema/layout/issue.json";
/// Served path of the column options schema.
pub const LAYOUT_OPTIONS_PATH: &str = "/schema/layout/options.json";
/// Served path of the PR keybindings schema.
pub const PR_KEYBINDINGS_PATH: &str = "/schema/keybindings/prs.json";
/// Served path of the issue keybindings schema.
pub const ISSUE_KEYBINDINGS_PATH: &str = "/schema/keybindings/issues.json";
/// Served path of the keybinding entry schema.
pub const KEYBINDING_ENTRY_PATH: &str = "/schema/keybindings/entry.json";
/// Served path of the color definition schema.
pub const HEX_COLOR_PATH: &str = "/schema/definitions/hexcolor.json";
/// Served path of the grow definition schema.
pub const GROW_PATH: &str = "/schema/definitions/grow.json";

/// Pattern accepted by theme color fields.
pub const HEX_COLOR_PATTERN: &str = "^#([a-fA-F0-9]{6}|[a-fA-F0-9]{3})$";
/// Pattern accepted by the standalone color definition (hex or ANSI index).
pub const COLOR_PATTERN: &str =
    "^(#([a-fA-F0-9]{6}|[a-fA-F0-9]{3})|([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5]))$";

/// Sentence appended to hex color descriptions.
const HEX_COLOR_HINT: &str = "Must be a valid hex color, like `#a3c` or `#aa33cc`.";

// ============================================================================
// SECTION: Registry Listing
// ============================================================================

/// Returns every built-in document paired with its served path.
#[must_use]
pub fn builtin_documents() -> Vec<SchemaDocument> {
    vec![
        SchemaDocument::new(ROOT_PATH, root_schema()),
        SchemaDocument::new(PR_SECTION_PATH, pr_section_schema()),
        SchemaDocument::new(ISSUE_SECTION_PATH, issue_section_schema()),
        SchemaDocument::new(DEFAULTS_PATH, defaults_schema()),
        SchemaDocument::new(THEME_PATH, theme_schema()),
        SchemaDocument::new(PR_LAYOUT_PATH, pr_layout_schema()),
        SchemaDocument::new(ISSUE_LAYOUT_PATH, issue_layout_schema()),
        SchemaDocument::new(LAYOUT_OPTIONS_PATH, layout_options_schema()),
        SchemaDocument::new(PR_KEYBINDINGS_PATH, pr_keybindings_schema()),
        SchemaDocument::new(ISSUE_KEYBINDINGS_PATH, issue_keybindings_schema()),
        SchemaDocument::new(KEYBINDING_ENTRY_PATH, keybinding_entry_schema()),
        SchemaDocument::new(HEX_COLOR_PATH, hex_color_schema()),
        SchemaDocument::new(GROW_PATH, grow_schema()),
    ]
}

// ============================================================================
// SECTION: Root Document
// ============================================================================

/// Returns the root dashboard configuration schema.
#[must_use]
pub fn root_schema() -> SchemaNode {
    SchemaNode::document("gh-dash.schema.json", "Dashboard Configuration")
        .with_description("Settings for the GitHub Dashboard.")
        .with_type(SchemaType::Object)
        .with_property("prSections", pr_sections_property())
        .with_property("issuesSections", issues_sections_property())
        .with_property(
            "defaults",
            SchemaNode::reference("./schema/defaults.json").with_schematize(Schematize::weighted(3)),
        )
        .with_property("repoPaths", repo_paths_property())
        .with_property("keybindings", keybindings_property())
        .with_property(
            "theme",
            SchemaNode::reference("./schema/theme.json").with_schematize(Schematize::weighted(6)),
        )
        .with_property("pager", pager_property())
        .with_property(
            "showAuthorIcons",
            SchemaNode::typed(SchemaType::Boolean, "Show Author Role Icons")
                .with_description(
                    "Specifies whether to show author-role icons in the dashboard.\nSet this value \
                     to `false` to hide the author-role icons.\nSee the [Theme \
                     Icons](theme#icons) section and\n[Icon Colors](theme#colors.icons) section \
                     for\nconfiguration options you can set to change the author-role icons and \
                     author-role icon colors.\n",
                )
                .with_schematize(Schematize::weighted(8)),
        )
        .with_property(
            "smartFilteringAtLaunch",
            SchemaNode::typed(SchemaType::Boolean, "Smart Filtering At Launch")
                .with_description(
                    "Set this to `false` to disable [Smart \
                     Filtering](/getting-started/smartfiltering) at `gh-dash` launch.\n",
                )
                .with_schematize(Schematize::weighted(9)),
        )
        .with_property(
            "confirmQuit",
            SchemaNode::typed(SchemaType::Boolean, "Confirm Quit")
                .with_description(
                    "Specifies whether the user needs to confirm when quitting `gh-dash`",
                )
                .with_default(json!(false))
                .with_schematize(Schematize::weighted(10)),
        )
}

/// Builds the `prSections` root property.
fn pr_sections_property() -> SchemaNode {
    SchemaNode::typed(SchemaType::Array, "Pull Request Sections")
        .with_description("Define sections for the dashboard's PR view.")
        .with_items(SchemaNode::reference("./schema/pr-section.json"))
        .with_default(json!([
            { "title": "My Pull Requests", "filters": "is:open author:@me" },
            { "title": "Needs My Review", "filters": "is:open review-requested:@me" },
            { "title": "Involved", "filters": "is:open involves:@me -author:@me" }
        ]))
        .with_schematize(
            Schematize::weighted(1)
                .with_details(
                    "The `prSections` setting defines one or more sections to display in the \
                     dashboard's PRs\nview as tabs. Each section needs a title, which is \
                     displayed as the tab name for the\nsection, and a GitHub search filter. \
                     The dashboard queries GitHub with the search filter\nto populate the list \
                     of PRs to display for that section.\n",
                )
                .with_default_details(
                    "By default, the PRs view on the dashboard has three sections: `My Pull \
                     Requests`,\n`Needs My Review`, and `Involved`.\n",
                    Some("yaml"),
                ),
        )
}

/// Builds the `issuesSections` root property.
fn issues_sections_property() -> SchemaNode {
    SchemaNode::typed(SchemaType::Array, "Issue Sections")
        .with_description("Define sections for the dashboard's Issues view.")
        .with_items(SchemaNode::reference("./schema/issue-section.json"))
        .with_default(json!([
            { "title": "My Issues", "filters": "is:open author:@me" },
            { "title": "Assigned", "filters": "is:open assignee:@me" },
            { "title": "Involved", "filters": "is:open involves:@me -author:@me" }
        ]))
        .with_schematize(
            Schematize::weighted(2)
                .with_details(
                    "The `issuesSections` setting defines one or more sections to display in \
                     the dashboard's\nIssues view as tabs. Each section needs a title and a \
                     GitHub search filter.\n",
                )
                .with_default_details(
                    "By default, the Issues view on the dashboard has three sections: `My \
                     Issues`,\n`Assigned`, and `Involved`.\n",
                    Some("yaml"),
                ),
        )
}

/// Builds the `repoPaths` root property.
fn repo_paths_property() -> SchemaNode {
    SchemaNode::typed(SchemaType::Object, "Repo Path Map")
        .with_description("Key-value pairs that match repositories to local file paths.")
        .with_examples(vec![json!({
            "dlvhdr/*": "~/code/repos/*",
            "dlvhdr/gh-dash": "~/code/gh-dash"
        })])
        .with_pattern_property(
            "\\*$",
            SchemaNode::typed(SchemaType::String, "With a Wildcard")
                .with_pattern("\\*$")
                .with_description(
                    "If the repo name (key) includes an asterisk, the path (value) must too.",
                ),
        )
        .with_pattern_property(
            "^[^\\*]+$",
            SchemaNode::typed(SchemaType::String, "Without a Wildcard")
                .with_pattern("^[^\\*]+$")
                .with_description(
                    "If the repo name (key) doesn't include an asterisk, the path (value) can't \
                     either.",
                ),
        )
        .with_schematize(Schematize::weighted(4).without_schema_render())
}

/// Builds the `keybindings` root property.
fn keybindings_property() -> SchemaNode {
    SchemaNode::typed(SchemaType::Object, "Keybindings")
        .with_description("Define keybindings to run shell commands.")
        .with_property(
            "prs",
            SchemaNode::reference("./schema/keybindings/prs.json")
                .with_schematize(Schematize::weighted(1)),
        )
        .with_property(
            "issues",
            SchemaNode::reference("./schema/keybindings/issues.json")
                .with_schematize(Schematize::weighted(2)),
        )
        .with_examples(vec![
            json!({
                "issues": [
                    { "key": "P", "command": "gh issue pin {{ .IssueNumber }} --repo {{ .RepoName }}" }
                ]
            }),
            json!({
                "prs": [
                    {
                        "key": "c",
                        "command": "tmux new-window -c {{.RepoPath}} '\n  gh pr checkout {{.PrNumber}} &&\n  nvim -c \":DiffviewOpen master...{{.HeadRefName}}\"\n'\n"
                    },
                    {
                        "key": "v",
                        "command": "cd {{.RepoPath}} && code . && gh pr checkout {{.PrNumber}}\n"
                    }
                ]
            }),
        ])
        .with_schematize(Schematize::weighted(5).without_schema_render())
}

/// Builds the `pager` root property.
fn pager_property() -> SchemaNode {
    SchemaNode::typed(SchemaType::Object, "Pager")
        .with_description("Specify the pager settings to use in the dashboard.")
        .with_property(
            "diff",
            SchemaNode::typed(SchemaType::String, "Diff Pager")
                .with_description("Specifies the pager to use when diffing.")
                .with_any_of(vec![
                    SchemaNode::of_type(SchemaType::String),
                    SchemaNode::default().with_enum(&["less", "delta"]),
                ])
                .with_default(json!("less")),
        )
        .with_schematize(Schematize::weighted(7).without_schema_render())
}

// ============================================================================
// SECTION: Section Documents
// ============================================================================

/// Returns the PR section schema.
#[must_use]
pub fn pr_section_schema() -> SchemaNode {
    SchemaNode::document("pr-section.schema.json", "PR Section Options")
        .with_description("Defines a section in the dashboard's PRs view.")
        .with_type(SchemaType::Object)
        .with_required(&["title", "filters"])
        .with_property(
            "title",
            SchemaNode::typed(SchemaType::String, "PR Title").with_description(
                "Defines the section's name as displayed in the tabs for the PRs view.",
            ),
        )
        .with_property(
            "filters",
            SchemaNode::typed(SchemaType::String, "PR Filters").with_description(
                "Defines the GitHub search filters for the PRs in the section's table.",
            ),
        )
        .with_property("layout", SchemaNode::reference("./layout/pr.json"))
        .with_property(
            "limit",
            SchemaNode::typed(SchemaType::Integer, "PR Fetch Limit").with_minimum(1),
        )
}

/// Returns the issue section schema.
#[must_use]
pub fn issue_section_schema() -> SchemaNode {
    SchemaNode::document("issue-section.schema.json", "Issue Section Options")
        .with_description("Defines a section in the dashboard's Issues view.")
        .with_type(SchemaType::Object)
        .with_required(&["title", "filters"])
        .with_property(
            "title",
            SchemaNode::typed(SchemaType::String, "Issue Title").with_description(
                "Defines the section's name as displayed in the tabs for the issues view.",
            ),
        )
        .with_property(
            "filters",
            SchemaNode::typed(SchemaType::String, "Issue Filters").with_description(
                "Defines the GitHub search filters for the issues in the section's table.",
            ),
        )
        .with_property(
            "layout",
            SchemaNode::reference("./layout/issue.json").with_schematize(Schematize::weighted(3)),
        )
        .with_property(
            "limit",
            SchemaNode::typed(SchemaType::Integer, "Issue Fetch Limit").with_minimum(1),
        )
}

// ============================================================================
// SECTION: Defaults Document
// ============================================================================

/// Returns the per-section defaults schema.
#[must_use]
pub fn defaults_schema() -> SchemaNode {
    SchemaNode::document("defaults.schema.json", "Default Options")
        .with_description("Define options that can be overridden per-section.")
        .with_type(SchemaType::Object)
        .with_default(json!({
            "preview": { "open": true, "width": 0.45 },
            "prsLimit": 20,
            "prApproveComment": "LGTM",
            "issuesLimit": 20,
            "view": "prs",
            "refetchIntervalMinutes": 30
        }))
        .with_property(
            "layout",
            SchemaNode::typed(SchemaType::Object, "Layout Options")
                .with_description("Defines the layout for the work item tables in the dashboard.")
                .with_property("prs", SchemaNode::reference("./layout/pr.json"))
                .with_property("issues", SchemaNode::reference("./layout/issue.json")),
        )
        .with_property(
            "prsLimit",
            SchemaNode::typed(SchemaType::Integer, "PR Fetch Limit")
                .with_description("Global limit on the number of PRs fetched for the dashboard")
                .with_minimum(1)
                .with_default(json!(20)),
        )
        .with_property(
            "issuesLimit",
            SchemaNode::typed(SchemaType::Integer, "Issue Fetch Limit")
                .with_description("Global limit on the number of issues fetched for the dashboard")
                .with_minimum(1)
                .with_default(json!(20)),
        )
        .with_property("preview", preview_property())
        .with_property(
            "refetchIntervalMinutes",
            SchemaNode::typed(SchemaType::Integer, "Refetch Interval in Minutes")
                .with_description("Specifies how often to refetch PRs and Issues in minutes.")
                .with_minimum(0)
                .with_default(json!(30)),
        )
        .with_property(
            "dateFormat",
            SchemaNode::typed(SchemaType::String, "Date format")
                .with_description("Specifies how dates are formatted."),
        )
        .with_property(
            "view",
            SchemaNode::typed(SchemaType::String, "Default View")
                .with_description(
                    "Specifies whether the dashboard should display the PRs or Issues view on \
                     load.",
                )
                .with_enum(&["issues", "prs"])
                .with_default(json!("prs")),
        )
        .with_property(
            "prApproveComment",
            SchemaNode::typed(SchemaType::String, "PR Approve Comment")
                .with_description("The default comment prefilled when approving a PR.")
                .with_default(json!("LGTM")),
        )
}

/// Builds the `preview` defaults property.
fn preview_property() -> SchemaNode {
    SchemaNode::typed(SchemaType::Object, "Preview Pane")
        .with_description("Defaults for the preview pane")
        .with_property(
            "open",
            SchemaNode::typed(SchemaType::Boolean, "Open on Load")
                .with_description(
                    "Whether to have the preview pane open by default when the dashboard loads.",
                )
                .with_default(json!(true)),
        )
        .with_property(
            "width",
            SchemaNode::typed(SchemaType::Number, "Preview Pane Width")
                .with_description(
                    "Specifies the width of the preview pane. Numbers between 0 and 1 represent \
                     size relative to overall terminal window size (e.g 0.4 is 40%), numbers >=1 \
                     represent size in columns.",
                )
                .with_minimum(0)
                .with_default(json!(0.45)),
        )
}

// ============================================================================
// SECTION: Layout Documents
// ============================================================================

/// Returns the PR section layout schema.
#[must_use]
pub fn pr_layout_schema() -> SchemaNode {
    SchemaNode::document("pr.schema.json", "PR Section Layout")
        .with_description("Defines the columns a PR section displays in its table.")
        .with_type(SchemaType::Object)
        .with_default(json!({
            "updatedAt": { "width": 7 },
            "repo": { "width": 15 },
            "author": { "width": 15 },
            "assignees": { "width": 20, "hidden": true },
            "base": { "width": 15, "hidden": true },
            "lines": { "width": 16 }
        }))
        .with_property(
            "updatedAt",
            column("PR Updated At Column", "the updated at column in a PR section")
                .with_default(json!({ "width": 7 })),
        )
        .with_property("state", column("PR State Column", "the state column in a PR section"))
        .with_property(
            "repo",
            column("PR Repo Column", "the repo column in a PR section")
                .with_default(json!({ "width": 15 })),
        )
        .with_property("title", column("PR Title Column", "the title column in a PR section"))
        .with_property(
            "author",
            column("PR Author Column", "the author column in a PR section")
                .with_default(json!({ "width": 15 })),
        )
        .with_property(
            "authorIcon",
            role_icon(
                "PR Author Role Icon",
                "Defines options for the role icon for each PR in a PR section.",
                "Hide Author Role Icon",
                "Specify whether the role icon for PR authors should be hidden from view.",
            ),
        )
        .with_property(
            "assignees",
            column("PR Assignees Column", "the assignees column in a PR section")
                .with_default(json!({ "width": 20, "hidden": true })),
        )
        .with_property(
            "base",
            column("PR Base Column", "the base column in a PR section")
                .with_default(json!({ "width": 15, "hidden": true })),
        )
        .with_property(
            "reviewStatus",
            column("PR Review Status Column", "the review status column in a PR section"),
        )
        .with_property("ci", column("PR Continuous Integration Column", "the ci column in a PR section"))
        .with_property(
            "lines",
            column("PR Lines Column", "the lines column in a PR section")
                .with_default(json!({ "width": 16 })),
        )
}

/// Returns the issue section layout schema.
#[must_use]
pub fn issue_layout_schema() -> SchemaNode {
    SchemaNode::document("issue.schema.json", "Issue Section Layout")
        .with_description("Defines the columns an issue section displays in its table.")
        .with_type(SchemaType::Object)
        .with_default(json!({
            "updatedAt": { "width": 7 },
            "repo": { "width": 15 },
            "creator": { "width": 10 },
            "assignees": { "width": 20, "hidden": true }
        }))
        .with_property(
            "updatedAt",
            column("Issue Updated At Column", "the updated at column in an issue section")
                .with_default(json!({ "width": 7 })),
        )
        .with_property("state", column("Issue State Column", "the state column in an issue section"))
        .with_property(
            "repo",
            column("Issue Repo Column", "the repo column in an issue section")
                .with_default(json!({ "width": 15 })),
        )
        .with_property("title", column("Issue Title Column", "the title column in an issue section"))
        .with_property(
            "creator",
            column("Issue Creator Column", "the creator column in an issue section")
                .with_default(json!({ "width": 10 })),
        )
        .with_property(
            "creatorIcon",
            role_icon(
                "Issue Creator Role Icon",
                "Defines options for the role icon for each issue in an issue section.",
                "Hide Creator Icon",
                "Specify whether the role icon for issue creators should be hidden from view.",
            ),
        )
        .with_property(
            "assignees",
            column("Issue Assignees Column", "the assignees column in an issue section")
                .with_default(json!({ "width": 20, "hidden": true })),
        )
        .with_property(
            "comments",
            column("Issue Comments Column", "the comments column in an issue section"),
        )
        .with_property(
            "reactions",
            column("Issue Reactions Column", "the reactions column in an issue section"),
        )
}

/// Returns the per-column options schema.
#[must_use]
pub fn layout_options_schema() -> SchemaNode {
    SchemaNode::document("layout.options.schema.json", "Valid Layout Options")
        .with_type(SchemaType::Object)
        .with_property(
            "grow",
            SchemaNode::typed(SchemaType::Boolean, "Grow Column")
                .with_description("Select whether the column should grow to fill available space."),
        )
        .with_property(
            "width",
            SchemaNode::typed(SchemaType::Integer, "Column Width")
                .with_description("Select the column's width by cell count.")
                .with_minimum(0),
        )
        .with_property(
            "hidden",
            SchemaNode::typed(SchemaType::Boolean, "Hide Column")
                .with_description("Select whether the column should be hidden from view."),
        )
}

/// Builds a table column node linked to the column options document.
fn column(title: &str, subject: &str) -> SchemaNode {
    SchemaNode::typed(SchemaType::Object, title)
        .with_description(&format!("Defines options for {subject}."))
        .with_one_of(vec![SchemaNode::reference("./options.json")])
}

/// Builds an author-role icon node with a single `hidden` flag.
fn role_icon(title: &str, description: &str, hidden_title: &str, hidden_description: &str) -> SchemaNode {
    SchemaNode::typed(SchemaType::Object, title).with_description(description).with_property(
        "hidden",
        SchemaNode::typed(SchemaType::Boolean, hidden_title).with_description(hidden_description),
    )
}

// ============================================================================
// SECTION: Keybinding Documents
// ============================================================================

/// Returns the PR view keybindings schema.
#[must_use]
pub fn pr_keybindings_schema() -> SchemaNode {
    SchemaNode::document("prs.schema.json", "PRs Commands")
        .with_description("Keybindings for the Pull Request View")
        .with_type(SchemaType::Array)
        .with_items(SchemaNode::reference("./entry.json"))
}

/// Returns the issues view keybindings schema.
#[must_use]
pub fn issue_keybindings_schema() -> SchemaNode {
    SchemaNode::document("issues.schema.json", "Issues Commands")
        .with_description("Keybindings for the Issues View")
        .with_type(SchemaType::Array)
        .with_items(SchemaNode::reference("./entry.json"))
}

/// Returns the keybinding entry schema.
#[must_use]
pub fn keybinding_entry_schema() -> SchemaNode {
    SchemaNode::document("entry.schema.json", "Valid Keybinding Entry")
        .with_description("A keybinding to run a shell command in a view.")
        .with_type(SchemaType::Object)
        .with_required(&["key"])
        .with_property(
            "key",
            SchemaNode::typed(SchemaType::String, "Bound Key")
                .with_description("The combination of keys that trigger the command."),
        )
        .with_property(
            "name",
            SchemaNode::typed(SchemaType::String, "Command name")
                .with_description("A descriptive name for the command"),
        )
        .with_property(
            "command",
            SchemaNode::typed(SchemaType::String, "Bound Command").with_description(
                "The shell command that runs when you press the key combination.",
            ),
        )
        .with_property(
            "builtin",
            SchemaNode::typed(SchemaType::String, "Builtin Command").with_description(
                "One of gh-dash's builtin commands that will run when you press the key \
                 combination",
            ),
        )
}

// ============================================================================
// SECTION: Theme Document
// ============================================================================

/// Returns the theme schema.
#[must_use]
pub fn theme_schema() -> SchemaNode {
    SchemaNode::document("theme.schema.json", "Theme Options")
        .with_description("Theme settings for gh-dash")
        .with_type(SchemaType::Object)
        .with_required(&[])
        .with_property("ui", theme_ui_property())
        .with_property("icons", theme_icons_property())
        .with_property("colors", theme_colors_property())
        .with_default(json!({
            "ui": {
                "sectionsShowCount": true,
                "table": { "showSeparators": true, "compact": false }
            },
            "colors": {
                "text": {
                    "primary": "#ffffff",
                    "secondary": "#c6c6c6",
                    "inverted": "#303030",
                    "faint": "#8a8a8a",
                    "warning": "#800000",
                    "success": "#008000"
                },
                "background": { "selected": "#808080" },
                "border": { "primary": "#808080", "secondary": "#c0c0c0", "faint": "#000000" }
            }
        }))
}

/// Builds the `ui` theme property.
fn theme_ui_property() -> SchemaNode {
    let table = SchemaNode::typed(SchemaType::Object, "Table Settings")
        .with_property(
            "sectionsShowCount",
            SchemaNode::typed(SchemaType::Boolean, "Sections Show Count")
                .with_description(
                    "Whether the number of results show up next to each section's title in the \
                     tab bar.",
                )
                .with_default(json!(true)),
        )
        .with_property(
            "showSeparators",
            SchemaNode::typed(SchemaType::Boolean, "Show Separators")
                .with_description(
                    "Whether to show the separators between lines in the prs/issues tables.",
                )
                .with_default(json!(true)),
        )
        .with_property(
            "compact",
            SchemaNode::typed(SchemaType::Boolean, "Compact")
                .with_description("Whether to show table rows in a compact way or not")
                .with_default(json!(false)),
        );
    SchemaNode::typed(SchemaType::Object, "UI Settings").with_property("table", table)
}

/// Builds the `icons` theme property.
fn theme_icons_property() -> SchemaNode {
    let mut icons = SchemaNode::typed(SchemaType::Object, "Theme Icons")
        .with_description("Defines the author-role icons for the dashboard.");
    for (key, title, role) in ROLE_ICONS {
        icons = icons.with_property(
            key,
            SchemaNode::typed(SchemaType::String, title).with_description(&format!(
                "Specifies the character to use as the {role}-role icon."
            )),
        );
    }
    icons
}

/// Author roles as (property key, icon title, role label).
const ROLE_ICONS: [(&str, &str, &str); 6] = [
    ("newcontributor", "New Contributor Role Icon", "new-contributor"),
    ("contributor", "Contributor Role Icon", "contributor"),
    ("collaborator", "Collaborator Role Icon", "collaborator"),
    ("member", "Member Role Icon", "member"),
    ("owner", "Owner Role Icon", "owner"),
    ("unknownrole", "Unknown Role Icon", "unknown"),
];

/// Builds the `colors` theme property.
fn theme_colors_property() -> SchemaNode {
    let text = SchemaNode::typed(SchemaType::Object, "Text Colors")
        .with_description("Defines the foreground (text) colors for the dashboard.")
        .with_required(&[])
        .with_property(
            "primary",
            hinted_hex_color("Primary Text Color", "Specifies the color for active text.", "#ffffff"),
        )
        .with_property(
            "secondary",
            hinted_hex_color(
                "Secondary Text Color",
                "Specifies the color for important text.",
                "#c6c6c6",
            ),
        )
        .with_property(
            "inverted",
            hinted_hex_color(
                "Inverted Text Color",
                "Specifies the color for text on an inverted background.",
                "#303030",
            ),
        )
        .with_property(
            "faint",
            hinted_hex_color(
                "Faint Text Color",
                "Specifies the color for informational text.",
                "#8a8a8a",
            ),
        )
        .with_property(
            "warning",
            hinted_hex_color(
                "Warning Text Color",
                "Specifies the color for warning or error text.",
                "#800000",
            ),
        )
        .with_property(
            "success",
            hinted_hex_color("Success Text Color", "Specifies the color for success text.", "#008000"),
        );
    let background = SchemaNode::typed(SchemaType::Object, "Background Colors")
        .with_description("Defines the background colors for the dashboard.")
        .with_required(&[])
        .with_property(
            "selected",
            hinted_hex_color(
                "Selected Background Color",
                "Defines the background color for selected items.",
                "#808080",
            ),
        );
    let border = SchemaNode::typed(SchemaType::Object, "Border Colors")
        .with_description("Defines the border colors for the dashboard.")
        .with_required(&[])
        .with_property(
            "primary",
            hinted_hex_color(
                "Primary Border Color",
                "Defines the border color for primary elements.",
                "#808080",
            ),
        )
        .with_property(
            "secondary",
            hinted_hex_color(
                "Secondary Border Color",
                "Defines the border color for secondary elements.",
                "#c0c0c0",
            ),
        )
        .with_property(
            "faint",
            hinted_hex_color(
                "Faint Border Color",
                "Defines the border color between rows in the table.",
                "#000000",
            ),
        );
    let mut icon = SchemaNode::typed(SchemaType::Object, "Icon Colors")
        .with_description("Defines author-role icon colors for the dashboard.");
    for (key, title, role) in ROLE_ICONS {
        icon = icon.with_property(
            key,
            hex_color(
                &format!("{title} Color"),
                &format!("Specifies the icon color for the {role}-role icon."),
            ),
        );
    }
    SchemaNode::typed(SchemaType::Object, "Theme Colors")
        .with_description("Defines text, background, and border colors for the dashboard.")
        .with_required(&[])
        .with_property("text", text)
        .with_property("background", background)
        .with_property("border", border)
        .with_property("icon", icon)
}

/// Builds a hex-color string node.
fn hex_color(title: &str, description: &str) -> SchemaNode {
    SchemaNode::typed(SchemaType::String, title)
        .with_description(description)
        .with_pattern(HEX_COLOR_PATTERN)
}

/// Builds a hex-color string node with a format hint and default.
fn hinted_hex_color(title: &str, description: &str, default: &str) -> SchemaNode {
    hex_color(title, &format!("{description} {HEX_COLOR_HINT}")).with_default(json!(default))
}

// ============================================================================
// SECTION: Definitions
// ============================================================================

/// Returns the standalone color definition schema.
#[must_use]
pub fn hex_color_schema() -> SchemaNode {
    SchemaNode::document("color.schema.json", "Color")
        .with_description(
            "Represents a valid color: either a hex color like `#a3c` or `#aa33cc`, or an ANSI \
             color index from `0` to `255`.",
        )
        .with_type(SchemaType::String)
        .with_format("color")
        .with_pattern(COLOR_PATTERN)
        .with_examples(vec![json!("#aa33cc")])
}

/// Returns the standalone grow definition schema.
#[must_use]
pub fn grow_schema() -> SchemaNode {
    SchemaNode::document("grow.schema.json", "Grow Column")
        .with_description("Select whether the column should grow to fill available space.")
        .with_type(SchemaType::Boolean)
}
