//! Hierarchy tree builder.
//!
//! Reconstructs the parent-child tree implied by dot-segmented artifact
//! ids and produces a deterministic, indented rendering in the style of
//! a directory tree.

use std::collections::HashMap;

use tracing::{debug, instrument};

use cairn_shared::{ArtifactKind, ArtifactRecord, ROOT_KEY};

use crate::style::Tint;

/// Fixed header line shown above a non-empty tree.
pub const TREE_HEADER: &str = "Artifact Hierarchy";

/// One renderable tree row: indentation/connector prefix plus styled content.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    /// Indentation and branch connector (e.g. `"│  └─ "`).
    pub prefix: String,
    /// Per-kind icon glyph.
    pub icon: &'static str,
    /// Per-kind color.
    pub tint: Tint,
    /// The artifact id, rendered after the icon.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Kind derived from the id shape.
    pub kind: ArtifactKind,
}

impl TreeRow {
    /// Plain-text form of the row (icons kept, tint dropped).
    pub fn to_text(&self) -> String {
        format!("{}{} {}  {}", self.prefix, self.icon, self.id, self.title)
    }
}

/// A rendered tree: fixed header plus one row per reachable record.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyTree {
    /// Header line preceding the rows.
    pub header: &'static str,
    /// Pre-order, depth-first rows.
    pub rows: Vec<TreeRow>,
}

impl HierarchyTree {
    /// Plain-text rendering: header followed by one line per row.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.header.to_string());
        lines.extend(self.rows.iter().map(TreeRow::to_text));
        lines
    }
}

/// Build the rendered tree from a flat, unordered list of records.
///
/// Records are grouped by parent key (the id minus its last segment;
/// single-segment ids group under the synthetic `"root"` key), keeping
/// input relative order within each group. Rendering walks the root
/// group depth-first, pre-order.
///
/// Returns `None` for empty input: the caller shows nothing, not an
/// empty-tree placeholder. Records whose parent key matches no input id
/// (orphans) are never reached and are silently omitted.
#[instrument(skip_all, fields(record_count = records.len()))]
pub fn build_tree(records: &[ArtifactRecord]) -> Option<HierarchyTree> {
    if records.is_empty() {
        return None;
    }

    // Stable grouping: input order preserved within each parent group.
    let mut groups: HashMap<String, Vec<&ArtifactRecord>> = HashMap::new();
    for record in records {
        groups
            .entry(record.id.parent_key())
            .or_default()
            .push(record);
    }

    let mut rows = Vec::with_capacity(records.len());
    render_group(&groups, ROOT_KEY, "", &mut rows);

    debug!(rows = rows.len(), "hierarchy tree built");

    Some(HierarchyTree {
        header: TREE_HEADER,
        rows,
    })
}

/// Recursively render the group keyed by `parent_key` under `prefix`.
fn render_group(
    groups: &HashMap<String, Vec<&ArtifactRecord>>,
    parent_key: &str,
    prefix: &str,
    rows: &mut Vec<TreeRow>,
) {
    let Some(children) = groups.get(parent_key) else {
        return;
    };

    let last = children.len() - 1;
    for (i, record) in children.iter().enumerate() {
        let connector = if i == last { "└─ " } else { "├─ " };
        let kind = record.id.kind();
        let (icon, tint) = kind_style(kind);

        rows.push(TreeRow {
            prefix: format!("{prefix}{connector}"),
            icon,
            tint,
            id: record.id.to_string(),
            title: record.title.clone(),
            kind,
        });

        let child_prefix = if i == last {
            format!("{prefix}   ")
        } else {
            format!("{prefix}│  ")
        };
        render_group(groups, record.id.as_str(), &child_prefix, rows);
    }
}

/// Fixed per-kind icon and tint.
fn kind_style(kind: ArtifactKind) -> (&'static str, Tint) {
    match kind {
        ArtifactKind::Initiative => ("◆", Tint::Magenta),
        ArtifactKind::Milestone => ("▣", Tint::Blue),
        ArtifactKind::Issue => ("●", Tint::Green),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_shared::ArtifactId;

    fn record(id: &str, title: &str) -> ArtifactRecord {
        ArtifactRecord::new(id.parse::<ArtifactId>().unwrap(), title)
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(build_tree(&[]).is_none());
    }

    #[test]
    fn renders_preorder_depth_first() {
        let records = vec![
            record("1", "Platform"),
            record("1.1", "Auth"),
            record("1.1.1", "Login form"),
            record("1.2", "Billing"),
        ];

        let tree = build_tree(&records).expect("non-empty tree");
        let ids: Vec<&str> = tree.rows.iter().map(|r| r.id.as_str()).collect();
        // A child's subtree renders fully before the next sibling.
        assert_eq!(ids, vec!["1", "1.1", "1.1.1", "1.2"]);
    }

    #[test]
    fn well_formed_input_renders_every_record_once() {
        let records = vec![
            record("2", "Infra"),
            record("1", "Platform"),
            record("1.1", "Auth"),
            record("2.1", "CI"),
            record("1.2", "Billing"),
        ];

        let tree = build_tree(&records).expect("non-empty tree");
        assert_eq!(tree.rows.len(), records.len());

        let mut ids: Vec<&str> = tree.rows.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "1.1", "1.2", "2", "2.1"]);
    }

    #[test]
    fn sibling_groups_keep_input_relative_order() {
        // "1.2" listed before "1.1" stays before it — grouping is stable,
        // never sorted.
        let records = vec![
            record("1", "Platform"),
            record("1.2", "Billing"),
            record("1.1", "Auth"),
        ];

        let tree = build_tree(&records).expect("non-empty tree");
        let ids: Vec<&str> = tree.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "1.2", "1.1"]);
    }

    #[test]
    fn rerunning_identical_input_is_byte_identical() {
        let records = vec![
            record("1", "Platform"),
            record("1.1", "Auth"),
            record("2", "Infra"),
        ];

        let first = build_tree(&records).unwrap().to_lines();
        let second = build_tree(&records).unwrap().to_lines();
        assert_eq!(first, second);
    }

    #[test]
    fn connectors_and_indentation() {
        let records = vec![
            record("1", "Platform"),
            record("1.1", "Auth"),
            record("1.2", "Billing"),
            record("1.2.1", "Invoices"),
        ];

        let tree = build_tree(&records).unwrap();
        assert_eq!(tree.rows[0].prefix, "└─ ");
        assert_eq!(tree.rows[1].prefix, "   ├─ ");
        assert_eq!(tree.rows[2].prefix, "   └─ ");
        assert_eq!(tree.rows[3].prefix, "      └─ ");
    }

    #[test]
    fn non_last_sibling_extends_with_bar() {
        let records = vec![
            record("1", "Platform"),
            record("2", "Infra"),
            record("1.1", "Auth"),
        ];

        let tree = build_tree(&records).unwrap();
        // "1" is not the last root sibling, so its child indents with "│  ".
        let auth = tree.rows.iter().find(|r| r.id == "1.1").unwrap();
        assert_eq!(auth.prefix, "│  └─ ");
    }

    #[test]
    fn orphan_branch_is_not_rendered() {
        // "9.1" has no parent "9" in the input: unreachable, silently dropped.
        let records = vec![record("1", "Platform"), record("9.1", "Ghost")];

        let tree = build_tree(&records).unwrap();
        assert_eq!(tree.rows.len(), 1);
        assert_eq!(tree.rows[0].id, "1");
    }

    #[test]
    fn kind_styles_are_distinct() {
        let records = vec![
            record("1", "Platform"),
            record("1.1", "Auth"),
            record("1.1.1", "Login form"),
        ];

        let tree = build_tree(&records).unwrap();
        assert_eq!(tree.rows[0].kind, ArtifactKind::Initiative);
        assert_eq!(tree.rows[1].kind, ArtifactKind::Milestone);
        assert_eq!(tree.rows[2].kind, ArtifactKind::Issue);

        let styles: Vec<(&str, Tint)> =
            tree.rows.iter().map(|r| (r.icon, r.tint)).collect();
        assert_eq!(styles[0], ("◆", Tint::Magenta));
        assert_eq!(styles[1], ("▣", Tint::Blue));
        assert_eq!(styles[2], ("●", Tint::Green));
    }

    #[test]
    fn header_present_on_non_empty_tree() {
        let tree = build_tree(&[record("1", "Platform")]).unwrap();
        let lines = tree.to_lines();
        assert_eq!(lines[0], TREE_HEADER);
        assert_eq!(lines[1], "└─ ◆ 1  Platform");
    }
}
