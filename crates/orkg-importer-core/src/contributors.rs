//! Contributor role normalization and linking
//!
//! A record's contributor value can be a single label, a structured person
//! object, or a list mixing both:
//!
//! ```json
//! "contributor_roles": [
//!   "H. Hajiabadi (Data curation)",
//!   {"name": "A. Author", "role": "Software", "orcid": "0000-0001-2345-6789"}
//! ]
//! ```
//!
//! Each entry becomes one new "Contributor Roles" resource linked from the
//! imported instance. Identical labels are not merged.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::graph::{CONTRIBUTOR_ROLE_CLASS, CONTRIBUTOR_ROLE_PREDICATE, GraphService};

/// One contributor entry after shape detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributorEntry {
    /// Bare label, used verbatim
    Text(String),

    /// Structured contributor
    Person(ContributorDetails),

    /// Any other JSON shape; skipped
    Unsupported,
}

/// Attributes of a structured contributor; all optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorDetails {
    /// Display name
    pub name: Option<String>,

    /// Contributor role (e.g. `Data curation`)
    pub role: Option<String>,

    /// ORCID iD
    pub orcid: Option<String>,

    /// Affiliation
    pub affiliation: Option<String>,
}

impl ContributorDetails {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            name: attribute(obj, "name"),
            role: attribute(obj, "role"),
            orcid: attribute(obj, "orcid"),
            affiliation: attribute(obj, "affiliation"),
        }
    }

    /// `name (role) [ORCID: orcid] [affiliation]`, omitting missing parts
    pub fn label(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        if let Some(role) = &self.role {
            parts.push(format!("({})", role));
        }
        if let Some(orcid) = &self.orcid {
            parts.push(format!("[ORCID: {}]", orcid));
        }
        if let Some(affiliation) = &self.affiliation {
            parts.push(format!("[{}]", affiliation));
        }
        parts.join(" ").trim().to_string()
    }
}

impl ContributorEntry {
    /// Classify a single JSON value
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text.clone()),
            Value::Object(obj) => Self::Person(ContributorDetails::from_object(obj)),
            _ => Self::Unsupported,
        }
    }

    /// Label of the resource this entry becomes, `None` if it is skipped
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Person(details) => Some(details.label()),
            Self::Unsupported => None,
        }
    }
}

/// Split a contributor value into entries.
///
/// Empty values (`null`, `""`, `[]`, `{}`, `false`, `0`) give no entries; a
/// single label or object is a one-element list.
pub fn normalize(value: &Value) -> Vec<ContributorEntry> {
    if is_empty(value) {
        return Vec::new();
    }
    match value {
        Value::Array(items) => items.iter().map(ContributorEntry::from_value).collect(),
        single => vec![ContributorEntry::from_value(single)],
    }
}

/// Create one contributor role resource per entry and link it to `parent_id`.
///
/// Returns the ids of the created contributor resources in entry order.
/// Graph service failures propagate immediately; resources created before
/// the failure are left in place.
pub async fn attach_contributor_roles<G>(
    service: &mut G,
    parent_id: &str,
    contributors: &Value,
) -> Result<Vec<String>>
where
    G: GraphService + ?Sized,
{
    let mut created = Vec::new();

    for (index, entry) in normalize(contributors).iter().enumerate() {
        let Some(label) = entry.label() else {
            tracing::warn!(parent = parent_id, index, "Skipping unsupported contributor entry");
            continue;
        };

        let resource = service
            .create_resource(&label, &[CONTRIBUTOR_ROLE_CLASS])
            .await?;
        service
            .create_statement(parent_id, CONTRIBUTOR_ROLE_PREDICATE, &resource.id)
            .await?;

        tracing::debug!(
            parent = parent_id,
            contributor = %resource.id,
            label = %label,
            "Linked contributor role"
        );
        created.push(resource.id);
    }

    Ok(created)
}

fn attribute(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(obj) => obj.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::name_and_role(json!({"name": "A", "role": "Data curation"}), "A (Data curation)")]
    #[case::name_and_orcid(json!({"name": "A", "orcid": "0000-0001"}), "A [ORCID: 0000-0001]")]
    #[case::all_parts(
        json!({"affiliation": "KIT", "orcid": "0000-0001", "role": "Software", "name": "A"}),
        "A (Software) [ORCID: 0000-0001] [KIT]"
    )]
    #[case::role_only(json!({"role": "Supervision"}), "(Supervision)")]
    #[case::affiliation_only(json!({"affiliation": "KIT"}), "[KIT]")]
    #[case::null_is_absent(json!({"name": "A", "role": null}), "A")]
    #[case::numeric_orcid(json!({"name": "A", "orcid": 42}), "A [ORCID: 42]")]
    #[case::unknown_keys(json!({"email": "a@example.org"}), "")]
    fn test_person_label(#[case] value: Value, #[case] expected: &str) {
        let entry = ContributorEntry::from_value(&value);
        assert_eq!(entry.label().as_deref(), Some(expected));
    }

    #[test]
    fn test_text_label_verbatim() {
        let entry = ContributorEntry::from_value(&json!("  B (Writing)  "));
        assert_eq!(entry.label().as_deref(), Some("  B (Writing)  "));
    }

    #[rstest]
    #[case::number(json!(7))]
    #[case::nested_list(json!(["nested"]))]
    #[case::boolean(json!(true))]
    fn test_unsupported_entry_has_no_label(#[case] value: Value) {
        let entry = ContributorEntry::from_value(&value);
        assert_eq!(entry, ContributorEntry::Unsupported);
        assert!(entry.label().is_none());
    }

    #[rstest]
    #[case::null(json!(null))]
    #[case::empty_string(json!(""))]
    #[case::empty_list(json!([]))]
    #[case::empty_object(json!({}))]
    #[case::false_value(json!(false))]
    #[case::zero(json!(0))]
    fn test_empty_values_normalize_to_nothing(#[case] value: Value) {
        assert!(normalize(&value).is_empty());
    }

    #[test]
    fn test_single_values_become_one_entry() {
        assert_eq!(
            normalize(&json!("B")),
            vec![ContributorEntry::Text("B".to_string())]
        );
        assert_eq!(normalize(&json!({"name": "A"})).len(), 1);
    }

    #[test]
    fn test_mixed_list_keeps_order() {
        let entries = normalize(&json!(["B", {"name": "A"}, 3]));
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label().as_deref(), Some("B"));
        assert_eq!(entries[1].label().as_deref(), Some("A"));
        assert_eq!(entries[2], ContributorEntry::Unsupported);
    }

    #[tokio::test]
    async fn test_attach_creates_resource_and_statement_per_entry() {
        let mut graph = MemoryGraph::new();
        let created = attach_contributor_roles(
            &mut graph,
            "R1",
            &json!(["B", {"name": "A", "role": "Data curation"}]),
        )
        .await
        .unwrap();

        assert_eq!(created.len(), 2);
        let labels: Vec<&str> = graph.resources().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "A (Data curation)"]);
        assert!(
            graph
                .resources()
                .iter()
                .all(|r| r.classes == vec![CONTRIBUTOR_ROLE_CLASS.to_string()])
        );

        let statements = graph.statements();
        assert_eq!(statements.len(), 2);
        for (statement, id) in statements.iter().zip(&created) {
            assert_eq!(statement.subject, "R1");
            assert_eq!(statement.predicate, CONTRIBUTOR_ROLE_PREDICATE);
            assert_eq!(&statement.object, id);
        }
    }

    #[tokio::test]
    async fn test_attach_empty_value_is_noop() {
        let mut graph = MemoryGraph::new();
        let created = attach_contributor_roles(&mut graph, "R1", &json!([]))
            .await
            .unwrap();
        assert!(created.is_empty());
        assert!(graph.resources().is_empty());
        assert!(graph.statements().is_empty());
    }

    #[tokio::test]
    async fn test_attach_skips_unsupported_entries() {
        let mut graph = MemoryGraph::new();
        let created = attach_contributor_roles(&mut graph, "R1", &json!([1, "B", null]))
            .await
            .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(graph.statements().len(), 1);
    }

    #[tokio::test]
    async fn test_attach_does_not_deduplicate() {
        let mut graph = MemoryGraph::new();
        let created = attach_contributor_roles(&mut graph, "R1", &json!(["B", "B"]))
            .await
            .unwrap();
        assert_eq!(created.len(), 2);
        assert_ne!(created[0], created[1]);
    }
}
