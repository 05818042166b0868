//! Template definitions and materialization naming
//!
//! An ORKG template is fetched as JSON and turned into a callable
//! "function": the template label becomes the function name and every
//! property's predicate label becomes a keyword parameter, both normalized
//! to snake_case identifiers.
//!
//! ```text
//! "NFDIxCS Versioning Schema"  →  nfdixcs_versioning_schema(
//!     label, identifier, concept_identifier, version, contributor_roles, ...)
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static NON_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex pattern"));

/// Parameter every template function accepts; becomes the resource label
pub const LABEL_PARAM: &str = "label";

/// Datatype used for literal properties that declare none
pub const DEFAULT_DATATYPE: &str = "xsd:string";

/// Reference to another graph thing (class, predicate, datatype)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThingRef {
    /// Graph identifier
    pub id: String,

    /// Human readable label
    #[serde(default)]
    pub label: Option<String>,
}

/// One property constraint of a template
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateProperty {
    /// Property shape id
    pub id: String,

    /// Predicate the property is stored under
    pub path: ThingRef,

    /// Minimum cardinality
    #[serde(default)]
    pub min_count: Option<u64>,

    /// Maximum cardinality (`None` = unbounded)
    #[serde(default)]
    pub max_count: Option<u64>,

    /// Literal datatype, for literal properties
    #[serde(default)]
    pub datatype: Option<ThingRef>,

    /// Range class, for resource properties
    #[serde(default)]
    pub class: Option<ThingRef>,
}

impl TemplateProperty {
    /// Keyword parameter name for this property
    pub fn parameter_name(&self) -> String {
        to_identifier(self.path.label.as_deref().unwrap_or(&self.path.id))
    }

    /// Cardinality as `min..max`, with `*` for unbounded
    pub fn cardinality(&self) -> String {
        let max = self
            .max_count
            .map(|m| m.to_string())
            .unwrap_or_else(|| "*".to_string());
        format!("{}..{}", self.min_count.unwrap_or(0), max)
    }
}

/// Template as returned by `GET /api/templates/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateDefinition {
    /// Template id (e.g. `R1563436`)
    pub id: String,

    /// Template label
    pub label: String,

    /// Class given to instances of this template
    pub target_class: ThingRef,

    /// Property constraints
    #[serde(default)]
    pub properties: Vec<TemplateProperty>,
}

impl TemplateDefinition {
    /// Name the template's instantiation function is exposed under
    pub fn function_name(&self) -> String {
        to_identifier(&self.label)
    }

    /// Property bound to a keyword parameter
    pub fn property(&self, parameter: &str) -> Option<&TemplateProperty> {
        self.properties
            .iter()
            .find(|p| p.parameter_name() == parameter)
    }

    /// Whether the instantiation function accepts `parameter`
    pub fn accepts(&self, parameter: &str) -> bool {
        parameter == LABEL_PARAM || self.property(parameter).is_some()
    }
}

/// Normalize a label into a snake_case identifier.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single underscore and strips leading/trailing underscores.
pub fn to_identifier(label: &str) -> String {
    let lowered = label.to_lowercase();
    NON_IDENTIFIER
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}
