//! Mapping specification loading and validation
//!
//! A mapping file tells the importer which template to instantiate and how
//! record fields translate into template parameters:
//!
//! ```yaml
//! template_id: R1563436
//! template_function: nfdixcs_versioning_schema
//! fields:
//!   title: label
//!   doi: identifier
//!   contributors: contributor_roles
//! ```
//!
//! The `contributor_roles` target is reserved: it is never passed to the
//! template function and instead names the record field that the
//! contributor role resolver consumes. An explicit top-level
//! `contributor_field` key overrides it.

use serde_yaml::Value;
use std::path::Path;

use crate::error::{Error, Result};

/// Template parameter reserved for contributor roles
pub const CONTRIBUTOR_ROLES_PARAM: &str = "contributor_roles";

/// A single source field → template parameter pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Key in the input record
    pub source: String,

    /// Template parameter name
    pub target: String,
}

/// Validated in-memory form of a mapping file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDescriptor {
    /// Identifier of the target template (e.g. `R1563436`)
    pub template_id: String,

    /// Name of the instantiation function exposed after materialization
    pub template_function: String,

    /// Field table in document order
    pub fields: Vec<FieldMapping>,

    contributor_field: String,
}

impl MappingDescriptor {
    /// Parse and validate a mapping document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(yaml)?;
        if !doc.is_mapping() {
            return Err(Error::validation("mapping document must be a YAML mapping"));
        }

        let template_id = required_str(&doc, "template_id")?;
        let template_function = required_str(&doc, "template_function")?;
        let fields = match doc.get("fields") {
            None => return Err(Error::validation("mapping file missing 'fields' block")),
            Some(value) => parse_fields(value)?,
        };

        let contributor_field = match doc.get("contributor_field") {
            None | Some(Value::Null) => fields
                .iter()
                .rev()
                .find(|f| f.target == CONTRIBUTOR_ROLES_PARAM)
                .map(|f| f.source.clone())
                .unwrap_or_else(|| CONTRIBUTOR_ROLES_PARAM.to_string()),
            Some(value) => value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::validation("'contributor_field' must be a string"))?,
        };

        Ok(Self {
            template_id,
            template_function,
            fields,
            contributor_field,
        })
    }

    /// Field pairs that become template arguments, in document order
    pub fn template_fields(&self) -> impl Iterator<Item = &FieldMapping> {
        self.fields
            .iter()
            .filter(|f| f.target != CONTRIBUTOR_ROLES_PARAM)
    }

    /// Record key that holds contributor roles
    pub fn contributor_field(&self) -> &str {
        &self.contributor_field
    }
}

/// Load a mapping file (e.g. `R1563436_mapping.yaml`) from disk
pub fn load_mapping<P: AsRef<Path>>(path: P) -> Result<MappingDescriptor> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.display().to_string(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let mapping = MappingDescriptor::from_yaml(&contents)?;

    tracing::debug!(
        path = %path.display(),
        template_id = %mapping.template_id,
        fields = mapping.fields.len(),
        "Loaded mapping"
    );
    Ok(mapping)
}

fn required_str(doc: &Value, key: &str) -> Result<String> {
    match doc.get(key) {
        None => Err(Error::validation(format!("mapping file missing '{}'", key))),
        Some(value) => value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::validation(format!("'{}' must be a string", key))),
    }
}

fn parse_fields(value: &Value) -> Result<Vec<FieldMapping>> {
    let table = value
        .as_mapping()
        .ok_or_else(|| Error::validation("'fields' must be a mapping of source → parameter"))?;

    table
        .iter()
        .map(|(source, target)| match (source.as_str(), target.as_str()) {
            (Some(source), Some(target)) => Ok(FieldMapping {
                source: source.to_string(),
                target: target.to_string(),
            }),
            _ => Err(Error::validation(format!(
                "field mapping {:?} → {:?} must be text → text",
                source, target
            ))),
        })
        .collect()
}
