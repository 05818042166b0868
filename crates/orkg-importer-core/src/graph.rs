//! Graph service seam
//!
//! The importer never talks HTTP itself. Everything it needs from the
//! knowledge graph (template materialization, instantiation, persistence,
//! resource and statement creation) goes through [`GraphService`], which is
//! implemented by the ORKG REST client and by [`crate::memory::MemoryGraph`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// One input record: field name → JSON value
pub type Record = Map<String, Value>;

/// Keyword arguments for a template function: parameter name → value
pub type TemplateArgs = Map<String, Value>;

/// Class given to every contributor role resource ("Contributor Roles")
pub const CONTRIBUTOR_ROLE_CLASS: &str = "C123120";

/// Predicate linking an instance to its contributor roles ("Contributor Roles")
pub const CONTRIBUTOR_ROLE_PREDICATE: &str = "P183174";

/// Handle to an instantiation function made available by materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFunction {
    /// Function name (e.g. `nfdixcs_versioning_schema`)
    pub name: String,

    /// Template the function instantiates
    pub template_id: String,
}

/// A template instance that has been built but not saved yet
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateInstance {
    /// Function that produced this instance
    pub function: TemplateFunction,

    /// Arguments the instance was built from
    pub args: TemplateArgs,
}

impl TemplateInstance {
    /// Resource label for the instance, taken from the `label` argument
    pub fn label(&self) -> Option<&str> {
        self.args.get("label").and_then(Value::as_str)
    }
}

/// A resource created in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResource {
    /// Graph identifier (e.g. `R123456`)
    pub id: String,

    /// Resource label
    #[serde(default)]
    pub label: String,

    /// Classes the resource was tagged with
    #[serde(default)]
    pub classes: Vec<String>,
}

/// A statement created in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedStatement {
    /// Statement identifier
    pub id: String,

    /// Subject resource id
    pub subject: String,

    /// Predicate id
    pub predicate: String,

    /// Object id
    pub object: String,
}

/// Capabilities the importer consumes from a knowledge graph service
///
/// Every call is awaited to completion before the importer issues the next
/// one; implementations don't need to handle concurrent use.
#[async_trait]
pub trait GraphService: Send {
    /// Fetch a template so its instantiation function becomes available by name
    async fn materialize_template(&mut self, template_id: &str) -> Result<()>;

    /// Look up a materialized instantiation function
    fn template_function(&self, name: &str) -> Option<TemplateFunction>;

    /// Build an unsaved instance from keyword arguments
    async fn instantiate(
        &self,
        function: &TemplateFunction,
        args: TemplateArgs,
    ) -> Result<TemplateInstance>;

    /// Save an instance, returning the created main resource
    async fn persist(&mut self, instance: TemplateInstance) -> Result<CreatedResource>;

    /// Create a resource with the given label and classes
    async fn create_resource(&mut self, label: &str, classes: &[&str]) -> Result<CreatedResource>;

    /// Create a directed statement `subject --predicate--> object`
    async fn create_statement(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<CreatedStatement>;
}
