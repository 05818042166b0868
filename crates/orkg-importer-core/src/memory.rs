//! In-memory graph service
//!
//! Records every resource and statement it is asked to create instead of
//! sending them anywhere. Used for dry runs and tests.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::graph::{
    CreatedResource, CreatedStatement, GraphService, TemplateArgs, TemplateFunction,
    TemplateInstance,
};

/// Graph service that keeps everything in memory
#[derive(Debug, Default)]
pub struct MemoryGraph {
    /// Templates known to the graph: template id → function name
    templates: HashMap<String, String>,
    /// Functions made available by materialization
    materialized: HashMap<String, TemplateFunction>,
    resources: Vec<CreatedResource>,
    statements: Vec<CreatedStatement>,
    instances: Vec<TemplateInstance>,
    next_id: u64,
}

impl MemoryGraph {
    /// Create an empty graph that knows no templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template whose materialization exposes `function_name`
    pub fn with_template(mut self, template_id: &str, function_name: &str) -> Self {
        self.templates
            .insert(template_id.to_string(), function_name.to_string());
        self
    }

    /// All resources created so far, including persisted instances
    pub fn resources(&self) -> &[CreatedResource] {
        &self.resources
    }

    /// All statements created so far
    pub fn statements(&self) -> &[CreatedStatement] {
        &self.statements
    }

    /// Instances that were persisted, in order
    pub fn instances(&self) -> &[TemplateInstance] {
        &self.instances
    }

    fn next_resource_id(&mut self) -> String {
        self.next_id += 1;
        format!("R{}", self.next_id)
    }
}

#[async_trait]
impl GraphService for MemoryGraph {
    async fn materialize_template(&mut self, template_id: &str) -> Result<()> {
        let name = self
            .templates
            .get(template_id)
            .cloned()
            .ok_or_else(|| {
                Error::external(
                    "materialize_template",
                    format!("template {} not found", template_id),
                )
            })?;

        self.materialized.insert(
            name.clone(),
            TemplateFunction {
                name,
                template_id: template_id.to_string(),
            },
        );
        Ok(())
    }

    fn template_function(&self, name: &str) -> Option<TemplateFunction> {
        self.materialized.get(name).cloned()
    }

    async fn instantiate(
        &self,
        function: &TemplateFunction,
        args: TemplateArgs,
    ) -> Result<TemplateInstance> {
        Ok(TemplateInstance {
            function: function.clone(),
            args,
        })
    }

    async fn persist(&mut self, instance: TemplateInstance) -> Result<CreatedResource> {
        let id = self.next_resource_id();
        let resource = CreatedResource {
            id,
            label: instance.label().unwrap_or_default().to_string(),
            classes: Vec::new(),
        };
        tracing::debug!(
            id = %resource.id,
            function = %instance.function.name,
            "Persisted instance in memory"
        );

        self.instances.push(instance);
        self.resources.push(resource.clone());
        Ok(resource)
    }

    async fn create_resource(&mut self, label: &str, classes: &[&str]) -> Result<CreatedResource> {
        let resource = CreatedResource {
            id: self.next_resource_id(),
            label: label.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        };
        self.resources.push(resource.clone());
        Ok(resource)
    }

    async fn create_statement(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<CreatedStatement> {
        let statement = CreatedStatement {
            id: format!("S{}", self.statements.len() + 1),
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
        };
        self.statements.push(statement.clone());
        Ok(statement)
    }
}
