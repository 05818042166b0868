//! Integration tests for the complete import pipeline
//!
//! Tests use temporary directories with real mapping and batch files to verify:
//! - Mapping loading feeding the importer
//! - Batch imports in document order
//! - Abort-on-first-failure with earlier records left in the graph
//! - Contributor role linking after instance persistence

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

use orkg_importer_core::graph::{
    CONTRIBUTOR_ROLE_CLASS, CONTRIBUTOR_ROLE_PREDICATE, CreatedResource, CreatedStatement,
    TemplateFunction, TemplateInstance,
};
use orkg_importer_core::memory::MemoryGraph;
use orkg_importer_core::{Error, GraphService, Importer, Result, TemplateArgs, load_mapping};

const MAPPING: &str = r#"
template_id: R1563436
template_function: nfdixcs_versioning_schema
fields:
  title: label
  doi: identifier
  concept_doi: concept_identifier
  version: version
  contributor_roles: contributor_roles
"#;

/// Helper to create a temporary directory holding a mapping and a batch file.
fn setup(batch: serde_json::Value) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("mapping.yaml"), MAPPING).unwrap();
    std::fs::write(
        dir.path().join("records.json"),
        serde_json::to_string_pretty(&batch).unwrap(),
    )
    .unwrap();
    dir
}

fn memory_graph() -> MemoryGraph {
    MemoryGraph::new().with_template("R1563436", "nfdixcs_versioning_schema")
}

/// Wraps a [`MemoryGraph`] and fails a chosen operation.
struct FailingGraph {
    inner: MemoryGraph,
    fail_persist_at: Option<usize>,
    fail_resources: bool,
    persisted: usize,
}

impl FailingGraph {
    fn failing_persist(n: usize) -> Self {
        Self {
            inner: memory_graph(),
            fail_persist_at: Some(n),
            fail_resources: false,
            persisted: 0,
        }
    }

    fn failing_resources() -> Self {
        Self {
            inner: memory_graph(),
            fail_persist_at: None,
            fail_resources: true,
            persisted: 0,
        }
    }
}

#[async_trait]
impl GraphService for FailingGraph {
    async fn materialize_template(&mut self, template_id: &str) -> Result<()> {
        self.inner.materialize_template(template_id).await
    }

    fn template_function(&self, name: &str) -> Option<TemplateFunction> {
        self.inner.template_function(name)
    }

    async fn instantiate(
        &self,
        function: &TemplateFunction,
        args: TemplateArgs,
    ) -> Result<TemplateInstance> {
        self.inner.instantiate(function, args).await
    }

    async fn persist(&mut self, instance: TemplateInstance) -> Result<CreatedResource> {
        self.persisted += 1;
        if self.fail_persist_at == Some(self.persisted) {
            return Err(Error::external("persist", "503 Service Unavailable"));
        }
        self.inner.persist(instance).await
    }

    async fn create_resource(&mut self, label: &str, classes: &[&str]) -> Result<CreatedResource> {
        if self.fail_resources {
            return Err(Error::external("create_resource", "401 Unauthorized"));
        }
        self.inner.create_resource(label, classes).await
    }

    async fn create_statement(
        &mut self,
        subject: &str,
        predicate: &str,
        object: &str,
    ) -> Result<CreatedStatement> {
        self.inner.create_statement(subject, predicate, object).await
    }
}

// =============================================================================
// Complete Pipeline Tests
// =============================================================================

#[tokio::test]
async fn test_import_file_returns_ids_in_order() {
    let dir = setup(json!({
        "records": [
            {
                "title": "Versioned dataset v1",
                "doi": "https://doi.org/10.1234/test.v1",
                "concept_doi": "https://doi.org/10.1234/test",
                "version": "v1.0.0",
                "contributor_roles": [
                    {"name": "H. Hajiabadi", "role": "Data curation", "orcid": "0000-0001"},
                    "A. Author (Software)"
                ]
            },
            {"title": "Versioned dataset v2", "version": "v2.0.0"},
            {"title": "Versioned dataset v3", "contributor_roles": "B"}
        ]
    }));

    let mapping = load_mapping(dir.path().join("mapping.yaml")).unwrap();
    let mut importer = Importer::new(mapping, memory_graph()).await.unwrap();
    let ids = importer
        .import_file(dir.path().join("records.json"))
        .await
        .unwrap();

    assert_eq!(ids.len(), 3);
    let graph = importer.into_service();
    let instance_labels: Vec<&str> = graph
        .instances()
        .iter()
        .filter_map(|i| i.label())
        .collect();
    assert_eq!(
        instance_labels,
        vec![
            "Versioned dataset v1",
            "Versioned dataset v2",
            "Versioned dataset v3"
        ]
    );

    let contributor_labels: Vec<&str> = graph
        .resources()
        .iter()
        .filter(|r| r.classes == vec![CONTRIBUTOR_ROLE_CLASS.to_string()])
        .map(|r| r.label.as_str())
        .collect();
    assert_eq!(
        contributor_labels,
        vec![
            "H. Hajiabadi (Data curation) [ORCID: 0000-0001]",
            "A. Author (Software)",
            "B"
        ]
    );

    let subjects: Vec<&str> = graph.statements().iter().map(|s| s.subject.as_str()).collect();
    assert_eq!(subjects, vec![ids[0].as_str(), ids[0].as_str(), ids[2].as_str()]);
    assert!(
        graph
            .statements()
            .iter()
            .all(|s| s.predicate == CONTRIBUTOR_ROLE_PREDICATE)
    );
}

#[tokio::test]
async fn test_failure_aborts_batch_and_keeps_earlier_records() {
    let dir = setup(json!({
        "records": [
            {"title": "one"},
            {"title": "two"},
            {"title": "three"},
            {"title": "four"}
        ]
    }));

    let mapping = load_mapping(dir.path().join("mapping.yaml")).unwrap();
    let mut importer = Importer::new(mapping, FailingGraph::failing_persist(3))
        .await
        .unwrap();
    let result = importer.import_file(dir.path().join("records.json")).await;

    assert!(matches!(result, Err(Error::ExternalService { .. })));
    let graph = importer.into_service();
    let persisted: Vec<&str> = graph
        .inner
        .instances()
        .iter()
        .filter_map(|i| i.label())
        .collect();
    assert_eq!(persisted, vec!["one", "two"]);
}

#[tokio::test]
async fn test_contributor_failure_leaves_instance_persisted() {
    let dir = setup(json!({
        "records": [
            {"title": "with roles", "contributor_roles": ["A"]},
            {"title": "never reached"}
        ]
    }));

    let mapping = load_mapping(dir.path().join("mapping.yaml")).unwrap();
    let mut importer = Importer::new(mapping, FailingGraph::failing_resources())
        .await
        .unwrap();
    let result = importer.import_file(dir.path().join("records.json")).await;

    assert!(result.is_err());
    let graph = importer.into_service();
    assert_eq!(graph.inner.instances().len(), 1);
    assert!(graph.inner.statements().is_empty());
}

#[tokio::test]
async fn test_records_not_a_list_is_validation_error() {
    let dir = setup(json!({"records": "not a list"}));

    let mapping = load_mapping(dir.path().join("mapping.yaml")).unwrap();
    let mut importer = Importer::new(mapping, memory_graph()).await.unwrap();
    let result = importer.import_file(dir.path().join("records.json")).await;

    assert!(matches!(result, Err(Error::Validation { .. })));
    assert!(importer.service().resources().is_empty());
}

#[tokio::test]
async fn test_importing_twice_creates_disjoint_resources() {
    let dir = setup(json!({"records": [{"title": "a"}, {"title": "b"}]}));

    let mapping = load_mapping(dir.path().join("mapping.yaml")).unwrap();
    let mut importer = Importer::new(mapping, memory_graph()).await.unwrap();
    let first = importer
        .import_file(dir.path().join("records.json"))
        .await
        .unwrap();
    let second = importer
        .import_file(dir.path().join("records.json"))
        .await
        .unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first.iter().all(|id| !second.contains(id)));
}

#[test]
fn test_missing_template_function_fails_before_any_service_call() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mapping.yaml"),
        "template_id: R1563436\nfields:\n  title: label\n",
    )
    .unwrap();

    let result = load_mapping(dir.path().join("mapping.yaml"));
    assert!(matches!(result, Err(Error::Validation { .. })));
}
