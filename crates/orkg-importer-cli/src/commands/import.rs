//! Import records into ORKG

use anyhow::{Context, Result};
use std::path::Path;

use orkg_importer_client::{OrkgClient, OrkgConfig};
use orkg_importer_core::memory::MemoryGraph;
use orkg_importer_core::{GraphService, Importer, MappingDescriptor, load_mapping};

/// Run the import command
pub async fn run(
    mapping_path: &str,
    json_file: &str,
    dry_run: bool,
    config: &OrkgConfig,
) -> Result<()> {
    let json_path = Path::new(json_file);
    if !json_path.is_file() {
        anyhow::bail!("JSON file not found: {}", json_path.display());
    }

    if !Path::new(mapping_path).exists() {
        tracing::warn!("Mapping file not found: {}", mapping_path);
    }
    let mapping = load_mapping(mapping_path).context("Failed to load mapping")?;

    println!("Importing records from: {}", json_path.display());

    let created_ids = if dry_run {
        let graph =
            MemoryGraph::new().with_template(&mapping.template_id, &mapping.template_function);
        let (ids, graph) = import_with(mapping, graph, json_path).await?;
        tracing::info!(
            resources = graph.resources().len(),
            statements = graph.statements().len(),
            "Dry run complete, nothing was written to ORKG"
        );
        ids
    } else {
        let client = OrkgClient::connect(config)
            .await
            .context("Failed to connect to ORKG")?;
        let (ids, _) = import_with(mapping, client, json_path).await?;
        ids
    };

    if created_ids.is_empty() {
        println!("\nNo resources created.");
    } else {
        println!("\nSuccessfully created ORKG resources:");
        for id in &created_ids {
            println!(" - {}", id);
        }
    }

    println!("\nDone.");
    Ok(())
}

async fn import_with<G: GraphService>(
    mapping: MappingDescriptor,
    service: G,
    json_path: &Path,
) -> Result<(Vec<String>, G)> {
    let mut importer = Importer::new(mapping, service)
        .await
        .context("Failed to prepare template")?;
    let ids = importer
        .import_file(json_path)
        .await
        .context("Import failed")?;
    Ok((ids, importer.into_service()))
}
