//! Validate mapping command

use anyhow::{Context, Result};
use orkg_importer_core::load_mapping;

/// Run the validate command
pub fn run(mapping_path: &str) -> Result<()> {
    tracing::info!("Validating mapping: {}", mapping_path);

    let mapping = load_mapping(mapping_path).context("Failed to load mapping")?;

    println!("Template:          {}", mapping.template_id);
    println!("Function:          {}", mapping.template_function);
    println!("Contributor field: {}", mapping.contributor_field());
    println!("Fields:");
    for field in &mapping.fields {
        println!("  {} -> {}", field.source, field.target);
    }

    tracing::info!("✓ Mapping is valid");
    Ok(())
}
