//! Inspect an ORKG template

use anyhow::{Context, Result};
use orkg_importer_client::{OrkgClient, OrkgConfig};
use orkg_importer_core::load_mapping;

/// Run the template command
pub async fn run(mapping_path: &str, id: Option<&str>, config: &OrkgConfig) -> Result<()> {
    let template_id = match id {
        Some(id) => id.to_string(),
        None => {
            load_mapping(mapping_path)
                .context("Failed to load mapping")?
                .template_id
        }
    };

    let client = OrkgClient::new(config.clone())?;
    let template = client
        .fetch_template(&template_id)
        .await
        .with_context(|| format!("Failed to fetch template {}", template_id))?;

    println!("ID:           {}", template.id);
    println!("Label:        {}", template.label);
    println!("Target class: {}", template.target_class.id);
    println!("Function:     {}", template.function_name());
    println!("\nParameters:");
    println!("  label (resource label)");
    for prop in &template.properties {
        let range = match (&prop.class, &prop.datatype) {
            (Some(class), _) => format!("class {}", class.id),
            (None, Some(datatype)) => format!("datatype {}", datatype.id),
            (None, None) => "untyped".to_string(),
        };
        println!(
            "  {} -> {} [{}] {}",
            prop.parameter_name(),
            prop.path.id,
            prop.cardinality(),
            range
        );
    }

    Ok(())
}
