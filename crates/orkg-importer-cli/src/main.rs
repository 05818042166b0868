//! ORKG importer CLI
//!
//! Imports JSON metadata records into ORKG as template instances.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Default mapping for template R1563436 (NFDIxCS Versioning Schema)
const DEFAULT_MAPPING_FILE: &str = "config/R1563436_mapping.yaml";

/// Import JSON records into ORKG using a template mapping
#[derive(Parser)]
#[command(name = "orkg-import")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the mapping file
    #[arg(short, long, global = true, default_value = DEFAULT_MAPPING_FILE)]
    mapping: String,

    /// ORKG host
    #[arg(long, global = true, env = "ORKG_HOST", default_value = "https://orkg.org")]
    host: String,

    /// ORKG user (e-mail)
    #[arg(long, global = true, env = "ORKG_USER")]
    user: Option<String>,

    /// ORKG password
    #[arg(long, global = true, env = "ORKG_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// OAuth token endpoint (defaults to `{host}/oauth/token`)
    #[arg(long, global = true, env = "ORKG_TOKEN_URL")]
    token_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import records from a JSON file
    Import {
        /// Path to the JSON file to import (`{"records": [...]}`)
        json_file: String,

        /// Run against an in-memory graph instead of ORKG
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the mapping file without contacting ORKG
    Validate,

    /// Show the parameters of an ORKG template
    Template {
        /// Template id (defaults to the mapping's template)
        id: Option<String>,
    },
}

impl Cli {
    fn service_config(&self) -> orkg_importer_client::OrkgConfig {
        let mut config = orkg_importer_client::OrkgConfig::new(&self.host);
        if let (Some(user), Some(password)) = (&self.user, &self.password) {
            config = config.with_credentials(user, password);
        }
        if let Some(token_url) = &self.token_url {
            config = config.with_token_url(token_url);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Import { json_file, dry_run } => {
            commands::import::run(&cli.mapping, json_file, *dry_run, &cli.service_config())
                .await?;
        }
        Commands::Validate => {
            commands::validate::run(&cli.mapping)?;
        }
        Commands::Template { id } => {
            commands::template::run(&cli.mapping, id.as_deref(), &cli.service_config()).await?;
        }
    }

    Ok(())
}
