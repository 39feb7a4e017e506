//! ormeta CLI - class metadata inspection
//!
//! Loads a JSON mapping set, resolves class metadata against a configured
//! platform and prints the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ormeta_common::Config;
use ormeta_mapping::{ClassMetadata, ClassMetadataFactory, InMemoryDriver, StaticPlatform};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ormeta-cli")]
#[command(about = "ormeta class metadata inspector")]
#[command(version)]
struct Args {
    /// JSON file holding an array of raw class mappings
    #[arg(short, long)]
    mappings: PathBuf,

    /// Configuration file path (TOML); ORMETA__* environment variables override it
    #[arg(short, long)]
    config: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one class and print its metadata as JSON
    Resolve {
        /// Class name
        class: String,
    },
    /// Resolve every mapped class and print one line per class
    List,
    /// Resolve every mapped class, failing on the first invalid mapping
    Check,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(args.config.as_deref())?;
    let factory = build_factory(&args.mappings, &config)?;

    match args.command {
        Commands::Resolve { class } => {
            let metadata = factory.get_metadata_for(&class)?;
            println!("{}", serde_json::to_string_pretty(metadata.as_ref())?);
        }
        Commands::List => {
            for metadata in factory.get_all_metadata()? {
                println!("{}", summary_line(&metadata));
            }
        }
        Commands::Check => {
            let all = factory.get_all_metadata()?;
            println!("OK: {} classes resolved", all.len());
        }
    }

    Ok(())
}

/// Load configuration from an optional file layered under the environment
fn load_config(path: Option<&str>) -> Result<Config> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path));
    }
    let settings = builder
        .add_source(
            config::Environment::with_prefix("ORMETA")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to read configuration")?;

    let config: Config = settings
        .try_deserialize()
        .context("invalid configuration")?;
    config.validate()?;
    Ok(config)
}

fn build_factory(mappings: &Path, config: &Config) -> Result<ClassMetadataFactory> {
    let json = std::fs::read_to_string(mappings)
        .with_context(|| format!("failed to read {}", mappings.display()))?;
    let driver = InMemoryDriver::from_json(&json)?;
    info!(
        "Loaded {} class mappings from {}",
        driver.len(),
        mappings.display()
    );

    Ok(ClassMetadataFactory::with_config(
        Arc::new(driver),
        Arc::new(StaticPlatform::from(&config.platform)),
        config.factory.clone(),
    ))
}

fn summary_line(metadata: &ClassMetadata) -> String {
    let parents: Vec<&str> = metadata
        .parent_classes()
        .iter()
        .map(|p| p.as_str())
        .collect();
    format!(
        "{} root={} parents=[{}] inheritance={} id={} fields={} associations={}",
        metadata.name(),
        metadata.root_class_name(),
        parents.join(", "),
        metadata.inheritance_type(),
        metadata.id_generator_type(),
        metadata.field_names().len(),
        metadata.association_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ormeta_common::IdGeneratorType;
    use std::io::Write;

    const MAPPINGS: &str = r#"[
        {"className": "Person", "inheritanceType": "singleTable", "idGeneratorType": "auto",
         "fields": [{"fieldName": "id", "type": "integer", "id": true},
                    {"fieldName": "name", "type": "string"}]},
        {"className": "Employee", "parentClass": "Person",
         "associations": [{"fieldName": "manager", "targetEntity": "Employee", "kind": "manyToOne"}]}
    ]"#;

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_from_file() {
        let file = write_file(
            ".toml",
            "[platform]\nname = \"mysql\"\nprefers_identity_columns = true\n",
        );
        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.platform.name, "mysql");
        assert!(config.platform.prefers_identity_columns);
        assert_eq!(config.factory.fallback_id_generator, IdGeneratorType::Table);
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let file = write_file(".toml", "[factory]\nfallback_id_generator = \"auto\"\n");
        assert!(load_config(file.path().to_str()).is_err());
    }

    #[test]
    fn test_build_factory_and_summary() {
        let file = write_file(".json", MAPPINGS);
        let mut config = Config::default();
        config.platform.prefers_identity_columns = true;

        let factory = build_factory(file.path(), &config).unwrap();
        let employee = factory.get_metadata_for("Employee").unwrap();
        assert_eq!(
            summary_line(&employee),
            "Employee root=Person parents=[Person] inheritance=singleTable id=identity fields=2 associations=1"
        );
    }

    #[test]
    fn test_build_factory_missing_file() {
        let err = build_factory(Path::new("/nonexistent/mappings.json"), &Config::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("failed to read"));
    }
}
