//! Smithy SDK Generator CLI
//!
//! Command-line interface for generating Kotlin SDK models from Smithy models.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use smithy_sdk_generator_common::{CodegenSettings, ShapeId, ShapeType};
use smithy_sdk_generator_generator::SdkGenerator;
use smithy_sdk_generator_parser::{parse_model_file, ModelSummary};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smithy-sdk-generator")]
#[command(version, about = "Generate Kotlin SDK models from Smithy models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Smithy JSON AST model and summarize its shapes
    #[command(after_help = "EXAMPLES:\n  \
        smithy-sdk-generator parse --model weather.json")]
    Parse {
        /// Path to the Smithy JSON AST model
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Generate Kotlin sources for every union and structure in a model
    #[command(after_help = "EXAMPLES:\n  \
        # Settings from flags\n  \
        smithy-sdk-generator generate \\\n    \
        --model weather.json \\\n    \
        --package com.example.weather \\\n    \
        --runtime-version 1.3.0 \\\n    \
        --output ./weather-sdk\n\n  \
        # Settings from a file, restricted to one service\n  \
        smithy-sdk-generator generate \\\n    \
        --model weather.json \\\n    \
        --settings codegen.yaml \\\n    \
        --service com.example.weather#Weather \\\n    \
        --output ./weather-sdk")]
    Generate {
        /// Path to the Smithy JSON AST model
        #[arg(short, long)]
        model: PathBuf,

        /// Codegen settings file (.json, .yaml or .yml)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Root Kotlin package (overrides the settings file)
        #[arg(short, long)]
        package: Option<String>,

        /// Client runtime version (overrides the settings file)
        #[arg(long)]
        runtime_version: Option<String>,

        /// Only generate shapes in this service's namespace
        #[arg(long)]
        service: Option<String>,

        /// Skip shapes that fail to render instead of aborting
        #[arg(long)]
        continue_on_error: bool,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },
}

/// Values given on the command line that take precedence over the file
#[derive(Debug, Default)]
struct SettingsOverrides {
    package: Option<String>,
    runtime_version: Option<String>,
    service: Option<String>,
    continue_on_error: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse { model } => parse_command(&model, cli.verbose)?,
        Commands::Generate {
            model,
            settings,
            package,
            runtime_version,
            service,
            continue_on_error,
            output,
        } => {
            let overrides = SettingsOverrides {
                package,
                runtime_version,
                service,
                continue_on_error,
            };
            generate_command(&model, settings.as_deref(), overrides, &output, cli.verbose)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `--verbose` means debug and the default is warn
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_command(model_path: &Path, verbose: bool) -> Result<()> {
    println!("{} Parsing model: {}", "→".cyan(), model_path.display());

    let model = parse_model_file(model_path).context("Failed to parse Smithy model")?;
    let summary = ModelSummary::from_model(&model);

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Model:".bold());
    for service in &summary.services {
        println!("  Service: {}", service.to_string().yellow());
    }
    println!("  Shapes: {}", summary.total());
    println!("  Structures: {}", summary.count(ShapeType::Structure));
    println!("  Unions: {}", summary.count(ShapeType::Union));
    println!("  Operations: {}", summary.count(ShapeType::Operation));

    if !summary.event_streams.is_empty() {
        println!("\n{}", "Event streams:".bold());
        for id in &summary.event_streams {
            println!("  • {}", id.to_string().cyan());
        }
    }

    if verbose {
        println!("\n{}", "Shapes by type:".bold());
        for (shape_type, count) in &summary.counts {
            println!("  {}: {}", shape_type, count);
        }
    }

    Ok(())
}

fn generate_command(
    model_path: &Path,
    settings_path: Option<&Path>,
    overrides: SettingsOverrides,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Generating SDK from: {}",
        "→".cyan(),
        model_path.display()
    );

    let settings = resolve_settings(settings_path, overrides)?;
    if verbose {
        println!("  Package: {}", settings.package_name);
        println!("  Runtime version: {}", settings.runtime_version);
        if let Some(service) = &settings.service {
            println!("  Service: {}", service);
        }
        println!("  Output: {}", output.display());
    }

    println!("{} Parsing model...", "→".cyan());
    let model = parse_model_file(model_path).context("Failed to parse Smithy model")?;
    println!("{} Parsed {} shapes", "✓".green(), model.len());

    println!("{} Generating Kotlin sources...", "→".cyan());
    let generator = SdkGenerator::new(model, settings).context("Failed to create generator")?;
    let report = generator
        .generate_to_directory(output)
        .context("Failed to generate SDK")?;

    if report.failures.is_empty() {
        println!("\n{}", "✓ Generation complete!".green().bold());
    } else {
        println!(
            "\n{}",
            format!(
                "⚠ Generation finished with {} skipped shape(s)",
                report.failures.len()
            )
            .yellow()
            .bold()
        );
        for (shape, error) in &report.failures {
            println!("  {} {}: {}", "✗".red(), shape, error);
        }
    }

    println!("\n{}", "Generated files:".bold());
    for path in &report.written {
        println!("  📄 {}", path.display());
    }
    println!(
        "  📄 {}",
        output
            .join(smithy_sdk_generator_generator::MANIFEST_FILE)
            .display()
    );

    if !report.manifest.dependencies.is_empty() {
        println!("\n{}", "Runtime dependencies:".bold());
        for dependency in &report.manifest.dependencies {
            println!("  • {}", dependency);
        }
    }

    Ok(())
}

/// Settings from the optional file, with command-line values applied on top
fn resolve_settings(
    settings_path: Option<&Path>,
    overrides: SettingsOverrides,
) -> Result<CodegenSettings> {
    let mut settings = match settings_path {
        Some(path) => CodegenSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => {
            let (Some(package), Some(runtime_version)) =
                (&overrides.package, &overrides.runtime_version)
            else {
                bail!("--package and --runtime-version are required without --settings");
            };
            CodegenSettings::new(package.clone(), runtime_version.clone())
        }
    };

    if let Some(package) = overrides.package {
        settings.package_name = package;
    }
    if let Some(runtime_version) = overrides.runtime_version {
        settings.runtime_version = runtime_version;
    }
    if let Some(service) = overrides.service {
        if !service.contains('#') {
            bail!("--service must be an absolute shape id like com.example#Weather");
        }
        settings.service = Some(ShapeId::new(service));
    }
    settings.continue_on_error |= overrides.continue_on_error;

    settings.validate().context("Invalid codegen settings")?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_settings_from_flags() {
        let settings = resolve_settings(
            None,
            SettingsOverrides {
                package: Some("com.example.weather".to_string()),
                runtime_version: Some("1.3.0".to_string()),
                service: Some("com.example.weather#Weather".to_string()),
                continue_on_error: true,
            },
        )
        .unwrap();

        assert_eq!(settings.package_name, "com.example.weather");
        assert_eq!(settings.service, Some(ShapeId::new("com.example.weather#Weather")));
        assert!(settings.continue_on_error);
    }

    #[test]
    fn test_flags_required_without_file() {
        let result = resolve_settings(
            None,
            SettingsOverrides {
                package: Some("com.example.weather".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("codegen.yaml");
        fs::write(
            &path,
            "packageName: com.example.weather\nruntimeVersion: 1.2.0\ncontinueOnError: true\n",
        )
        .unwrap();

        let settings = resolve_settings(
            Some(&path),
            SettingsOverrides {
                runtime_version: Some("1.3.0".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(settings.runtime_version, "1.3.0");
        assert_eq!(settings.package_name, "com.example.weather");
        assert!(settings.continue_on_error);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = resolve_settings(
            None,
            SettingsOverrides {
                package: Some("com.example.weather".to_string()),
                runtime_version: Some("latest".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_relative_service_id_rejected() {
        let result = resolve_settings(
            None,
            SettingsOverrides {
                package: Some("com.example.weather".to_string()),
                runtime_version: Some("1.3.0".to_string()),
                service: Some("Weather".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }
}
