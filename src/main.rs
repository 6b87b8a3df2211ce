use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use version_matrix::config::{ConfigError, MatrixConfig};
use version_matrix::logging::{LogFormat, init_logging};
use version_matrix::matrix::publish_matrix;
use version_matrix::pipeline::generate_matrix;
use version_matrix::version::registries::MavenRegistry;

#[derive(Parser)]
#[command(name = "version-matrix")]
#[command(version, about = "Generate a CI build matrix from upstream release metadata")]
struct Cli {
    /// JSON configuration file; omitted keys use built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (overrides the configured path)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Base URL of the Maven repository (overrides the configured URL)
    #[arg(long)]
    repository_url: Option<String>,

    /// Print the matrix to stdout instead of writing the output file
    #[arg(long)]
    dry_run: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied
    fn resolve_config(&self) -> Result<MatrixConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => MatrixConfig::load(path)?,
            None => MatrixConfig::default(),
        };
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(url) = &self.repository_url {
            config.repository_url = url.clone();
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, "info");

    let config = cli.resolve_config()?;

    let registry = MavenRegistry::new(&config.repository_url)?;
    let matrix = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(generate_matrix(&registry, &config))
        .context("matrix generation aborted")?;

    let summary = publish_matrix(
        &matrix,
        &config.output_path,
        cli.dry_run,
        &mut std::io::stdout().lock(),
    )?;
    if cli.dry_run {
        eprintln!("{}", summary);
    } else {
        println!("{}", summary);
    }

    Ok(())
}
