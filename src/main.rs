use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use product_importer::catalog::{CatalogBackend, InMemoryCatalog, WooCommerceCatalog};
use product_importer::trigger::{handle_import, validate_url};
use product_importer::{AppConfig, ImportOutcome, ProductImporter};

#[derive(Parser)]
#[command(name = "product-importer", version, about = "Import a storefront product page into WooCommerce")]
struct Cli {
    /// Config file to load instead of the config/ directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import the product at URL
    Import {
        url: String,

        /// Print the assembled record instead of creating the product
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    // Initialize tracing
    let level = if config.import.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("product_importer={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = match cli.command {
        Command::Import { url, dry_run: true } => preview(&config, &url).await?,
        Command::Import { url, dry_run: false } => {
            let catalog = WooCommerceCatalog::new(&config.catalog)?;
            import(&config, catalog, &url).await?
        }
    };
    Ok(code)
}

async fn import<B: CatalogBackend>(
    config: &AppConfig,
    catalog: B,
    url: &str,
) -> product_importer::Result<ExitCode> {
    info!("Importing into {} catalog", catalog.name());
    let importer = ProductImporter::from_config(config, catalog)?;

    let outcome = handle_import(&importer, url).await;
    print_outcome(&outcome)
}

async fn preview(config: &AppConfig, url: &str) -> product_importer::Result<ExitCode> {
    let Some(url) = validate_url(url) else {
        return print_outcome(&ImportOutcome::failed("Invalid URL"));
    };

    let importer = ProductImporter::from_config(config, InMemoryCatalog::new())?;
    match importer.preview(url.as_str()).await {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => print_outcome(&ImportOutcome::failed(e.to_string())),
    }
}

fn print_outcome(outcome: &ImportOutcome) -> product_importer::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
