//! Local simulator: run one request against a catalog file.
//!
//! ```text
//! premium-hello-sim demos/catalog.json demos/requests/simple_hello.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use premium_hello_catalog::{InMemoryCatalogService, ProductCatalog};
use premium_hello_skill::{InMemoryDirectiveSink, RequestEnvelope, SkillConfig, SkillDispatcher};

#[derive(Parser, Debug)]
#[command(name = "premium-hello-sim")]
#[command(about = "Run one skill request against a product catalog", long_about = None)]
#[command(version)]
struct Args {
    /// Catalog document (`{"inSkillProducts": [...]}`)
    catalog: PathBuf,

    /// Request envelope to dispatch
    request: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    premium_hello_observability::init();

    let config = SkillConfig::from_env();
    let phrases = config.phrase_book().context("loading phrase tables")?;

    let catalog_json = std::fs::read_to_string(&args.catalog)
        .with_context(|| format!("reading {}", args.catalog.display()))?;
    let catalog = ProductCatalog::from_json(&catalog_json)
        .with_context(|| format!("parsing {}", args.catalog.display()))?;

    let request_json = std::fs::read_to_string(&args.request)
        .with_context(|| format!("reading {}", args.request.display()))?;
    let envelope = RequestEnvelope::from_json(&request_json)
        .with_context(|| format!("parsing {}", args.request.display()))?;

    let dispatcher = SkillDispatcher::new(InMemoryCatalogService::new(catalog), InMemoryDirectiveSink::new(), phrases)
        .with_fetch_policy(config.fetch_policy());

    let outcome = dispatcher.dispatch(&envelope).await;
    tracing::info!(directives = dispatcher.sink().all().len(), "turn complete");

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
