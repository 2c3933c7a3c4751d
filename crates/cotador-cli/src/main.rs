//! Cotador runner
//!
//! Prices a JSON quote request against the configured rate book, assembles
//! the proposal, saves it to an in-memory store, and prints the totals.
//!
//! ```text
//! cotador <request.json>
//! ```

mod config;
mod request;

use anyhow::{bail, Result};
use cotador_common::{format_brl, VERSION};
use cotador_pricing::{PricingEngine, RateBook};
use cotador_proposal::{InMemoryProposalStore, ProposalStore};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::CliConfig;
use crate::request::{price_request, QuoteRequest};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Cotador v{}", VERSION);

    let Some(request_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: cotador <request.json>");
    };

    let config = CliConfig::load()?;
    info!(?config, "Loaded configuration");

    let rates = RateBook::load(config.rates_path.as_deref())?;
    let mut engine = PricingEngine::new(rates);

    let request = QuoteRequest::from_path(&request_path)?;
    let mut priced = price_request(&mut engine, &request);

    let store = InMemoryProposalStore::new();
    let id = priced.aggregator.save(&store, config.owner.clone()).await?;

    let aggregator = &priced.aggregator;
    println!("Proposta {}", id);
    println!(
        "Cliente: {} <{}>",
        aggregator.client().name,
        aggregator.client().email
    );
    println!(
        "Gerente de contas: {} <{}>",
        aggregator.account_manager().name,
        aggregator.account_manager().email
    );
    println!();

    for item in aggregator.items() {
        println!(
            "  {:<45} setup {:>14}   mensal {:>14}",
            item.description,
            format_brl(item.setup_amount),
            format_brl(item.monthly_amount)
        );
    }
    println!();
    println!("  Total setup:  {}", format_brl(aggregator.total_setup()));
    println!("  Total mensal: {}", format_brl(aggregator.total_monthly()));

    if !priced.unpriced.is_empty() {
        println!();
        println!("Itens sem preço (consultar comercial):");
        for (description, reason) in &priced.unpriced {
            println!("  {}: {}", description, reason);
        }
    }

    if !priced.warnings.is_empty() {
        println!();
        println!("Campos ajustados:");
        for warning in &priced.warnings {
            println!("  {}", warning);
        }
    }

    let visible = store.list(&config.identity()).await?;
    info!(visible = visible.len(), owner = %config.owner, "Proposals visible to owner");

    Ok(())
}
