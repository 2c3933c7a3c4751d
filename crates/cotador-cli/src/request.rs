//! Quote request file and its evaluation

use anyhow::{Context, Result};
use cotador_common::{ContactInfo, TaxRegime};
use cotador_pricing::forms::{apply_vm_overrides, read_service, FieldFallback};
use cotador_pricing::{PriceOutcome, PricingEngine, ProductType, ServiceConfiguration, Unpriced};
use cotador_proposal::ProposalAggregator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// A proposal to price, as written by the salesperson
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub client: ContactInfo,
    pub account_manager: ContactInfo,
    /// Regime for VM taxes; the rate book's regime when absent
    #[serde(default)]
    pub tax_regime: Option<TaxRegime>,
    /// Raw VM calculator overrides (tax components, markup, commission)
    #[serde(default)]
    pub vm_overrides: HashMap<String, String>,
    pub items: Vec<RequestItem>,
}

/// One service to price, either typed or as raw form fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestItem {
    Service {
        #[serde(default)]
        description: Option<String>,
        service: ServiceConfiguration,
    },
    Form {
        #[serde(default)]
        description: Option<String>,
        product: ProductType,
        fields: HashMap<String, String>,
    },
}

impl RequestItem {
    fn resolve(&self) -> (ServiceConfiguration, String, Vec<FieldFallback>) {
        match self {
            RequestItem::Service {
                description,
                service,
            } => (
                service.clone(),
                description.clone().unwrap_or_else(|| service.describe()),
                Vec::new(),
            ),
            RequestItem::Form {
                description,
                product,
                fields,
            } => {
                let read = read_service(*product, fields);
                let description = description.clone().unwrap_or_else(|| read.value.describe());
                (read.value, description, read.warnings)
            }
        }
    }
}

impl QuoteRequest {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read quote request {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse quote request {}", path.display()))
    }
}

/// Outcome of pricing a request
#[derive(Debug)]
pub struct PricedRequest {
    pub aggregator: ProposalAggregator,
    /// Items without a price, by description
    pub unpriced: Vec<(String, Unpriced)>,
    /// Form fields that had to be coerced
    pub warnings: Vec<FieldFallback>,
}

/// Apply the request's commercial settings to the engine and price every item
///
/// Unpriced items are reported and left out of the proposal.
pub fn price_request(engine: &mut PricingEngine, request: &QuoteRequest) -> PricedRequest {
    let mut warnings = Vec::new();

    let book = engine.rates_mut();
    if let Some(regime) = request.tax_regime {
        book.tax.select_regime(regime);
    }
    warnings.extend(apply_vm_overrides(
        &request.vm_overrides,
        &mut book.tax,
        &mut book.policy,
    ));

    let mut aggregator = ProposalAggregator::new();
    aggregator.set_client(request.client.clone());
    aggregator.set_account_manager(request.account_manager.clone());

    let mut unpriced = Vec::new();
    for item in &request.items {
        let (configuration, description, item_warnings) = item.resolve();
        warnings.extend(item_warnings);

        match engine.quote(&configuration) {
            PriceOutcome::Priced(quote) => {
                aggregator.add_quote(&quote, description);
            }
            PriceOutcome::Unpriced(reason) => {
                warn!(%description, %reason, "Item left out of proposal");
                unpriced.push((description, reason));
            }
        }
    }

    for warning in &warnings {
        warn!(%warning, "Form input coerced");
    }
    info!(
        priced = aggregator.items().len(),
        unpriced = unpriced.len(),
        "Quote request priced"
    );

    PricedRequest {
        aggregator,
        unpriced,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cotador_common::format_brl;
    use std::io::Write;

    const SAMPLE: &str = include_str!("../fixtures/sample_request.json");

    #[test]
    fn test_sample_request() {
        let request: QuoteRequest = serde_json::from_str(SAMPLE).unwrap();
        let mut engine = PricingEngine::default();
        let priced = price_request(&mut engine, &request);

        assert_eq!(priced.aggregator.items().len(), 4);
        assert_eq!(priced.unpriced.len(), 1);
        assert!(matches!(priced.unpriced[0].1, Unpriced::UnknownKey { .. }));
        assert_eq!(priced.warnings.len(), 1);
        assert_eq!(priced.warnings[0].field, "backup_gb");

        // PABX 20 ramais: 20 x 28 + 220 + 2 x 35; SIP: 250 + 3 x 20;
        // VM: 117.64753; fibra 200 Mbps / 24 meses: 1150
        assert_eq!(
            format_brl(priced.aggregator.total_monthly()),
            "R$\u{a0}2.427,65"
        );
        assert_eq!(format_brl(priced.aggregator.total_setup()), "R$\u{a0}3.500,00");
        assert!(priced.aggregator.to_proposal("ana").is_ok());
    }

    #[test]
    fn test_regime_override_changes_vm_price() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{
                "client": {"name": "X", "email": "x@x.com"},
                "account_manager": {"name": "Y", "email": "y@y.com"},
                "tax_regime": "simples_nacional",
                "items": [{"service": {"product": "vm"}}]
            }"#,
        )
        .unwrap();

        let mut engine = PricingEngine::default();
        let priced = price_request(&mut engine, &request);

        // 77 x 1.06 x 1.30
        assert_eq!(format_brl(priced.aggregator.total_monthly()), "R$\u{a0}106,11");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let request = QuoteRequest::from_path(file.path()).unwrap();
        assert_eq!(request.items.len(), 5);

        assert!(QuoteRequest::from_path(Path::new("/nonexistent/request.json")).is_err());
    }
}
