//! End-to-end quoting tests
//!
//! - Pricing every product line through the engine
//! - Assembling, saving, reloading, and listing proposals
//! - Totals staying additive under arbitrary add/remove sequences

use cotador_common::{format_brl, ContactInfo, UserIdentity, UserRole};
use cotador_pricing::forms::{apply_vm_overrides, read_service};
use cotador_pricing::rates::LinkKind;
use cotador_pricing::{
    LinkConfig, PabxConfig, PricingEngine, ProductType, ServiceConfiguration, SipConfig,
    VmConfig,
};
use cotador_proposal::{
    InMemoryProposalStore, ProposalAggregator, ProposalStore, QuoteAction, QuoteFlow, QuoteStep,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

fn session() -> (QuoteFlow, ProposalAggregator) {
    let mut flow = QuoteFlow::new();
    flow.apply(QuoteAction::StartNew).unwrap();

    let mut aggregator = ProposalAggregator::new();
    aggregator.set_client(
        ContactInfo::new("Padaria Pão Quente", "contato@paoquente.com.br").with_phone("11 99999-0000"),
    );
    aggregator.set_account_manager(ContactInfo::new("Ana Souza", "ana@revenda.com.br"));

    assert_eq!(flow.apply(QuoteAction::Continue).unwrap(), QuoteStep::Calculator);
    (flow, aggregator)
}

#[tokio::test]
async fn test_full_quote_round_trip() {
    let engine = PricingEngine::default();
    let store = InMemoryProposalStore::new();
    let (_flow, mut aggregator) = session();

    let configurations = [
        ServiceConfiguration::Pabx(PabxConfig::new(10).with_devices(2)),
        ServiceConfiguration::Sip(SipConfig::new("franquia_4").with_additional_channels(3)),
        ServiceConfiguration::Vm(VmConfig::default()),
        ServiceConfiguration::Link(LinkConfig::new(LinkKind::Fiber, 100, 36)),
    ];
    for configuration in &configurations {
        let quote = engine.quote(configuration).priced().unwrap();
        aggregator.add_quote(&quote, configuration.describe());
    }

    // 1250 + 500 + 0 + 1000
    assert_eq!(aggregator.total_setup(), dec!(2750));
    // 570 + 310 + 117.64753 + 690
    assert_eq!(aggregator.total_monthly(), dec!(1687.64753));
    assert_eq!(format_brl(aggregator.total_monthly()), "R$\u{a0}1.687,65");

    let id = aggregator.save(&store, "ana").await.unwrap();
    let stored = store.get(&id).await.unwrap();
    assert!(stored.totals_consistent());

    let mut reloaded = ProposalAggregator::new();
    reloaded.load_proposal(stored.clone());

    assert_eq!(reloaded.id(), Some(&id));
    assert_eq!(reloaded.items(), aggregator.items());
    assert_eq!(reloaded.client(), aggregator.client());
    assert_eq!(reloaded.account_manager(), aggregator.account_manager());
    assert_eq!(reloaded.total_setup(), aggregator.total_setup());
    assert_eq!(reloaded.total_monthly(), aggregator.total_monthly());

    let again = reloaded.to_proposal("ana").unwrap();
    assert_eq!(again.items, stored.items);
    assert_eq!(again.created_at, stored.created_at);
}

#[tokio::test]
async fn test_listing_by_role() {
    let store = InMemoryProposalStore::new();

    for owner in ["ana", "bruno", "ana"] {
        let (_flow, mut aggregator) = session();
        aggregator.save(&store, owner).await.unwrap();
    }

    let ana = UserIdentity::new("ana", "ana@revenda.com.br", UserRole::User);
    let director = UserIdentity::new("dir", "dir@revenda.com.br", UserRole::Diretor);

    assert_eq!(store.list(&ana).await.unwrap().len(), 2);
    assert_eq!(store.list(&director).await.unwrap().len(), 3);
}

#[test]
fn test_form_to_proposal_item() {
    let engine = PricingEngine::default();
    let fields: HashMap<String, String> = [
        ("plan", "franquia_4"),
        ("additional_channels", "3"),
        ("include_setup", "false"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let read = read_service(ProductType::SipTrunk, &fields);
    assert!(read.is_clean());

    let quote = engine.quote(&read.value).priced().unwrap();
    let (_flow, mut aggregator) = session();
    aggregator.add_quote(&quote, read.value.describe());

    assert_eq!(aggregator.total_monthly(), dec!(310));
    assert_eq!(aggregator.total_setup(), dec!(0));
}

#[test]
fn test_vm_overrides_from_form() {
    let mut engine = PricingEngine::default();
    let fields: HashMap<String, String> = [("tax_regime", "lucro_real"), ("markup_percent", "30")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let book = engine.rates_mut();
    let warnings = apply_vm_overrides(&fields, &mut book.tax, &mut book.policy);
    assert!(warnings.is_empty());

    let config = VmConfig {
        contract_months: 36,
        ..VmConfig::default()
    };
    let quote = engine.quote_vm(&config).priced().unwrap();
    assert_eq!(format_brl(quote.final_monthly), "R$\u{a0}105,88");
}

#[test]
fn test_unpriced_never_reaches_proposal() {
    let engine = PricingEngine::default();
    let outcome = engine.quote(&ServiceConfiguration::Pabx(PabxConfig::new(5000)));
    assert!(!outcome.is_priced());
    assert!(outcome.priced().is_none());
}

#[derive(Debug, Clone)]
enum Op {
    Add(u32, u32),
    RemoveExisting(usize),
    RemoveUnknown,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..100_000, 0u32..100_000).prop_map(|(s, m)| Op::Add(s, m)),
        any::<usize>().prop_map(Op::RemoveExisting),
        Just(Op::RemoveUnknown),
    ]
}

proptest! {
    #[test]
    fn prop_totals_are_additive(ops in proptest::collection::vec(op(), 0..40)) {
        let mut aggregator = ProposalAggregator::new();

        for op in ops {
            match op {
                Op::Add(setup, monthly) => {
                    // cents
                    let breakdown = cotador_pricing::PriceBreakdown::new(
                        Decimal::new(setup.into(), 2),
                        Decimal::new(monthly.into(), 2),
                    );
                    aggregator.add_line_item(&breakdown, "item", ProductType::Pabx);
                }
                Op::RemoveExisting(index) => {
                    if !aggregator.is_empty() {
                        let id = aggregator.items()[index % aggregator.items().len()].id;
                        aggregator.remove_line_item(id);
                    }
                }
                Op::RemoveUnknown => {
                    aggregator.remove_line_item(uuid::Uuid::now_v7());
                }
            }

            let setup: Decimal = aggregator.items().iter().map(|i| i.setup_amount).sum();
            let monthly: Decimal = aggregator.items().iter().map(|i| i.monthly_amount).sum();
            prop_assert_eq!(aggregator.total_setup(), setup);
            prop_assert_eq!(aggregator.total_monthly(), monthly);
        }
    }
}
