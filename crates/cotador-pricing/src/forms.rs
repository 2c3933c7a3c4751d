//! Building service configurations from raw calculator form fields
//!
//! Form values arrive as strings keyed by field name. Every numeric field is
//! read through the tolerant parsers, so a half-typed value prices as zero
//! instead of failing. Each coercion is reported as a [`FieldFallback`] next to
//! the value.

use crate::pricing::{LinkConfig, PabxConfig, ProductType, ServiceConfiguration, SipConfig, VmConfig};
use crate::rates::PricingPolicy;
use cotador_common::{parse_count_or_zero, parse_numeric_or_zero, TaxSettings};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// A field whose raw text could not be used as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFallback {
    pub field: String,
    pub raw: String,
}

impl std::fmt::Display for FieldFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: could not read '{}', using default", self.field, self.raw)
    }
}

/// A value read from a form, with the fields that had to be coerced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRead<T> {
    pub value: T,
    pub warnings: Vec<FieldFallback>,
}

impl<T> FormRead<T> {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FormRead<U> {
        FormRead {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Reads typed values from a field map, collecting fallbacks
///
/// Absent fields take the given default silently; present fields that fail
/// to parse take the fallback and are recorded.
pub struct FormReader<'a> {
    fields: &'a HashMap<String, String>,
    warnings: Vec<FieldFallback>,
}

impl<'a> FormReader<'a> {
    pub fn new(fields: &'a HashMap<String, String>) -> Self {
        Self {
            fields,
            warnings: Vec::new(),
        }
    }

    fn raw(&self, field: &str) -> Option<&'a str> {
        self.fields.get(field).map(String::as_str)
    }

    fn record(&mut self, field: &str, raw: &str) {
        debug!(field, raw, "Form field coerced");
        self.warnings.push(FieldFallback {
            field: field.to_string(),
            raw: raw.to_string(),
        });
    }

    /// Unit count; absent reads as zero
    pub fn count(&mut self, field: &str) -> u32 {
        self.count_or(field, 0)
    }

    /// Unit count; absent reads as `default`
    pub fn count_or(&mut self, field: &str, default: u32) -> u32 {
        let Some(raw) = self.raw(field) else {
            return default;
        };
        let parsed = parse_count_or_zero(raw);
        if parsed.was_fallback {
            self.record(field, raw);
        }
        parsed.value
    }

    /// Non-negative amount; `None` when absent
    pub fn amount(&mut self, field: &str) -> Option<Decimal> {
        let raw = self.raw(field)?;
        let parsed = parse_numeric_or_zero(raw);
        if parsed.was_fallback {
            self.record(field, raw);
        }
        Some(parsed.value)
    }

    /// Checkbox value; absent reads as `default`
    pub fn flag_or(&mut self, field: &str, default: bool) -> bool {
        let Some(raw) = self.raw(field) else {
            return default;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" | "yes" | "sim" => true,
            "false" | "off" | "0" | "no" | "nao" | "não" | "" => false,
            _ => {
                self.record(field, raw);
                default
            }
        }
    }

    pub fn flag(&mut self, field: &str) -> bool {
        self.flag_or(field, false)
    }

    /// Trimmed text; `None` when absent or blank
    pub fn text(&self, field: &str) -> Option<String> {
        self.raw(field)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Enumerated choice; absent reads as `default`
    pub fn choice<T: FromStr>(&mut self, field: &str, default: T) -> T {
        let Some(raw) = self.raw(field) else {
            return default;
        };
        match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                self.record(field, raw);
                default
            }
        }
    }

    pub fn finish<T>(self, value: T) -> FormRead<T> {
        FormRead {
            value,
            warnings: self.warnings,
        }
    }
}

/// Read a PABX configuration
pub fn read_pabx(fields: &HashMap<String, String>) -> FormRead<PabxConfig> {
    let mut reader = FormReader::new(fields);
    let config = PabxConfig {
        extensions: reader.count("extensions"),
        include_setup: reader.flag_or("include_setup", true),
        include_devices: reader.flag("include_devices"),
        device_quantity: reader.count("device_quantity"),
        include_ai_agent: reader.flag("include_ai_agent"),
        ai_plan: reader.text("ai_plan"),
    };
    reader.finish(config)
}

/// Read a SIP trunk configuration
pub fn read_sip(fields: &HashMap<String, String>) -> FormRead<SipConfig> {
    let mut reader = FormReader::new(fields);
    let config = SipConfig {
        plan: reader.text("plan").unwrap_or_default(),
        with_equipment: reader.flag("with_equipment"),
        additional_channels: reader.count("additional_channels"),
        include_setup: reader.flag_or("include_setup", true),
    };
    reader.finish(config)
}

/// Read a virtual machine configuration; absent fields keep [`VmConfig::default`]
pub fn read_vm(fields: &HashMap<String, String>) -> FormRead<VmConfig> {
    let defaults = VmConfig::default();
    let mut reader = FormReader::new(fields);
    let config = VmConfig {
        cpu_cores: reader.count_or("cpu_cores", defaults.cpu_cores),
        ram_gb: reader.count_or("ram_gb", defaults.ram_gb),
        storage_type: reader.choice("storage_type", defaults.storage_type),
        storage_gb: reader.count_or("storage_gb", defaults.storage_gb),
        network: reader.choice("network", defaults.network),
        os: reader.text("os").unwrap_or(defaults.os),
        contract_months: reader.count_or("contract_months", defaults.contract_months),
        backup_gb: reader.count("backup_gb"),
        additional_ip: reader.flag("additional_ip"),
        snapshot: reader.flag("snapshot"),
        vpn_site_to_site: reader.flag("vpn_site_to_site"),
    };
    reader.finish(config)
}

/// Read an internet link configuration
pub fn read_link(fields: &HashMap<String, String>) -> FormRead<LinkConfig> {
    let mut reader = FormReader::new(fields);
    let config = LinkConfig {
        kind: reader.choice("kind", Default::default()),
        speed_mbps: reader.count("speed_mbps"),
        contract_months: reader.count_or("contract_months", 12),
        include_setup: reader.flag_or("include_setup", true),
    };
    reader.finish(config)
}

/// Read the configuration for any product line
pub fn read_service(
    product: ProductType,
    fields: &HashMap<String, String>,
) -> FormRead<ServiceConfiguration> {
    match product {
        ProductType::Pabx => read_pabx(fields).map(ServiceConfiguration::Pabx),
        ProductType::SipTrunk => read_sip(fields).map(ServiceConfiguration::Sip),
        ProductType::VirtualMachine => read_vm(fields).map(ServiceConfiguration::Vm),
        ProductType::InternetLink => read_link(fields).map(ServiceConfiguration::Link),
    }
}

/// Apply tax and policy edits from the VM calculator form
///
/// A regime selection is applied first and overwrites all three components;
/// component fields present in the same form are applied after it.
pub fn apply_vm_overrides(
    fields: &HashMap<String, String>,
    tax: &mut TaxSettings,
    policy: &mut PricingPolicy,
) -> Vec<FieldFallback> {
    let mut reader = FormReader::new(fields);

    if reader.raw("tax_regime").is_some() {
        let regime = reader.choice("tax_regime", tax.regime);
        tax.select_regime(regime);
    }

    if let Some(value) = reader.amount("pis_cofins") {
        tax.components.pis_cofins = value;
    }
    if let Some(value) = reader.amount("iss") {
        tax.components.iss = value;
    }
    if let Some(value) = reader.amount("csll_ir") {
        tax.components.csll_ir = value;
    }
    if let Some(value) = reader.amount("markup_percent") {
        policy.markup_percent = value;
    }
    if let Some(value) = reader.amount("commission_percent") {
        policy.commission_percent = value;
    }
    if let Some(value) = reader.amount("setup_fee") {
        policy.setup_fee = value;
    }

    reader.finish(()).warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PricingEngine, Unpriced};
    use crate::rates::{LinkKind, NetworkTier, StorageType};
    use cotador_common::TaxRegime;
    use rust_decimal_macros::dec;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_pabx_form() {
        let read = read_pabx(&form(&[
            ("extensions", "12"),
            ("include_devices", "on"),
            ("device_quantity", "3,7"),
            ("include_ai_agent", "true"),
            ("ai_plan", " 40k "),
        ]));

        assert!(read.is_clean());
        assert_eq!(read.value.extensions, 12);
        assert!(read.value.include_setup);
        assert_eq!(read.value.device_quantity, 3);
        assert_eq!(read.value.ai_plan.as_deref(), Some("40k"));
    }

    #[test]
    fn test_malformed_fields_are_reported() {
        let read = read_pabx(&form(&[("extensions", "abc"), ("device_quantity", "-2")]));

        assert_eq!(read.value.extensions, 0);
        assert_eq!(read.value.device_quantity, 0);
        assert_eq!(
            read.warnings,
            vec![
                FieldFallback {
                    field: "extensions".to_string(),
                    raw: "abc".to_string()
                },
                FieldFallback {
                    field: "device_quantity".to_string(),
                    raw: "-2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_vm_form_keeps_defaults_for_absent_fields() {
        let read = read_vm(&form(&[
            ("cpu_cores", "4"),
            ("storage_type", "nvme"),
            ("network", "10gbps"),
            ("snapshot", "sim"),
        ]));

        assert!(read.is_clean());
        assert_eq!(read.value.cpu_cores, 4);
        assert_eq!(read.value.ram_gb, 4);
        assert_eq!(read.value.storage_type, StorageType::Nvme);
        assert_eq!(read.value.network, NetworkTier::Gbps10);
        assert_eq!(read.value.os, "Ubuntu");
        assert!(read.value.snapshot);
    }

    #[test]
    fn test_unknown_choice_falls_back() {
        let read = read_link(&form(&[("kind", "satellite"), ("speed_mbps", "100")]));
        assert_eq!(read.value.kind, LinkKind::Fiber);
        assert_eq!(read.value.contract_months, 12);
        assert_eq!(read.warnings.len(), 1);
    }

    #[test]
    fn test_read_service_dispatch() {
        let read = read_service(ProductType::SipTrunk, &form(&[("plan", "franquia_4")]));
        assert_eq!(
            read.value,
            ServiceConfiguration::Sip(SipConfig::new("franquia_4"))
        );
    }

    #[test]
    fn test_regime_then_components() {
        let mut tax = TaxSettings::default();
        let mut policy = PricingPolicy::default();

        let warnings = apply_vm_overrides(
            &form(&[
                ("tax_regime", "lucro_presumido"),
                ("iss", "2,5"),
                ("markup_percent", "40"),
            ]),
            &mut tax,
            &mut policy,
        );

        assert!(warnings.is_empty());
        assert_eq!(tax.regime, TaxRegime::LucroPresumido);
        assert_eq!(tax.components.iss, dec!(2.5));
        assert_eq!(tax.components.pis_cofins, dec!(3.65));
        assert!(tax.is_customized());
        assert_eq!(policy.markup_percent, dec!(40));
        assert_eq!(policy.commission_percent, dec!(3));
    }

    #[test]
    fn test_blank_component_reads_as_zero() {
        let mut tax = TaxSettings::default();
        let mut policy = PricingPolicy::default();

        let warnings = apply_vm_overrides(&form(&[("csll_ir", "")]), &mut tax, &mut policy);
        assert_eq!(tax.components.csll_ir, dec!(0));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_huge_markup_prices_as_overflow() {
        let mut engine = PricingEngine::default();
        let book = engine.rates_mut();
        let warnings = apply_vm_overrides(
            &form(&[("markup_percent", "9999999999999999999999999999")]),
            &mut book.tax,
            &mut book.policy,
        );
        assert!(warnings.is_empty());

        let outcome = engine.quote(&ServiceConfiguration::Vm(VmConfig::default()));
        assert_eq!(outcome.unpriced(), Some(&Unpriced::overflow("VM markup")));
    }
}
