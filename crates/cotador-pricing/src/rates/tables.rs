//! Rate tables per product line, with the reseller's list prices as defaults

use super::rate::Rate;
use super::tier::Bracket;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============ PABX ============

/// PABX price bracket by extension count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PabxTier {
    pub min: u32,
    pub max: u32,
    /// One-time installation fee
    pub setup: Rate,
    /// Monthly charge per extension
    pub monthly_per_extension: Rate,
    /// Flat monthly hosting fee (0 when hosting is not charged)
    pub hosting_fee: Decimal,
}

impl PabxTier {
    fn new(min: u32, max: u32, setup: Rate, monthly: Decimal, hosting_fee: Decimal) -> Self {
        Self {
            min,
            max,
            setup,
            monthly_per_extension: Rate::Fixed(monthly),
            hosting_fee,
        }
    }
}

impl Bracket for PabxTier {
    fn min(&self) -> u32 {
        self.min
    }
    fn max(&self) -> u32 {
        self.max
    }
}

/// AI attendant plan sold alongside PABX
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAgentPlan {
    pub name: String,
    pub messages_included: u32,
    pub monthly_cost: Rate,
}

/// PABX rate table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PabxRates {
    pub tiers: Vec<PabxTier>,
    /// Monthly rental per IP phone
    pub device_unit_rate: Decimal,
    pub ai_plans: BTreeMap<String, AiAgentPlan>,
}

impl Default for PabxRates {
    fn default() -> Self {
        let fixed = |amount: Decimal| Rate::Fixed(amount);
        let tiers = vec![
            PabxTier::new(1, 10, fixed(dec!(1250)), dec!(30), dec!(200)),
            PabxTier::new(11, 20, fixed(dec!(2000)), dec!(28), dec!(220)),
            PabxTier::new(21, 30, fixed(dec!(2500)), dec!(27), dec!(250)),
            PabxTier::new(31, 50, fixed(dec!(3000)), dec!(26), dec!(300)),
            PabxTier::new(51, 100, fixed(dec!(3500)), dec!(25), dec!(400)),
            PabxTier::new(101, 500, fixed(dec!(5000)), dec!(23), dec!(500)),
            PabxTier::new(501, 1000, Rate::ConsultSales, dec!(21), dec!(800)),
        ];

        let ai_plans = [
            ("20k", "Agente IA 20 mil mensagens", 20_000, dec!(720)),
            ("40k", "Agente IA 40 mil mensagens", 40_000, dec!(1370)),
            ("60k", "Agente IA 60 mil mensagens", 60_000, dec!(1940)),
            ("100k", "Agente IA 100 mil mensagens", 100_000, dec!(3060)),
        ]
        .into_iter()
        .map(|(key, name, messages, cost)| {
            (
                key.to_string(),
                AiAgentPlan {
                    name: name.to_string(),
                    messages_included: messages,
                    monthly_cost: Rate::Fixed(cost),
                },
            )
        })
        .collect();

        Self {
            tiers,
            device_unit_rate: dec!(35),
            ai_plans,
        }
    }
}

// ============ SIP TRUNK ============

/// SIP plan billing model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SipPlanKind {
    /// Minute allowance; extra channels are charged
    Metered,
    /// Flat rate; extra channels are included
    Unlimited,
}

/// SIP trunk plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipPlan {
    pub name: String,
    pub kind: SipPlanKind,
    pub channels: u32,
    pub monthly_base: Rate,
    /// Monthly price when the gateway is rented with the plan
    #[serde(default)]
    pub monthly_with_equipment: Option<Rate>,
    pub setup_fee: Rate,
}

/// SIP trunk rate table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipRates {
    pub plans: BTreeMap<String, SipPlan>,
    /// Monthly charge per channel beyond the plan (metered plans only)
    pub per_channel_rate: Decimal,
}

impl Default for SipRates {
    fn default() -> Self {
        let plan = |name: &str,
                    kind: SipPlanKind,
                    channels: u32,
                    base: Decimal,
                    with_equipment: Option<Decimal>,
                    setup: Rate| SipPlan {
            name: name.to_string(),
            kind,
            channels,
            monthly_base: Rate::Fixed(base),
            monthly_with_equipment: with_equipment.map(Rate::Fixed),
            setup_fee: setup,
        };

        let plans = [
            (
                "franquia_4",
                plan("SIP Franquia 4 canais", SipPlanKind::Metered, 4, dec!(250), Some(dec!(300)), Rate::Fixed(dec!(500))),
            ),
            (
                "franquia_10",
                plan("SIP Franquia 10 canais", SipPlanKind::Metered, 10, dec!(450), Some(dec!(520)), Rate::Fixed(dec!(800))),
            ),
            (
                "franquia_30",
                plan("SIP Franquia 30 canais", SipPlanKind::Metered, 30, dec!(1150), None, Rate::Fixed(dec!(1500))),
            ),
            (
                "ilimitado_10",
                plan("SIP Ilimitado 10 canais", SipPlanKind::Unlimited, 10, dec!(890), Some(dec!(960)), Rate::Fixed(dec!(800))),
            ),
            (
                "ilimitado_30",
                plan("SIP Ilimitado 30 canais", SipPlanKind::Unlimited, 30, dec!(2300), None, Rate::ConsultSales),
            ),
        ]
        .into_iter()
        .map(|(key, plan)| (key.to_string(), plan))
        .collect();

        Self {
            plans,
            per_channel_rate: dec!(20),
        }
    }
}

// ============ VIRTUAL MACHINES ============

/// Disk technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    HddSas,
    Ssd,
    Nvme,
}

impl Default for StorageType {
    fn default() -> Self {
        StorageType::HddSas
    }
}

impl std::str::FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hdd_sas" | "hdd" | "sas" => Ok(StorageType::HddSas),
            "ssd" => Ok(StorageType::Ssd),
            "nvme" => Ok(StorageType::Nvme),
            other => Err(format!("unknown storage type: {}", other)),
        }
    }
}

/// Uplink speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkTier {
    #[serde(rename = "1gbps")]
    Gbps1,
    #[serde(rename = "10gbps")]
    Gbps10,
}

impl Default for NetworkTier {
    fn default() -> Self {
        NetworkTier::Gbps1
    }
}

impl std::str::FromStr for NetworkTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1gbps" | "1" => Ok(NetworkTier::Gbps1),
            "10gbps" | "10" => Ok(NetworkTier::Gbps10),
            other => Err(format!("unknown network tier: {}", other)),
        }
    }
}

/// Per-GB monthly storage rates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRates {
    pub hdd_sas: Decimal,
    pub ssd: Decimal,
    pub nvme: Decimal,
}

impl StorageRates {
    pub fn rate(&self, storage: StorageType) -> Decimal {
        match storage {
            StorageType::HddSas => self.hdd_sas,
            StorageType::Ssd => self.ssd,
            StorageType::Nvme => self.nvme,
        }
    }
}

/// Monthly network surcharge per uplink tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRates {
    pub gbps_1: Decimal,
    pub gbps_10: Decimal,
}

impl NetworkRates {
    pub fn surcharge(&self, tier: NetworkTier) -> Decimal {
        match tier {
            NetworkTier::Gbps1 => self.gbps_1,
            NetworkTier::Gbps10 => self.gbps_10,
        }
    }
}

/// Operating system offered on VMs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsLicense {
    pub name: String,
    /// Monthly license fee
    pub monthly_fee: Decimal,
}

/// Virtual machine cost table (costs before tax and markup)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmRates {
    pub vcpu_windows: Decimal,
    pub vcpu_linux: Decimal,
    pub ram_per_gb: Decimal,
    pub storage: StorageRates,
    pub network: NetworkRates,
    pub os_licenses: Vec<OsLicense>,
    pub backup_per_gb: Decimal,
    pub additional_ip: Decimal,
    pub snapshot: Decimal,
    pub vpn_site_to_site: Decimal,
}

impl VmRates {
    /// License entry for an OS name, case-insensitive
    pub fn os_license(&self, os: &str) -> Option<&OsLicense> {
        let wanted = os.trim();
        self.os_licenses
            .iter()
            .find(|license| license.name.eq_ignore_ascii_case(wanted))
    }
}

impl Default for VmRates {
    fn default() -> Self {
        let os = |name: &str, fee: Decimal| OsLicense {
            name: name.to_string(),
            monthly_fee: fee,
        };

        Self {
            vcpu_windows: dec!(15),
            vcpu_linux: dec!(10),
            ram_per_gb: dec!(8),
            storage: StorageRates {
                hdd_sas: dec!(0.5),
                ssd: dec!(1.5),
                nvme: dec!(2.5),
            },
            network: NetworkRates {
                gbps_1: dec!(0),
                gbps_10: dec!(100),
            },
            os_licenses: vec![
                os("Ubuntu", dec!(0)),
                os("Debian", dec!(0)),
                os("Rocky Linux", dec!(0)),
                os("Windows Server 2019", dec!(120)),
                os("Windows Server 2022", dec!(135)),
            ],
            backup_per_gb: dec!(0.5),
            additional_ip: dec!(15),
            snapshot: dec!(25),
            vpn_site_to_site: dec!(50),
        }
    }
}

// ============ INTERNET LINKS ============

/// Last-mile technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Radio,
    Fiber,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Radio => "radio",
            LinkKind::Fiber => "fiber",
        }
    }
}

impl Default for LinkKind {
    fn default() -> Self {
        LinkKind::Fiber
    }
}

impl std::str::FromStr for LinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "radio" => Ok(LinkKind::Radio),
            "fiber" | "fibra" => Ok(LinkKind::Fiber),
            other => Err(format!("unknown link kind: {}", other)),
        }
    }
}

/// Monthly price for one contract term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPrice {
    pub months: u32,
    pub monthly: Rate,
}

/// Prices for one link speed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpeedRow {
    pub speed_mbps: u32,
    pub setup: Rate,
    pub terms: Vec<TermPrice>,
}

impl LinkSpeedRow {
    fn new(speed_mbps: u32, setup: Rate, monthly: [(u32, Rate); 3]) -> Self {
        Self {
            speed_mbps,
            setup,
            terms: monthly
                .into_iter()
                .map(|(months, monthly)| TermPrice { months, monthly })
                .collect(),
        }
    }

    pub fn term(&self, months: u32) -> Option<&TermPrice> {
        self.terms.iter().find(|term| term.months == months)
    }
}

/// Link rate table, one row list per technology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRates {
    pub radio: Vec<LinkSpeedRow>,
    pub fiber: Vec<LinkSpeedRow>,
}

impl LinkRates {
    pub fn rows(&self, kind: LinkKind) -> &[LinkSpeedRow] {
        match kind {
            LinkKind::Radio => &self.radio,
            LinkKind::Fiber => &self.fiber,
        }
    }
}

impl Default for LinkRates {
    fn default() -> Self {
        let f = |amount: Decimal| Rate::Fixed(amount);

        Self {
            radio: vec![
                LinkSpeedRow::new(10, f(dec!(600)), [(12, f(dec!(299))), (24, f(dec!(279))), (36, f(dec!(259)))]),
                LinkSpeedRow::new(20, f(dec!(600)), [(12, f(dec!(399))), (24, f(dec!(379))), (36, f(dec!(349)))]),
                LinkSpeedRow::new(50, f(dec!(900)), [(12, f(dec!(699))), (24, f(dec!(649))), (36, f(dec!(599)))]),
                LinkSpeedRow::new(100, Rate::ConsultSales, [(12, f(dec!(1190))), (24, f(dec!(1090))), (36, f(dec!(990)))]),
            ],
            fiber: vec![
                LinkSpeedRow::new(100, f(dec!(1000)), [(12, f(dec!(890))), (24, f(dec!(790))), (36, f(dec!(690)))]),
                LinkSpeedRow::new(200, f(dec!(1000)), [(12, f(dec!(1290))), (24, f(dec!(1150))), (36, f(dec!(990)))]),
                LinkSpeedRow::new(500, f(dec!(1500)), [(12, f(dec!(2490))), (24, f(dec!(2190))), (36, f(dec!(1990)))]),
                LinkSpeedRow::new(1000, Rate::ConsultSales, [(12, Rate::ConsultSales), (24, f(dec!(4490))), (36, f(dec!(3990)))]),
            ],
        }
    }
}
