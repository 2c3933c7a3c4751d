//! Runner configuration

use anyhow::{Context, Result};
use cotador_common::{UserIdentity, UserRole};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runner settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Optional TOML/JSON rate overrides
    pub rates_path: Option<PathBuf>,
    /// User id recorded as proposal owner
    pub owner: String,
    pub owner_email: String,
    pub owner_role: UserRole,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rates_path: None,
            owner: "local".to_string(),
            owner_email: "local@localhost".to_string(),
            owner_role: UserRole::User,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment and `.env`
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(path) = lookup("COTADOR_RATES_PATH").filter(|p| !p.trim().is_empty()) {
            cfg.rates_path = Some(PathBuf::from(path));
        }
        if let Some(owner) = lookup("COTADOR_OWNER") {
            cfg.owner = owner;
        }
        if let Some(email) = lookup("COTADOR_OWNER_EMAIL") {
            cfg.owner_email = email;
        }
        if let Some(role) = lookup("COTADOR_OWNER_ROLE") {
            cfg.owner_role = role
                .parse()
                .with_context(|| format!("COTADOR_OWNER_ROLE={}", role))?;
        }

        Ok(cfg)
    }

    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(self.owner.clone(), self.owner_email.clone(), self.owner_role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, CliConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = CliConfig::from_lookup(lookup(&[
            ("COTADOR_RATES_PATH", "rates.toml"),
            ("COTADOR_OWNER", "ana"),
            ("COTADOR_OWNER_ROLE", "diretor"),
        ]))
        .unwrap();

        assert_eq!(cfg.rates_path, Some(PathBuf::from("rates.toml")));
        assert_eq!(cfg.identity().user_id, "ana");
        assert_eq!(cfg.owner_role, UserRole::Diretor);
    }

    #[test]
    fn test_bad_role() {
        assert!(CliConfig::from_lookup(lookup(&[("COTADOR_OWNER_ROLE", "root")])).is_err());
    }
}
