use crate::domain::lenient;
use crate::domain::provider::ProviderInput;
use anyhow::bail;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Btc,
    Fiat,
    Stablecoin,
}

impl ProductCategory {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "btc" | "bitcoin" => Some(Self::Btc),
            "fiat" => Some(Self::Fiat),
            "stablecoin" | "stable" => Some(Self::Stablecoin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Fiat => "fiat",
            Self::Stablecoin => "stablecoin",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match Self::from_label(s) {
            Some(c) => Ok(c),
            None => bail!("unknown product category: {s} (expected btc, fiat or stablecoin)"),
        }
    }
}

/// One row of the persisted product catalog, in its storage naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogProduct {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "category")]
    pub category: Option<ProductCategory>,
    #[serde(deserialize_with = "lenient::number")]
    pub apy_min: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub apy_max: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub hv30_pct: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub lock_duration_years: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub liquidity_type: Option<String>,
    pub active: bool,
}

impl Default for CatalogProduct {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            category: None,
            apy_min: None,
            apy_max: None,
            hv30_pct: None,
            lock_duration_years: None,
            liquidity_type: None,
            active: true,
        }
    }
}

impl CatalogProduct {
    pub fn to_provider_input(&self) -> ProviderInput {
        ProviderInput {
            id: self.id.clone(),
            name: self.name.clone(),
            apy_min: self.apy_min,
            apy_max: self.apy_max,
            hv30_volatility: self.hv30_pct,
            lock_duration_years: self.lock_duration_years,
            liquidity_type: self.liquidity_type.clone(),
        }
    }
}

fn category<'de, D>(deserializer: D) -> Result<Option<ProductCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = lenient::optional_text(deserializer)?;
    Ok(label.as_deref().and_then(ProductCategory::from_label))
}
