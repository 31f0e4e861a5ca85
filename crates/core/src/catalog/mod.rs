pub mod types;

use crate::domain::provider::ProviderInput;
use anyhow::{bail, Context};
use serde_json::Value;
use std::path::Path;
use types::{CatalogProduct, ProductCategory};

#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<ProductCategory>,
    pub include_inactive: bool,
}

impl CatalogFilter {
    pub fn matches(&self, product: &CatalogProduct) -> bool {
        if !self.include_inactive && !product.active {
            return false;
        }
        match self.category {
            Some(category) => product.category == Some(category),
            None => true,
        }
    }
}

/// Parse a catalog export. Accepts a bare array of products or an object
/// with a `products` array. Rows that cannot be read are skipped.
pub fn parse_catalog(text: &str) -> anyhow::Result<Vec<CatalogProduct>> {
    let value: Value = serde_json::from_str(text).context("catalog is not valid JSON")?;

    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(mut obj) => match obj.remove("products") {
            Some(Value::Array(rows)) => rows,
            _ => bail!("catalog object must contain a `products` array"),
        },
        other => bail!("catalog must be an array or an object, got {other}"),
    };

    let mut out = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<CatalogProduct>(row) {
            Ok(product) => out.push(product),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed catalog row");
            }
        }
    }

    Ok(out)
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<CatalogProduct>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read catalog {} failed", path.display()))?;
    let products =
        parse_catalog(&text).with_context(|| format!("parse catalog {} failed", path.display()))?;

    tracing::info!(path = %path.display(), products = products.len(), "loaded product catalog");
    Ok(products)
}

/// Map the products that pass `filter` into engine input, keeping catalog order.
pub fn select_products(products: &[CatalogProduct], filter: &CatalogFilter) -> Vec<ProviderInput> {
    products
        .iter()
        .filter(|p| filter.matches(p))
        .map(CatalogProduct::to_provider_input)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_catalog() -> String {
        json!({
            "products": [
                {
                    "id": "ledn-btc",
                    "name": "Ledn BTC Savings",
                    "category": "bitcoin",
                    "apyMin": 2,
                    "apyMax": "3",
                    "hv30Pct": 45.5,
                    "lockDurationYears": 0,
                    "liquidityType": "high",
                },
                {
                    "id": 7,
                    "name": "Treasury Note",
                    "category": "fiat",
                    "apyMin": 4.1,
                    "hv30Pct": "0.5",
                    "lockDurationYears": 2,
                    "liquidityType": "locked",
                    "active": false,
                },
                {
                    "id": "usdc-vault",
                    "name": "USDC Vault",
                    "category": "Stablecoin",
                    "apyMin": 5,
                    "apyMax": 9,
                    "hv30Pct": 1,
                    "liquidityType": "medium",
                },
                {
                    "id": "broken",
                    "active": "sometimes",
                },
            ]
        })
        .to_string()
    }

    #[test]
    fn parse_catalog_maps_storage_names() {
        let products = parse_catalog(&sample_catalog()).unwrap();
        assert_eq!(products.len(), 3);

        let ledn = &products[0];
        assert_eq!(ledn.category, Some(ProductCategory::Btc));
        assert_eq!(ledn.apy_max, Some(3.0));
        assert_eq!(ledn.hv30_pct, Some(45.5));
        assert!(ledn.active);

        let note = &products[1];
        assert_eq!(note.id, "7");
        assert_eq!(note.apy_max, None);
        assert!(!note.active);
    }

    #[test]
    fn parse_catalog_accepts_bare_array() {
        let products = parse_catalog(r#"[{"id": "a", "apyMin": 1}]"#).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category, None);
    }

    #[test]
    fn parse_catalog_rejects_malformed_documents() {
        assert!(parse_catalog("not json").is_err());
        assert!(parse_catalog(r#"{"items": []}"#).is_err());
        assert!(parse_catalog("42").is_err());
    }

    #[test]
    fn select_products_filters_and_maps() {
        let products = parse_catalog(&sample_catalog()).unwrap();

        let active = select_products(&products, &CatalogFilter::default());
        let ids: Vec<&str> = active.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ledn-btc", "usdc-vault"]);
        assert_eq!(active[1].hv30_volatility, Some(1.0));
        assert_eq!(active[1].liquidity_type.as_deref(), Some("medium"));

        let fiat = select_products(
            &products,
            &CatalogFilter {
                category: Some(ProductCategory::Fiat),
                include_inactive: true,
            },
        );
        assert_eq!(fiat.len(), 1);
        assert_eq!(fiat[0].lock_duration_years, Some(2.0));
    }

    #[test]
    fn category_parses_from_cli_labels() {
        assert_eq!("BTC".parse::<ProductCategory>().unwrap(), ProductCategory::Btc);
        assert_eq!("stable".parse::<ProductCategory>().unwrap(), ProductCategory::Stablecoin);
        assert!("equity".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let path = std::env::temp_dir().join("yieldscope-missing-catalog.json");
        let err = load_catalog(&path).unwrap_err();
        assert!(format!("{err:#}").contains("read catalog"));
    }
}
