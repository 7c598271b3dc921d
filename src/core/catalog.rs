pub use crate::domain::model::CatalogKind;
use crate::domain::model::{CatalogItem, Flight, Price};
use crate::utils::error::{Result, TravelError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

/// 靜態型錄；載入後不再變動，篩選只產生借用的視圖
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    destinations: Vec<CatalogItem>,
    #[serde(default)]
    services: Vec<CatalogItem>,
    #[serde(default)]
    flights: Vec<Flight>,
}

impl Catalog {
    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded catalog file: {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content).map_err(|e| TravelError::CatalogError {
            message: format!("TOML parsing error: {}", e),
        })?;
        catalog.check()?;
        tracing::debug!(
            "Catalog ready: {} destinations, {} services, {} flights",
            catalog.destinations.len(),
            catalog.services.len(),
            catalog.flights.len()
        );
        Ok(catalog)
    }

    pub fn from_parts(
        destinations: Vec<CatalogItem>,
        services: Vec<CatalogItem>,
        flights: Vec<Flight>,
    ) -> Result<Self> {
        let catalog = Self {
            destinations,
            services,
            flights,
        };
        catalog.check()?;
        Ok(catalog)
    }

    pub fn items(&self, kind: CatalogKind) -> &[CatalogItem] {
        match kind {
            CatalogKind::Destinations => &self.destinations,
            CatalogKind::Services => &self.services,
        }
    }

    pub fn destinations(&self) -> &[CatalogItem] {
        &self.destinations
    }

    pub fn services(&self) -> &[CatalogItem] {
        &self.services
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn find(&self, kind: CatalogKind, id: &str) -> Option<&CatalogItem> {
        self.items(kind).iter().find(|item| item.id == id)
    }

    pub fn get(&self, kind: CatalogKind, id: &str) -> Result<&CatalogItem> {
        self.find(kind, id).ok_or_else(|| TravelError::UnknownItem { id: id.to_string() })
    }

    fn check(&self) -> Result<()> {
        check_collection(CatalogKind::Destinations, &self.destinations)?;
        check_collection(CatalogKind::Services, &self.services)?;

        for flight in &self.flights {
            if !flight.price.is_finite() || flight.price < 0.0 {
                return Err(TravelError::CatalogError {
                    message: format!(
                        "flight by {} needs a finite, non-negative price",
                        flight.airline
                    ),
                });
            }
        }
        Ok(())
    }
}

fn check_collection(kind: CatalogKind, items: &[CatalogItem]) -> Result<()> {
    let mut seen = HashSet::new();

    for item in items {
        let fail = |reason: &str| TravelError::CatalogError {
            message: format!("{} item '{}': {}", kind, item.id, reason),
        };

        if !seen.insert(item.id.as_str()) {
            return Err(fail("duplicate id"));
        }
        if !(0.0..=5.0).contains(&item.rating) {
            return Err(fail("rating must be between 0 and 5"));
        }
        if item.duration.min_days > item.duration.max_days {
            return Err(fail("duration min_days exceeds max_days"));
        }
        match &item.price {
            Price::Fixed(amount) if !amount.is_finite() => {
                return Err(fail("price must be a finite number"));
            }
            Price::Range { from, to, .. } if !from.is_finite() || !to.is_finite() => {
                return Err(fail("price must be a finite number"));
            }
            Price::Range { from, to, .. } if from > to => {
                return Err(fail("price range 'from' exceeds 'to'"));
            }
            _ => {}
        }
        if item.price.lower_bound() < 0.0 {
            return Err(fail("price cannot be negative"));
        }
        if item.discount.is_some_and(|d| d > 100) {
            return Err(fail("discount cannot exceed 100%"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.destinations().len(), 3);
        assert_eq!(catalog.services().len(), 6);
        assert_eq!(catalog.flights().len(), 3);
        assert_eq!(
            catalog.get(CatalogKind::Destinations, "1").unwrap().title,
            "Santorini Paradise"
        );
        assert_eq!(
            catalog.get(CatalogKind::Services, "1").unwrap().title,
            "Corporate Executive Retreat"
        );
    }

    #[test]
    fn test_unknown_item() {
        let catalog = Catalog::builtin().unwrap();
        match catalog.get(CatalogKind::Destinations, "99") {
            Err(TravelError::UnknownItem { id }) => assert_eq!(id, "99"),
            other => panic!("expected UnknownItem, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let content = r#"
[[destinations]]
id = "1"
title = "A"
short_description = "a"
price = 100
duration = { min_days = 1, max_days = 1 }
rating = 4.0

[[destinations]]
id = "1"
title = "B"
short_description = "b"
price = 200
duration = { min_days = 2, max_days = 2 }
rating = 4.1
"#;
        let err = Catalog::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn test_same_id_allowed_across_collections() {
        let content = r#"
[[destinations]]
id = "1"
title = "A"
short_description = "a"
price = 100
duration = { min_days = 1, max_days = 1 }
rating = 4.0

[[services]]
id = "1"
title = "B"
short_description = "b"
price = { from = 100, to = 200 }
duration = { min_days = 2, max_days = 4 }
rating = 4.1
"#;
        assert!(Catalog::from_toml_str(content).is_ok());
    }

    #[test]
    fn test_inverted_duration_rejected() {
        let content = r#"
[[services]]
id = "1"
title = "B"
short_description = "b"
price = 500
duration = { min_days = 9, max_days = 4 }
rating = 4.1
"#;
        assert!(Catalog::from_toml_str(content).is_err());
    }

    fn destination(fields: &str) -> String {
        format!(
            "[[destinations]]\nid = \"1\"\ntitle = \"A\"\nshort_description = \"a\"\nduration = {{ min_days = 1, max_days = 1 }}\n{}\n",
            fields
        )
    }

    fn assert_rejected(content: &str, reason: &str) {
        match Catalog::from_toml_str(content) {
            Err(TravelError::CatalogError { message }) => {
                assert!(message.contains(reason), "unexpected message: {}", message)
            }
            other => panic!("expected CatalogError, got {:?}", other),
        }
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        assert_rejected(&destination("price = 100\nrating = 5.1"), "rating");
        assert_rejected(&destination("price = 100\nrating = -0.1"), "rating");
        assert!(Catalog::from_toml_str(&destination("price = 100\nrating = 5.0")).is_ok());
    }

    #[test]
    fn test_inverted_price_range_rejected() {
        assert_rejected(
            &destination("price = { from = 900, to = 500 }\nrating = 4.0"),
            "'from' exceeds 'to'",
        );
    }

    #[test]
    fn test_discount_over_100_rejected() {
        assert_rejected(
            &destination("price = 100\nrating = 4.0\ndiscount = 101"),
            "discount",
        );
        assert!(
            Catalog::from_toml_str(&destination("price = 100\nrating = 4.0\ndiscount = 100"))
                .is_ok()
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        assert_rejected(&destination("price = -1\nrating = 4.0"), "negative");
    }

    #[test]
    fn test_non_finite_prices_rejected() {
        assert_rejected(&destination("price = nan\nrating = 4.0"), "finite");
        assert_rejected(
            &destination("price = { from = inf, to = inf }\nrating = 4.0"),
            "finite",
        );
        assert_rejected(
            &destination("price = { from = 100, to = nan }\nrating = 4.0"),
            "finite",
        );

        let flight = r#"
[[flights]]
airline = "Airways Z"
from = "Oslo"
to = "Rome"
departure = "08:00"
arrival = "12:00"
duration = "4h"
price = nan
"#;
        assert_rejected(flight, "finite");
    }

    #[test]
    fn test_catalog_kind_from_str() {
        assert_eq!("services".parse::<CatalogKind>().unwrap(), CatalogKind::Services);
        assert_eq!(
            "destination".parse::<CatalogKind>().unwrap(),
            CatalogKind::Destinations
        );
        assert!("hotels".parse::<CatalogKind>().is_err());
    }
}
