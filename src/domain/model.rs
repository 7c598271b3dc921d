use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    #[default]
    Destinations,
    Services,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Destinations => "destinations",
            CatalogKind::Services => "services",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "destinations" | "destination" => Ok(CatalogKind::Destinations),
            "services" | "service" => Ok(CatalogKind::Services),
            other => Err(format!(
                "unknown catalog '{}', expected 'destinations' or 'services'",
                other
            )),
        }
    }
}

/// 價格：單一金額或區間 (服務方案使用區間)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Fixed(f64),
    Range {
        from: f64,
        to: f64,
        #[serde(default = "default_currency")]
        currency: String,
        #[serde(default = "default_period")]
        period: String,
    },
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_period() -> String {
    "per person".to_string()
}

impl Price {
    /// Sort key for price orderings.
    pub fn lower_bound(&self) -> f64 {
        match self {
            Price::Fixed(amount) => *amount,
            Price::Range { from, .. } => *from,
        }
    }

    /// Amount classified by price buckets; ranged prices use the midpoint.
    pub fn reference_amount(&self) -> f64 {
        match self {
            Price::Fixed(amount) => *amount,
            Price::Range { from, to, .. } => (from + to) / 2.0,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Fixed(amount) => write!(f, "${}", amount),
            Price::Range {
                from,
                to,
                currency,
                period,
            } => write!(f, "{}{} - {}{} {}", currency, from, currency, to, period),
        }
    }
}

/// 行程天數區間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_days: u32,
    pub max_days: u32,
}

impl DurationRange {
    pub fn days(days: u32) -> Self {
        Self {
            min_days: days,
            max_days: days,
        }
    }

    pub fn between(min_days: u32, max_days: u32) -> Self {
        Self { min_days, max_days }
    }
}

impl fmt::Display for DurationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_days == self.max_days {
            write!(f, "{} days", self.min_days)
        } else {
            write!(f, "{}-{} days", self.min_days, self.max_days)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Challenging => "Challenging",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Moderate" => Ok(Difficulty::Moderate),
            "Challenging" => Ok(Difficulty::Challenging),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSize {
    pub min: u32,
    pub max: u32,
}

/// 目的地或服務方案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub short_description: String,
    #[serde(default)]
    pub full_description: Option<String>,
    pub price: Price,
    pub duration: DurationRange,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub discount: Option<u8>,
    #[serde(default)]
    pub group_size: Option<GroupSize>,
    #[serde(default)]
    pub best_time: Option<String>,
    #[serde(default)]
    pub itinerary: Vec<String>,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub airline: String,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Flight {
    pub fn display_price(&self) -> String {
        format!("{}{}", self.currency, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bounds() {
        let fixed = Price::Fixed(1299.0);
        assert_eq!(fixed.lower_bound(), 1299.0);
        assert_eq!(fixed.reference_amount(), 1299.0);

        let range = Price::Range {
            from: 800.0,
            to: 2000.0,
            currency: "$".to_string(),
            period: "per person".to_string(),
        };
        assert_eq!(range.lower_bound(), 800.0);
        assert_eq!(range.reference_amount(), 1400.0);
        assert_eq!(range.to_string(), "$800 - $2000 per person");
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(DurationRange::days(7).to_string(), "7 days");
        assert_eq!(DurationRange::between(3, 7).to_string(), "3-7 days");
    }

    #[test]
    fn test_item_deserializes_from_toml() {
        let toml_content = r#"
id = "4"
title = "Extreme Adventure Quest"
short_description = "Adrenaline-packed adventures."
price = { from = 1200, to = 3500 }
duration = { min_days = 5, max_days = 12 }
category = "Adventure Travel"
tags = ["Adventure", "Outdoor"]
difficulty = "Challenging"
rating = 4.7
"#;
        let item: CatalogItem = toml::from_str(toml_content).unwrap();

        assert_eq!(item.price.lower_bound(), 1200.0);
        assert_eq!(item.difficulty, Some(Difficulty::Challenging));
        assert_eq!(item.duration, DurationRange::between(5, 12));
        assert!(!item.popular);
        assert!(item.discount.is_none());
    }
}
