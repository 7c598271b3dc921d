//! Filter dimensions and the fixed bucket tables offered by each listing page.

use crate::core::catalog::CatalogKind;
use crate::domain::model::CatalogItem;
use crate::utils::error::{Result, TravelError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Bound;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    PriceRange,
    Duration,
    Rating,
    Category,
    Difficulty,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::PriceRange => "priceRange",
            Dimension::Duration => "duration",
            Dimension::Rating => "rating",
            Dimension::Category => "category",
            Dimension::Difficulty => "difficulty",
        }
    }

    fn measure<'a>(&self, item: &'a CatalogItem) -> Measure<'a> {
        match self {
            Dimension::PriceRange => Measure::Number(item.price.reference_amount()),
            Dimension::Duration => Measure::Number(f64::from(item.duration.min_days)),
            Dimension::Rating => Measure::Number(item.rating),
            Dimension::Category => Measure::Text(item.category.as_deref()),
            Dimension::Difficulty => Measure::Text(item.difficulty.as_ref().map(|d| d.as_str())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "priceRange" | "price-range" | "price" => Ok(Dimension::PriceRange),
            "duration" => Ok(Dimension::Duration),
            "rating" => Ok(Dimension::Rating),
            "category" => Ok(Dimension::Category),
            "difficulty" => Ok(Dimension::Difficulty),
            other => Err(format!("unknown filter dimension: {}", other)),
        }
    }
}

enum Measure<'a> {
    Number(f64),
    Text(Option<&'a str>),
}

/// 數值區間，上下界可為開、閉或無限
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBand {
    lower: Bound<f64>,
    upper: Bound<f64>,
}

impl NumericBand {
    pub fn below(limit: f64) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Excluded(limit),
        }
    }

    pub fn above(limit: f64) -> Self {
        Self {
            lower: Bound::Excluded(limit),
            upper: Bound::Unbounded,
        }
    }

    pub fn at_least(limit: f64) -> Self {
        Self {
            lower: Bound::Included(limit),
            upper: Bound::Unbounded,
        }
    }

    pub fn inclusive(min: f64, max: f64) -> Self {
        Self {
            lower: Bound::Included(min),
            upper: Bound::Included(max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        let lower_ok = match self.lower {
            Bound::Included(min) => value >= min,
            Bound::Excluded(min) => value > min,
            Bound::Unbounded => true,
        };
        let upper_ok = match self.upper {
            Bound::Included(max) => value <= max,
            Bound::Excluded(max) => value < max,
            Bound::Unbounded => true,
        };
        lower_ok && upper_ok
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    Band(NumericBand),
    Equals(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub label: String,
    pub matcher: Matcher,
}

impl FilterOption {
    pub fn band(label: &str, band: NumericBand) -> Self {
        Self {
            label: label.to_string(),
            matcher: Matcher::Band(band),
        }
    }

    pub fn equals(value: &str) -> Self {
        Self {
            label: value.to_string(),
            matcher: Matcher::Equals(value.to_string()),
        }
    }

    pub fn matches(&self, dimension: Dimension, item: &CatalogItem) -> bool {
        match (&self.matcher, dimension.measure(item)) {
            (Matcher::Band(band), Measure::Number(value)) => band.contains(value),
            (Matcher::Equals(expected), Measure::Text(Some(actual))) => actual == expected,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSpec {
    pub dimension: Dimension,
    /// Label meaning "not constrained" besides the empty string.
    pub any_label: Option<String>,
    pub options: Vec<FilterOption>,
}

impl DimensionSpec {
    fn is_unconstrained(&self, label: &str) -> bool {
        label.is_empty() || self.any_label.as_deref() == Some(label)
    }

    pub fn option(&self, label: &str) -> Option<&FilterOption> {
        self.options.iter().find(|option| option.label == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Title,
    ShortDescription,
    Tags,
}

/// 一個列表頁的篩選設定：可搜尋欄位與各維度選項
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSchema {
    pub name: &'static str,
    pub search_fields: Vec<SearchField>,
    pub dimensions: Vec<DimensionSpec>,
}

impl FilterSchema {
    pub fn destinations() -> Self {
        Self {
            name: "destinations",
            search_fields: vec![SearchField::Title, SearchField::ShortDescription],
            dimensions: vec![
                destination_price_bands(),
                destination_duration_bands(),
                DimensionSpec {
                    dimension: Dimension::Rating,
                    any_label: None,
                    options: vec![
                        FilterOption::band("4.0+", NumericBand::at_least(4.0)),
                        FilterOption::band("4.5+", NumericBand::at_least(4.5)),
                        FilterOption::band("4.8+", NumericBand::at_least(4.8)),
                    ],
                },
            ],
        }
    }

    pub fn services() -> Self {
        Self {
            name: "services",
            search_fields: vec![
                SearchField::Title,
                SearchField::ShortDescription,
                SearchField::Tags,
            ],
            dimensions: vec![
                DimensionSpec {
                    dimension: Dimension::Category,
                    any_label: Some("All Services".to_string()),
                    options: [
                        "Corporate Tours",
                        "Family Packages",
                        "Honeymoon Trips",
                        "Adventure Travel",
                        "Cultural Tours",
                        "Wellness Tours",
                    ]
                    .into_iter()
                    .map(FilterOption::equals)
                    .collect(),
                },
                DimensionSpec {
                    dimension: Dimension::PriceRange,
                    any_label: Some("All Prices".to_string()),
                    options: vec![
                        FilterOption::band("Under $1000", NumericBand::below(1000.0)),
                        FilterOption::band("$1000 - $2000", NumericBand::inclusive(1000.0, 2000.0)),
                        FilterOption::band("$2000 - $3000", NumericBand::inclusive(2000.0, 3000.0)),
                        FilterOption::band("Over $3000", NumericBand::above(3000.0)),
                    ],
                },
                DimensionSpec {
                    dimension: Dimension::Difficulty,
                    any_label: Some("All Levels".to_string()),
                    options: ["Easy", "Moderate", "Challenging"]
                        .into_iter()
                        .map(FilterOption::equals)
                        .collect(),
                },
            ],
        }
    }

    /// Destination picker on the flight booking page.
    pub fn flight_destinations() -> Self {
        Self {
            name: "flight-destinations",
            search_fields: vec![SearchField::Title, SearchField::ShortDescription],
            dimensions: vec![destination_price_bands(), destination_duration_bands()],
        }
    }

    pub fn for_kind(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Destinations => Self::destinations(),
            CatalogKind::Services => Self::services(),
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionSpec> {
        self.dimensions.iter().find(|spec| spec.dimension == dimension)
    }

    /// `Ok(None)` when the label leaves the dimension unconstrained.
    pub fn resolve(&self, dimension: Dimension, label: &str) -> Result<Option<&FilterOption>> {
        let unknown = || TravelError::UnknownFilterOption {
            dimension: dimension.to_string(),
            value: label.to_string(),
        };

        if label.is_empty() {
            return Ok(None);
        }
        let spec = self.dimension(dimension).ok_or_else(unknown)?;
        if spec.is_unconstrained(label) {
            return Ok(None);
        }
        spec.option(label).map(Some).ok_or_else(unknown)
    }

    /// `needle` must already be lowercase.
    pub fn matches_query(&self, item: &CatalogItem, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.search_fields.iter().any(|field| match field {
            SearchField::Title => item.title.to_lowercase().contains(needle),
            SearchField::ShortDescription => {
                item.short_description.to_lowercase().contains(needle)
            }
            SearchField::Tags => item
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle)),
        })
    }
}

fn destination_price_bands() -> DimensionSpec {
    DimensionSpec {
        dimension: Dimension::PriceRange,
        any_label: None,
        options: vec![
            FilterOption::band("Under $1000", NumericBand::below(1000.0)),
            FilterOption::band("$1000-$1500", NumericBand::inclusive(1000.0, 1500.0)),
            FilterOption::band("$1500-$2000", NumericBand::inclusive(1500.0, 2000.0)),
            FilterOption::band("Over $2000", NumericBand::above(2000.0)),
        ],
    }
}

fn destination_duration_bands() -> DimensionSpec {
    DimensionSpec {
        dimension: Dimension::Duration,
        any_label: None,
        options: vec![
            FilterOption::band("5-7 days", NumericBand::inclusive(5.0, 7.0)),
            FilterOption::band("8-10 days", NumericBand::inclusive(8.0, 10.0)),
            FilterOption::band("10+ days", NumericBand::above(10.0)),
        ],
    }
}
