use crate::core::filter::{Dimension, FilterSchema};
use crate::domain::model::CatalogItem;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Popular,
    PriceLow,
    PriceHigh,
    Rating,
    Duration,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Duration => "duration",
        }
    }

    pub fn compare(&self, a: &CatalogItem, b: &CatalogItem) -> Ordering {
        match self {
            SortKey::Popular => b
                .popular
                .cmp(&a.popular)
                .then_with(|| b.rating.total_cmp(&a.rating)),
            SortKey::PriceLow => a.price.lower_bound().total_cmp(&b.price.lower_bound()),
            SortKey::PriceHigh => b.price.lower_bound().total_cmp(&a.price.lower_bound()),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Duration => a.duration.min_days.cmp(&b.duration.min_days),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "popular" => Ok(SortKey::Popular),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            "duration" => Ok(SortKey::Duration),
            other => Err(format!(
                "unknown sort key '{}', expected popular, price-low, price-high, rating or duration",
                other
            )),
        }
    }
}

/// 搜尋字串、各維度選擇與排序方式
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    query: String,
    #[serde(default)]
    selections: BTreeMap<Dimension, String>,
    #[serde(default)]
    sort: SortKey,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.query = query.into();
        self
    }

    pub fn set_sort(&mut self, sort: SortKey) -> &mut Self {
        self.sort = sort;
        self
    }

    /// Selects `label` for `dimension`, checked against the page schema.
    /// Empty or "All ..." labels clear the dimension.
    pub fn select(&mut self, schema: &FilterSchema, dimension: Dimension, label: &str) -> Result<&mut Self> {
        match schema.resolve(dimension, label)? {
            Some(_) => {
                self.selections.insert(dimension, label.to_string());
            }
            None => {
                self.selections.remove(&dimension);
            }
        }
        Ok(self)
    }

    pub fn selection(&self, dimension: Dimension) -> Option<&str> {
        self.selections.get(&dimension).map(String::as_str)
    }

    pub fn active_filters(&self) -> impl Iterator<Item = (Dimension, &str)> {
        self.selections.iter().map(|(d, label)| (*d, label.as_str()))
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query.is_empty() || !self.selections.is_empty()
    }

    /// Resets query, every predicate and the sort key.
    pub fn clear_all(&mut self) {
        self.query.clear();
        self.selections.clear();
        self.sort = SortKey::Popular;
    }
}

/// 把篩選狀態套用到一個列表頁的項目
#[derive(Debug, Clone, Copy)]
pub struct CatalogView<'s> {
    schema: &'s FilterSchema,
}

impl<'s> CatalogView<'s> {
    pub fn new(schema: &'s FilterSchema) -> Self {
        Self { schema }
    }

    pub fn apply<'a>(&self, items: &'a [CatalogItem], state: &FilterState) -> Vec<&'a CatalogItem> {
        // 搜尋字串不去除空白，前後空白也參與比對
        let needle = state.query.to_lowercase();

        let mut predicates = Vec::with_capacity(state.selections.len());
        for (dimension, label) in &state.selections {
            match self.schema.resolve(*dimension, label) {
                Ok(Some(option)) => predicates.push((*dimension, option)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Ignoring filter on {} page: {}", self.schema.name, e);
                }
            }
        }

        let mut matched: Vec<&CatalogItem> = items
            .iter()
            .filter(|item| self.schema.matches_query(item, &needle))
            .filter(|item| {
                predicates
                    .iter()
                    .all(|(dimension, option)| option.matches(*dimension, item))
            })
            .collect();

        // sort_by 是穩定排序，同分保持原順序
        matched.sort_by(|a, b| state.sort.compare(a, b));

        tracing::debug!(
            "{}: {} of {} items match (query='{}', filters={}, sort={})",
            self.schema.name,
            matched.len(),
            items.len(),
            needle,
            predicates.len(),
            state.sort
        );
        matched
    }
}
