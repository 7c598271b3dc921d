use crate::core::catalog::{Catalog, CatalogKind};
use crate::domain::model::CatalogItem;
use crate::domain::ports::RecordStore;
use crate::domain::submission::{BookingConfirmation, BookingForm, BookingRecord, Submission};
use crate::utils::error::{FieldErrors, Result, TravelError};
use crate::utils::validation::{check_email, check_min_length, check_phone};
use chrono::NaiveDate;
use std::sync::Arc;

pub const DEFAULT_MAX_PARTY_SIZE: u32 = 10;

/// 從連結的查詢參數 (`serviceId` / `destinationId`) 預先選好的項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPrefill {
    pub kind: CatalogKind,
    pub item_id: String,
}

impl BookingPrefill {
    /// Parses a query string such as `destinationId=2`. A leading `?` is allowed.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut prefill = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let kind = match key.as_ref() {
                "destinationId" => CatalogKind::Destinations,
                "serviceId" => CatalogKind::Services,
                _ => continue,
            };
            if value.is_empty() {
                continue;
            }
            // destinationId 優先
            if prefill.is_none() || kind == CatalogKind::Destinations {
                prefill = Some(Self {
                    kind,
                    item_id: value.into_owned(),
                });
            }
        }
        prefill
    }

    pub fn from_url(link: &str) -> Result<Option<Self>> {
        let url = url::Url::parse(link).map_err(|e| TravelError::InvalidConfigValueError {
            field: "booking_link".to_string(),
            value: link.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        Ok(url.query().and_then(Self::from_query))
    }
}

/// 預約表單：驗證、計算總價，寫入注入的後端
pub struct BookingService<S: RecordStore> {
    store: S,
    catalog: Arc<Catalog>,
    table: String,
    max_party_size: u32,
    today: Option<NaiveDate>,
}

impl<S: RecordStore> BookingService<S> {
    pub fn new(store: S, catalog: Arc<Catalog>) -> Self {
        Self {
            store,
            catalog,
            table: BookingRecord::TABLE.to_string(),
            max_party_size: DEFAULT_MAX_PARTY_SIZE,
            today: None,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_max_party_size(mut self, max_party_size: u32) -> Self {
        self.max_party_size = max_party_size;
        self
    }

    /// Pins "today" for the past-date check.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Empty form with the linked item pre-selected; the item must exist.
    pub fn prefill(&self, prefill: &BookingPrefill) -> Result<BookingForm> {
        let item = self.catalog.get(prefill.kind, &prefill.item_id)?;
        Ok(BookingForm {
            catalog: prefill.kind,
            selected_item: item.id.clone(),
            number_of_people: "2".to_string(),
            ..BookingForm::default()
        })
    }

    /// Total shown next to the form: base price times party size, 0 when incomplete.
    pub fn quote(&self, form: &BookingForm) -> f64 {
        let people: u32 = form.number_of_people.trim().parse().unwrap_or(0);
        self.catalog
            .find(form.catalog, &form.selected_item)
            .map(|item| total_price(item, people))
            .unwrap_or(0.0)
    }

    pub fn validate(&self, form: &BookingForm) -> Result<BookingRecord> {
        let mut errors = FieldErrors::new();

        check_min_length(&mut errors, "name", "Name", &form.name, 2);
        check_email(&mut errors, "email", &form.email);
        check_phone(&mut errors, "phone", &form.phone);

        let item = if form.selected_item.trim().is_empty() {
            errors.add("selected_item", "Please choose a destination");
            None
        } else {
            let found = self.catalog.find(form.catalog, form.selected_item.trim());
            if found.is_none() {
                errors.add("selected_item", "Selected trip is not available");
            }
            found
        };

        let date = match NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d") {
            Ok(date) if date < self.today() => {
                errors.add("date", "Travel date cannot be in the past");
                None
            }
            Ok(date) => Some(date),
            Err(_) if form.date.trim().is_empty() => {
                errors.add("date", "Travel date is required");
                None
            }
            Err(_) => {
                errors.add("date", "Please enter a date as YYYY-MM-DD");
                None
            }
        };

        let people = match form.number_of_people.trim().parse::<u32>() {
            Ok(n) if (1..=self.max_party_size).contains(&n) => Some(n),
            _ => {
                errors.add(
                    "number_of_people",
                    format!("Number of people must be between 1 and {}", self.max_party_size),
                );
                None
            }
        };

        match (item, date, people) {
            (Some(item), Some(date), Some(people)) if errors.is_empty() => Ok(BookingRecord {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                phone: form.phone.trim().to_string(),
                selected_tour: item.id.clone(),
                date,
                number_of_people: people,
                special_requests: form.special_requests.trim().to_string(),
                total_price: total_price(item, people),
            }),
            _ => Err(TravelError::Validation(errors)),
        }
    }

    pub async fn submit(&self, form: &BookingForm) -> Result<BookingConfirmation> {
        let record = self.validate(form)?;
        let item_title = self.catalog.get(form.catalog, &record.selected_tour)?.title.clone();

        tracing::info!(
            "📨 Submitting booking for '{}' ({} people, total {})",
            item_title,
            record.number_of_people,
            record.total_price
        );

        let payload = serde_json::to_value(&record)?;
        if let Err(e) = self.store.insert(&self.table, payload).await {
            tracing::error!("❌ Booking submission failed: {}", e);
            return Err(e);
        }

        tracing::info!("✅ Booking stored in '{}'", self.table);
        Ok(BookingConfirmation { record, item_title })
    }
}

fn total_price(item: &CatalogItem, people: u32) -> f64 {
    item.price.lower_bound() * f64::from(people)
}
