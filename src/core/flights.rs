use crate::domain::model::Flight;
use crate::domain::ports::BookingNotifier;
use crate::domain::submission::{FlightBookingRequest, TripType};
use crate::utils::error::{FieldErrors, Result};
use chrono::NaiveDate;

/// 出發地 / 目的地的子字串搜尋，空字串代表不限
#[derive(Debug, Clone, Default)]
pub struct FlightSearch {
    pub from: String,
    pub to: String,
}

impl FlightSearch {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn apply<'a>(&self, flights: &'a [Flight]) -> Vec<&'a Flight> {
        let from = self.from.trim().to_lowercase();
        let to = self.to.trim().to_lowercase();

        flights
            .iter()
            .filter(|f| from.is_empty() || f.from.to_lowercase().contains(&from))
            .filter(|f| to.is_empty() || f.to.to_lowercase().contains(&to))
            .collect()
    }
}

impl FlightBookingRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();

        if self.from.trim().is_empty() {
            errors.add("from", "Origin is required");
        }
        if self.to.trim().is_empty() {
            errors.add("to", "Destination is required");
        }

        let departure = parse_date(&mut errors, "departure_date", &self.departure_date);

        if self.trip_type == TripType::Round {
            match self.return_date.as_deref() {
                Some(value) if !value.trim().is_empty() => {
                    let ret = parse_date(&mut errors, "return_date", value);
                    if let (Some(departure), Some(ret)) = (departure, ret) {
                        if ret < departure {
                            errors.add("return_date", "Return date must be after departure");
                        }
                    }
                }
                _ => errors.add("return_date", "Return date is required for round trips"),
            }
        }

        errors.into_result()
    }

    pub fn message(&self, flight: &Flight) -> String {
        let mut content = format!(
            "New Flight Booking!\nAirline: {}\nFrom: {}\nTo: {}\nDeparture: {}",
            flight.airline,
            self.from.trim(),
            self.to.trim(),
            self.departure_date.trim()
        );
        if self.trip_type == TripType::Round {
            if let Some(ret) = &self.return_date {
                content.push_str(&format!("\nReturn: {}", ret.trim()));
            }
        }
        content.push_str(&format!("\nPrice: {}", flight.display_price()));
        content
    }
}

fn parse_date(errors: &mut FieldErrors, field: &str, value: &str) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        errors.add(field, "Date is required");
        return None;
    }
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Please enter a date as YYYY-MM-DD");
            None
        }
    }
}

/// 驗證後透過通知管道送出機票預約
pub async fn book_flight<N: BookingNotifier + ?Sized>(
    notifier: &N,
    flight: &Flight,
    request: &FlightBookingRequest,
) -> Result<()> {
    request.validate()?;
    let content = request.message(flight);

    tracing::info!("✈️ Booking {} from {} to {}", flight.airline, request.from, request.to);
    notifier.notify(&content).await?;
    tracing::info!("✅ Flight booking notification sent");
    Ok(())
}
