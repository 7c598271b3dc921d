use crate::domain::model::CatalogKind;
use serde::{Deserialize, Serialize};

/// 可寫入後端資料表的紀錄
pub trait Submission: Serialize + Send + Sync {
    /// Default table name when the configuration does not override it.
    const TABLE: &'static str;
}

/// 預約表單的原始輸入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub catalog: CatalogKind,
    pub selected_item: String,
    pub date: String,
    pub number_of_people: String,
    pub special_requests: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub selected_tour: String,
    pub date: chrono::NaiveDate,
    pub number_of_people: u32,
    pub special_requests: String,
    pub total_price: f64,
}

impl Submission for BookingRecord {
    const TABLE: &'static str = "bookings";
}

/// 成功送出後的摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmation {
    pub record: BookingRecord,
    pub item_title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl Submission for ContactRecord {
    const TABLE: &'static str = "contact_messages";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactReceipt {
    pub record: ContactRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    OneWay,
    Round,
}

/// 機票預約請求，成功後透過通知管道送出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightBookingRequest {
    pub trip_type: TripType,
    pub from: String,
    pub to: String,
    pub departure_date: String,
    pub return_date: Option<String>,
}
