use crate::core::catalog::CatalogKind;
use crate::core::engine::{FilterState, SortKey};
use crate::core::filter::{Dimension, FilterSchema};
use crate::domain::model::CatalogItem;
use crate::domain::submission::TripType;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "travelco")]
#[command(about = "Browse the TravelCo catalog, submit bookings and talk to the assistant")]
pub struct Cli {
    /// Path to travelco.toml
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter and sort a catalog page
    Search(SearchArgs),
    /// Search sample flights and optionally book one
    Flights(FlightArgs),
    /// Submit a booking request
    Book(BookArgs),
    /// Send a contact message
    Contact(ContactArgs),
    /// Ask the travel assistant
    Chat(ChatArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchTarget {
    Destinations,
    Services,
    FlightDestinations,
}

impl SearchTarget {
    pub fn kind(&self) -> CatalogKind {
        match self {
            SearchTarget::Services => CatalogKind::Services,
            SearchTarget::Destinations | SearchTarget::FlightDestinations => {
                CatalogKind::Destinations
            }
        }
    }

    pub fn schema(&self) -> FilterSchema {
        match self {
            SearchTarget::Destinations => FilterSchema::destinations(),
            SearchTarget::Services => FilterSchema::services(),
            SearchTarget::FlightDestinations => FilterSchema::flight_destinations(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(value_enum)]
    pub target: SearchTarget,

    #[arg(long, default_value = "")]
    pub query: String,

    /// Repeatable, e.g. --filter "priceRange=Under \$1000"
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(Dimension, String)>,

    #[arg(long, default_value = "popular")]
    pub sort: SortKey,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl SearchArgs {
    /// Unknown labels are rejected here rather than silently ignored.
    pub fn filter_state(&self, schema: &FilterSchema) -> Result<FilterState> {
        let mut state = FilterState::new();
        state.set_query(self.query.clone()).set_sort(self.sort);
        for (dimension, label) in &self.filters {
            state.select(schema, *dimension, label)?;
        }
        Ok(state)
    }
}

#[derive(Debug, Args)]
pub struct FlightArgs {
    #[arg(long, default_value = "")]
    pub from: String,

    #[arg(long, default_value = "")]
    pub to: String,

    /// Book the n-th result (1-based) and send the notification
    #[arg(long)]
    pub book: Option<usize>,

    #[arg(long, value_enum, default_value_t = CliTripType::OneWay)]
    pub trip: CliTripType,

    #[arg(long)]
    pub departure: Option<String>,

    #[arg(long = "return")]
    pub return_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliTripType {
    OneWay,
    Round,
}

impl From<CliTripType> for TripType {
    fn from(value: CliTripType) -> Self {
        match value {
            CliTripType::OneWay => TripType::OneWay,
            CliTripType::Round => TripType::Round,
        }
    }
}

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Booking link or query string carrying serviceId / destinationId
    #[arg(long)]
    pub link: Option<String>,

    #[arg(long, default_value = "destinations")]
    pub catalog: CatalogKind,

    #[arg(long, default_value = "")]
    pub item: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub date: String,

    #[arg(long, default_value = "1")]
    pub people: String,

    #[arg(long, default_value = "")]
    pub requests: String,

    /// Keep the record in memory instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub message: String,

    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ChatArgs {
    /// One message; without it lines are read from stdin
    pub message: Option<String>,
}

fn parse_filter(raw: &str) -> std::result::Result<(Dimension, String), String> {
    let (key, label) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=label, got '{}'", raw))?;
    let dimension = key.trim().parse::<Dimension>()?;
    Ok((dimension, label.trim().to_string()))
}

#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    id: &'a str,
    title: &'a str,
    price: String,
    duration: String,
    rating: f64,
    popular: bool,
}

impl<'a> From<&'a CatalogItem> for ItemRow<'a> {
    fn from(item: &'a CatalogItem) -> Self {
        Self {
            id: &item.id,
            title: &item.title,
            price: item.price.to_string(),
            duration: item.duration.to_string(),
            rating: item.rating,
            popular: item.popular,
        }
    }
}

/// 將篩選結果輸出為表格、JSON 或 CSV
pub fn render_items(items: &[&CatalogItem], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for item in items {
                writer.serialize(ItemRow::from(*item))?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        OutputFormat::Table => {
            let mut out = String::new();
            for item in items {
                let row = ItemRow::from(*item);
                out.push_str(&format!(
                    "{:>3}  {:<32} {:<28} {:<10} ★{:.1}{}\n",
                    row.id,
                    row.title,
                    row.price,
                    row.duration,
                    row.rating,
                    if row.popular { "  popular" } else { "" }
                ));
            }
            out.push_str(&format!("{} result(s)\n", items.len()));
            Ok(out)
        }
    }
}
