use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;
use travelco::core::flights::{book_flight, FlightSearch};
use travelco::domain::submission::{FlightBookingRequest, TripType};
use travelco::utils::validation::Validate;
use travelco::AppConfig;

#[test]
fn test_custom_catalog_and_chat_rules_from_file() -> anyhow::Result<()> {
    let mut catalog_file = NamedTempFile::new()?;
    catalog_file
        .write_all(
            br#"
[[destinations]]
id = "10"
title = "Lisbon Weekend"
short_description = "Trams and tiles."
price = 650
duration = { min_days = 3, max_days = 3 }
rating = 4.4
"#,
        )?;

    let mut config_file = NamedTempFile::new()?;
    write!(
        config_file,
        r#"
[catalog]
path = "{}"

[chat]
fallback = "Ask me about Lisbon!"

[[chat.rules]]
keywords = ["tram"]
responses = ["Tram 28 runs all day."]
"#,
        catalog_file.path().display()
    )?;

    let config = AppConfig::from_file(config_file.path())?;
    config.validate()?;

    let catalog = config.load_catalog()?;
    assert_eq!(catalog.destinations().len(), 1);
    assert!(catalog.services().is_empty());

    let responder = config.responder();
    let mut rng = rand::thread_rng();
    assert_eq!(responder.reply("Which TRAM?", &mut rng), Some("Tram 28 runs all day."));
    assert_eq!(responder.reply("hello", &mut rng), Some("Ask me about Lisbon!"));
    assert_eq!(responder.reply("   ", &mut rng), None);
    Ok(())
}

#[tokio::test]
async fn test_flight_booking_through_configured_webhook() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/hooks/flights")
            .body_contains("Airline: Airways C");
        then.status(204);
    });

    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        "[notifications]\nflight_webhook_url = \"{}\"\n",
        server.url("/hooks/flights")
    )
    .unwrap();

    let config = AppConfig::from_file(config_file.path()).unwrap();
    let catalog = config.load_catalog().unwrap();
    let results = FlightSearch::new("los angeles", "tokyo").apply(catalog.flights());
    assert_eq!(results.len(), 1);

    let request = FlightBookingRequest {
        trip_type: TripType::OneWay,
        from: "Los Angeles".to_string(),
        to: "Tokyo".to_string(),
        departure_date: "2026-12-20".to_string(),
        return_date: None,
    };
    book_flight(&config.flight_notifier().unwrap(), results[0], &request)
        .await
        .unwrap();
    mock.assert();
}
