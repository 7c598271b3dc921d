use clap::Parser;
use std::io::BufRead;
use std::sync::Arc;
use travelco::config::cli::{
    render_items, BookArgs, ChatArgs, Cli, Command, ContactArgs, FlightArgs, SearchArgs,
};
use travelco::core::booking::{BookingPrefill, BookingService};
use travelco::core::contact::ContactService;
use travelco::core::engine::CatalogView;
use travelco::core::flights::{book_flight, FlightSearch};
use travelco::core::responder::GREETING;
use travelco::domain::ports::RecordStore;
use travelco::domain::submission::{BookingForm, ContactForm, FlightBookingRequest};
use travelco::utils::error::{ErrorSeverity, Result, TravelError};
use travelco::utils::{logger, validation::Validate};
use travelco::{AppConfig, Catalog, MemoryRecordStore};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(if cli.verbose { Some("debug") } else { config.log_level() });
    } else {
        logger::init_cli_logger(cli.verbose || config.log_level() == Some("debug"));
    }

    tracing::info!("Starting travelco CLI");
    tracing::debug!("Config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // 輸入錯誤
            ErrorSeverity::Medium => 2,   // 後端錯誤，可重試
            ErrorSeverity::High => 1,     // 設定錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let catalog = Arc::new(config.load_catalog()?);
    tracing::debug!(
        "Catalog loaded: {} destinations, {} services, {} flights",
        catalog.destinations().len(),
        catalog.services().len(),
        catalog.flights().len()
    );

    match command {
        Command::Search(args) => search(&catalog, &args),
        Command::Flights(args) => flights(&catalog, config, &args).await,
        Command::Book(args) => {
            if args.dry_run {
                book(catalog, config, MemoryRecordStore::new(), &args).await
            } else {
                book(catalog, config, config.record_store()?, &args).await
            }
        }
        Command::Contact(args) => {
            if args.dry_run {
                contact(config, MemoryRecordStore::new(), &args).await
            } else {
                contact(config, config.record_store()?, &args).await
            }
        }
        Command::Chat(args) => chat(config, &args),
    }
}

fn search(catalog: &Catalog, args: &SearchArgs) -> Result<()> {
    let schema = args.target.schema();
    let state = args.filter_state(&schema)?;

    let items = CatalogView::new(&schema).apply(catalog.items(args.target.kind()), &state);
    tracing::info!("🔍 {} matching {} item(s)", schema.name, items.len());

    print!("{}", render_items(&items, args.format)?);
    if items.is_empty() && state.has_active_filters() {
        println!("No results. Try clearing some filters.");
    }
    Ok(())
}

async fn flights(catalog: &Catalog, config: &AppConfig, args: &FlightArgs) -> Result<()> {
    let results = FlightSearch::new(args.from.clone(), args.to.clone()).apply(catalog.flights());
    for (index, flight) in results.iter().enumerate() {
        println!(
            "{:>2}. {:<12} {} → {}  {} - {} ({})  {}",
            index + 1,
            flight.airline,
            flight.from,
            flight.to,
            flight.departure,
            flight.arrival,
            flight.duration,
            flight.display_price()
        );
    }
    if results.is_empty() {
        println!("No flights match your search.");
    }

    let Some(choice) = args.book else {
        return Ok(());
    };
    let flight = choice
        .checked_sub(1)
        .and_then(|i| results.get(i))
        .ok_or_else(|| TravelError::UnknownItem {
            id: choice.to_string(),
        })?;

    let request = FlightBookingRequest {
        trip_type: args.trip.into(),
        from: args.from.clone(),
        to: args.to.clone(),
        departure_date: args.departure.clone().unwrap_or_default(),
        return_date: args.return_date.clone(),
    };
    let notifier = config.flight_notifier()?;
    book_flight(&notifier, flight, &request).await?;

    println!("✅ Booking successful! We'll contact you soon.");
    Ok(())
}

async fn book<S: RecordStore>(
    catalog: Arc<Catalog>,
    config: &AppConfig,
    store: S,
    args: &BookArgs,
) -> Result<()> {
    let service = BookingService::new(store, catalog)
        .with_table(config.bookings_table())
        .with_max_party_size(config.max_party_size());

    let mut form = match args.link.as_deref() {
        Some(link) => {
            let prefill = if link.contains("://") {
                BookingPrefill::from_url(link)?
            } else {
                BookingPrefill::from_query(link)
            };
            match prefill {
                Some(prefill) => service.prefill(&prefill)?,
                None => BookingForm::default(),
            }
        }
        None => BookingForm::default(),
    };

    form.name = args.name.clone();
    form.email = args.email.clone();
    form.phone = args.phone.clone();
    form.date = args.date.clone();
    form.number_of_people = args.people.clone();
    form.special_requests = args.requests.clone();
    if form.selected_item.is_empty() {
        form.catalog = args.catalog;
        form.selected_item = args.item.clone();
    }

    tracing::debug!("Quoted total: {}", service.quote(&form));
    let confirmation = service.submit(&form).await?;

    println!("✅ Booking request submitted! We'll contact you soon.");
    println!(
        "📋 {} on {} for {} people, total ${}",
        confirmation.item_title,
        confirmation.record.date,
        confirmation.record.number_of_people,
        confirmation.record.total_price
    );
    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&confirmation.record)?);
    }
    Ok(())
}

async fn contact<S: RecordStore>(config: &AppConfig, store: S, args: &ContactArgs) -> Result<()> {
    let form = ContactForm {
        name: args.name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        subject: args.subject.clone(),
        message: args.message.clone(),
    };

    let receipt = ContactService::new(store)
        .with_table(config.contact_table())
        .submit(&form)
        .await?;

    println!("✅ Message sent! We'll get back to you soon.");
    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&receipt.record)?);
    }
    Ok(())
}

fn chat(config: &AppConfig, args: &ChatArgs) -> Result<()> {
    let responder = config.responder();
    let mut rng = rand::thread_rng();

    if let Some(message) = &args.message {
        if let Some(reply) = responder.reply(message, &mut rng) {
            println!("{}", reply);
        }
        return Ok(());
    }

    println!("{}", GREETING);
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if let Some(reply) = responder.reply(&line, &mut rng) {
            println!("{}", reply);
        }
    }
    Ok(())
}
