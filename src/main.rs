use anyhow::Context;
use clap::Parser;
use formation_booking::adapters::{FilledForm, StubBookingGateway};
use formation_booking::config::toml_config::LogFormat;
use formation_booking::config::{Command, OutputFormat};
use formation_booking::core::catalog::{write_listing_csv, write_quote_csv, ListingQuery};
use formation_booking::core::contact::ContactMessageField;
use formation_booking::core::detail::DetailSelection;
use formation_booking::core::pricing::round2;
use formation_booking::domain::model::{Locale, ParticipantCount, PriceSummary, SeminarOffering};
use formation_booking::utils::error::ErrorSeverity;
use formation_booking::utils::{logger, validation::Validate};
use formation_booking::{
    BookingConfig, BookingError, CheckoutSession, CliConfig, ContactForm, Result,
};
use serde::Serialize;

#[derive(Serialize)]
struct QuoteView<'a> {
    offering_id: u32,
    title: &'a str,
    unit_price: u64,
    participants: u32,
    subtotal: u64,
    tax: f64,
    total: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => BookingConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => BookingConfig::default(),
    };

    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose, config.logging.level.as_deref()),
        LogFormat::Json => logger::init_json_logger(config.logging.level.as_deref()),
    }

    tracing::info!("Starting formation-booking");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 4,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: &BookingConfig) -> Result<()> {
    let catalog = config.load_catalog()?;
    let currency = config.site.currency_symbol.as_str();

    match &cli.command {
        Command::List {
            search,
            filter,
            format,
        } => {
            let query = ListingQuery {
                search: search.clone(),
                filter: *filter,
            };
            let found = catalog.search(&query);
            match format {
                OutputFormat::Text => {
                    println!("{} result(s)", found.len());
                    for offering in &found {
                        println!(
                            "  [{}] {} | {} | {} | {}{}",
                            offering.id,
                            offering.title,
                            offering.destination,
                            offering.date_range,
                            offering.unit_price,
                            currency
                        );
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&found)?),
                OutputFormat::Csv => write_listing_csv(&found, std::io::stdout())?,
            }
        }

        Command::Show {
            id,
            participants,
            locale,
        } => {
            let locale = resolve_locale(config, locale.as_deref());
            let mut selection = DetailSelection::open(&catalog, *id)?;
            while selection.participants().get() < *participants && selection.participants().can_increment() {
                selection.increment();
            }
            print_offering(selection.offering(), currency);
            println!();
            println!("Participants: {}", selection.participants());
            println!("Total:        {}{}", selection.total(), currency);
            println!("Continue at:  {}", selection.checkout_path(locale));
        }

        Command::Quote {
            id,
            participants,
            format,
        } => {
            let count = ParticipantCount::from_query(participants.as_deref());
            let summary = catalog.quote(*id, count)?;
            let offering = catalog.get(*id)?;
            match format {
                OutputFormat::Json => {
                    let view = QuoteView {
                        offering_id: offering.id,
                        title: &offering.title,
                        unit_price: summary.unit_price,
                        participants: summary.participants.get(),
                        subtotal: summary.subtotal,
                        tax: round2(summary.tax),
                        total: round2(summary.total),
                    };
                    println!("{}", serde_json::to_string_pretty(&view)?);
                }
                OutputFormat::Csv => write_quote_csv(offering, &summary, std::io::stdout())?,
                OutputFormat::Text => {
                    println!("{} | {}", offering.title, offering.destination);
                    print_summary(&summary, currency);
                }
            }
        }

        Command::Checkout {
            id,
            form,
            participants,
            locale,
        } => {
            let locale = resolve_locale(config, locale.as_deref());
            let filled = FilledForm::from_file(form)?;
            let participants_param = participants
                .clone()
                .unwrap_or_else(|| filled.participants.len().to_string());

            let mut session = CheckoutSession::from_navigation(
                &catalog,
                *id,
                Some(participants_param.as_str()),
                locale,
            )?;
            filled.apply_to(&mut session)?;

            println!("{} | {}", session.offering().title, session.offering().destination);
            print_summary(&session.price_summary(), currency);

            if !session.can_submit() {
                let report = session.report();
                for missing in &report.missing {
                    let fields: Vec<&str> = missing.fields.iter().map(|f| f.as_str()).collect();
                    println!("  missing for {}: {}", missing.record, fields.join(", "));
                }
                if !report.terms_accepted {
                    println!("  terms and conditions not accepted");
                }
            }

            let notice = session.submit(&StubBookingGateway)?;
            println!("Notice: {}", notice.notice_key);
        }

        Command::Contact {
            name,
            email,
            message,
        } => {
            let form = ContactForm::new(config.contact_transport()?, config.success_notice());
            form.update(ContactMessageField::Name, name.as_str()).await;
            form.update(ContactMessageField::Email, email.as_str()).await;
            form.update(ContactMessageField::Message, message.as_str()).await;

            let (tx, rx) = tokio::sync::oneshot::channel();
            let _handle = form
                .submit(move |result| {
                    let _ = tx.send(result);
                })
                .await?;

            let receipt = rx.await.map_err(|_| BookingError::ConfigError {
                message: "contact task ended without reporting".to_string(),
            })??;
            println!("✅ Message sent at {}", receipt.delivered_at.to_rfc3339());
        }
    }

    Ok(())
}

fn resolve_locale(config: &BookingConfig, requested: Option<&str>) -> Locale {
    match requested {
        Some(code) => Locale::resolve(Some(code)),
        None => config.default_locale(),
    }
}

fn print_offering(offering: &SeminarOffering, currency: &str) {
    println!("{}", offering.title);
    println!("{} | {} | {}", offering.destination, offering.date_range, offering.duration_label);
    println!("{}{} per person", offering.unit_price, currency);
    if !offering.description.is_empty() {
        println!();
        println!("{}", offering.description);
    }
    if !offering.program.is_empty() {
        println!();
        println!("Program:");
        for line in &offering.program {
            println!("  - {}", line);
        }
    }
    if !offering.included.is_empty() {
        println!();
        println!("Included:");
        for line in &offering.included {
            println!("  - {}", line);
        }
    }
}

fn print_summary(summary: &PriceSummary, currency: &str) {
    println!("  Price per person: {}{}", summary.unit_price, currency);
    println!("  Participants:     x {}", summary.participants);
    println!("  Subtotal:         {}{}", summary.subtotal, currency);
    println!("  Tax (20%):        {}{}", summary.tax_display(), currency);
    println!("  Total:            {}{}", summary.total_display(), currency);
}
