//! `slotwise` CLI — query tutor availability from a schedule document.
//!
//! ## Usage
//!
//! ```sh
//! # Bookable slots for a tutor over an explicit range
//! slotwise availability -s schedule.json -t 6f2f3a1e-... --from 2026-08-10 --to 2026-08-16
//!
//! # Same, as JSON
//! slotwise availability -s schedule.json -t 6f2f3a1e-... --from 2026-08-10 --to 2026-08-16 --json
//!
//! # Reproducible output: pretend the current instant is a fixed value
//! slotwise availability -s schedule.json -t 6f2f3a1e-... --from 2026-08-10 --now 2026-08-10T14:30:00
//!
//! # Validate a schedule document
//! slotwise check -s schedule.json
//! ```

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use slotwise_engine::AvailabilitySlot;
use slotwise_service::{AvailabilityService, InMemorySchedule, ScheduleDocument};

#[derive(Parser)]
#[command(name = "slotwise", version, about = "Tutor availability engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute bookable slots for a tutor over a date range
    Availability {
        /// Schedule document (JSON)
        #[arg(short, long)]
        schedule: String,
        /// Tutor id
        #[arg(short, long)]
        tutor: Uuid,
        /// First date of the range, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last date of the range, YYYY-MM-DD (defaults to 30 days after --from)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Maximum allowed range length in days
        #[arg(long, default_value_t = 31)]
        max_days: i64,
        /// IANA timezone used to resolve "today" and "now"
        #[arg(long, default_value = "UTC")]
        timezone: String,
        /// Override the current instant (YYYY-MM-DDTHH:MM:SS) for reproducible output
        #[arg(long)]
        now: Option<NaiveDateTime>,
        /// Emit slots as JSON instead of the table view
        #[arg(long)]
        json: bool,
    },
    /// Validate a schedule document and report the first problem found
    Check {
        /// Schedule document (JSON)
        #[arg(short, long)]
        schedule: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    match Cli::parse().command {
        Commands::Availability {
            schedule,
            tutor,
            from,
            to,
            max_days,
            timezone,
            now,
            json,
        } => {
            let tz: chrono_tz::Tz = timezone
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown timezone: {}", timezone))?;

            let store = load_schedule(&schedule)?;
            let service = AvailabilityService::over(Arc::new(store))
                .with_timezone(tz)
                .with_max_range_days(max_days);

            // Defaults mirror a booking page: start today, look a month ahead.
            let today = now
                .map(|n| n.date())
                .unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());
            let from = from.unwrap_or(today);
            let to = to.unwrap_or(from + Duration::days(30));

            let slots = match now {
                Some(instant) => {
                    service
                        .get_availability_at(tutor, from, to, instant)
                        .await?
                }
                None => service.get_availability(tutor, from, to).await?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                print_table(&slots, from, to);
            }
        }
        Commands::Check { schedule } => {
            let json = read_schedule_file(&schedule)?;
            match serde_json::from_str::<ScheduleDocument>(&json) {
                Ok(document) => {
                    println!(
                        "OK: {} users, {} weekly entries, {} exceptions, {} lessons",
                        document.users.len(),
                        document.weekly.len(),
                        document.exceptions.len(),
                        document.lessons.len()
                    );
                }
                Err(problem) => {
                    eprintln!("Invalid schedule document: {}", problem);
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn read_schedule_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

fn load_schedule(path: &str) -> Result<InMemorySchedule> {
    let json = read_schedule_file(path)?;
    InMemorySchedule::from_json(&json).context("Failed to load schedule document")
}

/// Print slots grouped by date, one line per slot.
fn print_table(slots: &[AvailabilitySlot], from: NaiveDate, to: NaiveDate) {
    if slots.is_empty() {
        println!("No bookable slots between {} and {}.", from, to);
        return;
    }

    let mut current: Option<NaiveDate> = None;
    for slot in slots {
        if current != Some(slot.date) {
            println!("{} ({})", slot.date, slot.date.weekday());
            current = Some(slot.date);
        }
        println!(
            "  {} - {}  ({} min)",
            slot.start.format("%H:%M"),
            slot.end.format("%H:%M"),
            slot.duration_minutes()
        );
    }
}
