use std::path::Path;
use std::path::PathBuf;

use chrono::SecondsFormat;
use clap::Parser;
use jobdesk_catalog::query::ListingQuery;
use jobdesk_catalog::query::SortKey;
use jobdesk_catalog::source::StaticCatalog;
use jobdesk_interest::factory;
use jobdesk_interest::hub::ChangeHubHandle;
use jobdesk_interest::tracker::ApplyOutcome;
use jobdesk_interest::tracker::InterestTracker;
use jobdesk_interest::tracker::SaveOutcome;
use jobdesk_interest::tracker::WithdrawOutcome;
use jobdesk_interest::types::ListingKind;
use jobdesk_interest::window::WindowStatus;
use jobdesk_interest::window::format_remaining;
use owo_colors::OwoColorize;

use crate::views;
use crate::views::ListScope;
use crate::views::ListingsView;

/// Browse employment-catalog listings and track saved/applied interest.
#[derive(Debug, Parser)]
#[command(name = "jobdesk", about = "Local-first job, training and scholarship desk")]
pub struct JobdeskCli {
    /// Catalog file (one JSON object keyed by kind); built-in demo
    /// listings if omitted.
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Root directory for persisted interest data (defaults to the user's
    /// home directory).
    #[arg(long = "data-dir", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List catalog entries joined with saved/applied state.
    List {
        kind: ListingKind,
        /// Case-insensitive substring filter over title, provider and
        /// description.
        #[arg(long)]
        filter: Option<String>,
        /// Sort criterion: title, provider or newest.
        #[arg(long, default_value = "title")]
        sort: SortKey,
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long = "page-size", default_value_t = jobdesk_catalog::query::DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// Only saved entries.
        #[arg(long)]
        saved: bool,
        /// Only entries with an application on record.
        #[arg(long, conflicts_with = "saved")]
        applied: bool,
    },
    /// Show one entry with its interest state and withdrawal window.
    Show { kind: ListingKind, id: u64 },
    /// Toggle the saved flag on an entry.
    Save { kind: ListingKind, id: u64 },
    /// Clear the saved flag.
    Unsave { kind: ListingKind, id: u64 },
    /// Apply to an entry.
    Apply { kind: ListingKind, id: u64 },
    /// Withdraw an application while the 24-hour window is open.
    Withdraw { kind: ListingKind, id: u64 },
    /// Export the interest map to stdout.
    Export,
    /// Import interest records from stdin (last writer wins per key).
    Import,
    /// Show interest-store statistics.
    Stats,
    /// Migrate a JSON interest map into a SQLite database.
    Migrate {
        /// Path to the source JSON map file
        #[arg(long)]
        json: PathBuf,
        /// Path to the destination SQLite database file
        #[arg(long)]
        sqlite: PathBuf,
    },
}

/// Execute one jobdesk command.
pub fn run(cli: JobdeskCli) -> anyhow::Result<()> {
    if let Command::Migrate { json, sqlite } = &cli.cmd {
        let n = jobdesk_interest::migrate::migrate_json_to_sqlite(json, sqlite)?;
        println!("Migrated {n} records");
        return Ok(());
    }

    let data_dir = resolve_data_dir(cli.data_dir)?;
    tracing::debug!("interest data dir: {}", data_dir.display());
    let store = factory::open_store(&data_dir, None)?;
    let tracker = InterestTracker::new(store, ChangeHubHandle::new());

    match cli.cmd {
        Command::List {
            kind,
            filter,
            sort,
            page,
            page_size,
            saved,
            applied,
        } => {
            let catalog = open_catalog(cli.catalog.as_deref(), kind)?;
            let scope = if saved {
                ListScope::Saved
            } else if applied {
                ListScope::Applied
            } else {
                ListScope::All
            };
            let query = ListingQuery {
                filter,
                sort,
                page,
                page_size,
            };
            let view = ListingsView::new(&catalog, &tracker);
            for row in view.rows(scope, &query)? {
                let mut marks = String::new();
                if row.saved {
                    marks = format!("{marks} {}", "[saved]".yellow());
                }
                if row.applied {
                    marks = format!("{marks} {}", "[applied]".green());
                }
                println!(
                    "{:>6}  {} - {}{marks}",
                    row.listing.id, row.listing.title, row.listing.provider
                );
            }
        }
        Command::Show { kind, id } => {
            let catalog = open_catalog(cli.catalog.as_deref(), kind)?;
            let Some(detail) = views::detail(&catalog, &tracker, id)? else {
                anyhow::bail!("no {kind} with id {id} in the catalog");
            };
            print_detail(kind, &detail);
        }
        Command::Save { kind, id } => match tracker.toggle_saved(kind, id)? {
            SaveOutcome::Saved => println!("Saved {kind} {id}"),
            SaveOutcome::Unsaved => println!("Removed {kind} {id} from saved list"),
        },
        Command::Unsave { kind, id } => {
            tracker.unsave(kind, id)?;
            println!("Removed {kind} {id} from saved list");
        }
        Command::Apply { kind, id } => match tracker.mark_applied(kind, id)? {
            ApplyOutcome::Applied { applied_at_ms } => {
                let ts = format_ts(applied_at_ms);
                println!("Applied to {kind} {id} on {ts}");
            }
            ApplyOutcome::AlreadyApplied { applied_at_ms } => {
                let ts = format_ts(applied_at_ms);
                println!("Already applied to {kind} {id} on {ts}");
            }
        },
        Command::Withdraw { kind, id } => match tracker.withdraw(kind, id)? {
            WithdrawOutcome::Withdrawn => println!("Withdrew application for {kind} {id}"),
            WithdrawOutcome::WindowClosed { applied_at_ms } => {
                let ts = format_ts(applied_at_ms);
                anyhow::bail!("withdrawal window closed for {kind} {id} (applied {ts})");
            }
            WithdrawOutcome::NotApplied => {
                anyhow::bail!("no application on record for {kind} {id}");
            }
        },
        Command::Export => {
            let mut out = std::io::stdout();
            tracker.store().export(&mut out)?;
        }
        Command::Import => {
            let mut input = std::io::stdin();
            let n = tracker.store().import(&mut input)?;
            println!("Imported {n} records");
        }
        Command::Stats => {
            let stats = tracker.store().stats()?;
            println!("{stats}");
        }
        Command::Migrate { .. } => unreachable!(),
    }
    Ok(())
}

fn open_catalog(path: Option<&Path>, kind: ListingKind) -> anyhow::Result<StaticCatalog> {
    match path {
        Some(path) => StaticCatalog::from_file(path, kind),
        None => Ok(StaticCatalog::demo(kind)),
    }
}

fn resolve_data_dir(arg: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = arg {
        return Ok(dir);
    }
    if let Some(home) = std::env::var_os("JOBDESK_HOME") {
        return Ok(PathBuf::from(home));
    }
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home));
    }
    Ok(std::env::current_dir()?)
}

fn print_detail(kind: ListingKind, detail: &views::ListingDetail) {
    let listing = &detail.listing;
    let id = listing.id;
    println!("{} ({kind} {id})", listing.title.bold());
    match &listing.location {
        Some(location) => println!("{} - {location}", listing.provider),
        None => println!("{}", listing.provider),
    }
    if let Some(salary) = &listing.salary {
        println!("{salary}");
    }
    if let Some(employment_type) = &listing.employment_type {
        println!("{employment_type}");
    }
    println!();
    println!("{}", listing.description);
    if let Some(requirements) = &listing.requirements {
        println!("Requirements: {requirements}");
    }
    if let Some(posted_at) = &listing.posted_at {
        println!("Posted: {posted_at}");
    }

    let record = detail.record.unwrap_or_default();
    if record.saved {
        println!("{}", "Saved".yellow());
    }
    match detail.window {
        WindowStatus::NotApplied => {}
        WindowStatus::Open { remaining_ms } => {
            if let Some(applied_at_ms) = record.applied_at_ms {
                let ts = format_ts(applied_at_ms);
                println!("{} {ts}", "Applied".green());
            }
            let remaining = format_remaining(remaining_ms);
            println!("{remaining} remaining to withdraw");
        }
        WindowStatus::Closed => {
            if let Some(applied_at_ms) = record.applied_at_ms {
                let ts = format_ts(applied_at_ms);
                println!("{} {ts}", "Applied".green());
            }
            println!("Withdrawal window closed");
        }
    }
}

fn format_ts(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| format!("{ms} ms"))
}
