//! Job Board - Command Line Interface
//!
//! ## Commands
//!
//! - `list` - Show the aggregated board, optionally filtered
//! - `show` - Show one posting in full
//! - `post` - Submit a new posting (saved locally if the service is down)
//! - `drafts` - List postings saved locally
//! - `watch` - Refresh the board periodically
//! - `init-config` - Write the default client configuration

use anyhow::{Context, Result};
use board_client::{
    init_simple_logging, run_events, tick_refreshes, BoardClient, BoardSession, ClientConfig,
    FilterCriteria, JobCard, JobDetails, JobSubmission, JobType, LocalDraftStore, SubmitError,
    SubmitOutcome, ViewEvent, AVAILABLE_BENEFITS,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Job Board - browse, filter and post job listings
#[derive(Parser, Debug)]
#[command(name = "board")]
#[command(about = "Job board command line client", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the service URL from the configuration
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Match title or company (case-insensitive)
    #[arg(short, long, default_value = "")]
    search: String,

    /// Match location (case-insensitive substring)
    #[arg(long, default_value = "")]
    location: String,

    /// Require at least one of these benefits (repeatable)
    #[arg(short, long = "benefit")]
    benefits: Vec<String>,

    /// Restrict to these job types (repeatable), e.g. "Full-time"
    #[arg(short = 't', long = "job-type")]
    job_types: Vec<JobType>,
}

impl FilterArgs {
    fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            search: self.search,
            location: self.location,
            benefits: self.benefits.into_iter().collect(),
            job_types: self.job_types.into_iter().collect(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the aggregated board
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print postings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one posting in full
    Show {
        /// Posting id as shown by `list`
        id: String,
    },

    /// Submit a new job posting
    Post {
        #[arg(long)]
        title: String,

        #[arg(long)]
        company: String,

        #[arg(long)]
        location: String,

        #[arg(long, allow_hyphen_values = true)]
        salary_min: i64,

        #[arg(long, allow_hyphen_values = true)]
        salary_max: i64,

        /// Full-time, Part-time, Contract or Internship
        #[arg(long, default_value = "Full-time")]
        job_type: JobType,

        /// Description; literal \n sequences become line breaks when shown
        #[arg(long)]
        description: String,

        /// Benefit tag (repeatable)
        #[arg(short, long = "benefit")]
        benefits: Vec<String>,

        /// Emoji or image URL
        #[arg(long)]
        logo: Option<String>,

        /// Owner id of the posting user
        #[arg(long)]
        owner: Option<String>,
    },

    /// List postings saved locally while the service was unreachable
    Drafts,

    /// Refresh the board every interval, as if the view regained focus
    Watch {
        #[command(flatten)]
        filter: FilterArgs,

        /// Seconds between refreshes
        #[arg(short, long, default_value = "30")]
        interval: u64,
    },

    /// Write the default client configuration and exit
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => ClientConfig::default_path()?,
    };

    if let Commands::InitConfig = cli.command {
        ClientConfig::default().save(&config_path)?;
        println!("✅ Generated default configuration at: {}", config_path.display());
        return Ok(());
    }

    let (mut config, _) = ClientConfig::load_or_init(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url).context("Invalid --server-url")?;
    }

    init_simple_logging(cli.log_level.as_deref().unwrap_or(&config.logging.level))?;

    let client = BoardClient::new(&config.server_url, config.request_timeout())?;
    let drafts = LocalDraftStore::new(config.drafts_path());
    let mut session =
        BoardSession::new(client, drafts.clone()).with_offline_drafts(config.offline_drafts);

    match cli.command {
        Commands::List { filter, json } => cmd_list(&mut session, filter, json).await?,
        Commands::Show { id } => cmd_show(&mut session, &id).await?,
        Commands::Post {
            title,
            company,
            location,
            salary_min,
            salary_max,
            job_type,
            description,
            benefits,
            logo,
            owner,
        } => {
            let form = JobSubmission {
                title,
                company,
                location,
                salary_min: Some(salary_min),
                salary_max: Some(salary_max),
                job_type: Some(job_type),
                description,
                benefits,
                company_logo: logo,
                user_id: owner,
            };
            cmd_post(&mut session, form).await?;
        }
        Commands::Drafts => cmd_drafts(&drafts),
        Commands::Watch { filter, interval } => cmd_watch(&mut session, filter, interval).await?,
        Commands::InitConfig => {}
    }

    Ok(())
}

fn print_board(session: &BoardSession<BoardClient>) {
    let view = session.view();
    let now = OffsetDateTime::now_utc();

    if !session.listing().remote_available {
        println!(
            "⚠️  Job board service at {} unreachable, showing local and sample postings\n",
            session.api().server_url()
        );
    }

    println!("📋 {} of {} jobs\n", view.postings.len(), view.total);
    for posting in &view.postings {
        println!("{}\n", JobCard::new(posting, now));
    }

    if view.postings.is_empty() {
        println!("No jobs match the current filters.");
    }
}

async fn cmd_list(
    session: &mut BoardSession<BoardClient>,
    filter: FilterArgs,
    json: bool,
) -> Result<()> {
    session.handle(ViewEvent::Loaded).await;
    session.set_criteria(filter.into_criteria());

    if json {
        let view = session.view();
        println!("{}", serde_json::to_string_pretty(&view.postings)?);
        return Ok(());
    }

    print_board(session);

    let facets = session.view().facets;
    println!("Locations: {}", facets.locations.join(" | "));
    println!("Benefits:  {}", facets.benefits.join(" | "));
    Ok(())
}

async fn cmd_show(session: &mut BoardSession<BoardClient>, id: &str) -> Result<()> {
    session.handle(ViewEvent::Loaded).await;

    match session.find(id) {
        Some(posting) => println!("{}", JobDetails::new(posting)),
        None => anyhow::bail!("No job posting with id '{}' on the board", id),
    }

    Ok(())
}

async fn cmd_post(session: &mut BoardSession<BoardClient>, form: JobSubmission) -> Result<()> {
    for benefit in &form.benefits {
        if !AVAILABLE_BENEFITS.contains(&benefit.as_str()) {
            warn!(benefit = %benefit, "Benefit is not in the standard catalog");
        }
    }

    match session.submit(&form).await {
        Ok(SubmitOutcome::Published(job)) => {
            println!("✅ Job posted successfully");
            println!("   ID: {}", job.id);
            println!("   Board now shows {} jobs", session.listing().len());
        }
        Ok(SubmitOutcome::SavedAsDraft(job)) => {
            println!("⚠️  Service unreachable, job saved as a local draft");
            println!("   ID: {}", job.id);
        }
        Err(SubmitError::Validation {
            error,
            missing_fields,
        }) if !missing_fields.is_empty() => {
            anyhow::bail!("{}: {}", error, missing_fields.join(", "));
        }
        Err(e) => return Err(e).context("Failed to submit job posting"),
    }

    Ok(())
}

fn cmd_drafts(drafts: &LocalDraftStore) {
    let saved = drafts.load();
    if saved.is_empty() {
        println!("No local drafts at {}", drafts.path().display());
        return;
    }

    let now = OffsetDateTime::now_utc();
    println!("📝 {} local drafts\n", saved.len());
    for posting in &saved {
        println!("{}\n", JobCard::new(posting, now));
    }
}

async fn cmd_watch(
    session: &mut BoardSession<BoardClient>,
    filter: FilterArgs,
    interval: u64,
) -> Result<()> {
    session.set_criteria(filter.into_criteria());

    let (tx, rx) = mpsc::channel(1);
    tx.send(ViewEvent::Loaded).await?;

    let ticker = tokio::spawn(tick_refreshes(
        tx,
        Duration::from_secs(interval.max(1)),
        ctrl_c(),
    ));

    run_events(session, rx, print_board).await;
    ticker.await?;

    Ok(())
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C signal"),
        Err(e) => {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
