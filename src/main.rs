mod commands;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use itinerary_core::days::DayCalendar;
use itinerary_core::filter::FilterCriteria;
use itinerary_core::itinerary_config::ItineraryConfig;
use itinerary_core::session::Session;
use itinerary_core::store::FileStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "itinerary")]
#[command(about = "Browse the expo schedule, assign meetings to the team and export calendars")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Only this day (e.g. "monday"), or "all"
    #[arg(short, long)]
    day: Option<String>,

    /// Only this broker (by id), or "all"
    #[arg(short, long)]
    broker: Option<String>,

    /// Only this company (by ticker), or "all"
    #[arg(short, long)]
    company: Option<String>,

    /// Only this team member (by id), "unassigned", or "all"
    #[arg(short, long)]
    team: Option<String>,
}

impl FilterArgs {
    /// Day labels are matched against the configured days so `Monday` selects `monday`.
    fn criteria(&self, days: &DayCalendar) -> FilterCriteria {
        let day = self
            .day
            .as_deref()
            .map(|day| days.resolve(day).unwrap_or(day));

        FilterCriteria::from_args(
            day,
            self.broker.as_deref(),
            self.company.as_deref(),
            self.team.as_deref(),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the schedule grouped by day, in time order
    Timeline {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show one day as a half-hour calendar grid
    Grid {
        /// Day label (e.g. "monday")
        #[arg(short, long)]
        day: String,
    },
    /// List brokers with their meeting counts
    Brokers,
    /// Show one broker's meetings, team and insights
    Broker {
        /// Broker id (e.g. "keybanc")
        id: String,
    },
    /// List team members with their assignment counts
    Team,
    /// Show one team member's assigned meetings
    Member {
        /// Team member id
        id: String,
    },
    /// List companies with meeting counts and note flags
    Companies,
    /// Show one company's profile, meetings and notes
    Company {
        /// Company ticker (e.g. "CARR")
        ticker: String,
    },
    /// Show which brokers meet which companies
    Coverage,
    /// Assign a meeting to a team member
    Assign {
        /// Event id
        event_id: String,

        /// Team member id
        #[arg(required_unless_present = "clear")]
        member: Option<String>,

        /// Remove the current assignment instead
        #[arg(long, conflicts_with = "member")]
        clear: bool,
    },
    /// Set the note kept for a company (an empty note clears it)
    Note {
        /// Company ticker
        ticker: String,

        /// Note text
        text: String,
    },
    /// Show the next meeting after the current local time
    Next,
    /// Export the (filtered) schedule as an iCalendar file
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output path, or "-" for stdout (default: <prefix>[-<day>].ics)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ItineraryConfig::load()?;
    let days = config.day_calendar()?;
    let mut session = open_session(&config).await?;

    match cli.command {
        Commands::Timeline { filters } => commands::timeline::run(&session, &filters.criteria(&days)),
        Commands::Grid { day } => commands::grid::run(&session, &config, &day),
        Commands::Brokers => commands::summary::brokers(&session),
        Commands::Broker { id } => commands::summary::broker(&session, &id),
        Commands::Team => commands::summary::team(&session),
        Commands::Member { id } => commands::summary::member(&session, &id),
        Commands::Companies => commands::companies::list(&session),
        Commands::Company { ticker } => commands::companies::show(&session, &ticker),
        Commands::Coverage => commands::coverage::run(&session),
        Commands::Assign {
            event_id,
            member,
            clear,
        } => {
            let member = if clear { None } else { member };
            commands::assign::run(&mut session, &event_id, member.as_deref())
        }
        Commands::Note { ticker, text } => commands::note::run(&mut session, &ticker, &text),
        Commands::Next => commands::next::run(&session, &config),
        Commands::Export { filters, output } => {
            commands::export::run(&session, &config, &filters.criteria(&days), output.as_deref())
        }
    }
}

/// Logs go to stderr so `export -o -` output stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn open_session(config: &ItineraryConfig) -> Result<Session<FileStore>> {
    let state_dir = config.state_path();
    let mut session = Session::new(FileStore::new(&state_dir), FileStore::new(&state_dir));

    let dataset = config.dataset_path();
    if let Err(e) = session.load(&dataset).await {
        let config_path = ItineraryConfig::config_path()?;
        anyhow::bail!(
            "Could not load the itinerary from {}: {e}\n\n\
            Point `dataset` at your itinerary JSON in:\n  {}",
            dataset.display(),
            config_path.display()
        );
    }

    Ok(session)
}
