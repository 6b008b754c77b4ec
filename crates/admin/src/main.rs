use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use school_admin::{
    import::{ImportDocument, ImportLoader, ImportValidator, loader::preview_standings},
    report::format_standings,
};
use school_storage::{
    Database,
    dto::points::AwardPointsRequest,
    models::{AcademicYear, PointCategory},
    repository::{
        house::HouseRepository, leaderboard::LeaderboardRepository, points::PointsRepository,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use validator::Validate;

#[derive(Parser)]
#[command(name = "school-admin")]
#[command(about = "House points and school site administration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Recorded as the creator of every row this run writes
    #[arg(long, env = "SCHOOL_ADMIN_ACTOR", default_value = "cli")]
    actor: String,

    #[arg(long, env = "ACADEMIC_YEAR_START_MONTH", default_value_t = 4)]
    academic_year_start_month: u32,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print house standings
    Leaderboard {
        /// Academic year such as 2024-2025 (defaults to the current one)
        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        category: Option<PointCategory>,
    },
    /// Award points to a house (negative values deduct)
    Award {
        /// House slug
        #[arg(long)]
        house: String,

        #[arg(long)]
        category: PointCategory,

        #[arg(long, allow_hyphen_values = true)]
        points: i32,

        #[arg(long)]
        event: String,

        /// Event date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        remarks: Option<String>,
    },
    /// Delete a ledger entry
    Revoke { entry_id: Uuid },
    /// Load houses and ledger entries from a JSON file
    Import {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "school_admin={},school_storage={}",
                    log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &cli.command {
        Commands::Leaderboard { year, category } => {
            handle_leaderboard(&cli, year.as_deref(), *category).await?;
        }
        Commands::Award {
            house,
            category,
            points,
            event,
            date,
            remarks,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            handle_award(&cli, house, *category, *points, event, date, remarks.clone()).await?;
        }
        Commands::Revoke { entry_id } => {
            handle_revoke(&cli, *entry_id).await?;
        }
        Commands::Import {
            file,
            validate_only,
        } => {
            handle_import(&cli, file, *validate_only).await?;
        }
    }

    Ok(())
}

async fn connect(cli: &Cli) -> anyhow::Result<Database> {
    Database::new(&cli.database_url)
        .await
        .context("Failed to connect to database")
}

async fn handle_leaderboard(
    cli: &Cli,
    year: Option<&str>,
    category: Option<PointCategory>,
) -> anyhow::Result<()> {
    let start_month = cli.academic_year_start_month;
    let academic_year = match year {
        Some(year) => AcademicYear::parse(year, start_month),
        None => AcademicYear::containing(Local::now().date_naive(), start_month),
    }
    .map_err(|e| anyhow!(e))?;

    let db = connect(cli).await?;
    let standings = LeaderboardRepository::new(db.pool())
        .standings(academic_year, category)
        .await?;

    let title = match category {
        Some(category) => format!("Leaderboard {} ({})", academic_year, category),
        None => format!("Leaderboard {}", academic_year),
    };
    print!("{}", format_standings(&title, &standings));

    Ok(())
}

async fn handle_award(
    cli: &Cli,
    house_slug: &str,
    category: PointCategory,
    points: i32,
    event: &str,
    date: NaiveDate,
    remarks: Option<String>,
) -> anyhow::Result<()> {
    let db = connect(cli).await?;
    let house = HouseRepository::new(db.pool())
        .find_by_slug(house_slug)
        .await
        .with_context(|| format!("House '{}' not found", house_slug))?;

    let request = AwardPointsRequest {
        house_id: house.house_id,
        category,
        points,
        event_name: event.to_string(),
        event_date: date,
        remarks,
    };
    request.validate().context("Invalid award")?;

    let entry = PointsRepository::new(db.pool())
        .award(&request, &cli.actor)
        .await?;

    tracing::info!(
        entry_id = %entry.entry_id,
        house = %entry.house.slug,
        points = entry.points,
        actor = %cli.actor,
        "Points awarded"
    );
    println!("{}", entry.entry_id);

    Ok(())
}

async fn handle_revoke(cli: &Cli, entry_id: Uuid) -> anyhow::Result<()> {
    let db = connect(cli).await?;
    let entry = PointsRepository::new(db.pool())
        .revoke(entry_id)
        .await
        .with_context(|| format!("Failed to revoke entry {}", entry_id))?;

    tracing::info!(
        entry_id = %entry.entry_id,
        house_id = %entry.house_id,
        points = entry.points,
        event_name = %entry.event_name,
        awarded_by = %entry.awarded_by,
        actor = %cli.actor,
        "Points revoked"
    );

    Ok(())
}

async fn handle_import(cli: &Cli, file: &Path, validate_only: bool) -> anyhow::Result<()> {
    tracing::info!("Loading import file from: {}", file.display());

    let document = ImportDocument::from_path(file)
        .await
        .with_context(|| format!("Failed to load {}", file.display()))?;

    tracing::info!(
        houses = document.houses.len(),
        entries = document.entries.len(),
        "Loaded import file"
    );

    let db = connect(cli).await?;
    let loader = ImportLoader::new(db.pool());
    let known = loader.known_house_names().await?;

    let report = ImportValidator::validate(&document, &known)?;
    report.log_warnings();

    if validate_only {
        tracing::info!("Validation successful");
        print!(
            "{}",
            format_standings("Points in this file", &preview_standings(&document))
        );
        return Ok(());
    }

    let summary = loader.load(&document, &cli.actor).await?;
    println!(
        "Imported {} new house(s), reused {}, added {} ledger entries",
        summary.houses_created, summary.houses_reused, summary.entries_created
    );

    Ok(())
}
