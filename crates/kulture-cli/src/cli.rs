use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kulture_core::config::BackendKind;
use kulture_core::models::Category;
use std::path::PathBuf;

/// MapMy Kulture - explore India's states through their culture
#[derive(Parser, Debug)]
#[command(name = "kulture")]
#[command(about = "Explore heritage, festivals, food, crafts and schemes of Indian states", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Data backend to use (overrides KULTURE_BACKEND)
    #[arg(long, global = true)]
    pub backend: Option<BackendArg>,

    /// Configuration file (defaults to ./kulture.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fixture file for the static backend (JSON or TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub fixture: Option<PathBuf>,

    /// PostgreSQL database URL (overrides DATABASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Backend selection
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum BackendArg {
    /// Built-in or fixture dataset held in memory
    Static,
    /// PostgreSQL database
    Postgres,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Static => BackendKind::Static,
            BackendArg::Postgres => BackendKind::Postgres,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the states that can be explored
    Regions,

    /// Show the map of a state: centre and plotted sites
    Map(MapArgs),

    /// Show everything known about a state
    Details(DetailsArgs),

    /// List festivals taking place between two dates
    Events(EventsArgs),

    /// Show the responsible tourism guide
    Guide,

    /// Browse interactively, screen by screen
    Browse,

    /// Show the effective configuration and where each value came from
    Config,

    /// Manage the PostgreSQL database
    Db(DbArgs),
}

#[derive(Parser, Debug)]
pub struct MapArgs {
    /// State name (case-insensitive)
    pub state: String,

    /// Print the markers as a GeoJSON FeatureCollection
    #[arg(long)]
    pub geojson: bool,

    /// Write GeoJSON to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE", requires = "geojson")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct DetailsArgs {
    /// State name (case-insensitive)
    pub state: String,

    /// Only show one category
    #[arg(long)]
    pub category: Option<CategoryArg>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CategoryArg {
    Heritage,
    Festival,
    Food,
    Handicraft,
    Scheme,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Heritage => Category::Heritage,
            CategoryArg::Festival => Category::Festival,
            CategoryArg::Food => Category::Food,
            CategoryArg::Handicraft => Category::Handicraft,
            CategoryArg::Scheme => Category::Scheme,
        }
    }
}

#[derive(Parser, Debug)]
pub struct EventsArgs {
    /// First day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,
}

#[derive(Parser, Debug)]
pub struct DbArgs {
    /// Database management command
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Apply pending schema migrations
    Migrate,

    /// Show applied and pending migrations
    Status,

    /// Import the static dataset into the database
    Seed(SeedArgs),
}

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Fixture to import instead of the built-in dataset
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Apply migrations before seeding
    #[arg(long)]
    pub migrate: bool,
}
