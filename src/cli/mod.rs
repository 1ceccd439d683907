pub mod generate;
pub mod parse;
pub mod schema;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wayplan")]
#[command(
    author,
    version,
    about = "Turn a free-form activity list into placed stops and a route"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an itinerary from a structured request file
    Generate(GenerateArgs),

    /// Parse a free-form to-do list into structured tasks
    Parse(ParseArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct GenerateArgs {
    /// Path to config file
    #[arg(short, long, default_value = "wayplan.yaml")]
    pub config: PathBuf,

    /// JSON request file with tasks, origin, mode and transport mode
    #[arg(value_name = "REQUEST")]
    pub request: PathBuf,

    /// Print progress events while generating
    #[arg(long)]
    pub progress: bool,

    /// Also compute the route for the generated stops
    #[arg(long)]
    pub route: bool,
}

#[derive(Parser, Clone)]
pub struct ParseArgs {
    /// Path to config file
    #[arg(short, long, default_value = "wayplan.yaml")]
    pub config: PathBuf,

    /// Free-form to-do list, e.g. "spa, shopping, dinner at Chandni Chowk"
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// City hint for the extractor
    #[arg(long)]
    pub city: Option<String>,

    /// Location hint as "lat,lon"
    #[arg(long)]
    pub location: Option<String>,
}
