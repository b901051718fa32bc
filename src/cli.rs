use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use windy_pinwheel::Query;

#[derive(Debug, Parser)]
#[command(name = "windy-pinwheel", version)]
#[command(about = "Wind readings for any place and date, spun into a pinwheel")]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, env = "WINDY_CONFIG")]
    pub config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the wind reading for a place and date
    Wind {
        #[command(flatten)]
        place: PlaceArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Spin a pinwheel in the terminal
    Spin {
        #[command(flatten)]
        place: PlaceArgs,
        /// Stop after this many seconds (runs until Ctrl-C otherwise)
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Serve the wind endpoint over HTTP
    Serve {
        #[arg(short, long, default_value_t = 8080, env = "WINDY_PORT")]
        port: u16,
    },
}

#[derive(Debug, Args)]
pub struct PlaceArgs {
    /// Latitude in decimal degrees (defaults to London)
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,
    /// Longitude in decimal degrees (defaults to London)
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,
    /// Day of the reading, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl PlaceArgs {
    /// Query for these arguments, filling gaps from `today` and the default place
    pub fn to_query(&self, today: NaiveDate) -> Query {
        let query = Query::default_for(self.date.unwrap_or(today));
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => query.with_location(lat, lon),
            _ => query,
        }
    }
}
