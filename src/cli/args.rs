use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::FieldSelection;
use crate::utils::constants::{
    DEFAULT_COUNTRY_CODES, DEFAULT_LOG_INTERVAL_ROWS, DEFAULT_NOMINATIM_URL,
    DEFAULT_SLEEP_SECONDS, DEFAULT_USER_AGENT,
};

#[derive(Parser)]
#[command(name = "cep-filler")]
#[command(about = "Fill CEP and address columns of CSV files via Nominatim (OpenStreetMap)")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Show progress and debug logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reverse-geocode every row's latitude/longitude into CEP and address columns
    Fill {
        #[arg(help = "Input CSV file")]
        input_file: PathBuf,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: <input>_com_enderecos.csv or <input>_com_CEPs.csv]"
        )]
        output_path: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_SLEEP_SECONDS, help = "Pause between lookups")]
        sleep_seconds: f64,

        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        user_agent_string: String,

        #[arg(long, default_value_t = DEFAULT_LOG_INTERVAL_ROWS, help = "Rows between progress lines")]
        log_interval_rows: usize,

        #[arg(long, value_enum, default_value_t = FieldSelection::Full)]
        fields: FieldSelection,

        #[arg(long, default_value = DEFAULT_NOMINATIM_URL)]
        nominatim_url: String,
    },

    /// Look up the coordinates of a single street address
    Geocode {
        #[arg(help = "Free-text address, e.g. \"R. Mal. Hastimphilo de Moura, 27\"")]
        address: String,

        #[arg(long, default_value = DEFAULT_COUNTRY_CODES)]
        country_codes: String,

        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        user_agent_string: String,

        #[arg(long, default_value = DEFAULT_NOMINATIM_URL)]
        nominatim_url: String,
    },
}
