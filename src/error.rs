use std::path::PathBuf;
use thiserror::Error;

use crate::geocoder::GeocodeError;

pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Exit status when the input file is missing (and for other fatal errors).
pub const EXIT_INPUT_NOT_FOUND: u8 = 1;
/// Exit status when latitude/longitude columns cannot be detected.
pub const EXIT_COLUMNS_NOT_DETECTED: u8 = 2;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arquivo não encontrado: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Não foi possível detectar colunas de latitude/longitude. Disponíveis: {available:?}")]
    ColumnsNotDetected { available: Vec<String> },

    #[error("Could not decode input as {encoding}: {message}")]
    Decode {
        encoding: &'static str,
        message: String,
    },

    #[error("Geocoding error: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    /// Process exit status reported by the binary for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ProcessingError::ColumnsNotDetected { .. } => EXIT_COLUMNS_NOT_DETECTED,
            _ => EXIT_INPUT_NOT_FOUND,
        }
    }
}
