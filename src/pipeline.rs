// Read-transform-write pipeline: input document -> reservations -> summary file

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::parser::{DocumentParser, Labels, ParseError};
use crate::reservation::ReservationError;
use crate::summary::{RenderError, ReservationTotals, SummaryInput};

// Fixed locations used by the binary
pub const INPUT_PATH: &str = "input.txt";
pub const OUTPUT_PATH: &str = "ejemplo-out.txt";

// Sample document shipped with the crate
pub const SAMPLE_INPUT_PATH: &str = "samples/input.txt";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Reservation error: {0}")]
    Reservation(#[from] ReservationError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub labels: Labels,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(INPUT_PATH),
            output_path: PathBuf::from(OUTPUT_PATH),
            labels: Labels::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub customer_name: String,
    pub reservations: usize,
    pub totals: ReservationTotals,
}

/// Parses the input document, books its rooms and writes the summary.
/// Nothing is written unless every step succeeds.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let parser = DocumentParser::new(config.labels.clone());
    let mut document = parser.parse_file(&config.input_path)?;

    let reservations = document.reserve_rooms()?;
    info!(reservations, "rooms booked");

    let input = SummaryInput::try_from(&document)?;
    let totals = input.write_file(&config.output_path)?;

    Ok(PipelineReport {
        customer_name: input.customer.name.clone(),
        reservations,
        totals,
    })
}
