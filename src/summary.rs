// Reservation summary rendering
// Turns a parsed reservation into the confirmation report sent to the guest.

use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::parser::{ParsedDocument, DATE_FORMAT};
use crate::reservation::Customer;
use crate::room::Room;

const SEPARATOR: &str = "----------------------------------------------";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No customer to address the summary to")]
    MissingCustomer,

    #[error("Start date is missing")]
    MissingStartDate,

    #[error("End date is missing")]
    MissingEndDate,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Could not move summary into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

// Aggregates shown in the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationTotals {
    pub nights: i64,
    pub room_count: usize,
    pub capacity: u32,
    pub price: f64,
}

impl ReservationTotals {
    pub fn compute(rooms: &[Room], start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            nights: (end_date - start_date).num_days(),
            room_count: rooms.len(),
            capacity: rooms.iter().map(Room::capacity).sum(),
            price: rooms.iter().map(Room::price).sum(),
        }
    }
}

// Everything the report needs, with presence already checked
pub struct SummaryInput<'a> {
    pub customer: &'a Customer,
    pub rooms: &'a [Room],
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl<'a> TryFrom<&'a ParsedDocument> for SummaryInput<'a> {
    type Error = RenderError;

    fn try_from(document: &'a ParsedDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            customer: document
                .customer
                .as_ref()
                .ok_or(RenderError::MissingCustomer)?,
            rooms: &document.rooms,
            start_date: document.start_date.ok_or(RenderError::MissingStartDate)?,
            end_date: document.end_date.ok_or(RenderError::MissingEndDate)?,
        })
    }
}

impl SummaryInput<'_> {
    pub fn totals(&self) -> ReservationTotals {
        ReservationTotals::compute(self.rooms, self.start_date, self.end_date)
    }

    /// Writes the full report to `out` and returns the totals it printed.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<ReservationTotals, RenderError> {
        let totals = self.totals();

        writeln!(
            out,
            "Hola {}! aqui tienes los detalles de tu reserva:\n",
            self.customer.name
        )?;
        writeln!(out, "Entrada:\t{}", self.start_date.format(DATE_FORMAT))?;
        writeln!(out, "Salida:\t{}\n", self.end_date.format(DATE_FORMAT))?;
        writeln!(
            out,
            "Reservaste\t[{}] noches, [{}] habitaciones, [{}] personas\n",
            totals.nights, totals.room_count, totals.capacity
        )?;

        writeln!(out, "Detalles de reserva")?;
        for room in self.rooms {
            writeln!(out, "[1]\t{}", room.kind().display_name())?;
        }

        writeln!(
            out,
            "\nCorreo electronico de contacto:\t[{}]\n",
            self.customer.email
        )?;

        writeln!(out, "Detalles del precio:")?;
        for room in self.rooms {
            writeln!(
                out,
                "[1]\t{}\t\t\t{:.2}$",
                room.kind().display_name(),
                room.price()
            )?;
        }
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "Total:\t\t\t\t\t\t{:.2}$", totals.price)?;

        Ok(totals)
    }

    pub fn render_to_string(&self) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        self.render(&mut buf)?;
        // Everything written above is valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Renders into a temporary file next to `path` and moves it into place
    /// only once the whole report was written.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<ReservationTotals, RenderError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        let totals = self.render(&mut file)?;
        file.as_file_mut().sync_all()?;
        file.persist(path)?;

        match serde_json::to_string(&totals) {
            Ok(json) => debug!(totals = %json, "summary totals"),
            Err(e) => warn!("could not serialize summary totals: {}", e),
        }
        info!(path = %path.display(), "reservation summary written");
        Ok(totals)
    }
}
