// Main library file for the hotel reservation summary

// Domain model, parser and renderer, leaf-first
pub mod room;
pub mod reservation;
pub mod parser;
pub mod summary;
pub mod pipeline;

// Re-export key types for convenience
pub use parser::{DocumentParser, Labels, ParseError, ParsedDocument};
pub use pipeline::{run, PipelineConfig, PipelineError, PipelineReport};
pub use reservation::{Customer, Reservation, ReservationError};
pub use room::{combined_price, rooms_equal, Availability, Room, RoomCatalog, RoomKind, RoomType};
pub use summary::{RenderError, ReservationTotals, SummaryInput};
