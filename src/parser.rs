// Reservation document parser
// Scans a loosely structured text document line by line and picks up the
// labeled fields it recognizes. Field order matters: see `ParseState`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{Duration, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::reservation::{Customer, Reservation, ReservationError};
use crate::room::{Room, RoomCatalog, RoomType};

/// Date format used both in input documents and in the summary.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// Error types for document parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: customer name label is not followed by a name")]
    MissingNameValue { line: usize },

    #[error("Line {line}: email found before any customer name")]
    EmailBeforeName { line: usize },

    #[error("Line {line}: invalid number of nights '{value}'")]
    InvalidNightCount { line: usize, value: String },

    #[error("Line {line}: invalid date '{value}', expected DD-MM-YYYY")]
    InvalidDate { line: usize, value: String },

    #[error("Line {line}: {nights} nights from {start} is outside the supported date range")]
    DateOverflow {
        line: usize,
        start: NaiveDate,
        nights: i64,
    },
}

// Phrases recognized for each kind of line. Each entry is a list of
// alternatives; the customer name phrases are matched case-sensitively, the
// rest after lowercasing the line, so they must be lowercase themselves.
#[derive(Debug, Clone)]
pub struct Labels {
    pub customer_name: Vec<String>,
    pub email: Vec<String>,
    pub single_room: Vec<String>,
    pub double_room: Vec<String>,
    pub suite: Vec<String>,
    pub nights: Vec<String>,
    pub start_date: Vec<String>,
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

impl Labels {
    pub fn english() -> Self {
        Self {
            customer_name: phrases(&["Customer name"]),
            email: phrases(&["email"]),
            single_room: phrases(&["single room"]),
            double_room: phrases(&["double room"]),
            suite: phrases(&["suite"]),
            nights: phrases(&["number of nights"]),
            start_date: phrases(&["start date"]),
        }
    }

    pub fn spanish() -> Self {
        Self {
            customer_name: phrases(&["Nombre del cliente"]),
            email: phrases(&["correo"]),
            single_room: phrases(&["habitacion sencilla"]),
            double_room: phrases(&["habitacion doble"]),
            suite: phrases(&["suite"]),
            nights: phrases(&["numero de noches"]),
            start_date: phrases(&["fecha inicio"]),
        }
    }

    fn merged(mut self, other: Labels) -> Self {
        fn extend(into: &mut Vec<String>, from: Vec<String>) {
            for phrase in from {
                if !into.contains(&phrase) {
                    into.push(phrase);
                }
            }
        }
        extend(&mut self.customer_name, other.customer_name);
        extend(&mut self.email, other.email);
        extend(&mut self.single_room, other.single_room);
        extend(&mut self.double_room, other.double_room);
        extend(&mut self.suite, other.suite);
        extend(&mut self.nights, other.nights);
        extend(&mut self.start_date, other.start_date);
        self
    }
}

impl Default for Labels {
    // Accepts both the English and the Spanish documents
    fn default() -> Self {
        Labels::english().merged(Labels::spanish())
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

// What a single trimmed line was recognized as
#[derive(Debug, PartialEq)]
enum LineKind {
    CustomerName,
    Email,
    Room(RoomType),
    Nights,
    StartDate,
    Other,
}

impl Labels {
    // Cases are tested in a fixed priority order, first match wins
    fn classify(&self, line: &str) -> LineKind {
        if contains_any(line, &self.customer_name) {
            return LineKind::CustomerName;
        }
        let lower = line.to_lowercase();
        if contains_any(&lower, &self.email) {
            LineKind::Email
        } else if contains_any(&lower, &self.single_room) {
            LineKind::Room(RoomType::Single)
        } else if contains_any(&lower, &self.double_room) {
            LineKind::Room(RoomType::Double)
        } else if contains_any(&lower, &self.suite) {
            LineKind::Room(RoomType::Suite)
        } else if contains_any(&lower, &self.nights) {
            LineKind::Nights
        } else if contains_any(&lower, &self.start_date) {
            LineKind::StartDate
        } else {
            LineKind::Other
        }
    }
}

// Accumulators filled while scanning. Every field may still be unset when
// the document ends.
#[derive(Debug, Default)]
struct ParseState {
    name: Option<String>,
    customer: Option<Customer>,
    rooms: Vec<Room>,
    nights: Option<i64>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl ParseState {
    fn finish(self) -> ParsedDocument {
        ParsedDocument {
            customer: self.customer,
            rooms: self.rooms,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

// Result of parsing one document
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub customer: Option<Customer>,
    pub rooms: Vec<Room>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ParsedDocument {
    /// Books every parsed room for the customer over the parsed date range.
    ///
    /// Nothing is booked unless customer, start date and end date are all
    /// known. Returns the number of reservations made.
    pub fn reserve_rooms(&mut self) -> Result<usize, ReservationError> {
        let (Some(customer), Some(start), Some(end)) =
            (self.customer.as_mut(), self.start_date, self.end_date)
        else {
            warn!(
                has_customer = self.customer.is_some(),
                has_start_date = self.start_date.is_some(),
                has_end_date = self.end_date.is_some(),
                "skipping booking, reservation data incomplete"
            );
            return Ok(0);
        };

        for room in &mut self.rooms {
            Reservation::book(customer, room, start, end)?;
        }
        Ok(self.rooms.len())
    }
}

// Last whitespace-delimited token of a line
fn last_token(line: &str) -> &str {
    line.split_whitespace().last().unwrap_or("")
}

pub struct DocumentParser {
    labels: Labels,
}

impl DocumentParser {
    pub fn new(labels: Labels) -> Self {
        Self { labels }
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParsedDocument, ParseError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let document = self.parse(BufReader::new(file))?;
        info!(
            path = %path.display(),
            rooms = document.rooms.len(),
            "reservation document parsed"
        );
        Ok(document)
    }

    pub fn parse_str(&self, text: &str) -> Result<ParsedDocument, ParseError> {
        self.parse(text.as_bytes())
    }

    // Single forward pass; the only look-ahead is the line after a customer
    // name label, which is consumed as the name itself
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<ParsedDocument, ParseError> {
        let mut state = ParseState::default();
        let mut lines = reader.lines().enumerate();

        while let Some((index, line)) = lines.next() {
            let line_no = index + 1;
            let line = line?;
            let line = line.trim();

            match self.labels.classify(line) {
                LineKind::CustomerName => {
                    let (_, name) = lines
                        .next()
                        .ok_or(ParseError::MissingNameValue { line: line_no })?;
                    let name = name?.trim().to_string();
                    debug!(line = line_no, %name, "customer name");
                    state.name = Some(name);
                }
                LineKind::Email => {
                    let name = state
                        .name
                        .clone()
                        .ok_or(ParseError::EmailBeforeName { line: line_no })?;
                    let email = last_token(line);
                    debug!(line = line_no, %email, "customer email");
                    state.customer = Some(Customer::new(name, email));
                }
                LineKind::Room(room_type) => {
                    debug!(line = line_no, ?room_type, "room requested");
                    state.rooms.push(RoomCatalog::room_for(room_type));
                }
                LineKind::Nights => {
                    let value = last_token(line);
                    let nights = value
                        .parse::<i64>()
                        .map_err(|_| ParseError::InvalidNightCount {
                            line: line_no,
                            value: value.to_string(),
                        })?;
                    debug!(line = line_no, nights, "number of nights");
                    state.nights = Some(nights);
                }
                LineKind::StartDate => {
                    let value = last_token(line);
                    let start = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
                        ParseError::InvalidDate {
                            line: line_no,
                            value: value.to_string(),
                        }
                    })?;
                    debug!(line = line_no, %start, "start date");
                    state.start_date = Some(start);
                    // A night count given after the start date is never applied
                    if let Some(nights) = state.nights {
                        let end = Duration::try_days(nights)
                            .and_then(|stay| start.checked_add_signed(stay))
                            .ok_or(ParseError::DateOverflow {
                                line: line_no,
                                start,
                                nights,
                            })?;
                        state.end_date = Some(end);
                    }
                }
                LineKind::Other => {}
            }
        }

        Ok(state.finish())
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new(Labels::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{Availability, RoomKind};
    use test_case::test_case;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const ANA_DOCUMENT: &str = "Customer name
Ana Gomez
email: ana@example.com
single room
double room
number of nights: 3
start date: 01-06-2024
";

    #[test]
    fn test_parse_full_document() {
        let document = DocumentParser::default().parse_str(ANA_DOCUMENT).unwrap();

        let customer = document.customer.as_ref().unwrap();
        assert_eq!(customer.name, "Ana Gomez");
        assert_eq!(customer.email, "ana@example.com");
        assert_eq!(document.rooms.len(), 2);
        assert_eq!(document.start_date, Some(date(1, 6, 2024)));
        assert_eq!(document.end_date, Some(date(4, 6, 2024)));
    }

    #[test_case("single room", 1, 1, 500.0; "#1 bare single")]
    #[test_case("  I would like a SINGLE ROOM please ", 1, 1, 500.0; "#2 single with noise")]
    #[test_case("double room", 3, 2, 900.0; "#3 bare double")]
    #[test_case("- Double Room with view", 3, 2, 900.0; "#4 double with noise")]
    #[test_case("suite", 2, 4, 2000.0; "#5 bare suite")]
    #[test_case("the presidential SUITE", 2, 4, 2000.0; "#6 suite with noise")]
    #[test_case("habitacion sencilla", 1, 1, 500.0; "#7 spanish single")]
    #[test_case("Habitacion doble", 3, 2, 900.0; "#8 spanish double")]
    fn test_room_keywords(line: &str, number: u32, capacity: u32, price: f64) {
        let document = DocumentParser::default().parse_str(line).unwrap();
        assert_eq!(document.rooms.len(), 1);
        let room = &document.rooms[0];
        assert_eq!(room.number(), number);
        assert_eq!(room.capacity(), capacity);
        assert_eq!(room.price(), price);
    }

    #[test]
    fn test_nights_then_start_date_sets_end_date() {
        let text = "number of nights: 5\nstart date: 28-02-2024\n";
        let document = DocumentParser::default().parse_str(text).unwrap();
        assert_eq!(document.start_date, Some(date(28, 2, 2024)));
        assert_eq!(document.end_date, Some(date(4, 3, 2024)));
    }

    #[test]
    fn test_start_date_then_nights_leaves_end_date_unset() {
        let text = "start date: 28-02-2024\nnumber of nights: 5\n";
        let document = DocumentParser::default().parse_str(text).unwrap();
        assert_eq!(document.start_date, Some(date(28, 2, 2024)));
        assert_eq!(document.end_date, None);
    }

    #[test]
    fn test_name_label_on_last_line_fails() {
        let text = "single room\nCustomer name";
        let result = DocumentParser::default().parse_str(text);
        assert!(matches!(
            result,
            Err(ParseError::MissingNameValue { line: 2 })
        ));
    }

    #[test]
    fn test_name_label_is_case_sensitive() {
        let text = "customer name\nAna Gomez\nemail: ana@example.com\n";
        let result = DocumentParser::default().parse_str(text);
        assert!(matches!(result, Err(ParseError::EmailBeforeName { line: 3 })));
    }

    #[test]
    fn test_email_before_name_fails() {
        let text = "Email: ana@example.com\nCustomer name\nAna Gomez\n";
        let result = DocumentParser::default().parse_str(text);
        assert!(matches!(result, Err(ParseError::EmailBeforeName { line: 1 })));
    }

    #[test]
    fn test_missing_email_leaves_customer_unset() {
        let text = "Customer name\nAna Gomez\nsingle room\n";
        let document = DocumentParser::default().parse_str(text).unwrap();
        assert!(document.customer.is_none());
        assert_eq!(document.rooms.len(), 1);
    }

    #[test]
    fn test_name_line_is_not_classified() {
        // The line after the label is taken verbatim, even if it looks like a room
        let text = "Customer name\nSuite Owner\nemail: owner@example.com\n";
        let document = DocumentParser::default().parse_str(text).unwrap();
        assert_eq!(document.customer.unwrap().name, "Suite Owner");
        assert!(document.rooms.is_empty());
    }

    #[test]
    fn test_later_email_rebuilds_customer() {
        let text = "Customer name\nAna Gomez\nemail: old@example.com\nemail: new@example.com\n";
        let document = DocumentParser::default().parse_str(text).unwrap();
        assert_eq!(document.customer.unwrap().email, "new@example.com");
    }

    #[test_case("number of nights: three"; "word")]
    #[test_case("number of nights: 2.5"; "fraction")]
    #[test_case("number of nights: 99999999999999999999"; "beyond i64")]
    fn test_invalid_night_count(line: &str) {
        let result = DocumentParser::default().parse_str(line);
        assert!(matches!(
            result,
            Err(ParseError::InvalidNightCount { line: 1, .. })
        ));
    }

    #[test]
    fn test_negative_nights_move_end_date_back() {
        let text = "number of nights: -2\nstart date: 01-06-2024\n";
        let document = DocumentParser::default().parse_str(text).unwrap();
        assert_eq!(document.end_date, Some(date(30, 5, 2024)));
    }

    #[test_case("number of nights: 4000000000\nstart date: 01-06-2024\n", 4_000_000_000; "past max date")]
    #[test_case("number of nights: -4000000000\nstart date: 01-06-2024\n", -4_000_000_000; "before min date")]
    #[test_case("number of nights: 9223372036854775807\nstart date: 01-06-2024\n", i64::MAX; "duration overflow")]
    fn test_end_date_out_of_range(text: &str, expected_nights: i64) {
        let result = DocumentParser::default().parse_str(text);
        match result {
            Err(ParseError::DateOverflow {
                line,
                start,
                nights,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(start, date(1, 6, 2024));
                assert_eq!(nights, expected_nights);
            }
            other => panic!("expected DateOverflow, got {:?}", other),
        }
    }

    #[test_case("start date: 2024-06-01"; "iso order")]
    #[test_case("start date: 31-02-2024"; "impossible day")]
    fn test_invalid_start_date(line: &str) {
        let result = DocumentParser::default().parse_str(line);
        assert!(matches!(result, Err(ParseError::InvalidDate { line: 1, .. })));
    }

    #[test]
    fn test_spanish_document() {
        let text = "Nombre del cliente
Luis Perez
Correo: luis@example.com
Habitacion doble
Suite con jacuzzi
Numero de noches: 2
Fecha inicio: 30-12-2024
";
        let document = DocumentParser::new(Labels::spanish()).parse_str(text).unwrap();
        assert_eq!(document.customer.as_ref().unwrap().name, "Luis Perez");
        assert_eq!(document.rooms.len(), 2);
        assert_eq!(document.end_date, Some(date(1, 1, 2025)));
    }

    #[test]
    fn test_english_labels_ignore_spanish_lines() {
        let document = DocumentParser::new(Labels::english())
            .parse_str("habitacion sencilla\nnumero de noches: 2\n")
            .unwrap();
        assert!(document.rooms.is_empty());
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let text = "Dear hotel,\n\nthanks in advance\n";
        let document = DocumentParser::default().parse_str(text).unwrap();
        assert!(document.customer.is_none());
        assert!(document.rooms.is_empty());
        assert!(document.start_date.is_none());
    }

    #[test]
    fn test_reserve_rooms_books_each_room() {
        let mut document = DocumentParser::default().parse_str(ANA_DOCUMENT).unwrap();
        assert_eq!(document.reserve_rooms().unwrap(), 2);

        assert!(document
            .rooms
            .iter()
            .all(|r| r.availability() == Availability::Reserved));
        let reservations = document.customer.as_ref().unwrap().reservations();
        assert_eq!(reservations.len(), 2);
        assert_eq!(reservations[1].room_kind, RoomKind::Double { balcony: false });
        assert_eq!(reservations[1].end_date, date(4, 6, 2024));
    }

    #[test]
    fn test_reserve_rooms_skipped_without_end_date() {
        let text = "Customer name\nAna Gomez\nemail: ana@example.com\nsuite\nstart date: 01-06-2024\n";
        let mut document = DocumentParser::default().parse_str(text).unwrap();
        assert_eq!(document.reserve_rooms().unwrap(), 0);
        assert!(document.rooms[0].is_available());
        assert!(document.customer.unwrap().reservations().is_empty());
    }

    #[test]
    fn test_parse_missing_file() {
        let result = DocumentParser::default().parse_file("does/not/exist.txt");
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}
