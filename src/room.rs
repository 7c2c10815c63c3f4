// Room catalog: bookable units, their fixed variants and the keyword lookup

pub const SIMPLE_CAPACITY: u32 = 1;
pub const SIMPLE_PRICE: f64 = 500.0;
pub const DOUBLE_CAPACITY: u32 = 2;
pub const DOUBLE_PRICE: f64 = 900.0;
pub const SUITE_CAPACITY: u32 = 4;
pub const SUITE_PRICE: f64 = 2000.0;

// Whether a room can still be booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Available,
    Reserved,
}

// Variant a room was built as; the extra flags only exist on their variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    Generic,
    Simple,
    Double { balcony: bool },
    Suite { jacuzzi: bool },
}

impl RoomKind {
    /// Name printed in the reservation summary.
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomKind::Generic => "Habitacion",
            RoomKind::Simple => "HabitacionSimple",
            RoomKind::Double { .. } => "HabitacionDoble",
            RoomKind::Suite { .. } => "Suite",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Room {
    number: u32,
    capacity: u32,
    price: f64,
    kind: RoomKind,
    availability: Availability,
}

impl Room {
    // Generic room with caller-chosen capacity and price
    pub fn new(number: u32, capacity: u32, price: f64) -> Self {
        Self {
            number,
            capacity,
            price,
            kind: RoomKind::Generic,
            availability: Availability::Available,
        }
    }

    pub fn simple(number: u32) -> Self {
        Self {
            kind: RoomKind::Simple,
            ..Self::new(number, SIMPLE_CAPACITY, SIMPLE_PRICE)
        }
    }

    pub fn double(number: u32, balcony: bool) -> Self {
        Self {
            kind: RoomKind::Double { balcony },
            ..Self::new(number, DOUBLE_CAPACITY, DOUBLE_PRICE)
        }
    }

    pub fn suite(number: u32, jacuzzi: bool) -> Self {
        Self {
            kind: RoomKind::Suite { jacuzzi },
            ..Self::new(number, SUITE_CAPACITY, SUITE_PRICE)
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }

    // Only the booking operation flips availability
    pub(crate) fn mark_reserved(&mut self) {
        self.availability = Availability::Reserved;
    }
}

/// Two rooms are equal when number, capacity and price all match.
/// Variant and availability are not part of the comparison.
pub fn rooms_equal(a: &Room, b: &Room) -> bool {
    a.number == b.number && a.capacity == b.capacity && a.price == b.price
}

/// Combined nightly price of two rooms.
pub fn combined_price(a: &Room, b: &Room) -> f64 {
    a.price + b.price
}

// Keyword-recognized room types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

// Fixed identifying numbers handed out per room type. Every room of the same
// type gets the same number.
pub struct RoomCatalog;

impl RoomCatalog {
    pub const SINGLE_NUMBER: u32 = 1;
    pub const SUITE_NUMBER: u32 = 2;
    pub const DOUBLE_NUMBER: u32 = 3;

    pub fn room_for(room_type: RoomType) -> Room {
        match room_type {
            RoomType::Single => Room::simple(Self::SINGLE_NUMBER),
            RoomType::Double => Room::double(Self::DOUBLE_NUMBER, false),
            RoomType::Suite => Room::suite(Self::SUITE_NUMBER, false),
        }
    }
}
