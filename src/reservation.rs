// Customers and the reservations linking them to rooms and dates

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::room::{Room, RoomKind};

#[derive(Error, Debug, PartialEq)]
pub enum ReservationError {
    #[error("Room {number} is already reserved")]
    RoomUnavailable { number: u32 },
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub name: String,
    pub email: String,
    reservations: Vec<Reservation>,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            reservations: Vec::new(),
        }
    }

    // Reservations in booking order
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub room_number: u32,
    pub room_kind: RoomKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Reservation {
    /// Books `room` for `customer` between the two dates.
    ///
    /// The reservation is appended to the customer's history and the room is
    /// flipped to reserved. Fails if the room was already reserved.
    pub fn book<'a>(
        customer: &'a mut Customer,
        room: &mut Room,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<&'a Reservation, ReservationError> {
        if !room.is_available() {
            return Err(ReservationError::RoomUnavailable {
                number: room.number(),
            });
        }

        room.mark_reserved();
        customer.reservations.push(Reservation {
            room_number: room.number(),
            room_kind: room.kind(),
            start_date,
            end_date,
        });
        debug!(
            customer = %customer.name,
            room = room.number(),
            %start_date,
            %end_date,
            "room reserved"
        );

        Ok(&customer.reservations[customer.reservations.len() - 1])
    }
}
