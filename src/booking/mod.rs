use serde::Serialize;
use thiserror::Error;

use crate::network::NetworkGraph;

pub mod wallet;

pub const FARE_PER_UNIT_DISTANCE: u128 = 2;

/// Fare for a path of `distance`. Path sums over `u64` routes stay far
/// below `u128::MAX / 2`, so the product is exact.
pub fn fare(distance: u128) -> u128 {
    distance * FARE_PER_UNIT_DISTANCE
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub source: String,
    pub destination: String,
    pub route: Vec<String>,
    pub distance: u128,
    pub fare: u128,
}

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum BookingError {
    #[error("invalid station: {station}")]
    InvalidStation { station: String },

    #[error("no route between {from} and {to}")]
    NoRoute { from: String, to: String },

    #[error("insufficient funds: fare is {required}, balance is {available}")]
    InsufficientFunds { required: u128, available: u64 },
}

impl BookingError {
    /// How much more the wallet needs to cover the fare.
    pub fn shortfall(&self) -> Option<u128> {
        match self {
            BookingError::InsufficientFunds {
                required,
                available,
            } => Some(required.saturating_sub(u128::from(*available))),
            _ => None,
        }
    }
}

/// Result of a booking attempt along with the wallet balance after it.
/// `balance` only differs from the input balance when `outcome` is `Ok`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    pub outcome: Result<Ticket, BookingError>,
    pub balance: u64,
}

impl Booking {
    pub fn is_booked(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Prices the shortest trip between two stations.
pub fn quote_fare(
    graph: &NetworkGraph,
    source: &str,
    destination: &str,
) -> Result<Ticket, BookingError> {
    if let Some(station) = [source, destination].into_iter().find(|s| !graph.contains(s)) {
        return Err(BookingError::InvalidStation {
            station: station.to_owned(),
        });
    }

    let journey =
        graph
            .shortest_route(source, destination)
            .ok_or_else(|| BookingError::NoRoute {
                from: source.to_owned(),
                to: destination.to_owned(),
            })?;

    Ok(Ticket {
        source: source.to_owned(),
        destination: destination.to_owned(),
        route: journey.stations,
        distance: journey.distance,
        fare: fare(journey.distance),
    })
}

/// Charges the fare for `source` to `destination` against `balance`.
/// Nothing is charged unless the ticket is issued.
pub fn book_ticket(graph: &NetworkGraph, source: &str, destination: &str, balance: u64) -> Booking {
    let charge = quote_fare(graph, source, destination).and_then(|ticket| {
        match u64::try_from(ticket.fare) {
            Ok(fare) if fare <= balance => Ok((ticket, fare)),
            _ => Err(BookingError::InsufficientFunds {
                required: ticket.fare,
                available: balance,
            }),
        }
    });

    match charge {
        Ok((ticket, fare)) => {
            tracing::debug!(source, destination, fare, "ticket booked");
            Booking {
                outcome: Ok(ticket),
                balance: balance - fare,
            }
        }
        Err(err) => {
            tracing::debug!(source, destination, %err, "booking rejected");
            Booking {
                outcome: Err(err),
                balance,
            }
        }
    }
}

pub fn recharge_wallet(balance: u64, amount: u64) -> u64 {
    balance.saturating_add(amount)
}
