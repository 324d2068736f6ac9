pub mod booking;
pub mod config;
pub mod network;
pub mod server;

pub use booking::{
    Booking, BookingError, FARE_PER_UNIT_DISTANCE, Ticket, book_ticket, fare, quote_fare,
    recharge_wallet, wallet::Wallet,
};
pub use network::{Journey, NetworkError, NetworkGraph};
