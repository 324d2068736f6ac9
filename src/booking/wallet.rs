use crate::{
    booking::{Booking, book_ticket, recharge_wallet},
    network::NetworkGraph,
};

/// Running balance for callers that book several trips in a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wallet {
    balance: u64,
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn recharge(&mut self, amount: u64) -> u64 {
        self.balance = recharge_wallet(self.balance, amount);
        self.balance
    }

    pub fn book(&mut self, graph: &NetworkGraph, source: &str, destination: &str) -> Booking {
        let booking = book_ticket(graph, source, destination, self.balance);
        self.balance = booking.balance;
        booking
    }
}
