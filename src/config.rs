use std::{net::SocketAddr, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::network::{NetworkGraph, adapters::json::JsonAdapter};

/// Metro ticket booking: shortest-route fares and wallet balances.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Network definition in JSON (`.json` or `.json.gz`)
    #[arg(long, global = true, conflicts_with = "snapshot")]
    pub network: Option<PathBuf>,

    /// Binary snapshot written by `save`
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every station
    Stations,

    /// Show the shortest route and its fare
    Fare { from: String, to: String },

    /// Book a ticket against a wallet balance
    Book {
        from: String,
        to: String,
        #[arg(long, default_value_t = 0)]
        balance: u64,
    },

    /// Add funds to a wallet balance
    Recharge {
        #[arg(long, default_value_t = 0)]
        balance: u64,
        #[arg(long)]
        amount: u64,
    },

    /// Write the loaded network as a binary snapshot
    Save { path: PathBuf },

    /// Serve the fare API over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

impl Cli {
    /// Builds the graph from whichever source was given, falling back to
    /// the built-in network.
    pub fn load_network(&self) -> Result<NetworkGraph> {
        if let Some(path) = &self.snapshot {
            return NetworkGraph::load(path);
        }

        let adapter = match &self.network {
            Some(path) => JsonAdapter::from_path(path)?,
            None => JsonAdapter::builtin()?,
        };
        NetworkGraph::from_adapter(&adapter)
    }
}
