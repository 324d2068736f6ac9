use clap::Parser;
use itertools::Itertools;
use metro_fares::{
    book_ticket,
    config::{Cli, Command},
    quote_fare, recharge_wallet, server,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Command::Recharge { balance, amount } = cli.command {
        println!("Balance: {}", recharge_wallet(balance, amount));
        return Ok(());
    }

    let now = std::time::Instant::now();
    let network = cli.load_network()?;
    tracing::debug!("network loaded in {:?}", now.elapsed());

    match cli.command {
        Command::Stations => {
            for station in network.stations() {
                println!("{station}");
            }
        }
        Command::Fare { from, to } => match quote_fare(&network, &from, &to) {
            Ok(ticket) => {
                println!("Route: {}", ticket.route.iter().join(" -> "));
                println!("Distance: {}", ticket.distance);
                println!("Fare: {}", ticket.fare);
            }
            Err(err) => println!("{err}"),
        },
        Command::Book { from, to, balance } => {
            let booking = book_ticket(&network, &from, &to, balance);
            match &booking.outcome {
                Ok(ticket) => println!("Ticket booked! Fare: {}", ticket.fare),
                Err(err) => println!("{err}"),
            }
            println!("Balance: {}", booking.balance);
        }
        Command::Save { path } => network.save(&path)?,
        Command::Serve { addr } => server::serve(network, addr).await?,
        Command::Recharge { .. } => unreachable!("handled before loading the network"),
    }

    Ok(())
}
