use std::path::PathBuf;

use aggregator_client::{Ticker, TradeAction};
use clap::{Parser, Subcommand, ValueEnum};

/// Trade aggregator
#[derive(Debug, Parser)]
#[command(name = "aggregator", about = "Look up customers and place trades on the customer service")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "aggregator.toml", env = "AGGREGATOR_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a customer's balance and holdings
    Customer {
        /// Customer identifier
        customer_id: i32,
    },
    /// Buy or sell shares for a customer
    Trade {
        /// Customer identifier
        customer_id: i32,
        #[arg(long, value_enum, ignore_case = true)]
        ticker: TickerArg,
        #[arg(long, value_enum, ignore_case = true)]
        action: ActionArg,
        /// Number of shares
        #[arg(long)]
        quantity: i32,
        /// Unit price
        #[arg(long)]
        price: i32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TickerArg {
    Google,
    Apple,
    Microsoft,
    Amazon,
}

impl From<TickerArg> for Ticker {
    fn from(arg: TickerArg) -> Self {
        match arg {
            TickerArg::Google => Self::Google,
            TickerArg::Apple => Self::Apple,
            TickerArg::Microsoft => Self::Microsoft,
            TickerArg::Amazon => Self::Amazon,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionArg {
    Buy,
    Sell,
}

impl From<ActionArg> for TradeAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Buy => Self::Buy,
            ActionArg::Sell => Self::Sell,
        }
    }
}
