//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use coincheck_rest::{PaginationRequest, SortOrder, DEFAULT_BASE_URL};

/// Query the Coincheck REST API and print the response as JSON
///
/// Private commands read credentials from COINCHECK_API_KEY and
/// COINCHECK_API_SECRET. Set RUST_LOG=debug to see each request on stderr.
#[derive(Debug, Parser)]
#[command(name = "coincheck", author, version)]
pub struct Cli {
    /// API root to send requests to
    #[arg(long, env = "COINCHECK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check latest ticker
    Ticker,

    /// List executed trades
    OrderHistory(PageArgs),

    /// List outgoing crypto transfers
    SentHistory {
        /// Currency code, e.g. BTC
        currency: String,
    },

    /// List incoming crypto deposits
    DepositHistory {
        /// Currency code, e.g. BTC
        currency: String,
    },

    /// List orders still on the book
    OpenOrders,
}

impl Command {
    /// Whether the command hits a signed endpoint
    pub fn is_private(&self) -> bool {
        !matches!(self, Self::Ticker)
    }
}

/// Cursor pagination flags
///
/// Passing any of them switches to the paginated endpoint.
#[derive(Debug, Default, Args)]
pub struct PageArgs {
    /// Maximum number of entries
    #[arg(long)]
    pub limit: Option<u32>,

    /// Sort direction (asc or desc)
    #[arg(long)]
    pub order: Option<SortOrder>,

    /// Only entries with an ID greater than this
    #[arg(long)]
    pub starting_after: Option<u64>,

    /// Only entries with an ID less than this
    #[arg(long)]
    pub ending_before: Option<u64>,
}

impl PageArgs {
    /// `None` when no flag was given
    pub fn to_pagination(&self) -> Option<PaginationRequest> {
        let page = PaginationRequest {
            limit: self.limit,
            order: self.order,
            starting_after: self.starting_after,
            ending_before: self.ending_before,
        };
        (page != PaginationRequest::default()).then_some(page)
    }
}
