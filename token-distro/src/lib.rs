//! Vesting math for GIVeconomy token distributions.
//!
//! [`TokenDistroHelper`] turns a distributor's schedule into claimable
//! amounts, release percentages and stream rates at a caller-supplied
//! instant. Amounts are exact big integers, rates and percentages are
//! big decimals.

pub mod amount;
pub mod config;
pub mod distro;
pub mod errors;
pub mod registry;
pub mod time;
pub mod types;

#[cfg(test)]
mod test_fuzz;
#[cfg(test)]
mod test_time;

pub use amount::{AmountInput, TokenAmount};
pub use config::{NetworkConfig, StreamType, SECONDS_PER_WEEK};
pub use distro::TokenDistroHelper;
pub use errors::DistroError;
pub use registry::DistroRegistry;
pub use time::{duration_to_string, now_unix_ms, parse_timestamp, TimeInput, Timestamp};
pub use types::{Balances, StreamBalance, TokenDistroInfo};
