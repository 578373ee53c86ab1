use serde::{Deserialize, Serialize};

use crate::amount::{AmountInput, TokenAmount};
use crate::config::StreamType;
use crate::errors::DistroError;
use crate::time::TimeInput;

/// Distribution schedule exactly as the data layer hands it over.
///
/// Amounts and instants stay in their raw form until a
/// [`TokenDistroHelper`](crate::distro::TokenDistroHelper) normalizes them.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDistroInfo {
    pub contract_address: String,
    pub initial_amount: AmountInput,
    pub locked_amount: AmountInput,
    pub total_tokens: AmountInput,
    pub start_time: TimeInput,
    pub cliff_time: TimeInput,
    pub end_time: TimeInput,
}

impl TokenDistroInfo {
    pub fn from_json(json: &str) -> Result<Self, DistroError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A user's per-stream allocation and claim counters.
///
/// Missing fields read as zero; `Balances::default()` is the empty record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Balances {
    pub allocated_tokens: TokenAmount,
    pub claimed: TokenAmount,
    pub fox_allocated_tokens: TokenAmount,
    pub fox_claimed: TokenAmount,
    pub cult_allocated_tokens: TokenAmount,
    pub cult_claimed: TokenAmount,
}

/// Borrowed `(allocated, claimed)` pair for one stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StreamBalance<'a> {
    pub allocated: &'a TokenAmount,
    pub claimed: &'a TokenAmount,
}

impl Balances {
    pub fn from_json(json: &str) -> Result<Self, DistroError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn stream(&self, stream_type: StreamType) -> StreamBalance<'_> {
        match stream_type {
            StreamType::Giv => StreamBalance {
                allocated: &self.allocated_tokens,
                claimed: &self.claimed,
            },
            StreamType::Fox => StreamBalance {
                allocated: &self.fox_allocated_tokens,
                claimed: &self.fox_claimed,
            },
            StreamType::Cult => StreamBalance {
                allocated: &self.cult_allocated_tokens,
                claimed: &self.cult_claimed,
            },
        }
    }

    /// Set one stream's counters, leaving the others untouched.
    pub fn with_stream(
        mut self,
        stream_type: StreamType,
        allocated: TokenAmount,
        claimed: TokenAmount,
    ) -> Self {
        let (a, c) = match stream_type {
            StreamType::Giv => (&mut self.allocated_tokens, &mut self.claimed),
            StreamType::Fox => (&mut self.fox_allocated_tokens, &mut self.fox_claimed),
            StreamType::Cult => (&mut self.cult_allocated_tokens, &mut self.cult_claimed),
        };
        *a = allocated;
        *c = claimed;
        self
    }
}
