use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DistroError;

pub const SECONDS_PER_WEEK: i64 = 604_800;

/// Allocation tracks that share one release curve but keep separate
/// allocated/claimed counters on a user's balance record.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    #[default]
    Giv,
    Fox,
    Cult,
}

impl StreamType {
    pub const ALL: [StreamType; 3] = [StreamType::Giv, StreamType::Fox, StreamType::Cult];

    /// Balance-record field names `(allocated, claimed)` for this stream.
    pub fn field_names(self) -> (&'static str, &'static str) {
        match self {
            StreamType::Giv => ("allocatedTokens", "claimed"),
            StreamType::Fox => ("foxAllocatedTokens", "foxClaimed"),
            StreamType::Cult => ("cultAllocatedTokens", "cultClaimed"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StreamType::Giv => "giv",
            StreamType::Fox => "fox",
            StreamType::Cult => "cult",
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamType {
    type Err = DistroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "giv" | "" => Ok(StreamType::Giv),
            "fox" => Ok(StreamType::Fox),
            "cult" => Ok(StreamType::Cult),
            _ => Err(DistroError::UnknownStreamType),
        }
    }
}

/// Chain a distributor is deployed on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
}

impl NetworkConfig {
    pub const MAINNET_NETWORK_NUMBER: u64 = 1;
    pub const XDAI_NETWORK_NUMBER: u64 = 100;

    pub fn mainnet() -> Self {
        NetworkConfig {
            chain_id: Self::MAINNET_NETWORK_NUMBER,
            name: "mainnet".to_owned(),
        }
    }

    pub fn xdai() -> Self {
        NetworkConfig {
            chain_id: Self::XDAI_NETWORK_NUMBER,
            name: "xdai".to_owned(),
        }
    }

    /// Networks the GIVeconomy distributors run on.
    pub fn defaults() -> Vec<NetworkConfig> {
        vec![Self::mainnet(), Self::xdai()]
    }

    /// The default entry for `chain_id`, or one named after the bare id.
    pub fn for_chain(chain_id: u64) -> Self {
        Self::defaults()
            .into_iter()
            .find(|network| network.chain_id == chain_id)
            .unwrap_or_else(|| NetworkConfig {
                chain_id,
                name: chain_id.to_string(),
            })
    }
}
