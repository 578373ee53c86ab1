//! Distribution helpers for every network and stream the app knows about.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::amount::TokenAmount;
use crate::config::{NetworkConfig, StreamType};
use crate::distro::TokenDistroHelper;
use crate::errors::DistroError;
use crate::time::Timestamp;
use crate::types::{Balances, TokenDistroInfo};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryPayload {
    networks: Vec<NetworkPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkPayload {
    chain_id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    distros: Vec<DistroPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DistroPayload {
    #[serde(default)]
    stream_type: Option<String>,
    #[serde(flatten)]
    info: TokenDistroInfo,
}

#[derive(Clone, Debug, Default)]
pub struct DistroRegistry {
    networks: BTreeMap<u64, NetworkConfig>,
    helpers: BTreeMap<(u64, StreamType), TokenDistroHelper>,
}

impl DistroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry that already knows mainnet and xDai.
    pub fn with_default_networks() -> Self {
        let mut registry = Self::new();
        for network in NetworkConfig::defaults() {
            registry.add_network(network);
        }
        registry
    }

    /// Load `{ "networks": [ { "chainId": 100, "distros": [ ... ] } ] }`.
    ///
    /// Each network may carry a `name`; known chains fall back to their
    /// default name. Each distro entry is a schedule payload with an optional
    /// `streamType`.
    pub fn from_json(json: &str) -> Result<Self, DistroError> {
        let payload: RegistryPayload = serde_json::from_str(json)?;
        let mut registry = DistroRegistry::with_default_networks();

        for network in payload.networks {
            let config = match network.name {
                Some(name) => NetworkConfig {
                    chain_id: network.chain_id,
                    name,
                },
                None => NetworkConfig::for_chain(network.chain_id),
            };
            registry.add_network(config);

            for distro in network.distros {
                let stream_type = distro
                    .stream_type
                    .as_deref()
                    .map(str::parse::<StreamType>)
                    .transpose()?;
                let helper = TokenDistroHelper::new(distro.info, stream_type).map_err(|err| {
                    if err.is_schedule_error() {
                        log::debug!("rejected distro schedule on chain {}: {err}", network.chain_id);
                    }
                    err
                })?;
                if registry.insert(network.chain_id, helper).is_some() {
                    return Err(DistroError::MalformedPayload);
                }
            }
        }

        log::debug!("loaded {} token distros", registry.len());
        Ok(registry)
    }

    /// Register or rename a network.
    pub fn add_network(&mut self, network: NetworkConfig) -> Option<NetworkConfig> {
        self.networks.insert(network.chain_id, network)
    }

    pub fn network_config(&self, chain_id: u64) -> Option<&NetworkConfig> {
        self.networks.get(&chain_id)
    }

    /// Known networks, ordered by chain id.
    pub fn networks(&self) -> impl Iterator<Item = &NetworkConfig> + '_ {
        self.networks.values()
    }

    pub fn network_by_name(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks
            .values()
            .find(|network| network.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Register `helper` under its own stream type, returning the helper it
    /// replaced, if any. An unknown `chain_id` is added as a network too.
    pub fn insert(&mut self, chain_id: u64, helper: TokenDistroHelper) -> Option<TokenDistroHelper> {
        self.networks
            .entry(chain_id)
            .or_insert_with(|| NetworkConfig::for_chain(chain_id));
        self.helpers.insert((chain_id, helper.stream_type()), helper)
    }

    pub fn get(&self, chain_id: u64, stream_type: StreamType) -> Option<&TokenDistroHelper> {
        self.helpers.get(&(chain_id, stream_type))
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Helpers deployed on `chain_id`, in stream order.
    pub fn network(&self, chain_id: u64) -> impl Iterator<Item = &TokenDistroHelper> + '_ {
        self.helpers
            .range((chain_id, StreamType::Giv)..=(chain_id, StreamType::Cult))
            .map(|(_, helper)| helper)
    }

    /// Sum of the user's claimable amount over every stream on `chain_id`.
    ///
    /// Like the per-stream value, the sum is not clamped at zero.
    pub fn user_claimable_at(&self, chain_id: u64, balances: &Balances, now: Timestamp) -> TokenAmount {
        self.network(chain_id)
            .map(|helper| helper.user_claimable_at(balances, now))
            .fold(TokenAmount::zero(), |acc, v| acc + v)
    }
}
