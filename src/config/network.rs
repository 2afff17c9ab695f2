//! Network selection: turns a named target plus the environment into the
//! concrete endpoint, chain ID and signing accounts for a run.

use url::Url;

use crate::blockchain::wallet::Wallet;
use crate::config::env::{interpolate, Env, PRIVATE_KEY_ENV_VAR};
use crate::config::loader::ConfigError;
use crate::config::schema::{AccountSource, DeployConfig};

/// A network target with everything environment-dependent filled in.
#[derive(Debug, Clone)]
pub struct ResolvedNetwork {
    pub name: String,
    pub url: Url,
    pub chain_id: u64,
    pub account_source: AccountSource,
    /// Local signing accounts. Empty when the key is not set, or when the
    /// node manages accounts.
    pub accounts: Vec<Wallet>,
    pub gas_price: Option<u128>,
    pub explorer: Option<String>,
}

impl ResolvedNetwork {
    /// URL safe to log: path and query may carry provider API keys.
    pub fn display_url(&self) -> String {
        match self.url.host_str() {
            Some(host) => format!("{}://{}", self.url.scheme(), host),
            None => self.url.scheme().to_string(),
        }
    }
}

impl DeployConfig {
    /// Name of the network to use, given an optional override.
    pub fn network_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_network)
    }

    /// Resolve a configured network against the environment.
    ///
    /// An absent private key is not an error here: the account list is simply
    /// empty and the failure surfaces when a signer is requested.
    pub fn resolve_network(&self, name: &str, env: &Env) -> Result<ResolvedNetwork, ConfigError> {
        let network = self.networks.get(name).ok_or_else(|| ConfigError::UnknownNetwork {
            name: name.to_string(),
            available: self.networks.keys().cloned().collect(),
        })?;

        let url_str = interpolate(&network.url, env);
        let url: Url = url_str.parse().map_err(|error| ConfigError::InvalidUrl {
            network: name.to_string(),
            error,
        })?;

        let accounts = match network.accounts {
            AccountSource::PrivateKeyEnv => match env.get(PRIVATE_KEY_ENV_VAR) {
                Some(key) => {
                    let wallet = Wallet::from_private_key(key, network.chain_id).map_err(|e| {
                        ConfigError::InvalidPrivateKey {
                            network: name.to_string(),
                            reason: e.to_string(),
                        }
                    })?;
                    vec![wallet]
                }
                None => {
                    tracing::debug!(network = %name, "{} not set, no local accounts", PRIVATE_KEY_ENV_VAR);
                    Vec::new()
                }
            },
            AccountSource::Node => Vec::new(),
        };

        Ok(ResolvedNetwork {
            name: name.to_string(),
            url,
            chain_id: network.chain_id,
            account_source: network.accounts,
            accounts,
            gas_price: network.gas_price,
            explorer: network.explorer.clone(),
        })
    }
}
