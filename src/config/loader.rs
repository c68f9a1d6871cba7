use super::types::GatewayConfig;
use crate::registry::{Region, RegionTopology, Topology, WorkerEndpoint};

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("at least one region must be configured")]
    NoRegions,

    #[error("region '{0}' has no workers")]
    EmptyRegion(String),

    #[error("region '{region}' lists worker {endpoint} more than once")]
    DuplicateWorker { region: String, endpoint: String },

    #[error("region '{region}' has an invalid worker url {endpoint}: {reason}")]
    InvalidWorker {
        region: String,
        endpoint: String,
        reason: String,
    },

    #[error("region '{0}' lists itself as a fallback")]
    SelfFallback(String),

    #[error("region '{region}' falls back to unknown region '{fallback}'")]
    UnknownFallback { region: String, fallback: String },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl GatewayConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    /// Parses and validates in one step.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heartbeat_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "heartbeat_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_retries",
                reason: "at least one attempt is required".to_string(),
            });
        }
        if self.region_deadline_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "region_deadline_ms",
                reason: "must be greater than zero when set".to_string(),
            });
        }
        if self.regions.is_empty() {
            return Err(ConfigError::NoRegions);
        }

        for (name, region) in &self.regions {
            if region.workers.is_empty() {
                return Err(ConfigError::EmptyRegion(name.clone()));
            }

            let mut seen = HashSet::new();
            for endpoint in &region.workers {
                validate_endpoint(name, endpoint)?;
                if !seen.insert(endpoint.trim_end_matches('/')) {
                    return Err(ConfigError::DuplicateWorker {
                        region: name.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }

            for fallback in &region.fallbacks {
                if fallback == name {
                    return Err(ConfigError::SelfFallback(name.clone()));
                }
                if !self.regions.contains_key(fallback) {
                    return Err(ConfigError::UnknownFallback {
                        region: name.clone(),
                        fallback: fallback.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Validated topology for the worker registry.
    pub fn topology(&self) -> Result<Topology, ConfigError> {
        self.validate()?;

        let regions: BTreeMap<Region, RegionTopology> = self
            .regions
            .iter()
            .map(|(name, region)| {
                let topo = RegionTopology {
                    endpoints: region
                        .workers
                        .iter()
                        .map(|w| WorkerEndpoint(w.trim_end_matches('/').to_string()))
                        .collect(),
                    fallbacks: region.fallbacks.iter().map(|f| Region(f.clone())).collect(),
                };
                (Region(name.clone()), topo)
            })
            .collect();

        Ok(Topology::new(regions))
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn region_deadline(&self) -> Option<Duration> {
        self.region_deadline_ms.map(Duration::from_millis)
    }
}

fn validate_endpoint(region: &str, endpoint: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidWorker {
        region: region.to_string(),
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = reqwest::Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
