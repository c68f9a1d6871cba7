use super::region::RegionDispatcher;
use super::types::{DispatchError, Resolution, ResolutionStatus};
use crate::registry::{Region, WorkerRegistry};

use std::collections::HashSet;
use std::sync::Arc;

/// Serves a query from its region, walking the fallback chain when the
/// region comes back empty.
pub struct FallbackCoordinator {
    registry: Arc<WorkerRegistry>,
    dispatcher: Arc<RegionDispatcher>,
}

impl FallbackCoordinator {
    pub fn new(registry: Arc<WorkerRegistry>, dispatcher: Arc<RegionDispatcher>) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// Dispatches to `primary`, then to each fallback in configured order until
    /// one yields results. Regions are queried sequentially and at most once.
    pub async fn resolve(&self, primary: &str, query: &str) -> Result<Resolution, DispatchError> {
        let fallbacks = self
            .registry
            .fallbacks_of(primary)
            .map_err(|_| DispatchError::UnknownRegion(primary.to_string()))?;

        let results = self.dispatcher.dispatch(primary, query).await?;
        if !results.is_empty() {
            return Ok(Resolution {
                requested_region: Region::from(primary),
                serving_region: Region::from(primary),
                results,
                used_fallback: false,
                status: ResolutionStatus::Direct,
            });
        }

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(primary);

        for candidate in fallbacks {
            if !visited.insert(candidate.as_str()) {
                continue;
            }

            tracing::info!("Falling back from region {} to region {}", primary, candidate);

            let results = self.dispatcher.dispatch(candidate.as_str(), query).await?;
            if !results.is_empty() {
                return Ok(Resolution {
                    requested_region: Region::from(primary),
                    serving_region: candidate.clone(),
                    results,
                    used_fallback: true,
                    status: ResolutionStatus::Fallback,
                });
            }
        }

        tracing::warn!(
            "No results for {:?} in region {} or any of its {} fallbacks",
            query,
            primary,
            fallbacks.len()
        );

        Ok(Resolution {
            requested_region: Region::from(primary),
            serving_region: Region::from(primary),
            results: Vec::new(),
            used_fallback: false,
            status: ResolutionStatus::Unavailable,
        })
    }
}
