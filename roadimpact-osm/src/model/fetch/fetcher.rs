use std::{sync::Arc, time::Duration};

use roadimpact_core::{
    algorithm::classification::RoadClassifier,
    model::{Coordinate, CorridorRuleSet, RoadInfoHint, RoadNetwork},
};

use super::{FetchConfig, FetchError, FetchToken, GeodataService, NetworkCache};
use crate::model::overpass::OverpassQuery;

/// result of [`RoadGraphFetcher::fetch`]. a degraded outcome carries the fallback
/// network (possibly empty) and the failure that led to it.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Cached(Arc<RoadNetwork>),
    Fetched(Arc<RoadNetwork>),
    Degraded {
        network: Arc<RoadNetwork>,
        cause: FetchError,
    },
}

impl FetchOutcome {
    pub fn network(&self) -> &Arc<RoadNetwork> {
        match self {
            FetchOutcome::Cached(network) => network,
            FetchOutcome::Fetched(network) => network,
            FetchOutcome::Degraded { network, .. } => network,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, FetchOutcome::Degraded { .. })
    }
}

/// retrieves and classifies the road graph around a disruption, owning the
/// cache of classified networks.
pub struct RoadGraphFetcher<S> {
    service: S,
    config: FetchConfig,
    cache: NetworkCache,
    classifier: RoadClassifier,
}

impl<S: GeodataService> RoadGraphFetcher<S> {
    pub fn new(service: S, config: FetchConfig, classifier: RoadClassifier) -> RoadGraphFetcher<S> {
        let cache = NetworkCache::new(config.cache_capacity, config.cache_precision_decimals);
        RoadGraphFetcher {
            service,
            config,
            cache,
            classifier,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn cache(&self) -> &NetworkCache {
        &self.cache
    }

    pub fn classifier(&self) -> &RoadClassifier {
        &self.classifier
    }

    /// returns the classified network around `center`, from cache when possible.
    ///
    /// transient failures and attempt timeouts are retried with exponential backoff.
    /// once attempts are exhausted the result is degraded: a single-road network
    /// built from the hint geometry if there is one, otherwise an empty network.
    /// an empty graph or a rejected request ends the fetch immediately with an error.
    /// a cancelled token aborts the fetch at the next await and nothing is cached.
    pub async fn fetch(
        &mut self,
        center: &Coordinate,
        hint: Option<&RoadInfoHint>,
        corridors: &CorridorRuleSet,
        token: &FetchToken,
    ) -> Result<FetchOutcome, FetchError> {
        if token.is_cancelled() {
            return Err(FetchError::Cancelled(*center));
        }
        if let Some(network) = self.cache.get(center) {
            log::debug!("cache hit for {center}");
            // hint geometry is per request, the cached entry keeps the graph's
            let network = match hint.and_then(|h| network.with_hint_geometry(h, center)) {
                Some(overridden) => Arc::new(overridden),
                None => network,
            };
            return Ok(FetchOutcome::Cached(network));
        }

        let query = OverpassQuery::road_graph(
            center,
            self.config.search_radius_meters,
            self.config.query_timeout_secs,
            &self.config.highway_types,
            &self.config.critical_name_patterns,
            &self.config.extra_filters,
        );
        let attempts = self.config.max_attempts.max(1);
        let attempt_timeout = Duration::from_millis(self.config.attempt_timeout_ms);
        let mut last_error: Option<FetchError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let backoff = Duration::from_millis(self.config.backoff_ms(attempt - 1));
                log::info!("retrying road graph fetch for {center} in {backoff:?}");
                tokio::select! {
                    _ = token.cancelled() => return Err(FetchError::Cancelled(*center)),
                    _ = tokio::time::sleep(backoff) => {}
                }
            }
            log::info!(
                "fetching road graph around {center} (attempt {} of {attempts})",
                attempt + 1
            );
            let result = tokio::select! {
                _ = token.cancelled() => return Err(FetchError::Cancelled(*center)),
                r = tokio::time::timeout(attempt_timeout, self.service.query(&query)) => r,
            };
            let response = match result {
                Ok(Ok(response)) => response,
                Ok(Err(e)) if e.is_transient() => {
                    log::warn!("attempt {} failed: {e}", attempt + 1);
                    last_error = Some(e);
                    continue;
                }
                Ok(Err(e)) => {
                    log::error!("road graph fetch for {center} failed: {e}");
                    return Err(e);
                }
                Err(_) => {
                    log::warn!("attempt {} timed out after {attempt_timeout:?}", attempt + 1);
                    last_error = Some(FetchError::TransientFetchError(format!(
                        "attempt timed out after {attempt_timeout:?}"
                    )));
                    continue;
                }
            };

            let (ways, nodes) = response.into_raw_graph();
            if ways.is_empty() {
                return Err(FetchError::EmptyGraphError(*center));
            }
            log::debug!("received {} ways and {} nodes", ways.len(), nodes.len());
            let network = self
                .classifier
                .classify(&ways, &nodes, center, hint, corridors);
            if token.is_cancelled() {
                return Err(FetchError::Cancelled(*center));
            }
            let network = Arc::new(network);
            self.cache.insert(center, network.clone());
            return Ok(FetchOutcome::Fetched(network));
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| String::from("no attempts made"));
        let cause = FetchError::DegradedDataError { attempts, reason };
        log::warn!("{cause}");
        let network = hint
            .and_then(|h| RoadNetwork::fallback(h, center))
            .unwrap_or_else(RoadNetwork::empty);
        Ok(FetchOutcome::Degraded {
            network: Arc::new(network),
            cause,
        })
    }
}
