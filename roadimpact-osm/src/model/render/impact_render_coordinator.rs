use std::collections::HashMap;

use roadimpact_core::{
    algorithm::{color::ImpactColorModel, extent::SegmentExtentCalculator},
    model::{
        AreaTable, ClassifiedRoad, Coordinate, CorridorRuleSet, HourlySeverity, OsmWayId,
        SeverityTimeline,
    },
    ImpactError,
};

use super::{DisruptionLocation, ImpactState, ImpactStatus, RenderFrame, RenderedSegment};
use crate::model::fetch::{
    FetchError, FetchOutcome, FetchToken, GeodataService, InFlightTracker, RoadGraphFetcher,
};

/// drives one disruption location from selection through retrieval to per-hour
/// rendering. the network is fetched once per location; changing the hour only
/// recomputes colors and extents, memoized per road and hour index.
pub struct ImpactRenderCoordinator<S> {
    fetcher: RoadGraphFetcher<S>,
    tracker: InFlightTracker,
    corridors: CorridorRuleSet,
    colors: ImpactColorModel,
    extent: SegmentExtentCalculator,
    areas: AreaTable,
    state: ImpactState,
    memo: HashMap<(OsmWayId, usize), (HourlySeverity, RenderedSegment)>,
}

impl<S: GeodataService> ImpactRenderCoordinator<S> {
    pub fn new(
        fetcher: RoadGraphFetcher<S>,
        corridors: CorridorRuleSet,
        colors: ImpactColorModel,
        extent: SegmentExtentCalculator,
        areas: AreaTable,
    ) -> ImpactRenderCoordinator<S> {
        ImpactRenderCoordinator {
            fetcher,
            tracker: InFlightTracker::new(),
            corridors,
            colors,
            extent,
            areas,
            state: ImpactState::Idle,
            memo: HashMap::new(),
        }
    }

    pub fn state(&self) -> &ImpactState {
        &self.state
    }

    pub fn status(&self) -> ImpactStatus {
        self.state.status()
    }

    pub fn fetcher(&self) -> &RoadGraphFetcher<S> {
        &self.fetcher
    }

    /// a handle that can supersede the in-flight fetch from elsewhere.
    pub fn tracker(&self) -> InFlightTracker {
        self.tracker.clone()
    }

    pub fn memoized_segments(&self) -> usize {
        self.memo.len()
    }

    /// selects a new disruption location, superseding any fetch in flight. the
    /// returned token must be passed to [`ImpactRenderCoordinator::resolve`].
    pub fn select_location(&mut self, location: DisruptionLocation) -> FetchToken {
        let token = self.tracker.begin();
        log::debug!(
            "selected disruption at {} (fetch {})",
            location.center,
            token.generation()
        );
        self.memo.clear();
        self.state = ImpactState::Fetching {
            location,
            token: token.clone(),
        };
        token
    }

    /// runs the fetch for `token`. a token that is no longer current is ignored and
    /// its result, if any, is discarded without touching the state.
    pub async fn resolve(&mut self, token: &FetchToken) -> ImpactStatus {
        let location = match (&self.state, self.state.is_awaiting(token)) {
            (ImpactState::Fetching { location, .. }, true) => location.clone(),
            _ => {
                log::debug!("ignoring stale fetch {}", token.generation());
                return self.status();
            }
        };
        let result = self
            .fetcher
            .fetch(
                &location.center,
                location.hint.as_ref(),
                &self.corridors,
                token,
            )
            .await;
        if !self.state.is_awaiting(token) {
            log::debug!("discarding result of superseded fetch {}", token.generation());
            return self.status();
        }
        self.state = match result {
            Ok(FetchOutcome::Cached(network)) | Ok(FetchOutcome::Fetched(network)) => {
                ImpactState::Classified { location, network }
            }
            Ok(FetchOutcome::Degraded { network, cause }) => ImpactState::Degraded {
                location,
                network,
                warning: cause.to_string(),
            },
            Err(FetchError::Cancelled(_)) => return self.status(),
            Err(reason) => {
                log::warn!("no road network for {}: {reason}", location.center);
                ImpactState::Failed { location, reason }
            }
        };
        self.status()
    }

    /// selects `location` and resolves its fetch.
    pub async fn load(&mut self, location: DisruptionLocation) -> ImpactStatus {
        let token = self.select_location(location);
        self.resolve(&token).await
    }

    /// colors and trims every road of the current network for one hour of the timeline.
    /// before classification completes, or after a failure, the frame has no segments.
    pub fn render_hour(
        &mut self,
        timeline: &SeverityTimeline,
        hour_index: usize,
    ) -> Result<RenderFrame, ImpactError> {
        let hour = timeline.get(hour_index)?.clone();
        hour.validate()?;
        let area = self
            .state
            .location()
            .map(|l| String::from(self.areas.area_name(&l.center)))
            .unwrap_or_else(|| self.areas.default_area.clone());

        let mut segments = vec![];
        if let (Some(network), Some(location)) = (self.state.network(), self.state.location()) {
            for road in network.iter_roads() {
                let key = (road.id(), hour_index);
                let memoized = self
                    .memo
                    .get(&key)
                    .filter(|(memo_hour, _)| memo_hour == &hour)
                    .map(|(_, segment)| segment.clone());
                let segment = match memoized {
                    Some(segment) => segment,
                    None => {
                        let segment = self.render_road(road, &location.center, &hour);
                        self.memo.insert(key, (hour.clone(), segment.clone()));
                        segment
                    }
                };
                segments.push(segment);
            }
        }

        Ok(RenderFrame {
            hour: hour.hour,
            hour_index,
            status: self.status(),
            area,
            warning: self.state.warning(),
            segments,
        })
    }

    fn render_road(
        &self,
        road: &ClassifiedRoad,
        center: &Coordinate,
        hour: &HourlySeverity,
    ) -> RenderedSegment {
        let color = self.colors.color_for(road, hour);
        let (extent_meters, path) = self.extent.trimmed_path(road, center, hour);
        RenderedSegment {
            road_id: road.id(),
            name: road.road.name.clone(),
            impact_level: road.impact_level,
            connection_type: road.connection_type,
            is_main_road: road.is_main_road,
            color,
            extent_meters,
            coordinates: path.coordinates,
            is_untrimmed: path.is_untrimmed,
        }
    }
}
