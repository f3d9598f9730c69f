use std::sync::Arc;

use roadimpact_core::model::{Coordinate, RoadInfoHint, RoadNetwork};
use serde::{Deserialize, Serialize};

use crate::model::fetch::{FetchError, FetchToken};

/// where the disruption is and what the caller knows about the road there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisruptionLocation {
    pub center: Coordinate,
    #[serde(default)]
    pub hint: Option<RoadInfoHint>,
}

impl DisruptionLocation {
    pub fn new(center: Coordinate, hint: Option<RoadInfoHint>) -> DisruptionLocation {
        DisruptionLocation { center, hint }
    }
}

/// lifecycle of the network for the selected disruption location.
#[derive(Debug, Clone)]
pub enum ImpactState {
    Idle,
    Fetching {
        location: DisruptionLocation,
        token: FetchToken,
    },
    Classified {
        location: DisruptionLocation,
        network: Arc<RoadNetwork>,
    },
    Degraded {
        location: DisruptionLocation,
        network: Arc<RoadNetwork>,
        warning: String,
    },
    Failed {
        location: DisruptionLocation,
        reason: FetchError,
    },
}

/// status signal exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactStatus {
    Idle,
    Loading,
    Success,
    DegradedFallback,
    Failed,
}

impl ImpactState {
    pub fn status(&self) -> ImpactStatus {
        match self {
            ImpactState::Idle => ImpactStatus::Idle,
            ImpactState::Fetching { .. } => ImpactStatus::Loading,
            ImpactState::Classified { .. } => ImpactStatus::Success,
            ImpactState::Degraded { .. } => ImpactStatus::DegradedFallback,
            ImpactState::Failed { .. } => ImpactStatus::Failed,
        }
    }

    pub fn location(&self) -> Option<&DisruptionLocation> {
        match self {
            ImpactState::Idle => None,
            ImpactState::Fetching { location, .. }
            | ImpactState::Classified { location, .. }
            | ImpactState::Degraded { location, .. }
            | ImpactState::Failed { location, .. } => Some(location),
        }
    }

    /// the network to render, present only once classification has finished.
    pub fn network(&self) -> Option<&Arc<RoadNetwork>> {
        match self {
            ImpactState::Classified { network, .. } | ImpactState::Degraded { network, .. } => {
                Some(network)
            }
            _ => None,
        }
    }

    pub fn warning(&self) -> Option<String> {
        match self {
            ImpactState::Degraded { warning, .. } => Some(warning.clone()),
            ImpactState::Failed { reason, .. } => Some(reason.to_string()),
            _ => None,
        }
    }

    /// true when `token` belongs to the fetch this state is waiting on.
    pub fn is_awaiting(&self, token: &FetchToken) -> bool {
        match self {
            ImpactState::Fetching { token: current, .. } => {
                current.generation() == token.generation() && !token.is_cancelled()
            }
            _ => false,
        }
    }
}
