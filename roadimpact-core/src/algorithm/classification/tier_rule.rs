use crate::model::{ConnectionType, ImpactLevel, RoadFamily, RoadSegmentRaw};
use serde::{Deserialize, Serialize};

/// which list of the network a matched road is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// physically connected to the disruption.
    Connected,
    /// reachable by proximity alone.
    Nearby,
}

/// condition a road must meet for a [`TierRule`] to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RulePredicate {
    /// any point of the road lies within `within_meters` of the center.
    PassesNearCenter { within_meters: f64 },
    /// the road shares at least one graph node with the main road.
    SharesNodeWithMain,
    /// the road's name matches an exit-route pattern and it is within reach.
    ExitRoute { within_meters: f64 },
    /// the road is closer than `max_distance_meters` and belongs to one of `families`.
    /// with `requires_trunk_access`, the road must also be trunk-like or share a node
    /// with the main road.
    WithinDistance {
        max_distance_meters: f64,
        families: Vec<RoadFamily>,
        #[serde(default)]
        requires_trunk_access: bool,
    },
    /// an arterial (trunk/primary type or arterial keyword) within reach that is
    /// trunk-like or shares a node with the main road.
    ArterialReach { within_meters: f64 },
}

/// one row of the ordered tiering table. the first rule whose predicate holds decides
/// the road's tier; roads matching no rule are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRule {
    pub name: String,
    pub predicate: RulePredicate,
    pub impact_level: ImpactLevel,
    pub multiplier: f64,
    pub connection_type: ConnectionType,
    pub placement: Placement,
}

/// what the rules need to know about one candidate road, computed once.
#[derive(Debug, Clone)]
pub struct RoadContext<'a> {
    pub road: &'a RoadSegmentRaw,
    pub distance_meters: f64,
    pub shares_node_with_main: bool,
    /// trunk/primary type or an arterial keyword in the name.
    pub is_arterial: bool,
    /// trunk type or an arterial keyword in the name.
    pub is_trunk_like: bool,
    pub is_exit_route: bool,
}

impl RulePredicate {
    pub fn matches(&self, ctx: &RoadContext) -> bool {
        match self {
            RulePredicate::PassesNearCenter { within_meters } => {
                ctx.distance_meters <= *within_meters
            }
            RulePredicate::SharesNodeWithMain => ctx.shares_node_with_main,
            RulePredicate::ExitRoute { within_meters } => {
                ctx.is_exit_route && ctx.distance_meters <= *within_meters
            }
            RulePredicate::WithinDistance {
                max_distance_meters,
                families,
                requires_trunk_access,
            } => {
                let access = !requires_trunk_access
                    || ctx.is_trunk_like
                    || ctx.shares_node_with_main;
                ctx.distance_meters < *max_distance_meters
                    && families.contains(&ctx.road.highway.family())
                    && access
            }
            RulePredicate::ArterialReach { within_meters } => {
                ctx.is_arterial
                    && (ctx.is_trunk_like || ctx.shares_node_with_main)
                    && ctx.distance_meters <= *within_meters
            }
        }
    }
}

impl TierRule {
    pub fn new(
        name: &str,
        predicate: RulePredicate,
        impact_level: ImpactLevel,
        connection_type: ConnectionType,
        placement: Placement,
    ) -> TierRule {
        TierRule {
            name: String::from(name),
            predicate,
            multiplier: impact_level.base_multiplier(),
            impact_level,
            connection_type,
            placement,
        }
    }

    /// the default table. near-center and shared-node roads are connected; distance
    /// tiers and arterial reach only place roads in the nearby list.
    pub fn default_rules() -> Vec<TierRule> {
        use ConnectionType as C;
        use ImpactLevel as L;
        use RoadFamily as F;
        vec![
            TierRule::new(
                "passes-near-center",
                RulePredicate::PassesNearCenter {
                    within_meters: 180.0,
                },
                L::Direct,
                C::Proximity,
                Placement::Connected,
            ),
            TierRule::new(
                "shares-node-with-main",
                RulePredicate::SharesNodeWithMain,
                L::High,
                C::Intersection,
                Placement::Connected,
            ),
            TierRule::new(
                "exit-route",
                RulePredicate::ExitRoute {
                    within_meters: 800.0,
                },
                L::Medium,
                C::Intersection,
                Placement::Connected,
            ),
            TierRule::new(
                "within-160m",
                RulePredicate::WithinDistance {
                    max_distance_meters: 160.0,
                    families: vec![F::Trunk, F::Primary, F::Secondary],
                    requires_trunk_access: true,
                },
                L::MediumHigh,
                C::Proximity,
                Placement::Nearby,
            ),
            TierRule::new(
                "within-300m",
                RulePredicate::WithinDistance {
                    max_distance_meters: 300.0,
                    families: vec![F::Trunk, F::Primary],
                    requires_trunk_access: true,
                },
                L::Medium,
                C::Proximity,
                Placement::Nearby,
            ),
            TierRule::new(
                "within-500m",
                RulePredicate::WithinDistance {
                    max_distance_meters: 500.0,
                    families: vec![F::Trunk],
                    requires_trunk_access: true,
                },
                L::Low,
                C::Proximity,
                Placement::Nearby,
            ),
            TierRule::new(
                "arterial-reach",
                RulePredicate::ArterialReach {
                    within_meters: 800.0,
                },
                L::Low,
                C::Proximity,
                Placement::Nearby,
            ),
        ]
    }
}
