use crate::combat::DamageParams;
use crate::state::Stats;
use crate::targeting::DistanceMetric;

/// Tunable combat rules for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    pub damage: DamageParams,
    /// Metric for attack/ability range checks. Movement is always Manhattan.
    pub distance_metric: DistanceMetric,
    /// Stats given to combatants spawned without explicit values.
    pub default_stats: Stats,
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: DamageParams) -> Self {
        self.damage = damage;
        self
    }
}
