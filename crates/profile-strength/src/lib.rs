//! Profile strength scoring and gap-detection engine.
//!
//! Ingests a flattened collection of career intelligence items and
//! derives, from that one immutable snapshot:
//!
//! - a composite [`StrengthScore`] (0-100, six sub-scores, a level),
//! - a [`QualityDistribution`] cross-tabulated by trust tier and category,
//! - a prioritized list of remediation [`Mission`]s with caller-bound
//!   actions.
//!
//! Every function here is pure and synchronous; the engine performs no
//! I/O, holds no state, and never mutates its inputs. Callers re-snapshot
//! and re-invoke [`assess_profile`] whenever the underlying vault changes;
//! full recomputation keeps output trivially consistent with input.
//!
//! Missing or malformed input fields are defaulted to their most
//! conservative interpretation (lowest trust tier, maximum staleness,
//! zero contribution) rather than raised. An empty vault is a valid
//! minimal state: total 0, level Developing, no missions.

pub mod freshness;
pub mod missions;
pub mod models;
pub mod quality;
pub mod scoring;
pub mod snapshot;

use chrono::{DateTime, Utc};

pub use freshness::freshness_multiplier;
pub use missions::{generate_missions, Mission, MissionAction, MissionActions, MissionKind};
pub use models::{Category, ImpactMetric, IntelligenceItem, ItemDetail, QualityTier};
pub use quality::{compute_quality_distribution, QualityDistribution};
pub use scoring::{
    compute_strength_score, ScoringConfig, StrengthLevel, StrengthScore, TierWeights,
};
pub use snapshot::{items_from_snapshot, SnapshotError};

/// Everything derived from one vault snapshot. Discarded and recomputed
/// on the next vault-data-changed event; no field outlives its source.
#[derive(Debug, Clone)]
pub struct ProfileAssessment {
    pub score: StrengthScore,
    pub distribution: QualityDistribution,
    pub missions: Vec<Mission>,
}

/// One-call recomputation over a snapshot: classifies quality, scores
/// strength, and derives missions, in that order.
pub fn assess_profile(
    items: &[IntelligenceItem],
    now: DateTime<Utc>,
    target_role: Option<&str>,
    actions: &MissionActions,
    config: &ScoringConfig,
) -> ProfileAssessment {
    let distribution = compute_quality_distribution(items);
    let score = compute_strength_score(items, now, config);
    let missions = generate_missions(items, &score, &distribution, now, target_role, actions);
    ProfileAssessment {
        score,
        distribution,
        missions,
    }
}
