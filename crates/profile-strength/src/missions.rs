//! Gap detection: turns the current snapshot plus its derived score and
//! distribution into a ranked list of remediation missions.
//!
//! Missions are ephemeral. They exist only as the result of one
//! generation call and are discarded once acted upon or re-derived.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::freshness::{is_stale, AGING_DAYS};
use crate::models::{IntelligenceItem, ItemDetail};
use crate::quality::QualityDistribution;
use crate::scoring::StrengthScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    VerifyAssumed,
    AddMetrics,
    RefreshStale,
}

/// Zero-argument action bound to a mission. Supplied by the caller and
/// executed on user interaction; the engine itself performs no I/O.
pub type MissionAction = Arc<dyn Fn() + Send + Sync>;

/// Caller-injected callbacks, one per mission kind. Typically these
/// route to the UI surface that resolves the gap.
#[derive(Clone)]
pub struct MissionActions {
    pub verify_assumed: MissionAction,
    pub add_metrics: MissionAction,
    pub refresh_stale: MissionAction,
}

impl MissionActions {
    /// Actions that do nothing. Useful for headless scoring passes and
    /// tests that only inspect kinds and descriptions.
    pub fn noop() -> Self {
        let noop: MissionAction = Arc::new(|| {});
        Self {
            verify_assumed: Arc::clone(&noop),
            add_metrics: Arc::clone(&noop),
            refresh_stale: noop,
        }
    }
}

/// One actionable remediation suggestion. Position in the generated list
/// is the priority order; there is no separate priority score.
#[derive(Clone)]
pub struct Mission {
    pub kind: MissionKind,
    pub description: String,
    action: MissionAction,
}

impl Mission {
    pub fn run(&self) {
        (self.action)()
    }
}

impl std::fmt::Debug for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mission")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Derives missions from the snapshot and its derived views.
///
/// Deterministic: identical inputs always produce the identical list, in
/// the fixed order verify-assumed, add-metrics, refresh-stale. At most
/// one mission of each kind is emitted.
pub fn generate_missions(
    items: &[IntelligenceItem],
    score: &StrengthScore,
    distribution: &QualityDistribution,
    now: DateTime<Utc>,
    target_role: Option<&str>,
    actions: &MissionActions,
) -> Vec<Mission> {
    let mut missions = Vec::new();

    if distribution.assumed_needing_review > 0 {
        let description = match target_role {
            Some(role) => format!(
                "Verify {} assumed item(s) so your {} profile rests on confirmed evidence",
                distribution.assumed_needing_review, role
            ),
            None => format!(
                "Verify {} assumed item(s) to raise their trust tier",
                distribution.assumed_needing_review
            ),
        };
        missions.push(Mission {
            kind: MissionKind::VerifyAssumed,
            description,
            action: Arc::clone(&actions.verify_assumed),
        });
    }

    let unquantified = items
        .iter()
        .filter(|item| {
            matches!(
                &item.detail,
                ItemDetail::Achievements { impact_metrics, .. } if impact_metrics.is_empty()
            )
        })
        .count();
    if unquantified > 0 {
        missions.push(Mission {
            kind: MissionKind::AddMetrics,
            description: format!(
                "Add impact metrics to {} achievement(s) (quantification score {}/15)",
                unquantified, score.quantification_score
            ),
            action: Arc::clone(&actions.add_metrics),
        });
    }

    let stale = items
        .iter()
        .filter(|item| is_stale(item.effective_timestamp(), now))
        .count();
    if stale > 0 {
        missions.push(Mission {
            kind: MissionKind::RefreshStale,
            description: format!(
                "Refresh {} item(s) not updated in over {} days",
                stale, AGING_DAYS
            ),
            action: Arc::clone(&actions.refresh_stale),
        });
    }

    missions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ImpactMetric, QualityTier};
    use crate::quality::compute_quality_distribution;
    use crate::scoring::{compute_strength_score, ScoringConfig};
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn item(
        id: &str,
        tier: QualityTier,
        updated: Option<DateTime<Utc>>,
        detail: ItemDetail,
    ) -> IntelligenceItem {
        IntelligenceItem {
            id: id.to_string(),
            quality_tier: tier,
            last_updated_at: updated,
            created_at: None,
            detail,
        }
    }

    fn quantified_achievement(id: &str, tier: QualityTier, updated: DateTime<Utc>) -> IntelligenceItem {
        item(
            id,
            tier,
            Some(updated),
            ItemDetail::Achievements {
                impact_metrics: vec![ImpactMetric {
                    label: "throughput".to_string(),
                    value: 3.0,
                    unit: Some("x".to_string()),
                }],
                keywords: vec![],
            },
        )
    }

    fn derive(
        items: &[IntelligenceItem],
        now: DateTime<Utc>,
        actions: &MissionActions,
    ) -> Vec<Mission> {
        let score = compute_strength_score(items, now, &ScoringConfig::default());
        let distribution = compute_quality_distribution(items);
        generate_missions(items, &score, &distribution, now, None, actions)
    }

    #[test]
    fn test_empty_vault_yields_no_missions() {
        let missions = derive(&[], Utc::now(), &MissionActions::noop());
        assert!(missions.is_empty());
    }

    #[test]
    fn test_only_verify_assumed_when_no_other_gaps() {
        // Three assumed items, all fresh, all quantified achievements:
        // exactly one mission, the verify-assumed one.
        let now = Utc::now();
        let items: Vec<_> = (0..3)
            .map(|i| quantified_achievement(&format!("a{i}"), QualityTier::Assumed, now))
            .collect();
        let missions = derive(&items, now, &MissionActions::noop());
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].kind, MissionKind::VerifyAssumed);
        assert!(missions[0].description.contains('3'));
    }

    #[test]
    fn test_add_metrics_counts_unquantified_achievements() {
        let now = Utc::now();
        let items = vec![
            quantified_achievement("a1", QualityTier::Gold, now),
            item(
                "a2",
                QualityTier::Gold,
                Some(now),
                ItemDetail::Achievements {
                    impact_metrics: vec![],
                    keywords: vec![],
                },
            ),
            item(
                "a3",
                QualityTier::Gold,
                Some(now),
                ItemDetail::Achievements {
                    impact_metrics: vec![],
                    keywords: vec![],
                },
            ),
        ];
        let missions = derive(&items, now, &MissionActions::noop());
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].kind, MissionKind::AddMetrics);
        assert!(missions[0].description.contains("2 achievement(s)"));
    }

    #[test]
    fn test_refresh_stale_uses_lowest_freshness_band() {
        let now = Utc::now();
        let items = vec![
            quantified_achievement("a1", QualityTier::Gold, now - Duration::days(181)),
            quantified_achievement("a2", QualityTier::Gold, now - Duration::days(180)),
        ];
        let missions = derive(&items, now, &MissionActions::noop());
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].kind, MissionKind::RefreshStale);
        assert!(missions[0].description.contains("1 item(s)"));
    }

    #[test]
    fn test_missing_timestamp_counts_as_stale() {
        let now = Utc::now();
        let items = vec![item(
            "v1",
            QualityTier::Gold,
            None,
            ItemDetail::empty(Category::Values),
        )];
        let missions = derive(&items, now, &MissionActions::noop());
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].kind, MissionKind::RefreshStale);
    }

    #[test]
    fn test_all_three_gaps_in_priority_order() {
        let now = Utc::now();
        let items = vec![
            item(
                "a1",
                QualityTier::Assumed,
                None,
                ItemDetail::Achievements {
                    impact_metrics: vec![],
                    keywords: vec![],
                },
            ),
        ];
        let missions = derive(&items, now, &MissionActions::noop());
        let kinds: Vec<_> = missions.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MissionKind::VerifyAssumed,
                MissionKind::AddMetrics,
                MissionKind::RefreshStale
            ]
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let now = Utc::now();
        let items = vec![
            item(
                "a1",
                QualityTier::Assumed,
                Some(now - Duration::days(200)),
                ItemDetail::Achievements {
                    impact_metrics: vec![],
                    keywords: vec![],
                },
            ),
            quantified_achievement("a2", QualityTier::Gold, now),
        ];
        let actions = MissionActions::noop();
        let first = derive(&items, now, &actions);
        let second = derive(&items, now, &actions);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.description, b.description);
        }
    }

    #[test]
    fn test_run_invokes_bound_callback() {
        let now = Utc::now();
        let counter = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&counter);
        let actions = MissionActions {
            verify_assumed: Arc::new(move || {
                counted.fetch_add(1, Ordering::SeqCst);
            }),
            add_metrics: Arc::new(|| {}),
            refresh_stale: Arc::new(|| {}),
        };
        let items = vec![quantified_achievement("a1", QualityTier::Assumed, now)];
        let missions = derive(&items, now, &actions);
        assert_eq!(missions.len(), 1);
        missions[0].run();
        missions[0].run();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_target_role_in_verify_description() {
        let now = Utc::now();
        let items = vec![quantified_achievement("a1", QualityTier::Assumed, now)];
        let score = compute_strength_score(&items, now, &ScoringConfig::default());
        let distribution = compute_quality_distribution(&items);
        let missions = generate_missions(
            &items,
            &score,
            &distribution,
            now,
            Some("Staff Engineer"),
            &MissionActions::noop(),
        );
        assert!(missions[0].description.contains("Staff Engineer"));
    }
}
