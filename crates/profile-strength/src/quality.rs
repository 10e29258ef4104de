//! Quality classification: cross-tabulation of vault items by trust tier
//! and category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Category, IntelligenceItem, QualityTier};

/// Derived, non-owning view of how vault evidence is distributed across
/// trust tiers. Recomputed fresh on every pass; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityDistribution {
    /// Item count per tier. All four tiers are always present, so the
    /// sum invariant holds without key probing.
    pub per_tier: BTreeMap<QualityTier, usize>,
    /// Item count per (tier, category) pair. Only populated pairs appear.
    pub per_tier_per_category: BTreeMap<QualityTier, BTreeMap<Category, usize>>,
    /// Assumed-tier items awaiting user verification. Any assumed item
    /// is by definition a verification candidate.
    pub assumed_needing_review: usize,
}

impl QualityDistribution {
    pub fn count(&self, tier: QualityTier) -> usize {
        self.per_tier.get(&tier).copied().unwrap_or(0)
    }

    /// Total items across all tiers. Equals the input collection size:
    /// no item is dropped or double-counted.
    pub fn total(&self) -> usize {
        self.per_tier.values().sum()
    }
}

/// Cross-tabulates the item collection by tier and category.
///
/// Performs no error signaling: items arrive with their tier already
/// defaulted, so every item lands in exactly one bucket.
pub fn compute_quality_distribution(items: &[IntelligenceItem]) -> QualityDistribution {
    let mut per_tier: BTreeMap<QualityTier, usize> =
        QualityTier::ALL.iter().map(|t| (*t, 0)).collect();
    let mut per_tier_per_category: BTreeMap<QualityTier, BTreeMap<Category, usize>> =
        BTreeMap::new();

    for item in items {
        let tier = item.quality_tier;
        *per_tier.entry(tier).or_insert(0) += 1;
        *per_tier_per_category
            .entry(tier)
            .or_default()
            .entry(item.category())
            .or_insert(0) += 1;
    }

    let assumed_needing_review = per_tier[&QualityTier::Assumed];

    QualityDistribution {
        per_tier,
        per_tier_per_category,
        assumed_needing_review,
    }
}
