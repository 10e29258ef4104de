//! Composite profile strength scoring.
//!
//! Combines tier trust weights and freshness decay across the whole item
//! collection into a single 0-100 score, six sub-scores, and a
//! qualitative level. Pure and synchronous: the same snapshot and clock
//! always produce bit-identical output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::freshness::freshness_multiplier;
use crate::models::{Category, IntelligenceItem, ItemDetail, QualityTier};

/// Fixed allow-list for the modern-terminology sub-score. Matched
/// case-insensitively as substrings of achievement keywords.
pub const MODERN_VOCABULARY: &[&str] = &[
    "ai",
    "cloud",
    "automation",
    "agile",
    "devops",
    "analytics",
    "machine learning",
    "kubernetes",
];

/// Trust weight per quality tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierWeights {
    pub gold: f64,
    pub silver: f64,
    pub bronze: f64,
    pub assumed: f64,
}

impl TierWeights {
    pub fn weight(&self, tier: QualityTier) -> f64 {
        match tier {
            QualityTier::Gold => self.gold,
            QualityTier::Silver => self.silver,
            QualityTier::Bronze => self.bronze,
            QualityTier::Assumed => self.assumed,
        }
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            gold: 1.0,
            silver: 0.8,
            bronze: 0.6,
            assumed: 0.4,
        }
    }
}

/// Sub-score denominators and ceilings, tuned to a target "complete"
/// vault shape. These are configuration, not derived at runtime; the
/// defaults reproduce the product's published scoring constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub tier_weights: TierWeights,
    /// Achievement count at which the coverage sub-score saturates.
    pub achievements_target: usize,
    pub achievements_ceiling: f64,
    pub transferable_skills_target: usize,
    pub transferable_skills_ceiling: f64,
    pub hidden_competencies_target: usize,
    pub hidden_competencies_ceiling: f64,
    /// Combined count across the seven intangible categories at which
    /// the aggregate sub-score saturates.
    pub intangibles_target: usize,
    pub intangibles_ceiling: f64,
    pub quantification_ceiling: f64,
    pub modern_terminology_ceiling: f64,
    pub modern_vocabulary: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tier_weights: TierWeights::default(),
            achievements_target: 20,
            achievements_ceiling: 10.0,
            transferable_skills_target: 15,
            transferable_skills_ceiling: 10.0,
            hidden_competencies_target: 10,
            hidden_competencies_ceiling: 10.0,
            intangibles_target: 30,
            intangibles_ceiling: 40.0,
            quantification_ceiling: 15.0,
            modern_terminology_ceiling: 15.0,
            modern_vocabulary: MODERN_VOCABULARY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Qualitative label for the composite score. Boundaries are
/// inclusive-lower: exactly 60 is Solid, not Developing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    Developing,
    Solid,
    Strong,
    Elite,
    Exceptional,
}

impl StrengthLevel {
    pub fn from_total(total: u32) -> Self {
        match total {
            0..=59 => StrengthLevel::Developing,
            60..=69 => StrengthLevel::Solid,
            70..=79 => StrengthLevel::Strong,
            80..=89 => StrengthLevel::Elite,
            _ => StrengthLevel::Exceptional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::Developing => "Developing",
            StrengthLevel::Solid => "Solid",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::Elite => "Elite",
            StrengthLevel::Exceptional => "Exceptional",
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived strength report. Recomputed fresh from the current snapshot on
/// every invocation, never cached, so it cannot drift from source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthScore {
    /// Composite score, 0-100.
    pub total: u32,
    pub achievements_score: u32,
    pub transferable_skills_score: u32,
    pub hidden_competencies_score: u32,
    pub intangibles_score: u32,
    pub quantification_score: u32,
    pub modern_terminology_score: u32,
    pub level: StrengthLevel,
}

impl StrengthScore {
    /// Zero-state score for an empty vault. A valid minimal output, not
    /// a fault.
    pub fn zero() -> Self {
        Self {
            total: 0,
            achievements_score: 0,
            transferable_skills_score: 0,
            hidden_competencies_score: 0,
            intangibles_score: 0,
            quantification_score: 0,
            modern_terminology_score: 0,
            level: StrengthLevel::Developing,
        }
    }
}

/// Computes the full strength score for one immutable snapshot.
///
/// Percentage-based sub-scores are rounded half away from zero
/// (`f64::round`), the crate-wide rounding convention.
pub fn compute_strength_score(
    items: &[IntelligenceItem],
    now: DateTime<Utc>,
    config: &ScoringConfig,
) -> StrengthScore {
    if items.is_empty() {
        return StrengthScore::zero();
    }

    let weighted_sum: f64 = items
        .iter()
        .map(|item| {
            config.tier_weights.weight(item.quality_tier)
                * freshness_multiplier(item.effective_timestamp(), now)
        })
        .sum();
    let total = ((weighted_sum / items.len() as f64) * 100.0).round() as u32;

    let achievement_count = count_in(items, Category::Achievements);
    let transferable_count = count_in(items, Category::TransferableSkills);
    let hidden_count = count_in(items, Category::HiddenCompetencies);
    let intangible_count = items.iter().filter(|i| i.category().is_intangible()).count();

    let (with_metrics, with_modern_terms) = achievement_signals(items, &config.modern_vocabulary);

    let quantification_score = proportional_score(
        with_metrics,
        achievement_count,
        config.quantification_ceiling,
    );
    let modern_terminology_score = proportional_score(
        with_modern_terms,
        achievement_count,
        config.modern_terminology_ceiling,
    );

    let score = StrengthScore {
        total,
        achievements_score: coverage_score(
            achievement_count,
            config.achievements_target,
            config.achievements_ceiling,
        ),
        transferable_skills_score: coverage_score(
            transferable_count,
            config.transferable_skills_target,
            config.transferable_skills_ceiling,
        ),
        hidden_competencies_score: coverage_score(
            hidden_count,
            config.hidden_competencies_target,
            config.hidden_competencies_ceiling,
        ),
        intangibles_score: coverage_score(
            intangible_count,
            config.intangibles_target,
            config.intangibles_ceiling,
        ),
        quantification_score,
        modern_terminology_score,
        level: StrengthLevel::from_total(total),
    };

    debug!(
        total = score.total,
        level = %score.level,
        achievements = achievement_count,
        intangibles = intangible_count,
        quantified = with_metrics,
        "strength score computed"
    );

    score
}

fn count_in(items: &[IntelligenceItem], category: Category) -> usize {
    items.iter().filter(|i| i.category() == category).count()
}

/// Counts achievements carrying non-empty impact metrics and those whose
/// keywords hit the modern-terminology vocabulary.
fn achievement_signals(items: &[IntelligenceItem], vocabulary: &[String]) -> (usize, usize) {
    let mut with_metrics = 0;
    let mut with_modern_terms = 0;
    for item in items {
        if let ItemDetail::Achievements {
            impact_metrics,
            keywords,
        } = &item.detail
        {
            if !impact_metrics.is_empty() {
                with_metrics += 1;
            }
            let has_modern_term = keywords.iter().any(|keyword| {
                let keyword = keyword.to_lowercase();
                vocabulary.iter().any(|term| keyword.contains(term.as_str()))
            });
            if has_modern_term {
                with_modern_terms += 1;
            }
        }
    }
    (with_metrics, with_modern_terms)
}

/// Coverage sub-score: linear up to the target count, capped at the
/// ceiling. Volume beyond the target never raises or lowers the score,
/// so depth is rewarded only up to saturation.
fn coverage_score(count: usize, target: usize, ceiling: f64) -> u32 {
    if target == 0 {
        return 0;
    }
    let raw = (count as f64 / target as f64) * ceiling;
    raw.min(ceiling).round() as u32
}

/// Proportion-of-achievements sub-score. Short-circuits to 0 when there
/// are no achievements rather than dividing by zero.
fn proportional_score(hits: usize, achievement_count: usize, ceiling: f64) -> u32 {
    if achievement_count == 0 {
        return 0;
    }
    ((hits as f64 / achievement_count as f64) * ceiling).round() as u32
}
