use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trust tier of one piece of career evidence.
///
/// `Assumed` is the default: an item with no recorded tier is treated as
/// the least-trusted evidence, never as an error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Gold,
    Silver,
    Bronze,
    #[default]
    Assumed,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Gold,
        QualityTier::Silver,
        QualityTier::Bronze,
        QualityTier::Assumed,
    ];

    /// Parses a stored tier string. Anything unrecognized falls back to
    /// `Assumed` (most conservative default).
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some(s) if s.eq_ignore_ascii_case("gold") => QualityTier::Gold,
            Some(s) if s.eq_ignore_ascii_case("silver") => QualityTier::Silver,
            Some(s) if s.eq_ignore_ascii_case("bronze") => QualityTier::Bronze,
            _ => QualityTier::Assumed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Gold => "gold",
            QualityTier::Silver => "silver",
            QualityTier::Bronze => "bronze",
            QualityTier::Assumed => "assumed",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed set of vault categories. Every intelligence item belongs to
/// exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Achievements,
    TransferableSkills,
    HiddenCompetencies,
    SoftSkills,
    LeadershipPhilosophy,
    ExecutivePresence,
    PersonalityTraits,
    WorkStyle,
    Values,
    BehavioralIndicators,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Achievements,
        Category::TransferableSkills,
        Category::HiddenCompetencies,
        Category::SoftSkills,
        Category::LeadershipPhilosophy,
        Category::ExecutivePresence,
        Category::PersonalityTraits,
        Category::WorkStyle,
        Category::Values,
        Category::BehavioralIndicators,
    ];

    /// The seven softer categories aggregated into the intangibles
    /// sub-score.
    pub const INTANGIBLES: [Category; 7] = [
        Category::SoftSkills,
        Category::LeadershipPhilosophy,
        Category::ExecutivePresence,
        Category::PersonalityTraits,
        Category::WorkStyle,
        Category::Values,
        Category::BehavioralIndicators,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Achievements => "achievements",
            Category::TransferableSkills => "transferable_skills",
            Category::HiddenCompetencies => "hidden_competencies",
            Category::SoftSkills => "soft_skills",
            Category::LeadershipPhilosophy => "leadership_philosophy",
            Category::ExecutivePresence => "executive_presence",
            Category::PersonalityTraits => "personality_traits",
            Category::WorkStyle => "work_style",
            Category::Values => "values",
            Category::BehavioralIndicators => "behavioral_indicators",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Category::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    pub fn is_intangible(&self) -> bool {
        Category::INTANGIBLES.contains(self)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured piece of numeric evidence attached to an achievement,
/// e.g. `{ label: "revenue growth", value: 40.0, unit: "%" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactMetric {
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Category-specific payload. Fields the sub-scores read (`impact_metrics`,
/// `keywords`) only exist on the variants that actually carry them, so
/// they are only reachable behind a category match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ItemDetail {
    Achievements {
        #[serde(default)]
        impact_metrics: Vec<ImpactMetric>,
        #[serde(default)]
        keywords: Vec<String>,
    },
    TransferableSkills {
        #[serde(default)]
        keywords: Vec<String>,
        #[serde(default)]
        proficiency: Option<String>,
    },
    HiddenCompetencies {
        #[serde(default)]
        source_context: Option<String>,
    },
    SoftSkills {
        #[serde(default)]
        examples: Vec<String>,
    },
    LeadershipPhilosophy {
        #[serde(default)]
        statement: Option<String>,
    },
    ExecutivePresence {
        #[serde(default)]
        indicators: Vec<String>,
    },
    PersonalityTraits {
        #[serde(default)]
        descriptor: Option<String>,
    },
    WorkStyle {
        #[serde(default)]
        preferences: Vec<String>,
    },
    Values {
        #[serde(default)]
        statement: Option<String>,
    },
    BehavioralIndicators {
        #[serde(default)]
        observed_in: Option<String>,
    },
}

impl ItemDetail {
    pub fn category(&self) -> Category {
        match self {
            ItemDetail::Achievements { .. } => Category::Achievements,
            ItemDetail::TransferableSkills { .. } => Category::TransferableSkills,
            ItemDetail::HiddenCompetencies { .. } => Category::HiddenCompetencies,
            ItemDetail::SoftSkills { .. } => Category::SoftSkills,
            ItemDetail::LeadershipPhilosophy { .. } => Category::LeadershipPhilosophy,
            ItemDetail::ExecutivePresence { .. } => Category::ExecutivePresence,
            ItemDetail::PersonalityTraits { .. } => Category::PersonalityTraits,
            ItemDetail::WorkStyle { .. } => Category::WorkStyle,
            ItemDetail::Values { .. } => Category::Values,
            ItemDetail::BehavioralIndicators { .. } => Category::BehavioralIndicators,
        }
    }

    /// Empty payload for a category — used when a record carries no
    /// recognizable category-specific fields.
    pub fn empty(category: Category) -> Self {
        match category {
            Category::Achievements => ItemDetail::Achievements {
                impact_metrics: vec![],
                keywords: vec![],
            },
            Category::TransferableSkills => ItemDetail::TransferableSkills {
                keywords: vec![],
                proficiency: None,
            },
            Category::HiddenCompetencies => ItemDetail::HiddenCompetencies {
                source_context: None,
            },
            Category::SoftSkills => ItemDetail::SoftSkills { examples: vec![] },
            Category::LeadershipPhilosophy => ItemDetail::LeadershipPhilosophy { statement: None },
            Category::ExecutivePresence => ItemDetail::ExecutivePresence { indicators: vec![] },
            Category::PersonalityTraits => ItemDetail::PersonalityTraits { descriptor: None },
            Category::WorkStyle => ItemDetail::WorkStyle { preferences: vec![] },
            Category::Values => ItemDetail::Values { statement: None },
            Category::BehavioralIndicators => ItemDetail::BehavioralIndicators { observed_in: None },
        }
    }
}

/// One unit of career evidence from the vault.
///
/// The engine never mutates items; a scoring pass treats the whole
/// collection as an immutable snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligenceItem {
    /// Opaque identifier assigned by the producing store.
    pub id: String,
    #[serde(default)]
    pub quality_tier: QualityTier,
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub detail: ItemDetail,
}

impl IntelligenceItem {
    pub fn category(&self) -> Category {
        self.detail.category()
    }

    /// Effective freshness timestamp: `last_updated_at`, falling back to
    /// `created_at`. `None` means maximally stale.
    pub fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_updated_at.or(self.created_at)
    }
}
