//! Boundary adapter: flattens a vault snapshot (category name -> ordered
//! record list) into the uniform item collection the engine consumes.
//!
//! The store's producers are not under our control, so parsing is
//! default-never-fail: unknown record fields are ignored, missing or
//! malformed fields resolve to their most conservative default, and only
//! a snapshot that is not a JSON object at the top level is rejected.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{Category, ImpactMetric, IntelligenceItem, ItemDetail, QualityTier};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("vault snapshot must be a JSON object keyed by category, got {0}")]
    NotAnObject(&'static str),
}

/// Flattens a vault snapshot into intelligence items.
///
/// Records under unrecognized category keys are skipped (with a debug
/// log); every record under a known category yields exactly one item, so
/// counts are preserved into the quality distribution.
pub fn items_from_snapshot(snapshot: &Value) -> Result<Vec<IntelligenceItem>, SnapshotError> {
    let map = snapshot
        .as_object()
        .ok_or_else(|| SnapshotError::NotAnObject(json_type_name(snapshot)))?;

    let mut items = Vec::new();
    for (key, value) in map {
        let Some(category) = Category::parse(key) else {
            debug!(category = %key, "skipping unknown vault category");
            continue;
        };
        let Some(records) = value.as_array() else {
            debug!(category = %key, "skipping category whose value is not an array");
            continue;
        };
        for record in records {
            items.push(item_from_record(category, record));
        }
    }
    Ok(items)
}

/// Builds one item from one store record. Never fails: a record that is
/// not even an object becomes a fully-defaulted item so it still counts.
fn item_from_record(category: Category, record: &Value) -> IntelligenceItem {
    IntelligenceItem {
        id: record
            .get("id")
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default(),
        quality_tier: QualityTier::parse_or_default(str_field(record, &["qualityTier", "quality_tier"])),
        last_updated_at: datetime_field(record, &["lastUpdatedAt", "last_updated_at"]),
        created_at: datetime_field(record, &["createdAt", "created_at"]),
        detail: detail_from_record(category, record),
    }
}

fn detail_from_record(category: Category, record: &Value) -> ItemDetail {
    match category {
        Category::Achievements => ItemDetail::Achievements {
            impact_metrics: impact_metrics(record),
            keywords: str_list(record, "keywords"),
        },
        Category::TransferableSkills => ItemDetail::TransferableSkills {
            keywords: str_list(record, "keywords"),
            proficiency: str_field(record, &["proficiency"]).map(String::from),
        },
        Category::HiddenCompetencies => ItemDetail::HiddenCompetencies {
            source_context: str_field(record, &["sourceContext", "source_context"]).map(String::from),
        },
        Category::SoftSkills => ItemDetail::SoftSkills {
            examples: str_list(record, "examples"),
        },
        Category::LeadershipPhilosophy => ItemDetail::LeadershipPhilosophy {
            statement: str_field(record, &["statement"]).map(String::from),
        },
        Category::ExecutivePresence => ItemDetail::ExecutivePresence {
            indicators: str_list(record, "indicators"),
        },
        Category::PersonalityTraits => ItemDetail::PersonalityTraits {
            descriptor: str_field(record, &["descriptor"]).map(String::from),
        },
        Category::WorkStyle => ItemDetail::WorkStyle {
            preferences: str_list(record, "preferences"),
        },
        Category::Values => ItemDetail::Values {
            statement: str_field(record, &["statement"]).map(String::from),
        },
        Category::BehavioralIndicators => ItemDetail::BehavioralIndicators {
            observed_in: str_field(record, &["observedIn", "observed_in"]).map(String::from),
        },
    }
}

/// Parses `impactMetrics` leniently: structured objects keep their label
/// and unit, bare numbers still count as evidence, anything else is
/// dropped from the list.
fn impact_metrics(record: &Value) -> Vec<ImpactMetric> {
    let Some(raw) = record
        .get("impactMetrics")
        .or_else(|| record.get("impact_metrics"))
        .and_then(|v| v.as_array())
    else {
        return vec![];
    };

    raw.iter()
        .filter_map(|entry| match entry {
            Value::Object(obj) => {
                let value = obj.get("value").and_then(|v| v.as_f64())?;
                Some(ImpactMetric {
                    label: obj
                        .get("label")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    value,
                    unit: obj.get("unit").and_then(|v| v.as_str()).map(String::from),
                })
            }
            Value::Number(n) => n.as_f64().map(|value| ImpactMetric {
                label: String::new(),
                value,
                unit: None,
            }),
            _ => None,
        })
        .collect()
}

fn str_field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| record.get(*key))
        .and_then(|v| v.as_str())
}

fn str_list(record: &Value, key: &str) -> Vec<String> {
    record
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn datetime_field(record: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    str_field(record, keys)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object_snapshot() {
        let err = items_from_snapshot(&json!(["not", "a", "map"])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_flattens_known_categories_and_skips_unknown() {
        let snapshot = json!({
            "achievements": [
                { "id": "a1", "qualityTier": "gold", "lastUpdatedAt": "2026-08-01T00:00:00Z" }
            ],
            "values": [
                { "id": "v1", "statement": "craftsmanship" }
            ],
            "job_applications": [
                { "id": "ignored" }
            ]
        });
        let items = items_from_snapshot(&snapshot).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|i| i.category() == Category::Achievements));
        assert!(items.iter().any(|i| i.category() == Category::Values));
    }

    #[test]
    fn test_tolerates_extra_fields_and_defaults_missing_ones() {
        let snapshot = json!({
            "achievements": [
                {
                    "id": "a1",
                    "qualityTier": "platinum",
                    "extractedBy": "pipeline-v3",
                    "uiHints": { "pinned": true }
                }
            ]
        });
        let items = items_from_snapshot(&snapshot).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quality_tier, QualityTier::Assumed);
        assert_eq!(items[0].effective_timestamp(), None);
    }

    #[test]
    fn test_malformed_record_still_counts() {
        let snapshot = json!({ "soft_skills": ["just a string", 42] });
        let items = items_from_snapshot(&snapshot).unwrap();
        assert_eq!(items.len(), 2);
        for item in &items {
            assert_eq!(item.quality_tier, QualityTier::Assumed);
            assert!(item.id.is_empty());
            assert_eq!(item.effective_timestamp(), None);
        }
    }

    #[test]
    fn test_last_updated_falls_back_to_created() {
        let snapshot = json!({
            "work_style": [
                { "id": "w1", "createdAt": "2026-05-10T12:00:00Z" }
            ]
        });
        let items = items_from_snapshot(&snapshot).unwrap();
        let ts = items[0].effective_timestamp().unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-05-10T12:00:00+00:00");
    }

    #[test]
    fn test_invalid_timestamp_is_treated_as_absent() {
        let snapshot = json!({
            "achievements": [
                { "id": "a1", "lastUpdatedAt": "last tuesday" }
            ]
        });
        let items = items_from_snapshot(&snapshot).unwrap();
        assert_eq!(items[0].effective_timestamp(), None);
    }

    #[test]
    fn test_impact_metrics_parsed_leniently() {
        let snapshot = json!({
            "achievements": [
                {
                    "id": "a1",
                    "impactMetrics": [
                        { "label": "revenue growth", "value": 40.0, "unit": "%" },
                        12.5,
                        { "label": "no value here" },
                        "not a metric"
                    ],
                    "keywords": ["Cloud", 7, "DevOps"]
                }
            ]
        });
        let items = items_from_snapshot(&snapshot).unwrap();
        let ItemDetail::Achievements {
            impact_metrics,
            keywords,
        } = &items[0].detail
        else {
            panic!("expected achievement detail");
        };
        assert_eq!(impact_metrics.len(), 2);
        assert_eq!(impact_metrics[0].label, "revenue growth");
        assert_eq!(impact_metrics[1].value, 12.5);
        assert_eq!(keywords, &["Cloud".to_string(), "DevOps".to_string()]);
    }

    #[test]
    fn test_numeric_id_becomes_opaque_string() {
        let snapshot = json!({ "values": [ { "id": 1042 } ] });
        let items = items_from_snapshot(&snapshot).unwrap();
        assert_eq!(items[0].id, "1042");
    }
}
