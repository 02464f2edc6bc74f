//! Step list import validation and export.
//!
//! Wire shape, in both directions:
//!
//! ```json
//! [{ "time": 45, "category": "Chicken", "description": "Pre-heat grill" }]
//! ```
//!
//! `time` is minutes before completion. Any `id` in the input is ignored and
//! every imported step gets a fresh identity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ImportError;
use crate::timer::{order_steps, Step};

/// Largest accepted `time`, in minutes (one year).
pub const MAX_OFFSET_MIN: f64 = 525_600.0;

/// Exported form of a step: the engine id is stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub time: f64,
    pub category: String,
    pub description: String,
}

impl From<&Step> for StepRecord {
    fn from(step: &Step) -> Self {
        Self {
            time: step.offset_min,
            category: step.category.clone(),
            description: step.description.clone(),
        }
    }
}

/// Validate `raw` and build a fresh, ordered step list.
///
/// Stops at the first invalid element.
pub fn import_steps(raw: &str) -> Result<Vec<Step>, ImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ImportError::Parse(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(ImportError::Parse("input must be an array of steps".into()));
    };

    let mut steps = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            validate_step(item).map_err(|reason| ImportError::Schema { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    order_steps(&mut steps);
    Ok(steps)
}

fn validate_step(item: &Value) -> Result<Step, String> {
    let obj = item
        .as_object()
        .ok_or_else(|| "step must be an object".to_string())?;
    let time = obj
        .get("time")
        .and_then(Value::as_f64)
        .ok_or_else(|| "'time' must be a number".to_string())?;
    if !time.is_finite() || time < 0.0 {
        return Err(format!("'time' must be a non-negative number, got {time}"));
    }
    if time > MAX_OFFSET_MIN {
        return Err(format!("'time' must be at most {MAX_OFFSET_MIN} minutes, got {time}"));
    }
    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .ok_or_else(|| "'category' must be a string".to_string())?;
    let description = obj
        .get("description")
        .and_then(Value::as_str)
        .ok_or_else(|| "'description' must be a string".to_string())?;
    Ok(Step::new(time, category, description))
}

/// Serialize steps in their store order, ids stripped.
pub fn export_steps(steps: &[Step]) -> Result<String, serde_json::Error> {
    let records: Vec<StepRecord> = steps.iter().map(StepRecord::from).collect();
    serde_json::to_string_pretty(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::default_steps;

    #[test]
    fn imports_single_step() {
        let steps = import_steps(r#"[{"time":5,"category":"A","description":"x"}]"#).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].offset_min, 5.0);
        assert_eq!(steps[0].category, "A");
        assert_eq!(steps[0].description, "x");
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(import_steps("not json"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn rejects_non_array() {
        let err = import_steps(r#"{"time":5,"category":"A","description":"x"}"#).unwrap_err();
        assert_eq!(err, ImportError::Parse("input must be an array of steps".into()));
    }

    #[test]
    fn string_time_is_schema_error_at_index() {
        let err = import_steps(r#"[{"time":"x","category":"A","description":"x"}]"#).unwrap_err();
        assert!(matches!(err, ImportError::Schema { index: 0, .. }));
    }

    #[test]
    fn reports_first_failure_only() {
        let raw = r#"[
            {"time":5,"category":"A","description":"ok"},
            {"time":4,"category":3,"description":"bad category"},
            {"time":"x","category":"A","description":"bad time"}
        ]"#;
        let err = import_steps(raw).unwrap_err();
        assert_eq!(
            err,
            ImportError::Schema {
                index: 1,
                reason: "'category' must be a string".into()
            }
        );
    }

    #[test]
    fn rejects_negative_time_and_non_objects() {
        let err = import_steps(r#"[{"time":-1,"category":"A","description":"x"}]"#).unwrap_err();
        assert!(matches!(err, ImportError::Schema { index: 0, .. }));
        let err = import_steps(r#"[{"time":1,"category":"A","description":"x"}, 7]"#).unwrap_err();
        assert!(matches!(err, ImportError::Schema { index: 1, .. }));
    }

    #[test]
    fn rejects_time_beyond_one_year() {
        let raw = r#"[
            {"time":5,"category":"A","description":"ok"},
            {"time":1e12,"category":"A","description":"too far"}
        ]"#;
        let err = import_steps(raw).unwrap_err();
        assert!(matches!(err, ImportError::Schema { index: 1, .. }));
        let at_limit = format!(r#"[{{"time":{MAX_OFFSET_MIN},"category":"A","description":"x"}}]"#);
        assert!(import_steps(&at_limit).is_ok());
    }

    #[test]
    fn supplied_ids_are_replaced() {
        let steps =
            import_steps(r#"[{"id":"abc","time":5,"category":"A","description":"x"}]"#).unwrap();
        assert_ne!(steps[0].id.to_string(), "abc");
    }

    #[test]
    fn output_is_sorted_descending() {
        let raw = r#"[
            {"time":0,"category":"A","description":"end"},
            {"time":12.5,"category":"B","description":"start"}
        ]"#;
        let steps = import_steps(raw).unwrap();
        assert_eq!(steps[0].description, "start");
        assert_eq!(steps[1].description, "end");
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(import_steps("[]").unwrap().is_empty());
    }

    #[test]
    fn export_strips_ids_and_reimports() {
        let steps = default_steps();
        let json = export_steps(&steps).unwrap();
        assert!(!json.contains("\"id\""));
        let records: Vec<StepRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].time, 45.0);
        assert_eq!(records[9].description, "Carve");
    }
}
