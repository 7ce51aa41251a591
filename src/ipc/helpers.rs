use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::ipc::error::err;
use crate::ipc::types::Request;

pub fn required_str(req: &Request, key: &str) -> Result<String, Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn optional_str(req: &Request, key: &str) -> Option<String> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
}

pub fn params_object(req: &Request) -> Option<&Map<String, Value>> {
    req.params.as_object().filter(|m| !m.is_empty())
}

pub fn parse_params<T: DeserializeOwned>(req: &Request) -> Result<T, Value> {
    let raw = if req.params.is_null() {
        Value::Object(Map::new())
    } else {
        req.params.clone()
    };
    serde_json::from_value(raw).map_err(|e| err(&req.id, "bad_params", e.to_string(), None))
}

/// Overlays the keys of `patch` onto `draft`. Unknown keys are ignored and a
/// mistyped value leaves the draft as it was.
pub fn merge_draft<T>(draft: &T, patch: &Map<String, Value>) -> Result<T, String>
where
    T: Serialize + DeserializeOwned,
{
    let mut current = serde_json::to_value(draft).map_err(|e| e.to_string())?;
    let obj = current
        .as_object_mut()
        .ok_or_else(|| "draft must be a JSON object".to_string())?;
    for (k, v) in patch {
        if obj.contains_key(k) {
            obj.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(current).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SubjectDraft;
    use serde_json::json;

    #[test]
    fn merge_overlays_known_keys_only() {
        let draft = SubjectDraft {
            name: "Calculus".into(),
            ..Default::default()
        };
        let patch = json!({ "category": "Math", "maxStudents": 30, "bogus": true });
        let merged = merge_draft(&draft, patch.as_object().expect("object")).expect("merge");
        assert_eq!(merged.name, "Calculus");
        assert_eq!(merged.category, "Math");
        assert_eq!(merged.max_students, 30);
    }

    #[test]
    fn merge_rejects_mistyped_values() {
        let patch = json!({ "credits": "four" });
        assert!(merge_draft(&SubjectDraft::default(), patch.as_object().expect("object")).is_err());
    }
}
