//! JSON formatter for machine-readable listings

use crate::{
    config::ValidationWarning,
    conf::KeyValueStore,
    error::Result,
};
use super::formatter::{ordered_entries, OutputFormatter};
use serde_json::{json, Map, Value};

/// Formatter that emits JSON documents
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_entries(&self, store: &dyn KeyValueStore, sorted: bool) -> Result<String> {
        let mut object = Map::new();
        for (key, value) in ordered_entries(store, sorted) {
            object.insert(key.to_string(), Value::String(value.to_string()));
        }
        Ok(format!("{}\n", serde_json::to_string_pretty(&Value::Object(object))?))
    }

    fn format_value(&self, value: &str) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string(value)?))
    }

    fn format_warnings(&self, warnings: &[ValidationWarning]) -> Result<String> {
        let items: Vec<Value> = warnings
            .iter()
            .map(|w| json!({ "level": w.level.as_str(), "message": w.message }))
            .collect();
        Ok(format!("{}\n", serde_json::to_string_pretty(&items)?))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("{}\n", json!({ "status": message })))
    }
}
