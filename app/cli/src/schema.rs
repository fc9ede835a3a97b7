//! JSON Schema for the configuration file.

use crate::config::LevelsConfig;

/// Canonical location of the published schema.
const SCHEMA_ID: &str =
    "https://raw.githubusercontent.com/marcosmoura/wslevels/main/wslevels.schema.json";

/// Generates a JSON Schema for the wslevels configuration.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(LevelsConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Generates the configuration JSON Schema as a pretty-printed string.
#[must_use]
pub fn print_schema() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid_json() {
        let parsed: serde_json::Value = serde_json::from_str(&print_schema()).unwrap();

        assert_eq!(parsed["$id"], SCHEMA_ID);
        assert_eq!(parsed["title"], "LevelsConfig");
        assert!(parsed["properties"]["windowManager"].is_object());
        assert!(parsed["properties"]["state"].is_object());
    }

    #[test]
    fn test_schema_describes_nested_types() {
        let parsed: serde_json::Value = serde_json::from_str(&print_schema()).unwrap();

        let wm = &parsed["$defs"]["WindowManagerConfig"];
        assert!(wm["properties"]["msgCommand"].is_object());
        assert!(parsed["$defs"]["StateConfig"].is_object());
    }

    #[test]
    fn test_schema_json_is_pretty_printed() {
        assert!(print_schema().contains('\n'));
    }
}
