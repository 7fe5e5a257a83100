use schemars::schema_for;
use serde_json::json;

use mockgrid_core::Template;

#[test]
fn template_schema_describes_settings_and_columns() {
    let schema = serde_json::to_value(schema_for!(Template)).expect("serialize schema");

    assert_eq!(schema["title"], json!("Template"));
    assert_eq!(schema["required"], json!(["columns"]));
    assert!(schema["properties"]["settings"].is_object());
    assert_eq!(
        schema["properties"]["columns"]["additionalProperties"]["$ref"],
        json!("#/definitions/Field")
    );

    let settings = &schema["definitions"]["Settings"]["properties"];
    for key in ["rows", "includeHeaders", "index"] {
        assert!(settings.get(key).is_some(), "missing settings.{key}");
    }
}

#[test]
fn rule_and_part_tags_are_documented() {
    let schema = serde_json::to_value(schema_for!(Template)).expect("serialize schema");
    let definitions = &schema["definitions"];

    let rule = definitions["Rule"].to_string();
    for tag in ["library", "loremIpsum", "number", "random", "date", "composite"] {
        assert!(rule.contains(&format!("\"{tag}\"")), "Rule schema lacks {tag}");
    }

    let part = definitions["Part"].to_string();
    for tag in ["static", "field", "list"] {
        assert!(part.contains(&format!("\"{tag}\"")), "Part schema lacks {tag}");
    }
}
