use serde_json::json;

use mockgrid_core::{
    CellValue, ErrorSink, Field, IndexSettings, Rule, Table, TableError, TableKind, Tag, Template,
};

#[test]
fn columns_keep_declaration_order() {
    let template = Template::from_json(&json!({
        "columns": {
            "zeta": { "list": [1] },
            "alpha": { "autoGenerate": { "type": "number", "min": 1, "max": 2 } },
            "mid": {}
        }
    }))
    .expect("valid template");

    let names: Vec<&str> = template.columns.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    assert_eq!(template.columns["zeta"], Field::List(vec![CellValue::Int(1)]));
    assert!(matches!(
        template.columns["alpha"],
        Field::Generated(Rule::Number(_))
    ));
    assert_eq!(template.columns["mid"], Field::Empty);
}

#[test]
fn settings_default_when_absent() {
    let template = Template::from_json(&json!({ "columns": {} })).expect("valid template");

    assert_eq!(template.settings.rows, 10);
    assert!(!template.settings.include_headers);
    assert_eq!(template.settings.index, None);
}

#[test]
fn settings_use_camel_case_keys() {
    let template = Template::from_json(&json!({
        "settings": { "rows": 3, "includeHeaders": true, "index": { "name": "n", "start": 5 } },
        "columns": {}
    }))
    .expect("valid template");

    assert_eq!(template.settings.rows, 3);
    assert!(template.settings.include_headers);
    let index = template.settings.index.as_ref().expect("index settings");
    assert_eq!(index.column_name(), Some("n"));
    assert_eq!(index.start(), 5);
}

#[test]
fn structural_problems_are_rejected() {
    assert_eq!(
        Template::from_json(&json!(null)).unwrap_err(),
        TableError::InvalidTemplate
    );
    assert_eq!(
        Template::from_json(&json!([1, 2])).unwrap_err(),
        TableError::InvalidTemplate
    );
    assert_eq!(
        Template::from_json(&json!({ "settings": {} })).unwrap_err(),
        TableError::InvalidStructure
    );
    assert_eq!(
        Template::from_json(&json!({ "columns": ["a"] })).unwrap_err(),
        TableError::InvalidStructure
    );

    let err = Template::from_json(&json!({ "settings": { "rows": -1 }, "columns": {} }))
        .unwrap_err();
    assert!(matches!(err, TableError::InvalidSettings(_)));
    assert!(err.is_structural());

    for rows in [json!(2.5), json!("3"), json!(-1.0)] {
        let err = Template::from_json(&json!({ "settings": { "rows": rows }, "columns": {} }))
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidSettings(_)), "rows {rows}");
    }
}

#[test]
fn integral_float_row_counts_are_accepted() {
    let template = Template::from_json(&json!({
        "settings": { "rows": 3.0 },
        "columns": { "a": { "list": ["x"] } }
    }))
    .expect("valid template");
    assert_eq!(template.settings.rows, 3);
}

#[test]
fn template_key_is_an_alias_for_columns() {
    let from_value = Template::from_json(&json!({ "template": { "a": { "list": ["x"] } } }))
        .expect("valid template");
    let deserialized: Template =
        serde_json::from_value(json!({ "template": { "a": { "list": ["x"] } } }))
            .expect("deserialize template");

    assert_eq!(from_value.columns, deserialized.columns);
}

#[test]
fn unknown_rule_types_are_kept_for_reporting() {
    let template = Template::from_json(&json!({
        "columns": {
            "a": { "autoGenerate": { "type": "uuid" } },
            "b": { "autoGenerate": { "value": "firstName" } }
        }
    }))
    .expect("valid template");

    assert_eq!(
        template.columns["a"],
        Field::Generated(Rule::Unsupported(Tag::Unknown("uuid".to_string())))
    );
    assert_eq!(
        template.columns["b"],
        Field::Generated(Rule::Unsupported(Tag::Missing))
    );
}

#[test]
fn layout_puts_the_index_first() {
    let mut template = Template::from_json(&json!({
        "columns": { "id": {}, "name": {} }
    }))
    .expect("valid template");
    assert_eq!(template.layout().names(), &["id", "name"]);

    template.settings.index = Some(IndexSettings::new("id", 1));
    let layout = template.layout();
    assert_eq!(layout.names(), &["id", "id", "name"]);
    assert_eq!(layout.position("id"), Some(0));
    assert_eq!(layout.position("name"), Some(2));
    assert_eq!(layout.position("missing"), None);

    template.settings.index = Some(IndexSettings::default());
    assert_eq!(template.layout().len(), 2);
}

#[test]
fn error_table_lists_messages_in_order() {
    let mut sink = ErrorSink::new();
    sink.record(TableError::MissingType {
        column: "a".to_string(),
    });
    sink.record(TableError::InvertedBounds {
        column: "b".to_string(),
    });

    let table = Table::from_errors(&sink);
    assert_eq!(table.kind(), TableKind::Errors);
    assert_eq!(
        serde_json::to_value(&table).expect("serialize"),
        json!([
            ["Errors"],
            ["Missing 'type' in autoGenerate for column 'a'."],
            ["'min' cannot be greater than 'max' in autoGenerate for column 'b'."]
        ])
    );
    assert_eq!(table.body().len(), 2);
}
