use serde_json::json;

use mockgrid_generate::{GenerateOptions, TableGenerator, render_console};

fn main() {
    let generator = TableGenerator::with_default_library()
        .expect("load default library")
        .with_options(GenerateOptions {
            seed: Some(2024),
            ..GenerateOptions::default()
        });

    let template = json!({
        "settings": {
            "rows": 8,
            "includeHeaders": true,
            "index": { "name": "id", "start": 1 }
        },
        "columns": {
            "name": { "autoGenerate": { "type": "library", "value": "fullName_common" } },
            "email": { "autoGenerate": { "type": "library", "value": "emailFormat" } },
            "joined": {
                "autoGenerate": {
                    "type": "date",
                    "start": "2015-01-01",
                    "end": "2024-12-31",
                    "format": "MMM D, YYYY"
                }
            },
            "badge": {
                "autoGenerate": {
                    "type": "composite",
                    "patterns": [
                        { "pattern": [
                            { "type": "static", "value": "EMP-" },
                            { "type": "field", "value": "id" },
                            { "type": "static", "value": "-" },
                            { "type": "random", "length": 4, "characters": "ABCDEFGHJKLMNPQRSTUVWXYZ23456789" }
                        ], "weight": 4 },
                        { "pattern": [
                            { "type": "static", "value": "CTR-" },
                            { "type": "number", "min": 100, "max": 999 }
                        ], "weight": 1 }
                    ]
                }
            },
            "tier": { "list": ["bronze", "silver", "gold"] }
        }
    });

    let table = generator.generate(&template, None);
    print!("{}", render_console(&table));
}
