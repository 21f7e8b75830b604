//! Fallback policies example - wildcard rules for keys the registry misses

use assembler::{constructor, Assembler, AssemblerConfig, FallbackPolicies};
use dom::Document;

struct Card;

struct LegacyWidget {
    key: String,
}

const PAGE: &str = r##"{
    "root": {
        "nodeType": 9,
        "nodeName": "#document",
        "children": [{
            "nodeType": 1,
            "nodeName": "HTML",
            "children": [{
                "nodeType": 1,
                "nodeName": "BODY",
                "children": [
                    {
                        "nodeType": 1,
                        "nodeName": "DIV",
                        "attributes": ["data-component", "Card"]
                    },
                    {
                        "nodeType": 1,
                        "nodeName": "DIV",
                        "attributes": ["data-component", "Legacy/Chart"]
                    },
                    {
                        "nodeType": 1,
                        "nodeName": "DIV",
                        "attributes": ["data-component", "Legacy/Grid"]
                    },
                    {
                        "nodeType": 1,
                        "nodeName": "DIV",
                        "attributes": ["data-component", "Mystery"]
                    }
                ]
            }]
        }]
    }
}"##;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; skipped "Mystery" shows up in the log output
    tracing_subscriber::fmt::init();

    let doc = Document::from_json_str(PAGE)?;

    // Every "Legacy/..." key mounts a LegacyWidget carrying its full key
    let policies = FallbackPolicies::new().rule("Legacy/*", |key, _el| {
        let key = key.to_string();
        Some(constructor(move |_el| LegacyWidget { key: key.clone() }))
    })?;

    let mut app = Assembler::with_config(AssemblerConfig {
        policies,
        on_mount: Some(Box::new(|_instance| println!("mounted a component"))),
        ..AssemblerConfig::default()
    })?;
    app.register("Card", constructor(|_el| Card))?;

    let report = app.run(&doc)?;
    println!(
        "Matched {} elements, mounted {}, skipped {}",
        report.matched, report.mounted, report.skipped
    );

    for instance in app.components("Legacy/Chart") {
        if let Some(widget) = instance.downcast_ref::<LegacyWidget>() {
            println!("LegacyWidget mounted for key {:?}", widget.key);
        }
    }

    for name in app.component_names() {
        println!("mounted under key: {name}");
    }

    Ok(())
}
