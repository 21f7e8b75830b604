//! Basic mounting example - registering components and running over a page

use assembler::{constructor, Assembler};
use dom::Document;

struct Navigation {
    item_count: usize,
}

struct Teaser {
    headline: String,
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
                        "nodeName": "NAV",
                        "attributes": ["data-component", "Navigation", "data-items", "3"]
                    },
                    {
                        "nodeType": 1,
                        "nodeName": "DIV",
                        "attributes": ["data-component", "Teaser", "data-headline", "Welcome"]
                    },
                    {
                        "nodeType": 1,
                        "nodeName": "DIV",
                        "attributes": ["data-component", "Unregistered"]
                    }
                ]
            }]
        }]
    }
}"##;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let doc = Document::from_json_str(PAGE)?;
    println!("Parsed document with {} nodes", doc.len());

    let mut app = Assembler::new();
    app.register(
        "Navigation",
        constructor(|el| Navigation {
            item_count: el.data("items").and_then(|v| v.parse().ok()).unwrap_or(0),
        }),
    )?
    .register(
        "Teaser",
        constructor(|el| Teaser {
            headline: el.data("headline").unwrap_or("").to_string(),
        }),
    )?;

    let report = app.run(&doc)?;
    println!(
        "Matched {} elements, mounted {}, skipped {}",
        report.matched, report.mounted, report.skipped
    );

    for instance in app.components("Navigation") {
        if let Some(nav) = instance.downcast_ref::<Navigation>() {
            println!("Navigation mounted with {} items", nav.item_count);
        }
    }
    for instance in app.components("Teaser") {
        if let Some(teaser) = instance.downcast_ref::<Teaser>() {
            println!("Teaser mounted with headline {:?}", teaser.headline);
        }
    }

    // Re-running changes nothing: elements are mounted at most once
    let again = app.run(&doc)?;
    println!("Second run mounted {} new components", again.mounted);

    Ok(())
}
