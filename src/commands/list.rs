//! List site content

use anyhow::Result;

use crate::content::{ContentLoader, LoadPolicy};
use crate::nav::{self, NavLink};
use crate::Site;

/// List registry, entries, or navigation by type
pub fn run(site: &Site, list_type: &str, json: bool) -> Result<()> {
    match list_type {
        "collection" | "collections" => {
            if json {
                let out: Vec<_> = site
                    .collections
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "name": c.name,
                            "route": c.route,
                            "base": c.base,
                            "pattern": c.pattern.as_str(),
                            "fields": c.schema.fields()
                                .map(|(name, ty)| (name.to_string(), ty))
                                .collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("Collections ({}):", site.collections.len());
            for collection in site.collections.iter() {
                let fields: Vec<String> = collection
                    .schema
                    .fields()
                    .map(|(name, ty)| format!("{}: {}", name, ty))
                    .collect();
                println!(
                    "  {} -> {} [{}] {{{}}}",
                    collection.name,
                    collection.route,
                    collection.base.display(),
                    fields.join(", ")
                );
            }
        }
        "entry" | "entries" => {
            let loader = ContentLoader::with_policy(site, LoadPolicy::CollectErrors);
            let reports = loader.load_all()?;

            if json {
                let mut out = serde_json::Map::new();
                for (name, report) in &reports {
                    out.insert(name.clone(), serde_json::to_value(&report.entries)?);
                }
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            for (name, report) in &reports {
                println!("{} ({}):", name, report.entries.len());
                for entry in &report.entries {
                    println!(
                        "  {} - {} [{}]",
                        entry.date.format(&site.config.date_format),
                        entry.title,
                        entry.source
                    );
                }
                for failure in &report.failures {
                    println!("  ! {}", failure);
                }
            }
        }
        "nav" => {
            if json {
                println!("{}", serde_json::to_string_pretty(&*nav::NAV_LINKS)?);
                return Ok(());
            }

            for link in nav::NAV_LINKS.iter() {
                match link {
                    NavLink::Leaf { label, url } => println!("{} -> {}", label, url),
                    NavLink::Group { label, children } => {
                        println!("{}", label);
                        for child in children {
                            println!("  {} -> {}", child.label, child.url);
                        }
                    }
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: collections, entries, nav",
                list_type
            );
        }
    }

    Ok(())
}
