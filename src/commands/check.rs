//! Validate collections and navigation, reporting every problem found

use anyhow::Result;

use crate::content::{ContentLoader, LoadPolicy};
use crate::nav;
use crate::Site;

/// Validate one or all collections, then the navigation tree
///
/// Every invalid document is reported with its collection, file, field,
/// and cause. `policy` overrides the configured strictness; under
/// fail-fast the first bad document ends the run.
pub fn run(site: &Site, collection: Option<&str>, policy: Option<LoadPolicy>) -> Result<()> {
    let loader = match policy {
        Some(policy) => ContentLoader::with_policy(site, policy),
        None => ContentLoader::new(site),
    };

    let mut entry_count = 0;
    let mut failure_count = 0;

    let selected: Vec<_> = match collection {
        Some(name) => {
            let collection = site
                .collections
                .get(name)
                .ok_or_else(|| anyhow::anyhow!("unknown collection: {}", name))?;
            vec![collection]
        }
        None => site.collections.iter().collect(),
    };

    for collection in selected {
        let report = loader.load_collection(collection)?;
        entry_count += report.entries.len();
        failure_count += report.failures.len();

        println!(
            "{}: {} entries",
            collection.name,
            report.entries.len()
        );
        for failure in &report.failures {
            println!("  {}", failure);
        }
    }

    if collection.is_none() {
        if let Err(unresolved) = nav::verify_routes(&nav::NAV_LINKS, &site.collections) {
            for leaf in &unresolved {
                println!("nav: `{}` points at unknown route {}", leaf.label, leaf.url);
            }
            failure_count += unresolved.len();
        }
    }

    if failure_count > 0 {
        anyhow::bail!(
            "{} valid entries, {} problems found",
            entry_count,
            failure_count
        );
    }

    tracing::info!("Checked {} entries, no problems", entry_count);
    Ok(())
}
