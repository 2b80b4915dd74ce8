//! Run every instance of the corpus, or only the ones named on the command
//! line.
//!
//! ```text
//! cargo run --example catalog
//! cargo run --example catalog -- diet knapsack
//! ```

use anyhow::{bail, Result};
use formulary::logging;
use formulary::problems::{catalog, Entry};

fn main() -> Result<()> {
    logging::init_tracing(false);

    let wanted: Vec<String> = std::env::args().skip(1).collect();
    let entries: Vec<Entry> = catalog()
        .into_iter()
        .filter(|e| wanted.is_empty() || wanted.iter().any(|w| w == e.name))
        .collect();
    if entries.is_empty() {
        let names: Vec<&str> = catalog().iter().map(|e| e.name).collect();
        bail!("no instance matches {:?}; known: {}", wanted, names.join(", "));
    }

    let mut failures = 0;
    for entry in entries {
        println!("# {} ({}): {}", entry.name, entry.backend, entry.description);
        match (entry.run)() {
            Ok(report) => println!("{report}"),
            Err(e) => {
                failures += 1;
                eprintln!("{} failed: {e}\n", entry.name);
            }
        }
    }
    if failures > 0 {
        bail!("{failures} instance(s) failed");
    }
    Ok(())
}
