use crate::IndexArgs;
use clap::Subcommand;
use stormscope_core::IndexSnapshot;
use tabled::{Table, Tabled};

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Build (or refresh) the cache from a runtime model dump
    Build {
        #[command(flatten)]
        index: IndexArgs,

        /// Rebuild even when the cached version matches
        #[arg(long)]
        force: bool,
    },
    /// Show what the cache holds
    Inspect {
        #[command(flatten)]
        index: IndexArgs,

        /// Also list the deprecated entries
        #[arg(long)]
        deprecated: bool,
    },
    /// Delete the cache file
    Clear {
        #[command(flatten)]
        index: IndexArgs,
    },
}

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Section")]
    section: &'static str,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Deprecated")]
    deprecated: usize,
}

pub fn run(cmd: CacheCommands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        CacheCommands::Build { index, force } => {
            let source = index.source();
            let start = std::time::Instant::now();
            let snapshot = if force {
                source.rebuild()?
            } else {
                source.load()?
            };

            println!(
                "Metadata index {} ready in {:?}",
                snapshot.version,
                start.elapsed()
            );
            println!("{}", Table::new(section_rows(&snapshot)));
        }
        CacheCommands::Inspect { index, deprecated } => {
            let cache = index.source().cache(None);
            let Some(snapshot) = cache.read()? else {
                println!("No cache found at {}", cache.path().display());
                return Ok(());
            };

            println!("Cache File:     {}", cache.path().display());
            println!("Format Version: {}", snapshot.format_version);
            println!("System Version: {}", snapshot.version);
            println!("{}", Table::new(section_rows(&snapshot)));

            if deprecated {
                println!("\nDeprecated Entries:");
                for key in deprecated_keys(&snapshot) {
                    println!("  {}", key);
                }
            }
        }
        CacheCommands::Clear { index } => {
            let cache = index.source().cache(None);
            if cache.clear()? {
                println!("Removed {}", cache.path().display());
            } else {
                println!("No cache found at {}", cache.path().display());
            }
        }
    }

    Ok(())
}

fn section_rows(snapshot: &IndexSnapshot) -> Vec<SectionRow> {
    vec![
        SectionRow {
            section: "libraries",
            entries: snapshot.libraries.len(),
            deprecated: snapshot.libraries.values().filter(|e| e.deprecated).count(),
        },
        SectionRow {
            section: "form types",
            entries: snapshot.form_types.len(),
            deprecated: snapshot.form_types.values().filter(|e| e.deprecated).count(),
        },
        SectionRow {
            section: "properties",
            entries: snapshot.properties.len(),
            deprecated: snapshot.properties.values().filter(|e| e.deprecated).count(),
        },
        SectionRow {
            section: "commands",
            entries: snapshot.commands.len(),
            deprecated: snapshot.commands.values().filter(|e| e.deprecated).count(),
        },
    ]
}

fn deprecated_keys(snapshot: &IndexSnapshot) -> Vec<&str> {
    let libraries = snapshot.libraries.values().filter(|e| e.deprecated).map(|e| e.key.as_str());
    let forms = snapshot.form_types.values().filter(|e| e.deprecated).map(|e| e.key.as_str());
    let props = snapshot.properties.values().filter(|e| e.deprecated).map(|e| e.key.as_str());
    libraries.chain(forms).chain(props).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stormscope_api::models::PropertyEntry;

    #[test]
    fn rows_count_deprecated_entries() {
        let mut snapshot = IndexSnapshot::empty("1.0.0");
        for (key, deprecated) in [("inet:fqdn:zone", false), ("inet:fqdn:issuffix", true)] {
            snapshot.properties.insert(
                key.to_string(),
                PropertyEntry {
                    key: key.to_string(),
                    name: key.rsplit(':').next().unwrap_or(key).to_string(),
                    doc: String::new(),
                    deprecated,
                    prop_type: None,
                },
            );
        }

        let rows = section_rows(&snapshot);
        assert_eq!(rows[2].entries, 2);
        assert_eq!(rows[2].deprecated, 1);
        assert_eq!(deprecated_keys(&snapshot), vec!["inet:fqdn:issuffix"]);
    }
}
