//! The `lessonkit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lessonkit_core::parser::{self, DataFile, ValidationWarning};

pub fn execute(path: PathBuf) -> Result<()> {
    let files = if path.is_dir() {
        parser::load_data_directory(&path)?
    } else {
        vec![(path.clone(), parser::parse_data_file(&path)?)]
    };

    let mut total_warnings = 0;

    for (_, file) in &files {
        let warnings = match file {
            DataFile::Sequence(catalog) => {
                println!("Sequence: {} ({} stages)", catalog.name, catalog.len());
                parser::validate_catalog(catalog)
            }
            DataFile::Module(module) => {
                println!(
                    "Module {}: {} ({} segments)",
                    module.id,
                    module.title,
                    module.segments.len()
                );
                parser::validate_module(module)
            }
            DataFile::Resources(resources) => {
                println!("Resource list ({} resources)", resources.len());
                Vec::new()
            }
        };
        print_warnings(&warnings);
        total_warnings += warnings.len();
    }

    if files.is_empty() {
        println!("No data files found.");
    } else if total_warnings == 0 {
        println!("All data files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .item_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}
