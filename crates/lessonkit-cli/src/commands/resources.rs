//! The `lessonkit resources` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lessonkit_core::config::load_config_from;
use lessonkit_core::library::{ResourceAggregator, ResourceFilter};
use lessonkit_core::model::{LibraryResource, ResourceKind};
use lessonkit_core::parser::{self, ContentLibrary};

pub fn execute(
    kind: Option<String>,
    module: Option<String>,
    search: Option<String>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let kind = kind
        .map(|k| k.parse::<ResourceKind>().map_err(|e| anyhow::anyhow!("{}", e)))
        .transpose()?;
    let format = format.unwrap_or_else(|| config.default_format.clone());
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let library = if config.content_dir.is_dir() {
        parser::load_content_directory(&config.content_dir)?
    } else {
        tracing::warn!(
            "content directory {} not found, listing static resources only",
            config.content_dir.display()
        );
        ContentLibrary::default()
    };

    let static_resources = match &config.resources_file {
        Some(path) => parser::parse_resources(path)?,
        None => Vec::new(),
    };

    let module_ids = config
        .modules
        .clone()
        .unwrap_or_else(|| library.module_ids());

    let aggregator = ResourceAggregator::new(library, module_ids, static_resources);
    let filter = ResourceFilter {
        kind,
        module_id: module,
        search,
    };
    let resources = filter.apply(aggregator.get_all_resources());

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&resources)?),
        _ => print_table(&resources),
    }

    Ok(())
}

fn print_table(resources: &[LibraryResource]) {
    if resources.is_empty() {
        println!("No resources found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Kind", "Module", "Title", "Duration", "URL"]);

    for r in resources {
        let extent = r.duration.as_deref().or(r.size.as_deref()).unwrap_or("-");
        table.add_row(vec![
            Cell::new(r.kind),
            Cell::new(&r.module_label),
            Cell::new(&r.title),
            Cell::new(extent),
            Cell::new(&r.url),
        ]);
    }

    println!("{table}");
    println!("{} resource(s)", resources.len());
}
