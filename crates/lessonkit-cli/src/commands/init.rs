//! The `lessonkit init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let files = [
        ("lessonkit.toml", SAMPLE_CONFIG),
        ("content/sequences/evidence-chain.toml", EXAMPLE_SEQUENCE),
        ("content/modules/1.toml", EXAMPLE_MODULE_1),
        ("content/modules/3.toml", EXAMPLE_MODULE_3),
        ("content/resources.toml", EXAMPLE_RESOURCES),
    ];

    for (path, contents) in files {
        write_if_missing(Path::new(path), contents)?;
    }

    println!("\nNext steps:");
    println!("  1. Run: lessonkit validate --path content");
    println!("  2. Run: lessonkit resources");
    println!("  3. Run: lessonkit play --sequence content/sequences/evidence-chain.toml");

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lessonkit configuration

content_dir = "content/modules"
sequences_dir = "content/sequences"
resources_file = "content/resources.toml"

# Modules shown in the resource library, in order. Module 2 has no content
# yet and is skipped until it does.
modules = ["1", "2", "3"]

default_format = "text"
"#;

const EXAMPLE_SEQUENCE: &str = r#"[sequence]
id = "evidence-chain"
name = "Evidence chain"
description = "Put the steps of evidence-based practice in order"

[[stages]]
id = "apply"
text = "Apply the evidence to the patient"
correct_order = 4

[[stages]]
id = "ask"
text = "Ask an answerable clinical question"
correct_order = 1

[[stages]]
id = "appraise"
text = "Critically appraise the evidence"
correct_order = 3

[[stages]]
id = "assess"
text = "Assess the outcome"
correct_order = 5

[[stages]]
id = "acquire"
text = "Acquire the best available evidence"
correct_order = 2
"#;

const EXAMPLE_MODULE_1: &str = r#"[module]
id = "1"
title = "Foundations"

[[segments]]
id = "1.1"
title = "Asking questions"

[segments.video]
url = "https://youtu.be/dQw4w9WgXcQ"
duration = "12:30"

[[segments.supplementary_videos]]
label = "PICO in practice"
url = "https://www.youtube.com/watch?v=oHg5SJYRHA0&t=42"
description = "A worked example of framing a question"

[[segments]]
id = "1.2"
title = "Finding evidence"

[[segments.supplementary_videos]]
label = "Search strategies"
url = "https://example.com/videos/search-strategies.mp4"
"#;

const EXAMPLE_MODULE_3: &str = r#"[module]
id = "3"
title = "Appraisal"

[[segments]]
id = "3.1"
title = "Risk of bias"

[segments.video]
url = "https://youtu.be/9bZkp7q19f0"
duration = "18:05"
"#;

const EXAMPLE_RESOURCES: &str = r#"[[resources]]
kind = "document"
title = "Course handbook"
module_label = "General"
module_id = "general"
url = "https://example.com/handbook.pdf"
description = "Schedule, assessment and reading list"
size = "1.2 MB"

[[resources]]
kind = "link"
title = "Cochrane Library"
module_label = "Module 3"
module_id = "3"
url = "https://www.cochranelibrary.com"
description = "Systematic reviews for appraisal practice"
"#;
