//! TOML data file parser.
//!
//! Loads sequence catalogs, module content and static resource lists from
//! TOML files and directories, and validates them.
//!
//! A file's kind is decided by its top-level table: `[sequence]` for a
//! catalog, `[module]` for module content, `[[resources]]` for a resource
//! list.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::library::video_id;
use crate::model::{Catalog, LibraryResource, ModuleContent, Segment, Stage};
use crate::traits::ContentLookup;

#[derive(Debug, Deserialize)]
struct TomlSequenceFile {
    sequence: TomlSequenceHeader,
    #[serde(default)]
    stages: Vec<TomlStage>,
}

#[derive(Debug, Deserialize)]
struct TomlSequenceHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlStage {
    id: String,
    text: String,
    correct_order: u32,
}

#[derive(Debug, Deserialize)]
struct TomlModuleFile {
    module: TomlModuleHeader,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct TomlModuleHeader {
    id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct TomlResourceFile {
    #[serde(default)]
    resources: Vec<LibraryResource>,
}

/// A parsed data file of any kind.
#[derive(Debug, Clone)]
pub enum DataFile {
    Sequence(Catalog),
    Module(ModuleContent),
    Resources(Vec<LibraryResource>),
}

/// Parse a single sequence catalog file.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = read(path)?;
    parse_catalog_str(&content, path)
}

/// Parse a sequence catalog from a TOML string (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlSequenceFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let stages = parsed
        .stages
        .into_iter()
        .map(|s| Stage::new(s.id, s.text, s.correct_order))
        .collect();

    let catalog = Catalog::new(parsed.sequence.id, parsed.sequence.name, stages)
        .with_context(|| format!("invalid sequence in {}", source_path.display()))?;

    Ok(catalog.with_description(parsed.sequence.description))
}

/// Parse a single module content file.
pub fn parse_module(path: &Path) -> Result<ModuleContent> {
    let content = read(path)?;
    parse_module_str(&content, path)
}

pub fn parse_module_str(content: &str, source_path: &Path) -> Result<ModuleContent> {
    let parsed: TomlModuleFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(ModuleContent {
        id: parsed.module.id,
        title: parsed.module.title,
        segments: parsed.segments,
    })
}

/// Parse a static resource list file.
pub fn parse_resources(path: &Path) -> Result<Vec<LibraryResource>> {
    let content = read(path)?;
    parse_resources_str(&content, path)
}

pub fn parse_resources_str(content: &str, source_path: &Path) -> Result<Vec<LibraryResource>> {
    let parsed: TomlResourceFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    Ok(parsed.resources)
}

/// Parse a file of any kind, deciding the kind from its top-level table.
pub fn parse_data_file(path: &Path) -> Result<DataFile> {
    let content = read(path)?;
    parse_data_file_str(&content, path)
}

pub fn parse_data_file_str(content: &str, source_path: &Path) -> Result<DataFile> {
    let table: toml::Table = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    if table.contains_key("sequence") {
        parse_catalog_str(content, source_path).map(DataFile::Sequence)
    } else if table.contains_key("module") {
        parse_module_str(content, source_path).map(DataFile::Module)
    } else if table.contains_key("resources") {
        parse_resources_str(content, source_path).map(DataFile::Resources)
    } else {
        anyhow::bail!(
            "{} has none of [sequence], [module] or [[resources]]",
            source_path.display()
        )
    }
}

/// Recursively load every `.toml` data file under `dir`, sorted by path.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_data_directory(dir: &Path) -> Result<Vec<(PathBuf, DataFile)>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    let mut files = Vec::new();
    for path in entries {
        if path.is_dir() {
            files.extend(load_data_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_data_file(&path) {
                Ok(file) => files.push((path, file)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(files)
}

/// Every sequence catalog under `dir`.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Catalog>> {
    Ok(load_data_directory(dir)?
        .into_iter()
        .filter_map(|(_, file)| match file {
            DataFile::Sequence(catalog) => Some(catalog),
            _ => None,
        })
        .collect())
}

/// Every module under `dir`, in path order.
pub fn load_content_directory(dir: &Path) -> Result<ContentLibrary> {
    let mut library = ContentLibrary::default();
    for (path, file) in load_data_directory(dir)? {
        if let DataFile::Module(module) = file {
            if library.contains(&module.id) {
                tracing::warn!(
                    "module '{}' in {} replaces an earlier definition",
                    module.id,
                    path.display()
                );
            }
            library.insert(module);
        }
    }
    Ok(library)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data file: {}", path.display()))
}

/// Module content keyed by id, remembering insertion order.
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    modules: Vec<ModuleContent>,
    index: HashMap<String, usize>,
}

impl ContentLibrary {
    /// Add a module; a module with the same id is replaced in place.
    pub fn insert(&mut self, module: ModuleContent) {
        match self.index.get(&module.id) {
            Some(&i) => self.modules[i] = module,
            None => {
                self.index.insert(module.id.clone(), self.modules.len());
                self.modules.push(module);
            }
        }
    }

    pub fn contains(&self, module_id: &str) -> bool {
        self.index.contains_key(module_id)
    }

    /// Ids in insertion order.
    pub fn module_ids(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ContentLookup for ContentLibrary {
    fn module(&self, module_id: &str) -> Option<&ModuleContent> {
        self.index.get(module_id).map(|&i| &self.modules[i])
    }
}

impl FromIterator<ModuleContent> for ContentLibrary {
    fn from_iter<I: IntoIterator<Item = ModuleContent>>(iter: I) -> Self {
        let mut library = ContentLibrary::default();
        for module in iter {
            library.insert(module);
        }
        library
    }
}

/// A warning from data file validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The stage or segment id (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn item(id: &str, message: impl Into<String>) -> Self {
        Self {
            item_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a catalog for issues that do not stop it from being played.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if catalog.len() < 2 {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "sequence has a single stage and is always solved".into(),
        });
    }

    for stage in catalog.stages() {
        if stage.text.trim().is_empty() {
            warnings.push(ValidationWarning::item(&stage.id, "stage text is empty"));
        }
    }

    let mut seen_text = HashSet::new();
    for stage in catalog.stages() {
        let text = stage.text.trim().to_lowercase();
        if !text.is_empty() && !seen_text.insert(text) {
            warnings.push(ValidationWarning::item(
                &stage.id,
                format!("stage text '{}' is used more than once", stage.text.trim()),
            ));
        }
    }

    warnings
}

/// Validate module content for media problems.
pub fn validate_module(module: &ModuleContent) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate segment IDs
    let mut seen_ids = HashSet::new();
    for segment in &module.segments {
        if !seen_ids.insert(&segment.id) {
            warnings.push(ValidationWarning::item(
                &segment.id,
                format!("duplicate segment ID: {}", segment.id),
            ));
        }
    }

    for segment in &module.segments {
        if segment.video.is_none() && segment.supplementary_videos.is_empty() {
            warnings.push(ValidationWarning::item(&segment.id, "segment has no videos"));
        }

        if let Some(video) = &segment.video {
            if video.url.trim().is_empty() {
                warnings.push(ValidationWarning::item(&segment.id, "video url is empty"));
            }
        }

        for video in &segment.supplementary_videos {
            if video.label.trim().is_empty() {
                warnings.push(ValidationWarning::item(
                    &segment.id,
                    "supplementary video has no label",
                ));
            }
            if video.url.trim().is_empty() {
                warnings.push(ValidationWarning::item(
                    &segment.id,
                    format!("supplementary video '{}' has an empty url", video.label),
                ));
            } else if video_id(&video.url) == Some("") {
                warnings.push(ValidationWarning::item(
                    &segment.id,
                    format!(
                        "supplementary video '{}' has no video id in {}",
                        video.label, video.url
                    ),
                ));
            }
        }
    }

    warnings
}
