//! Core data model types for lessonkit.
//!
//! These are the plain data types shared by the sequencing game and the
//! resource library: stages and catalogs, module content, and the flat
//! resource records the library page renders.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// A single item in a sequencing game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stage {
    /// Unique, stable identifier.
    pub id: String,
    /// Display label.
    pub text: String,
    /// 1-based canonical position.
    pub correct_order: u32,
}

impl Stage {
    pub fn new(id: impl Into<String>, text: impl Into<String>, correct_order: u32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            correct_order,
        }
    }
}

/// An immutable, validated set of stages.
///
/// Every catalog is non-empty, has unique stage ids, and its
/// `correct_order` values are exactly `1..=N`.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Unique identifier for this catalog.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// What the user is asked to put in order.
    pub description: String,
    stages: Vec<Stage>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists, duplicate ids and order gaps.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stages: Vec<Stage>,
    ) -> Result<Self, CatalogError> {
        if stages.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for stage in &stages {
            if !seen.insert(stage.id.as_str()) {
                return Err(CatalogError::DuplicateId(stage.id.clone()));
            }
        }

        let mut orders: Vec<u32> = stages.iter().map(|s| s.correct_order).collect();
        orders.sort_unstable();
        for (i, &found) in orders.iter().enumerate() {
            let expected = i as u32 + 1;
            if found != expected {
                return Err(CatalogError::NonContiguousOrder { expected, found });
            }
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            stages,
        })
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Stages in declaration order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Stages sorted into their canonical order.
    pub fn canonical_order(&self) -> Vec<&Stage> {
        let mut sorted: Vec<&Stage> = self.stages.iter().collect();
        sorted.sort_by_key(|s| s.correct_order);
        sorted
    }

    pub fn get(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always `false` for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// The primary video attached to a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentVideo {
    pub url: String,
    #[serde(default)]
    pub duration: Option<String>,
}

/// An extra video listed under a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryVideo {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One teaching unit inside a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub title: String,
    /// Introductory video, if the segment has one.
    #[serde(default)]
    pub video: Option<SegmentVideo>,
    #[serde(default)]
    pub supplementary_videos: Vec<SupplementaryVideo>,
}

/// A course module and its segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// What kind of item a library entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Document,
    Link,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Video => write!(f, "video"),
            ResourceKind::Document => write!(f, "document"),
            ResourceKind::Link => write!(f, "link"),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(ResourceKind::Video),
            "document" | "doc" => Ok(ResourceKind::Document),
            "link" => Ok(ResourceKind::Link),
            other => Err(format!("unknown resource kind: {other}")),
        }
    }
}

/// A display-ready entry in the resource library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryResource {
    pub kind: ResourceKind,
    pub title: String,
    /// Label shown next to the resource, e.g. "Module 3".
    pub module_label: String,
    pub module_id: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    /// File size for downloadable documents, e.g. "2.4 MB".
    #[serde(default)]
    pub size: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stages(orders: &[u32]) -> Vec<Stage> {
        orders
            .iter()
            .enumerate()
            .map(|(i, &o)| Stage::new(format!("s{i}"), format!("Stage {i}"), o))
            .collect()
    }

    #[test]
    fn catalog_accepts_shuffled_contiguous_orders() {
        let catalog = Catalog::new("c", "C", stages(&[3, 1, 2])).unwrap();
        assert_eq!(catalog.len(), 3);
        let canonical: Vec<u32> = catalog
            .canonical_order()
            .iter()
            .map(|s| s.correct_order)
            .collect();
        assert_eq!(canonical, vec![1, 2, 3]);
        assert_eq!(catalog.get("s0").map(|s| s.correct_order), Some(3));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn catalog_rejects_empty() {
        assert!(matches!(
            Catalog::new("c", "C", vec![]),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn catalog_rejects_gaps_and_repeats() {
        assert!(matches!(
            Catalog::new("c", "C", stages(&[1, 3])),
            Err(CatalogError::NonContiguousOrder {
                expected: 2,
                found: 3
            })
        ));
        assert!(matches!(
            Catalog::new("c", "C", stages(&[1, 1])),
            Err(CatalogError::NonContiguousOrder { .. })
        ));
        assert!(matches!(
            Catalog::new("c", "C", stages(&[0, 1])),
            Err(CatalogError::NonContiguousOrder {
                expected: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let dupes = vec![Stage::new("a", "A", 1), Stage::new("a", "B", 2)];
        assert!(matches!(
            Catalog::new("c", "C", dupes),
            Err(CatalogError::DuplicateId(id)) if id == "a"
        ));
    }

    #[test]
    fn resource_kind_display_and_parse() {
        assert_eq!(ResourceKind::Video.to_string(), "video");
        assert_eq!("Document".parse::<ResourceKind>().unwrap(), ResourceKind::Document);
        assert_eq!("doc".parse::<ResourceKind>().unwrap(), ResourceKind::Document);
        assert_eq!("LINK".parse::<ResourceKind>().unwrap(), ResourceKind::Link);
        assert!("podcast".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn library_resource_serde_roundtrip() {
        let resource = LibraryResource {
            kind: ResourceKind::Document,
            title: "Lab handbook".into(),
            module_label: "Module 1".into(),
            module_id: "1".into(),
            url: "https://example.com/handbook.pdf".into(),
            description: None,
            duration: None,
            size: Some("2.4 MB".into()),
        };
        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains("\"kind\":\"document\""));
        let back: LibraryResource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resource);
    }
}
