//! Resource library aggregation.
//!
//! Flattens module content into [`LibraryResource`] records and appends a
//! hand-curated static list. Missing modules and segments without media
//! contribute nothing; nothing here fails.

use crate::model::{LibraryResource, ModuleContent, ResourceKind, Segment};
use crate::traits::ContentLookup;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Extract the video id from a recognised YouTube link.
///
/// Returns `None` for links that are not `youtu.be/<id>` or
/// `youtube.com/watch?v=<id>` shapes. A recognised link without an id
/// yields `Some("")`.
pub fn video_id(url: &str) -> Option<&str> {
    if let Some((_, rest)) = url.split_once("youtu.be/") {
        return Some(rest.split('?').next().unwrap_or_default());
    }

    if url.contains("youtube.com/watch") {
        let id = url
            .split_once("v=")
            .map(|(_, rest)| rest.split('&').next().unwrap_or_default())
            .unwrap_or_default();
        return Some(id);
    }

    None
}

/// Rewrite known video-hosting links into their embeddable player form.
///
/// `youtu.be/<id>?...` and `youtube.com/watch?v=<id>&...` become
/// `https://www.youtube.com/embed/<id>`. Anything else is returned as-is.
/// When a recognised link carries no id, the embed URL is built with an
/// empty id rather than falling back to the input.
pub fn normalize_url(url: &str) -> String {
    match video_id(url) {
        Some(id) => format!("{EMBED_BASE}{id}"),
        None => url.to_string(),
    }
}

/// Label shown for resources derived from a module.
pub fn module_label(module_id: &str) -> String {
    format!("Module {module_id}")
}

/// Builds the library's resource list from content plus a static list.
pub struct ResourceAggregator<L> {
    lookup: L,
    module_ids: Vec<String>,
    static_resources: Vec<LibraryResource>,
}

impl<L: ContentLookup> ResourceAggregator<L> {
    /// `module_ids` is the ordered list of every module the library knows
    /// about; ids the lookup cannot resolve are skipped.
    pub fn new(
        lookup: L,
        module_ids: Vec<String>,
        static_resources: Vec<LibraryResource>,
    ) -> Self {
        Self {
            lookup,
            module_ids,
            static_resources,
        }
    }

    /// Video resources for `module_ids`, in module, segment, then video order.
    pub fn collect_from_content<S: AsRef<str>>(&self, module_ids: &[S]) -> Vec<LibraryResource> {
        let mut resources = Vec::new();

        for module_id in module_ids {
            let module_id = module_id.as_ref();
            let Some(module) = self.lookup.module(module_id) else {
                tracing::debug!("module '{module_id}' not found, skipping");
                continue;
            };
            collect_module(module_id, module, &mut resources);
        }

        resources
    }

    /// Every derived video followed by the static list in declared order.
    pub fn get_all_resources(&self) -> Vec<LibraryResource> {
        let mut resources = self.collect_from_content(self.module_ids.as_slice());
        resources.extend(self.static_resources.iter().cloned());
        resources
    }
}

fn collect_module(module_id: &str, module: &ModuleContent, out: &mut Vec<LibraryResource>) {
    let label = module_label(module_id);
    for segment in &module.segments {
        collect_segment(module_id, &label, segment, out);
    }
}

fn collect_segment(module_id: &str, label: &str, segment: &Segment, out: &mut Vec<LibraryResource>) {
    // The primary video keeps its raw URL.
    if let Some(video) = &segment.video {
        out.push(LibraryResource {
            kind: ResourceKind::Video,
            title: format!("{} - Introduction", segment.title),
            module_label: label.to_string(),
            module_id: module_id.to_string(),
            url: video.url.clone(),
            description: Some(format!("Introductory video for {}", segment.title)),
            duration: video.duration.clone(),
            size: None,
        });
    }

    for video in &segment.supplementary_videos {
        let description = video
            .description
            .clone()
            .unwrap_or_else(|| format!("Supplementary video for {}", segment.title));
        out.push(LibraryResource {
            kind: ResourceKind::Video,
            title: video.label.clone(),
            module_label: label.to_string(),
            module_id: module_id.to_string(),
            url: normalize_url(&video.url),
            description: Some(description),
            duration: None,
            size: None,
        });
    }
}

/// Narrow a resource list the way the library page's filter bar does.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub kind: Option<ResourceKind>,
    pub module_id: Option<String>,
    /// Case-insensitive match against title and description.
    pub search: Option<String>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &LibraryResource) -> bool {
        if self.kind.is_some_and(|k| k != resource.kind) {
            return false;
        }
        if let Some(module_id) = &self.module_id {
            if &resource.module_id != module_id {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if needle.is_empty() {
                return true;
            }
            let in_title = resource.title.to_lowercase().contains(&needle);
            let in_description = resource
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, resources: Vec<LibraryResource>) -> Vec<LibraryResource> {
        resources.into_iter().filter(|r| self.matches(r)).collect()
    }
}
