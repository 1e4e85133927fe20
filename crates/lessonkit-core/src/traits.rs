//! Collaborator seams.
//!
//! The game and the library never own their surroundings: module content
//! comes from a [`ContentLookup`], and a solved game is announced through a
//! [`CompletionNotifier`].

use std::collections::{BTreeMap, HashMap};

use crate::game::GameSession;
use crate::model::ModuleContent;

// ---------------------------------------------------------------------------
// Content lookup
// ---------------------------------------------------------------------------

/// Resolves a module id to its content, or `None` if the id is unknown.
pub trait ContentLookup: Send + Sync {
    fn module(&self, module_id: &str) -> Option<&ModuleContent>;
}

impl ContentLookup for HashMap<String, ModuleContent> {
    fn module(&self, module_id: &str) -> Option<&ModuleContent> {
        self.get(module_id)
    }
}

impl ContentLookup for BTreeMap<String, ModuleContent> {
    fn module(&self, module_id: &str) -> Option<&ModuleContent> {
        self.get(module_id)
    }
}

impl<T: ContentLookup + ?Sized> ContentLookup for &T {
    fn module(&self, module_id: &str) -> Option<&ModuleContent> {
        (**self).module(module_id)
    }
}

// ---------------------------------------------------------------------------
// Completion notification
// ---------------------------------------------------------------------------

/// Told when a session transitions to `Correct`.
///
/// Called at most once per transition; re-evaluating a solved session does
/// not call it again.
pub trait CompletionNotifier: Send + Sync {
    fn on_complete(&self, session: &GameSession);
}

/// No-op notifier.
pub struct NoopNotifier;

impl CompletionNotifier for NoopNotifier {
    fn on_complete(&self, _: &GameSession) {}
}

/// Adapts a closure into a [`CompletionNotifier`].
pub struct FnNotifier<F>(pub F);

impl<F> CompletionNotifier for FnNotifier<F>
where
    F: Fn(&GameSession) + Send + Sync,
{
    fn on_complete(&self, session: &GameSession) {
        (self.0)(session)
    }
}
