//! Mode state - the one place interaction flags live
//!
//! Event handlers and the gesture interpreter write through these mutators;
//! nothing captures ambient mutable flags. The exclusivity invariants hold by
//! construction: entering a category forces the scattered state and clears
//! the selection, and forming clears the category.

use memoria_core::{EntityId, Month};

/// Process-wide interaction state, scoped to one scene session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeState {
    formed: bool,
    active_entity: Option<EntityId>,
    active_category: Option<Month>,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn formed(&self) -> bool {
        self.formed
    }

    #[inline]
    pub fn active_entity(&self) -> Option<EntityId> {
        self.active_entity
    }

    #[inline]
    pub fn active_category(&self) -> Option<Month> {
        self.active_category
    }

    /// Return to the formed "2025" arrangement. Clears any category filter;
    /// an active selection survives (the zoomed card floats over the text).
    pub fn form(&mut self) {
        self.formed = true;
        self.active_category = None;
    }

    /// Scatter back to chaos
    pub fn scatter(&mut self) {
        self.formed = false;
    }

    /// Enter film mode for one month. Forces the scattered state and drops
    /// the selection - the strip owns the screen.
    pub fn enter_category(&mut self, month: Month) {
        self.active_category = Some(month);
        self.formed = false;
        self.active_entity = None;
    }

    pub fn clear_category(&mut self) {
        self.active_category = None;
    }

    /// Select an entity. Idempotent: re-selecting the selected id is a no-op,
    /// deselection only happens through [`clear_selection`](Self::clear_selection)
    /// or category entry.
    pub fn select(&mut self, id: EntityId) {
        self.active_entity = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.active_entity = None;
    }

    /// Session teardown: back to defaults
    pub fn reset(&mut self) {
        *self = ModeState::default();
    }
}
