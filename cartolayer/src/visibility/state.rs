//! Declarative per-layer visibility.

use crate::catalog::{CatalogError, LogicalLayer};

/// Toggle state for every logical layer.
///
/// Backed by a fixed array indexed by [`LogicalLayer`], so there is always
/// exactly one entry per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityState {
    visible: [bool; LogicalLayer::COUNT],
}

impl Default for VisibilityState {
    /// Departments and sections shown, communes hidden.
    fn default() -> Self {
        let mut state = Self::all(false);
        state.set(LogicalLayer::Departments, true);
        state.set(LogicalLayer::Sections, true);
        state
    }
}

impl VisibilityState {
    /// Every layer set to `visible`.
    pub fn all(visible: bool) -> Self {
        Self {
            visible: [visible; LogicalLayer::COUNT],
        }
    }

    /// Build a state from named entries on top of the defaults.
    ///
    /// Names are matched case-insensitively; an unknown name is rejected.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut state = Self::default();
        for (name, visible) in entries {
            state.set(name.parse()?, visible);
        }
        Ok(state)
    }

    pub fn get(&self, name: LogicalLayer) -> bool {
        self.visible[name.index()]
    }

    pub fn set(&mut self, name: LogicalLayer, visible: bool) {
        self.visible[name.index()] = visible;
    }

    /// Flip one layer and return its new value.
    pub fn toggle(&mut self, name: LogicalLayer) -> bool {
        let slot = &mut self.visible[name.index()];
        *slot = !*slot;
        *slot
    }

    /// `(layer, visible)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (LogicalLayer, bool)> + '_ {
        LogicalLayer::ALL.into_iter().map(|l| (l, self.get(l)))
    }
}
