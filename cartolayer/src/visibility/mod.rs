//! Layer visibility.
//!
//! [`VisibilityState`] is the pure intent value (one boolean per logical
//! layer). [`VisibilityController`] projects it onto the live surface,
//! skipping surface layers that are not registered yet.

mod controller;
mod state;

pub use controller::VisibilityController;
pub use state::VisibilityState;
