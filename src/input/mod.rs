//! Input handling: the control vocabulary a front end binds keys to.

/// Control actions and key resolution.
pub mod keyboard;

pub use keyboard::{resolve_key, ControlAction};
