//! Disk motion: the arc a lifted disk follows between towers.

pub mod path;

pub use path::{ArcCurve, MotionPath};
