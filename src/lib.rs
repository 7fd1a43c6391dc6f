// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Animated Tower of Hanoi solver with a cancellable, speed-adjustable
//! playback controller.
//!
//! The optimal move sequence is computed up front and replayed on a
//! background thread, one animated disk at a time. Front ends issue
//! commands and draw whatever the controller reports.
//!
//! # Key entry points
//!
//! - [`puzzle::generate`] - the optimal move sequence for `n` disks
//! - [`puzzle::TowerState`] - the three stacks and their invariants
//! - [`PlaybackController`] - start/pause/reset/cancel playback
//! - [`playback::PlaybackObserver`] - the rendering boundary
//! - [`options::Options`] - runtime configuration with TOML presets
//! - [`scene::TextRenderer`] - a reference renderer for terminals and tests
//!
//! # Architecture
//!
//! Each run spawns a `hanoi-playback` thread that owns the live towers. It
//! paces frames against wall-clock deadlines and posts every change as a
//! [`playback::PlaybackSignal`] over a channel; the newest
//! [`playback::FrameSnapshot`] is also mirrored through a lock-free triple
//! buffer. The foreground never reads the worker's state directly: shared
//! flags for pause, cancellation and speed sit behind a mutex and a
//! condition variable.

pub mod animation;
pub mod error;
pub mod input;
pub mod options;
pub mod playback;
pub mod puzzle;
pub mod scene;
pub mod util;

pub use error::HanoiError;
pub use playback::PlaybackController;
