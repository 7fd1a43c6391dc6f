//! Everything the rendering side of the system consumes: tower and disk
//! geometry, the disk palette, the completion burst, and a reference text
//! renderer driven by playback signals.

pub mod celebration;
pub mod layout;
pub mod text_renderer;

pub use celebration::{Particle, ParticleBurst};
pub use layout::SceneLayout;
pub use text_renderer::TextRenderer;

use crate::puzzle::Disk;

/// Disk colours, indexed by `size % 10`.
pub const DISK_PALETTE: [[u8; 3]; 10] = [
    [0xe7, 0x4c, 0x3c],
    [0x34, 0x98, 0xdb],
    [0x2e, 0xcc, 0x71],
    [0xf3, 0x9c, 0x12],
    [0x9b, 0x59, 0xb6],
    [0x1a, 0xbc, 0x9c],
    [0xd3, 0x54, 0x00],
    [0xc0, 0x39, 0x2b],
    [0x16, 0xa0, 0x85],
    [0x8e, 0x44, 0xad],
];

/// Palette colour for a disk.
#[must_use]
pub fn disk_color(disk: Disk) -> [u8; 3] {
    DISK_PALETTE[usize::from(disk.size()) % DISK_PALETTE.len()]
}
