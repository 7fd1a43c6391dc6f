//! Scene geometry shared by the motion path and every renderer.
//!
//! Coordinates are layout units with the origin at the top-left of the
//! drawing area and y growing downward. Disk positions are the disk's
//! horizontal centre and its top edge.

use glam::Vec2;

use crate::animation::ArcCurve;
use crate::options::LayoutOptions;
use crate::puzzle::{Disk, Move, TowerId, TowerState};

/// Tallest a disk is ever drawn.
const MAX_DISK_HEIGHT: f32 = 30.0;

/// Tower and disk geometry for a drawing area and disk count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    width: f32,
    height: f32,
    disk_count: u8,
}

impl SceneLayout {
    /// Layout for `disk_count` disks in the configured drawing area.
    #[must_use]
    pub fn new(options: &LayoutOptions, disk_count: u8) -> Self {
        Self {
            width: options.width,
            height: options.height,
            disk_count,
        }
    }

    /// Drawing area width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Drawing area height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Disk count the disk sizes are scaled against.
    #[must_use]
    pub fn disk_count(&self) -> u8 {
        self.disk_count
    }

    /// Horizontal distance between tower centres.
    #[must_use]
    pub fn tower_spacing(&self) -> f32 {
        self.width / 4.0
    }

    /// Horizontal centre of a tower.
    #[must_use]
    pub fn tower_x(&self, tower: TowerId) -> f32 {
        self.tower_spacing() * (tower.index() + 1) as f32
    }

    /// y of the base the towers stand on.
    #[must_use]
    pub fn tower_bottom(&self) -> f32 {
        self.height * 0.8
    }

    /// Height of a tower pole.
    #[must_use]
    pub fn tower_height(&self) -> f32 {
        self.height * 0.7
    }

    /// y of the top of a tower pole.
    #[must_use]
    pub fn tower_top(&self) -> f32 {
        self.tower_bottom() - self.tower_height()
    }

    /// Height of every disk.
    #[must_use]
    pub fn disk_height(&self) -> f32 {
        MAX_DISK_HEIGHT
            .min(self.tower_height() / (f32::from(self.disk_count) + 2.0))
    }

    /// Width of the largest disk.
    #[must_use]
    pub fn max_disk_width(&self) -> f32 {
        self.tower_spacing() * 0.8
    }

    /// Width of a disk, proportional to its size.
    #[must_use]
    pub fn disk_width(&self, disk: Disk) -> f32 {
        if self.disk_count == 0 {
            return 0.0;
        }
        self.max_disk_width() * f32::from(disk.size())
            / f32::from(self.disk_count)
    }

    /// Position of a disk resting at stack slot `slot` (0 = bottom).
    #[must_use]
    pub fn slot_position(&self, tower: TowerId, slot: usize) -> Vec2 {
        Vec2::new(
            self.tower_x(tower),
            self.tower_bottom() - (slot + 1) as f32 * self.disk_height(),
        )
    }

    /// Arc for `mv` starting from the lifted disk's resting slot and ending
    /// at the slot it will land in, given the towers before the move.
    #[must_use]
    pub fn motion_curve(
        &self,
        towers: &TowerState,
        mv: Move,
        arc_height: f32,
    ) -> ArcCurve {
        let source_slot = towers.height(mv.source).saturating_sub(1);
        let target_slot = towers.height(mv.target);
        ArcCurve::lifted(
            self.slot_position(mv.source, source_slot),
            self.slot_position(mv.target, target_slot),
            arc_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(disks: u8) -> SceneLayout {
        SceneLayout::new(
            &LayoutOptions {
                width: 1200.0,
                height: 500.0,
            },
            disks,
        )
    }

    #[test]
    fn towers_are_evenly_spaced() {
        let l = layout(3);
        assert_eq!(l.tower_x(TowerId::Source), 300.0);
        assert_eq!(l.tower_x(TowerId::Auxiliary), 600.0);
        assert_eq!(l.tower_x(TowerId::Target), 900.0);
        assert_eq!(l.tower_bottom(), 400.0);
        assert_eq!(l.tower_top(), 50.0);
    }

    #[test]
    fn disk_height_is_capped() {
        assert_eq!(layout(3).disk_height(), 30.0);
        // 350 / 12
        assert!((layout(10).disk_height() - 350.0 / 12.0).abs() < 1e-4);
    }

    #[test]
    fn disk_width_scales_with_size() {
        let l = layout(4);
        assert_eq!(l.disk_width(Disk::new(4)), l.max_disk_width());
        assert_eq!(l.disk_width(Disk::new(2)), l.max_disk_width() / 2.0);
    }

    #[test]
    fn motion_curve_joins_settled_slots() {
        let l = layout(3);
        let towers = TowerState::new(3);
        let mv = Move::new(TowerId::Source, TowerId::Target);
        let curve = l.motion_curve(&towers, mv, 100.0);
        // Smallest disk sits in slot 2 on the source and lands in slot 0.
        assert_eq!(curve.start, Vec2::new(300.0, 400.0 - 3.0 * 30.0));
        assert_eq!(curve.end, Vec2::new(900.0, 400.0 - 30.0));
        assert_eq!(curve.control, Vec2::new(600.0, 310.0 - 100.0));
    }
}
