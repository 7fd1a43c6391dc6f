//! Character-grid renderer.
//!
//! Consumes playback signals through [`PlaybackObserver`] and rasterises
//! the latest frame by scaling layout coordinates onto a fixed grid. Used by
//! the terminal binary and handy for asserting on what a frame looks like.

use std::fmt::Write as _;

use glam::Vec2;

use super::celebration::ParticleBurst;
use super::disk_color;
use super::layout::SceneLayout;
use crate::playback::{FrameSnapshot, PlaybackObserver, RunState};
use crate::puzzle::{Disk, TowerId, TowerState};

const POLE: char = '|';
const BASE: char = '=';
const PARTICLE: char = '*';
const RESET: &str = "\x1b[0m";

/// One grid cell: a glyph and an optional 24-bit colour.
type Cell = (char, Option<[u8; 3]>);

/// Renders towers, disks, the disk in flight, progress and status text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    layout: SceneLayout,
    columns: usize,
    rows: usize,
    frame: Option<FrameSnapshot>,
    current_move: usize,
    total_moves: usize,
    status: RunState,
    celebration: Option<ParticleBurst>,
    color: bool,
}

impl TextRenderer {
    /// Renderer drawing `layout` onto a `columns × rows` grid (plus one
    /// header line).
    #[must_use]
    pub fn new(layout: SceneLayout, columns: usize, rows: usize) -> Self {
        Self {
            layout,
            columns: columns.max(1),
            rows: rows.max(1),
            frame: None,
            current_move: 0,
            total_moves: 0,
            status: RunState::Idle,
            celebration: None,
            color: false,
        }
    }

    /// Paint disks and particles with ANSI truecolor escapes from the
    /// disk palette.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Switch to new geometry, e.g. after the disk count changed.
    pub fn set_layout(&mut self, layout: SceneLayout) {
        self.layout = layout;
        self.frame = None;
        self.celebration = None;
    }

    /// Last run state received.
    #[must_use]
    pub fn status(&self) -> RunState {
        self.status
    }

    /// Last frame received.
    #[must_use]
    pub fn frame(&self) -> Option<&FrameSnapshot> {
        self.frame.as_ref()
    }

    /// Whether a completion burst is still playing.
    #[must_use]
    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_some()
    }

    /// Advance the completion burst one step. Returns false when there is
    /// nothing left to animate.
    pub fn step_celebration(&mut self) -> bool {
        let Some(burst) = self.celebration.as_mut() else {
            return false;
        };
        if burst.step() && !burst.is_finished() {
            return true;
        }
        self.celebration = None;
        false
    }

    /// Draw the current state.
    #[must_use]
    pub fn render(&self) -> String {
        let mut canvas = Canvas::new(&self.layout, self.columns, self.rows);
        canvas.draw_base();
        for tower in TowerId::ALL {
            canvas.draw_pole(tower);
        }

        let initial;
        let (towers, in_motion) = if let Some(frame) = &self.frame {
            (&frame.towers, frame.in_motion)
        } else {
            initial = TowerState::new(self.layout.disk_count());
            (&initial, None)
        };
        for tower in TowerId::ALL {
            for (slot, &disk) in towers.stack(tower).iter().enumerate() {
                canvas.draw_disk(disk, self.layout.slot_position(tower, slot));
            }
        }
        if let Some(motion) = in_motion {
            canvas.draw_disk(motion.disk, motion.position);
        }
        if let Some(burst) = &self.celebration {
            for particle in burst.particles() {
                canvas.put(particle.position, (PARTICLE, Some(particle.color)));
            }
        }
        canvas.draw_labels();

        let progress =
            format!("Moves: {}/{}", self.current_move, self.total_moves);
        let status = self.status.label();
        let gap = self
            .columns
            .saturating_sub(progress.len() + status.len())
            .max(1);
        let mut out = format!("{progress}{}{status}\n", " ".repeat(gap));
        out.push_str(&canvas.finish(self.color));
        out
    }
}

impl PlaybackObserver for TextRenderer {
    fn on_state_changed(&mut self, frame: &FrameSnapshot) {
        self.frame = Some(frame.clone());
    }

    fn on_move_progress(&mut self, current: usize, total: usize) {
        self.current_move = current;
        self.total_moves = total;
    }

    fn on_run_state_changed(&mut self, state: RunState) {
        self.status = state;
        if matches!(state, RunState::Idle | RunState::Running) {
            self.celebration = None;
        }
    }

    fn on_completed(&mut self) {
        self.celebration = Some(ParticleBurst::random(&self.layout));
    }
}

/// Glyph used to draw a disk: its size, with 10 shown as `0`.
fn disk_glyph(disk: Disk) -> char {
    char::from_digit(u32::from(disk.size() % 10), 10).unwrap_or('#')
}

/// Grid cell for a scaled coordinate, if on the grid.
fn to_cell(value: f32, scale: f32, limit: usize) -> Option<usize> {
    let scaled = (value * scale).floor();
    if !scaled.is_finite() || scaled < 0.0 {
        return None;
    }
    let cell = scaled as usize;
    (cell < limit).then_some(cell)
}

struct Canvas<'a> {
    layout: &'a SceneLayout,
    cells: Vec<Vec<Cell>>,
    columns: usize,
    rows: usize,
    scale: Vec2,
}

impl<'a> Canvas<'a> {
    fn new(layout: &'a SceneLayout, columns: usize, rows: usize) -> Self {
        let scale = Vec2::new(
            columns as f32 / layout.width(),
            rows as f32 / layout.height(),
        );
        Self {
            layout,
            cells: vec![vec![(' ', None); columns]; rows],
            columns,
            rows,
            scale,
        }
    }

    fn column(&self, x: f32) -> Option<usize> {
        to_cell(x, self.scale.x, self.columns)
    }

    fn row(&self, y: f32) -> Option<usize> {
        to_cell(y, self.scale.y, self.rows)
    }

    fn set(&mut self, column: usize, row: usize, glyph: Cell) {
        if let Some(cell) =
            self.cells.get_mut(row).and_then(|r| r.get_mut(column))
        {
            *cell = glyph;
        }
    }

    fn put(&mut self, position: Vec2, glyph: Cell) {
        if let (Some(column), Some(row)) =
            (self.column(position.x), self.row(position.y))
        {
            self.set(column, row, glyph);
        }
    }

    fn span(&mut self, from: f32, to: f32, row: usize, glyph: Cell) {
        let first = self.column(from.max(0.0)).unwrap_or(0);
        let last = self
            .column(to)
            .unwrap_or_else(|| self.columns.saturating_sub(1));
        for column in first..=last {
            self.set(column, row, glyph);
        }
    }

    fn draw_base(&mut self) {
        let Some(row) = self.row(self.layout.tower_bottom()) else {
            return;
        };
        let margin = self.layout.tower_spacing() * 0.5;
        self.span(margin, self.layout.width() - margin, row, (BASE, None));
    }

    fn draw_pole(&mut self, tower: TowerId) {
        let Some(column) = self.column(self.layout.tower_x(tower)) else {
            return;
        };
        let top = self.row(self.layout.tower_top()).unwrap_or(0);
        let bottom = self
            .row(self.layout.tower_bottom())
            .unwrap_or(self.rows);
        for row in top..bottom {
            self.set(column, row, (POLE, None));
        }
    }

    /// `position` is the disk's horizontal centre and top edge.
    fn draw_disk(&mut self, disk: Disk, position: Vec2) {
        let Some(row) =
            self.row(position.y + self.layout.disk_height() * 0.5)
        else {
            return;
        };
        let half = self.layout.disk_width(disk) * 0.5;
        if position.x + half < 0.0 || position.x - half > self.layout.width()
        {
            return;
        }
        let glyph = (disk_glyph(disk), Some(disk_color(disk)));
        self.span(position.x - half, position.x + half, row, glyph);
    }

    fn draw_labels(&mut self) {
        let Some(row) = self
            .row(self.layout.tower_bottom())
            .map(|r| r + 1)
            .filter(|&r| r < self.rows)
        else {
            return;
        };
        for tower in TowerId::ALL {
            let Some(centre) = self.column(self.layout.tower_x(tower)) else {
                continue;
            };
            let label = tower.label();
            let start = centre.saturating_sub(label.len() / 2);
            for (offset, glyph) in label.chars().enumerate() {
                self.set(start + offset, row, (glyph, None));
            }
        }
    }

    fn finish(self, color: bool) -> String {
        let mut out = String::new();
        for row in self.cells {
            let used = row
                .iter()
                .rposition(|&(glyph, _)| glyph != ' ')
                .map_or(0, |last| last + 1);
            let mut painted = None;
            for &(glyph, rgb) in &row[..used] {
                let rgb = rgb.filter(|_| color);
                if rgb != painted {
                    match rgb {
                        Some([r, g, b]) => {
                            let _ = write!(out, "\x1b[38;2;{r};{g};{b}m");
                        }
                        None => out.push_str(RESET),
                    }
                    painted = rgb;
                }
                out.push(glyph);
            }
            if painted.is_some() {
                out.push_str(RESET);
            }
            out.push('\n');
        }
        out
    }
}
