//! Optimal three-tower move sequence.
//!
//! The classic recursion (move `n - 1` disks out of the way, move the
//! largest, move `n - 1` back on top) is unrolled onto an explicit work
//! stack so the call depth stays constant regardless of disk count.

use std::fmt;

use super::tower::TowerId;

/// A single transfer of the top disk from one tower to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Tower the disk is lifted from.
    pub source: TowerId,
    /// Tower the disk lands on.
    pub target: TowerId,
}

impl Move {
    /// Move from `source` to `target`.
    #[must_use]
    pub const fn new(source: TowerId, target: TowerId) -> Self {
        Self { source, target }
    }

    /// `(source index, target index)` pair.
    #[must_use]
    pub const fn indices(self) -> (usize, usize) {
        (self.source.index(), self.target.index())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Length of the optimal solution for `disk_count` disks (`2^n - 1`),
/// saturating at `u64::MAX`.
#[must_use]
pub fn move_count(disk_count: u8) -> u64 {
    if disk_count >= 64 {
        u64::MAX
    } else {
        (1_u64 << disk_count) - 1
    }
}

/// Optimal sequence moving `disk_count` disks from the source tower to the
/// target tower.
#[must_use]
pub fn generate(disk_count: u8) -> Vec<Move> {
    generate_between(
        disk_count,
        TowerId::Source,
        TowerId::Target,
        TowerId::Auxiliary,
    )
}

/// Pending work on the generation stack.
enum Step {
    /// Move a sub-stack of `disks` disks.
    Transfer {
        disks: u8,
        source: TowerId,
        target: TowerId,
        auxiliary: TowerId,
    },
    /// Emit one move.
    Emit(Move),
}

/// Optimal sequence moving `disk_count` disks from `source` to `target`
/// using `auxiliary` as the spare tower.
#[must_use]
pub fn generate_between(
    disk_count: u8,
    source: TowerId,
    target: TowerId,
    auxiliary: TowerId,
) -> Vec<Move> {
    let capacity = usize::try_from(move_count(disk_count))
        .unwrap_or(usize::MAX)
        .min(1 << 20);
    let mut moves = Vec::with_capacity(capacity);
    let mut stack = vec![Step::Transfer {
        disks: disk_count,
        source,
        target,
        auxiliary,
    }];

    while let Some(step) = stack.pop() {
        match step {
            Step::Emit(mv) => moves.push(mv),
            Step::Transfer { disks: 0, .. } => {}
            Step::Transfer {
                disks,
                source,
                target,
                auxiliary,
            } => {
                // Pushed in reverse so they pop in solution order.
                stack.push(Step::Transfer {
                    disks: disks - 1,
                    source: auxiliary,
                    target,
                    auxiliary: source,
                });
                stack.push(Step::Emit(Move::new(source, target)));
                stack.push(Step::Transfer {
                    disks: disks - 1,
                    source,
                    target: auxiliary,
                    auxiliary: target,
                });
            }
        }
    }

    moves
}
