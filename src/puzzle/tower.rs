//! Three ordered disk stacks with the monotonic-stack invariant.

use std::fmt;

use super::moves::Move;

/// Number of towers in the puzzle.
pub const TOWER_COUNT: usize = 3;

/// A disk, identified by its size (1 = smallest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Disk(u8);

impl Disk {
    /// Disk of the given size.
    #[must_use]
    pub const fn new(size: u8) -> Self {
        Self(size)
    }

    /// Size of this disk (larger numbers are physically larger disks).
    #[must_use]
    pub const fn size(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the three towers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TowerId {
    /// Tower 0, where every disk starts.
    Source,
    /// Tower 1.
    Auxiliary,
    /// Tower 2, where every disk ends.
    Target,
}

impl TowerId {
    /// All towers in index order.
    pub const ALL: [Self; TOWER_COUNT] =
        [Self::Source, Self::Auxiliary, Self::Target];

    /// Zero-based tower index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Source => 0,
            Self::Auxiliary => 1,
            Self::Target => 2,
        }
    }

    /// Human-readable tower name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Auxiliary => "Auxiliary",
            Self::Target => "Target",
        }
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why the tower model refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Source and target are the same tower.
    SameTower(TowerId),
    /// The source tower has no disk to lift.
    EmptySource(TowerId),
    /// The lifted disk is larger than the disk it would rest on.
    LargerOnSmaller {
        /// Disk being moved.
        disk: Disk,
        /// Top disk of the target tower.
        onto: Disk,
    },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameTower(tower) => {
                write!(f, "cannot move a disk from {tower} onto itself")
            }
            Self::EmptySource(tower) => {
                write!(f, "tower {tower} has no disk to move")
            }
            Self::LargerOnSmaller { disk, onto } => {
                write!(f, "cannot place disk {disk} on smaller disk {onto}")
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// In-memory model of the three towers.
///
/// Stacks are stored bottom-to-top, so the last element of each stack is
/// the disk that can be lifted. The only mutation is [`TowerState::apply`],
/// which validates before touching either stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerState {
    stacks: [Vec<Disk>; TOWER_COUNT],
    disk_count: u8,
}

impl TowerState {
    /// Initial configuration: all disks on the source tower, largest at the
    /// bottom.
    #[must_use]
    pub fn new(disk_count: u8) -> Self {
        let source = (1..=disk_count).rev().map(Disk::new).collect();
        Self {
            stacks: [source, Vec::new(), Vec::new()],
            disk_count,
        }
    }

    /// Total number of disks across all towers.
    #[must_use]
    pub fn disk_count(&self) -> u8 {
        self.disk_count
    }

    /// Disks on a tower, bottom to top.
    #[must_use]
    pub fn stack(&self, tower: TowerId) -> &[Disk] {
        &self.stacks[tower.index()]
    }

    /// Number of disks on a tower.
    #[must_use]
    pub fn height(&self, tower: TowerId) -> usize {
        self.stacks[tower.index()].len()
    }

    /// Disk at the top of a tower.
    #[must_use]
    pub fn top(&self, tower: TowerId) -> Option<Disk> {
        self.stacks[tower.index()].last().copied()
    }

    /// Validate a move without applying it, returning the disk it would
    /// carry.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the towers coincide, the source is empty, or
    /// the disk would land on a smaller one.
    pub fn check_move(&self, mv: Move) -> Result<Disk, MoveError> {
        if mv.source == mv.target {
            return Err(MoveError::SameTower(mv.source));
        }
        let disk = self
            .top(mv.source)
            .ok_or(MoveError::EmptySource(mv.source))?;
        match self.top(mv.target) {
            Some(onto) if onto < disk => {
                Err(MoveError::LargerOnSmaller { disk, onto })
            }
            _ => Ok(disk),
        }
    }

    /// Pop the source tower and push onto the target tower.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] and leaves both stacks untouched if the move is
    /// illegal.
    pub fn apply(&mut self, mv: Move) -> Result<Disk, MoveError> {
        let disk = self.check_move(mv)?;
        let _ = self.stacks[mv.source.index()].pop();
        self.stacks[mv.target.index()].push(disk);
        Ok(disk)
    }

    /// Copy of this state with the top disk of `tower` lifted off.
    ///
    /// Used to build the settled part of a frame while that disk is drawn
    /// in flight.
    #[must_use]
    pub fn lifted(&self, tower: TowerId) -> Self {
        let mut view = self.clone();
        let _ = view.stacks[tower.index()].pop();
        view
    }

    /// Put a lifted disk back on top of `tower`. Returns false, leaving the
    /// tower untouched, if it would rest on a smaller disk.
    pub(crate) fn restore_top(&mut self, tower: TowerId, disk: Disk) -> bool {
        if self.top(tower).is_some_and(|top| top < disk) {
            return false;
        }
        self.stacks[tower.index()].push(disk);
        true
    }

    /// Whether every disk sits on the target tower.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.height(TowerId::Target) == usize::from(self.disk_count)
    }

    /// Whether both model invariants hold: every stack strictly decreases
    /// bottom to top, and the towers together hold each of `1..=N` once.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let monotonic = self
            .stacks
            .iter()
            .all(|stack| stack.windows(2).all(|w| w[0] > w[1]));
        if !monotonic {
            return false;
        }
        let mut sizes: Vec<u8> = self
            .stacks
            .iter()
            .flatten()
            .map(|disk| disk.size())
            .collect();
        sizes.sort_unstable();
        sizes.iter().copied().eq(1..=self.disk_count)
    }
}

impl fmt::Display for TowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stack) in self.stacks.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str("[")?;
            for (j, disk) in stack.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{disk}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
