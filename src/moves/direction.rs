//! The eight compass directions, named in the moving piece's own frame.
//!
//! "Forward" is toward the enemy back rank, so the same name points up the
//! board for light pieces and down the board for dark pieces. Use
//! `Color::orient` on `unit()` to get the board step.

/// Travel direction relative to a piece's forward axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
        Direction::ForwardLeft,
        Direction::ForwardRight,
        Direction::BackwardLeft,
        Direction::BackwardRight,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::ForwardLeft,
        Direction::ForwardRight,
        Direction::BackwardLeft,
        Direction::BackwardRight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
            Direction::Left => 2,
            Direction::Right => 3,
            Direction::ForwardLeft => 4,
            Direction::ForwardRight => 5,
            Direction::BackwardLeft => 6,
            Direction::BackwardRight => 7,
        }
    }

    /// Unit step in the piece's own frame.
    #[inline]
    pub const fn unit(self) -> (i8, i8) {
        match self {
            Direction::Forward => (0, 1),
            Direction::Backward => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::ForwardLeft => (-1, 1),
            Direction::ForwardRight => (1, 1),
            Direction::BackwardLeft => (-1, -1),
            Direction::BackwardRight => (1, -1),
        }
    }

    /// Direction of travel of an un-mirrored action, from the signs of its
    /// components. `None` for the null vector.
    pub const fn from_action(action: (i8, i8)) -> Option<Direction> {
        match (action.0.signum(), action.1.signum()) {
            (0, 1) => Some(Direction::Forward),
            (0, -1) => Some(Direction::Backward),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (-1, 1) => Some(Direction::ForwardLeft),
            (1, 1) => Some(Direction::ForwardRight),
            (-1, -1) => Some(Direction::BackwardLeft),
            (1, -1) => Some(Direction::BackwardRight),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::ForwardLeft => "forwardLeft",
            Direction::ForwardRight => "forwardRight",
            Direction::BackwardLeft => "backwardLeft",
            Direction::BackwardRight => "backwardRight",
        }
    }
}
