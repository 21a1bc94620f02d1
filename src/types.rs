//! Shared types and constants
//! Pure data with no dependencies on the pool, grid, or engine layers.

/// Default falling-block grid dimensions
pub const GRID_WIDTH: u32 = 10;
pub const GRID_HEIGHT: u32 = 20;

/// Cooperative tick granularity (milliseconds)
pub const TICK_MS: u32 = 16;

/// Base gravity interval for the falling-block game
pub const BASE_FALL_MS: u32 = 1000;

/// Gravity intervals by level (milliseconds)
pub const FALL_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];
pub const FALL_INTERVAL_FLOOR_MS: u32 = 120;

/// Points per completed row and per locked piece
pub const ROW_CLEAR_POINTS: u32 = 50;
pub const PIECE_LOCK_POINTS: u32 = 1;

/// Identifier for a committed piece owning grid cells
pub type PieceId = u32;

/// Discrete movement/action codes as translated by the host's input layer.
/// The numeric convention is shared by every mini-game: 1=up, 2=right,
/// 3=down, 4=left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Parse an upstream input code. Returns `None` for anything outside 1..=4.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Direction::Up),
            2 => Some(Direction::Right),
            3 => Some(Direction::Down),
            4 => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 3,
            Direction::Left => 4,
        }
    }
}

/// Falling-block piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states (North = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}
