//! Pieces, sides and board geometry constants.

pub const BOARD_ROWS: usize = 10;
pub const BOARD_COLS: usize = 9;
pub const BOARD_SQUARES: usize = BOARD_ROWS * BOARD_COLS;

/// Last row of Black's half. Rows `0..=4` belong to Black, `5..=9` to Red.
pub const RIVER_BLACK_EDGE: u8 = 4;
pub const RIVER_RED_EDGE: u8 = 5;

pub const PALACE_COLS: std::ops::RangeInclusive<u8> = 3..=5;
pub const BLACK_PALACE_ROWS: std::ops::RangeInclusive<u8> = 0..=2;
pub const RED_PALACE_ROWS: std::ops::RangeInclusive<u8> = 7..=9;

/// Back rank order from column 0 to column 8.
pub const BACK_RANK: [PieceKind; BOARD_COLS] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];
pub const CANNON_COLS: [u8; 2] = [1, 7];
pub const SOLDIER_COLS: [u8; 5] = [0, 2, 4, 6, 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

/// Red starts on rows 7-9 and moves first; Black starts on rows 0-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub player: Player,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// Lowercase FEN letter.
    pub fn fen_letter(self) -> char {
        match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::General => "general",
            PieceKind::Advisor => "advisor",
            PieceKind::Elephant => "elephant",
            PieceKind::Horse => "horse",
            PieceKind::Chariot => "chariot",
            PieceKind::Cannon => "cannon",
            PieceKind::Soldier => "soldier",
        }
    }
}

impl Player {
    /// Get the opponent of the current player.
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    /// Side letter used in the FEN trailer.
    pub fn fen_letter(self) -> char {
        match self {
            Player::Red => 'w',
            Player::Black => 'b',
        }
    }

    /// Row delta of a forward step.
    pub fn forward(self) -> i8 {
        match self {
            Player::Red => -1,
            Player::Black => 1,
        }
    }

    pub fn back_rank(self) -> u8 {
        match self {
            Player::Red => 9,
            Player::Black => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Black => "Black",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Piece {
    pub const fn new(kind: PieceKind, player: Player) -> Self {
        Self { kind, player }
    }

    pub fn is_general(self) -> bool {
        self.kind == PieceKind::General
    }

    /// FEN letter: uppercase for Red, lowercase for Black.
    pub fn to_fen_char(self) -> char {
        let letter = self.kind.fen_letter();
        match self.player {
            Player::Red => letter.to_ascii_uppercase(),
            Player::Black => letter,
        }
    }
}
