use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// When a castling piece first left its home square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovedAt {
    #[default]
    Unmoved,
    /// History index of the ply that moved it.
    Ply(usize),
    /// Already moved when the position was loaded.
    BeforeHistory,
}

impl MovedAt {
    #[inline]
    pub const fn is_unmoved(self) -> bool {
        matches!(self, MovedAt::Unmoved)
    }
}

/// Ply-indexed castling bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingMarkers {
    /// Indexed like `chess_rules::ROOK_HOMES`.
    pub rooks_moved: [MovedAt; 4],
    /// Indexed by `Color::index`.
    pub kings_moved: [MovedAt; 2],
    pub kings_castled: [MovedAt; 2],
}

/// Single undo record for one applied ply.
///
/// Holds the diff needed to put the board back: the move, the piece that
/// moved, anything it took, the castle rook relocation, the promotion, and the
/// castling markers as they were before the ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured: Option<(Piece, Square)>,
    /// `(from, to)` of the rook moved by a castle.
    pub castle_rook: Option<(Square, Square)>,
    pub promoted_to: Option<Piece>,
    pub prev_markers: CastlingMarkers,
}

impl UndoState {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Pawn advance of two ranks (en-passant trigger).
    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.moved_piece.kind == PieceKind::Pawn && self.mv.from.rank().abs_diff(self.mv.to.rank()) == 2
    }
}
