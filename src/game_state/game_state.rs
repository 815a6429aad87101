//! Board state representation.
//!
//! `GameState` owns the 8x8 grid, the side to move, the castling markers, the
//! per-ply undo history, the captured/promoted ledgers and the per-color
//! occupancy index. Only the move applier mutates it during play; the setup
//! helpers exist for building custom positions.

use std::collections::BTreeMap;
use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{CASTLE_PATHS, KING_HOMES, ROOK_HOMES};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::{CastlingMarkers, UndoState};
use crate::move_generation::game_status::{game_status, GameStatus};
use crate::move_generation::legal_move_apply::{make_move, play_move, undo_move};
use crate::move_generation::legal_move_generator::{legal_moves, valid_moves, valid_piece_moves};
use crate::move_generation::threat_matrix::{compute_threat_matrix, is_in_check, ThreatMatrix};
use crate::moves::move_descriptions::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_game_state;

const HOME_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Castling availability as seen by a position serializer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub light_kingside: bool,
    pub light_queenside: bool,
    pub dark_kingside: bool,
    pub dark_queenside: bool,
}

impl CastlingRights {
    #[inline]
    pub fn any(&self) -> bool {
        self.light_kingside || self.light_queenside || self.dark_kingside || self.dark_queenside
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: [Cell; 64],
    /// Occupied squares per color, kept in sync with `board`.
    pub(crate) occupancy_by_color: [u64; 2],
    pub(crate) side_to_move: Color,
    pub(crate) markers: CastlingMarkers,
    pub(crate) history: Vec<UndoState>,
    /// History index -> piece taken on that ply and where it stood.
    pub(crate) captured_pieces: BTreeMap<usize, (Piece, Square)>,
    /// History index -> piece a pawn became on that ply.
    pub(crate) promoted_pieces: BTreeMap<usize, (Piece, Square)>,

    // Context of a position loaded mid-game; neutral for a fresh game.
    pub(crate) initial_en_passant: Option<Square>,
    pub(crate) initial_halfmove_clock: u16,
    pub(crate) initial_ply: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}

impl GameState {
    /// Board with no pieces, light to move, every castling marker unmoved.
    pub fn empty() -> Self {
        Self {
            board: [Cell::Empty; 64],
            occupancy_by_color: [0; 2],
            side_to_move: Color::Light,
            markers: CastlingMarkers::default(),
            history: Vec::new(),
            captured_pieces: BTreeMap::new(),
            promoted_pieces: BTreeMap::new(),
            initial_en_passant: None,
            initial_halfmove_clock: 0,
            initial_ply: 0,
        }
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut game_state = Self::empty();
        for (file, kind) in HOME_ROW.into_iter().enumerate() {
            let file = file as u8;
            game_state.place_piece(Square::at(file, 0), Piece::new(kind, Color::Light));
            game_state.place_piece(Square::at(file, 1), Piece::new(PieceKind::Pawn, Color::Light));
            game_state.place_piece(Square::at(file, 6), Piece::new(PieceKind::Pawn, Color::Dark));
            game_state.place_piece(Square::at(file, 7), Piece::new(kind, Color::Dark));
        }
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    // --- Setup ---

    /// Put `piece` on `square`, replacing whatever stood there.
    pub fn place_piece(&mut self, square: Square, piece: Piece) {
        self.set_cell(square, Cell::Occupied(piece));
    }

    /// Remove whatever stands on `square`.
    pub fn clear_square(&mut self, square: Square) -> Option<Piece> {
        let previous = self.piece_at(square);
        self.set_cell(square, Cell::Empty);
        previous
    }

    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    // --- Read accessors ---

    #[inline]
    pub fn cell(&self, square: Square) -> Cell {
        self.board[square.index()]
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cell(square).piece()
    }

    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.cell(square).color()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cell(square).is_empty()
    }

    #[inline]
    pub fn is_color(&self, square: Square, color: Color) -> bool {
        self.color_at(square) == Some(color)
    }

    #[inline]
    pub fn is_kind(&self, square: Square, kind: PieceKind) -> bool {
        self.piece_at(square).is_some_and(|piece| piece.kind == kind)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy_by_color[0] | self.occupancy_by_color[1]
    }

    /// Squares holding a piece of `color`.
    pub fn player_pieces(&self, color: Color) -> impl Iterator<Item = Square> {
        iter_squares(self.occupancy(color))
    }

    pub fn player_pieces_of_type(
        &self,
        kind: PieceKind,
        color: Color,
    ) -> impl Iterator<Item = Square> + '_ {
        self.player_pieces(color)
            .filter(move |square| self.is_kind(*square, kind))
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.player_pieces_of_type(PieceKind::King, color).next()
    }

    #[inline]
    pub fn markers(&self) -> &CastlingMarkers {
        &self.markers
    }

    #[inline]
    pub fn history(&self) -> &[UndoState] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&UndoState> {
        self.history.last()
    }

    /// Plies applied since this state was created or loaded.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Captured pieces in the order they were taken.
    pub fn captured_pieces(&self) -> Vec<Piece> {
        self.captured_pieces.values().map(|(piece, _)| *piece).collect()
    }

    #[inline]
    pub fn captured_ledger(&self) -> &BTreeMap<usize, (Piece, Square)> {
        &self.captured_pieces
    }

    #[inline]
    pub fn promoted_ledger(&self) -> &BTreeMap<usize, (Piece, Square)> {
        &self.promoted_pieces
    }

    /// Castling still available: king and rook unmoved and both on their home squares.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut available = [false; 4];
        for path in &CASTLE_PATHS {
            available[path.rook_index] = self.castle_pieces_in_place(path.color, path.rook_index);
        }
        CastlingRights {
            light_queenside: available[0],
            light_kingside: available[1],
            dark_queenside: available[2],
            dark_kingside: available[3],
        }
    }

    pub(crate) fn castle_pieces_in_place(&self, color: Color, rook_index: usize) -> bool {
        let king = Piece::new(PieceKind::King, color);
        let rook = Piece::new(PieceKind::Rook, color);
        self.markers.kings_moved[color.index()].is_unmoved()
            && self.markers.rooks_moved[rook_index].is_unmoved()
            && self.piece_at(KING_HOMES[color.index()]) == Some(king)
            && self.piece_at(ROOK_HOMES[rook_index]) == Some(rook)
    }

    /// Square passed over by a pawn that advanced two ranks on the previous ply.
    pub fn en_passant_target(&self) -> Option<Square> {
        match self.history.last() {
            Some(last) if last.is_double_pawn_push() => {
                let from = last.mv.from;
                let to = last.mv.to;
                Square::new(from.file(), (from.rank() + to.rank()) / 2)
            }
            Some(_) => None,
            None => self.initial_en_passant,
        }
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u16 {
        let mut quiet_plies = 0u16;
        for record in self.history.iter().rev() {
            if record.is_capture() || record.moved_piece.kind == PieceKind::Pawn {
                return quiet_plies;
            }
            quiet_plies = quiet_plies.saturating_add(1);
        }
        self.initial_halfmove_clock.saturating_add(quiet_plies)
    }

    /// Full-move number, starting at 1 and incremented after each dark move.
    pub fn fullmove_number(&self) -> u16 {
        let plies = self.initial_ply + self.history.len();
        u16::try_from(plies / 2 + 1).unwrap_or(u16::MAX)
    }

    // --- Crate-private write accessors (grid + occupancy index together) ---

    pub(crate) fn set_cell(&mut self, square: Square, cell: Cell) {
        let bit = square.bit();
        if let Some(previous) = self.board[square.index()].color() {
            self.occupancy_by_color[previous.index()] &= !bit;
        }
        if let Some(color) = cell.color() {
            self.occupancy_by_color[color.index()] |= bit;
        }
        self.board[square.index()] = cell;
    }

    /// Move the occupant of `from` onto `to`; returns what stood on `to`.
    pub(crate) fn relocate_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.cell(from);
        let displaced = self.piece_at(to);
        self.set_cell(to, moving);
        self.set_cell(from, Cell::Empty);
        displaced
    }

    // --- Rules engine entry points ---

    /// Legal moves of the side to move, keyed by origin square.
    #[inline]
    pub fn valid_moves(&mut self) -> BTreeMap<Square, Vec<Move>> {
        valid_moves(self)
    }

    #[inline]
    pub fn valid_piece_moves(&mut self, square: Square) -> Vec<Move> {
        valid_piece_moves(self, square)
    }

    #[inline]
    pub fn legal_moves(&mut self) -> Vec<Move> {
        legal_moves(self)
    }

    #[inline]
    pub fn threat_matrix(&self, player: Color) -> ThreatMatrix {
        compute_threat_matrix(self, player)
    }

    #[inline]
    pub fn is_in_check(&self, player: Color) -> bool {
        is_in_check(self, player)
    }

    #[inline]
    pub fn make_move(&mut self, mv: Move, validate: bool) -> Result<(), ChessErrors> {
        make_move(self, mv, validate)
    }

    #[inline]
    pub fn play_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, ChessErrors> {
        play_move(self, from, to, promotion)
    }

    #[inline]
    pub fn undo_move(&mut self) -> Result<Move, ChessErrors> {
        undo_move(self)
    }

    #[inline]
    pub fn game_status(&mut self) -> GameStatus {
        game_status(self)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_game_state(self))
    }
}
