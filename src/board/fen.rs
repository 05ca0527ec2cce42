// src/board/fen.rs
// Parsing and formatting of the standard six-field position-description
// string (FEN): piece placement / side to move / castling / en-passant /
// halfmove clock / fullmove number.

use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color, Piece};
use crate::square::Square;
use std::fmt;

use super::Board;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenError(pub String);

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid position description: {}", self.0)
    }
}

impl std::error::Error for FenError {}

impl Board {
    /// Reset `self` to the starting array. Equivalent to `Board::new()` but
    /// usable on an already-constructed board (matches the external
    /// interface's `setFromStartingArray`).
    pub fn set_from_starting_array(&mut self) {
        *self = Board::new();
    }

    /// Parse a FEN string into `self`, replacing all prior state.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let mut fields = fen.split_whitespace();

        let placement = fields
            .next()
            .ok_or_else(|| FenError("missing piece placement field".into()))?;
        let side = fields.next().unwrap_or("w");
        let castling = fields.next().unwrap_or("-");
        let ep = fields.next().unwrap_or("-");
        let halfmove = fields.next().unwrap_or("0");
        let fullmove = fields.next().unwrap_or("1");

        let mut piece_bb = [[0u64; 6]; 2];
        let mut rank = 7i32;
        let mut file = 0i32;
        for c in placement.chars() {
            match c {
                '/' => {
                    if file != 8 {
                        return Err(FenError(format!("rank underfilled before '/': {fen}")));
                    }
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => {
                    file += c.to_digit(10).unwrap() as i32;
                }
                _ => {
                    if !(0..8).contains(&file) || !(0..8).contains(&rank) {
                        return Err(FenError(format!("piece placement overflows board: {fen}")));
                    }
                    let (piece, color) = CHAR_TO_PC[c as usize]
                        .ok_or_else(|| FenError(format!("invalid piece glyph '{c}'")))?;
                    let sq = (rank * 8 + file) as usize;
                    piece_bb[color as usize][piece as usize] |= 1u64 << sq;
                    file += 1;
                }
            }
        }
        if rank != 0 || file != 8 {
            return Err(FenError(format!("piece placement incomplete: {fen}")));
        }

        let side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError(format!("invalid side-to-move field: {side}"))),
        };

        let mut castling_rights = 0u8;
        if castling != "-" {
            for c in castling.chars() {
                castling_rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => return Err(FenError(format!("invalid castling field: {castling}"))),
                };
            }
        }

        let en_passant = if ep == "-" {
            None
        } else {
            Some(
                ep.parse::<Square>()
                    .map_err(|_| FenError(format!("invalid en-passant field: {ep}")))?,
            )
        };

        let halfmove_clock: u32 = halfmove
            .parse()
            .map_err(|_| FenError(format!("invalid halfmove clock: {halfmove}")))?;
        let fullmove_number: u32 = fullmove
            .parse()
            .map_err(|_| FenError(format!("invalid fullmove number: {fullmove}")))?;

        *self = Board::new_empty();
        for color in [Color::White, Color::Black] {
            for piece in [
                Piece::Pawn,
                Piece::Knight,
                Piece::Bishop,
                Piece::Rook,
                Piece::Queen,
                Piece::King,
            ] {
                self.set_bb(
                    color,
                    piece,
                    piece_bb[color as usize][piece as usize],
                );
            }
        }
        self.side_to_move = side_to_move;
        self.castling_rights = castling_rights;
        self.en_passant = en_passant;
        self.has_castled = [false, false];
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
        self.history.clear();
        self.refresh_zobrist();

        self.validate()
            .map_err(|e| FenError(format!("overlapping pieces in position description: {e}")))?;

        Ok(())
    }

    /// Render `self` as a FEN string.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(64);

        for rank in (0..8).rev() {
            let mut empty_run = 0u32;
            for file in 0..8 {
                let sq = Square::from_rank_file(rank, file);
                match self.piece_at(sq) {
                    None => empty_run += 1,
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            out.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        let idx = (color as usize) * 6 + piece as usize;
                        out.push(PC_TO_CHAR[idx]);
                    }
                }
            }
            if empty_run > 0 {
                out.push_str(&empty_run.to_string());
            }
            if rank != 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(if self.side_to_move == Color::White {
            'w'
        } else {
            'b'
        });

        out.push(' ');
        if self.castling_rights == 0 {
            out.push('-');
        } else {
            if self.has_castling(CASTLE_WK) {
                out.push('K');
            }
            if self.has_castling(CASTLE_WQ) {
                out.push('Q');
            }
            if self.has_castling(CASTLE_BK) {
                out.push('k');
            }
            if self.has_castling(CASTLE_BQ) {
                out.push('q');
            }
        }

        out.push(' ');
        match self.en_passant {
            None => out.push('-'),
            Some(sq) => out.push_str(&sq.to_string()),
        }

        out.push(' ');
        out.push_str(&self.halfmove_clock.to_string());
        out.push(' ');
        out.push_str(&self.fullmove_number.to_string());

        out
    }
}
