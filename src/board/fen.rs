use thiserror::Error;

use super::piece::{Color, Piece};
use super::position::{CastlingRights, Position};
use super::square::{make_square, parse_square, square_name};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
    #[error("piece placement needs 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank '{0}' does not describe 8 files")]
    RankWidth(String),
    #[error("unknown piece character '{0}'")]
    BadPiece(char),
    #[error("side to move must be 'w' or 'b', found '{0}'")]
    BadSideToMove(String),
    #[error("bad castling field '{0}'")]
    BadCastling(String),
    #[error("bad en passant field '{0}'")]
    BadEnPassant(String),
    #[error("bad move counter '{0}'")]
    BadCounter(String),
}

impl Position {
    /// Parse a full 6-field FEN record.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::BadPiece(c))?;
                    if file > 7 {
                        return Err(FenError::RankWidth(rank_str.to_string()));
                    }
                    pos.set_piece(make_square(file, rank), piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth(rank_str.to_string()));
            }
        }

        pos.set_side_to_move(match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        });

        let mut rights = CastlingRights::none();
        if fields[2] != "-" {
            for c in fields[2].chars() {
                match c {
                    'K' => rights.white_kingside = true,
                    'Q' => rights.white_queenside = true,
                    'k' => rights.black_kingside = true,
                    'q' => rights.black_queenside = true,
                    _ => return Err(FenError::BadCastling(fields[2].to_string())),
                }
            }
        }
        pos.set_castling_rights(rights);

        pos.set_en_passant_square(match fields[3] {
            "-" => None,
            sq => Some(
                parse_square(sq).ok_or_else(|| FenError::BadEnPassant(sq.to_string()))?,
            ),
        });

        let halfmove: u16 = fields[4]
            .parse()
            .map_err(|_| FenError::BadCounter(fields[4].to_string()))?;
        pos.set_halfmove_clock(halfmove);
        let fullmove: u16 = fields[5]
            .parse()
            .map_err(|_| FenError::BadCounter(fields[5].to_string()))?;
        pos.set_fullmove_number(fullmove);

        Ok(pos)
    }

    /// Serialize back to the 6-field FEN record.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let piece = self.piece_at(make_square(file, rank));
                if piece.is_none() {
                    empty += 1;
                } else {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.to_char());
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights = self.castling_rights();
        if rights == CastlingRights::none() {
            out.push('-');
        } else {
            if rights.white_kingside {
                out.push('K');
            }
            if rights.white_queenside {
                out.push('Q');
            }
            if rights.black_kingside {
                out.push('k');
            }
            if rights.black_queenside {
                out.push('q');
            }
        }

        out.push(' ');
        match self.en_passant_square() {
            Some(sq) => out.push_str(&square_name(sq)),
            None => out.push('-'),
        }

        out.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        ));
        out
    }
}
