//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and board
//! [`Square`]s, and parses coordinate moves (`e2e4`, `e7e8q`) for the demo
//! binary and tests.

use std::str::FromStr;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};

/// Convert an algebraic square (for example: "e4") to a board square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraicSquare(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraicSquare(square.to_owned()));
    }

    Ok(Square::new(b'8' - rank, file - b'a'))
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(s)
    }
}

/// Convert a board square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

/// Parse a coordinate move such as `e2e4` or `e7e8q` into its endpoints and
/// optional promotion piece.
pub fn parse_coordinate_move(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::InvalidCoordinateMove(text.to_owned()));
    }

    let start = algebraic_to_square(&text[0..2])
        .map_err(|_| ChessError::InvalidCoordinateMove(text.to_owned()))?;
    let end = algebraic_to_square(&text[2..4])
        .map_err(|_| ChessError::InvalidCoordinateMove(text.to_owned()))?;

    let promotion = match text[4..].chars().next() {
        None => None,
        Some(letter) => match PieceKind::from_letter(letter) {
            Some(kind) if kind.is_promotion_target() => Some(kind),
            _ => return Err(ChessError::InvalidCoordinateMove(text.to_owned())),
        },
    };

    Ok((start, end, promotion))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, parse_coordinate_move, square_to_algebraic};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::{PieceKind, Square};

    #[test]
    fn corner_squares_map_to_grid_corners() {
        assert_eq!(algebraic_to_square("a8").expect("a8 should parse"), Square::new(0, 0));
        assert_eq!(algebraic_to_square("h1").expect("h1 should parse"), Square::new(7, 7));
        assert_eq!(algebraic_to_square("e2").expect("e2 should parse"), Square::new(6, 4));
        assert_eq!(square_to_algebraic(Square::new(4, 4)), "e4");
        assert_eq!("d5".parse::<Square>(), Ok(Square::new(3, 3)));
    }

    #[test]
    fn rejects_malformed_squares() {
        for bad in ["", "e", "e9", "i1", "e44", "1e"] {
            assert_eq!(
                algebraic_to_square(bad),
                Err(ChessError::InvalidAlgebraicSquare(bad.to_owned()))
            );
        }
    }

    #[test]
    fn parses_plain_and_promotion_moves() {
        let (start, end, promotion) = parse_coordinate_move("e2e4").expect("e2e4 parses");
        assert_eq!((start, end, promotion), (Square::new(6, 4), Square::new(4, 4), None));

        let (_, end, promotion) = parse_coordinate_move("a7a8n").expect("a7a8n parses");
        assert_eq!(end, Square::new(0, 0));
        assert_eq!(promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn rejects_bad_promotion_letters() {
        assert!(parse_coordinate_move("a7a8k").is_err());
        assert!(parse_coordinate_move("a7a8x").is_err());
        assert!(parse_coordinate_move("e2").is_err());
    }
}
