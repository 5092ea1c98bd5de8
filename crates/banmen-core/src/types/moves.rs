//! 指し手（Move）と表示用の指し手情報（MoveData）

use super::{Color, Piece, PieceType, Square};
use crate::error::ParseError;
use crate::position::Position;
use std::fmt;

/// 指し手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// 開始局面を表す番兵。実際の手としては使わない
    Initial,
    /// 盤上の駒を動かす手
    Normal { from: Square, to: Square, promote: bool },
    /// 持ち駒を打つ手
    Drop { piece_type: PieceType, to: Square },
    /// 投了
    Toryo,
}

impl Move {
    /// 移動・打ち込み先の升目。番兵は None
    #[inline]
    pub const fn to(self) -> Option<Square> {
        match self {
            Move::Normal { to, .. } | Move::Drop { to, .. } => Some(to),
            _ => None,
        }
    }

    /// 盤上の駒を動かす手かどうか
    #[inline]
    pub const fn is_normal(self) -> bool {
        matches!(self, Move::Normal { .. })
    }

    /// 駒打ちかどうか
    #[inline]
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    /// USI形式（"7g7f", "7g7f+", "P*5e"）から変換
    pub fn from_usi(usi: &str) -> Result<Move, ParseError> {
        let b = usi.as_bytes();
        if !usi.is_ascii() || !(b.len() == 4 || b.len() == 5) {
            return Err(ParseError::InvalidMove(usi.to_string()));
        }
        if b[1] == b'*' {
            return Self::drop_from_usi(usi);
        }
        Self::normal_from_usi(usi)
    }

    fn normal_from_usi(usi: &str) -> Result<Move, ParseError> {
        let from = Square::from_usi(&usi[0..2])
            .map_err(|_| ParseError::InvalidMove(usi.to_string()))?;
        let to = Square::from_usi(&usi[2..4])
            .map_err(|_| ParseError::InvalidMove(usi.to_string()))?;
        let promote = match usi.len() {
            4 => false,
            5 if usi.as_bytes()[4] == b'+' => true,
            _ => return Err(ParseError::InvalidMove(usi.to_string())),
        };
        Ok(Move::Normal { from, to, promote })
    }

    fn drop_from_usi(usi: &str) -> Result<Move, ParseError> {
        if usi.len() != 4 {
            return Err(ParseError::InvalidMove(usi.to_string()));
        }
        let piece_type = PieceType::from_usi_char(usi.as_bytes()[0] as char)
            .ok_or_else(|| ParseError::InvalidMove(usi.to_string()))?;
        let to = Square::from_usi(&usi[2..4])
            .map_err(|_| ParseError::InvalidMove(usi.to_string()))?;
        Ok(Move::Drop { piece_type, to })
    }

    /// USI形式の文字列に変換
    ///
    /// 投了は "resign"、開始局面の番兵は "none" を返す。
    pub fn to_usi(self) -> String {
        match self {
            Move::Normal { from, to, promote } => {
                let promote = if promote { "+" } else { "" };
                format!("{}{}{}", from.to_usi(), to.to_usi(), promote)
            }
            Move::Drop { piece_type, to } => {
                format!("{}*{}", piece_type.to_usi(), to.to_usi())
            }
            Move::Toryo => "resign".to_string(),
            Move::Initial => "none".to_string(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_usi())
    }
}

/// 表示に必要な文脈を付与した指し手
///
/// KIFの「同」表記には直前の手の移動先が要るため、手単体ではなく
/// 局面と組で構築する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveData {
    pub mv: Move,
    /// 動かした駒（移動前の状態）
    pub piece: Piece,
    /// 取った駒。なければ NONE
    pub capture: Piece,
    /// 直前の手と同じ升目への着手か
    pub same: bool,
    /// 指した側。番兵は None
    pub color: Option<Color>,
    /// この手を指した後の手数
    pub ply: u32,
}

impl MoveData {
    /// 開始局面の番兵
    pub const INITIAL: MoveData = MoveData {
        mv: Move::Initial,
        piece: Piece::NONE,
        capture: Piece::NONE,
        same: false,
        color: None,
        ply: 0,
    };

    /// 投了
    pub const TORYO: MoveData = MoveData {
        mv: Move::Toryo,
        piece: Piece::NONE,
        capture: Piece::NONE,
        same: false,
        color: None,
        ply: 0,
    };

    /// 局面 `position` で `mv` を指す直前の状態から構築する
    ///
    /// `before` は直前の手の移動先（「同」の判定に使う）。
    pub fn new(mv: Move, position: &Position, before: Option<Square>) -> MoveData {
        match mv {
            Move::Initial => MoveData::INITIAL,
            Move::Toryo => MoveData::TORYO,
            Move::Drop { piece_type, .. } => MoveData {
                mv,
                piece: Piece::new(piece_type, position.side_to_move()),
                capture: Piece::NONE,
                same: false,
                color: Some(position.side_to_move()),
                ply: position.ply() + 1,
            },
            Move::Normal { from, to, .. } => MoveData {
                mv,
                piece: position.get(from),
                capture: position.get(to),
                same: Some(to) == before,
                color: Some(position.side_to_move()),
                ply: position.ply() + 1,
            },
        }
    }

    /// KIF形式の文字列に変換
    pub fn to_kif(&self) -> String {
        match self.mv {
            Move::Initial => "開始局面".to_string(),
            Move::Toryo => "投了".to_string(),
            Move::Drop { piece_type, to } => {
                format!("{}{}打", to.to_kif(), piece_type.to_kif())
            }
            Move::Normal { from, to, promote } => {
                let piece = self.piece.piece_type().to_kif();
                let nari = if promote { "成" } else { "" };
                let origin = format!("({}{})", 9 - from.file(), from.rank() + 1);
                if self.same {
                    format!("同{piece}{nari}{origin}")
                } else {
                    format!("{}{piece}{nari}{origin}", to.to_kif())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn test_move_usi_roundtrip() {
        let ok_tests = [
            ("7g7f", Move::Normal { from: sq(2, 6), to: sq(2, 5), promote: false }),
            ("8h2b+", Move::Normal { from: sq(1, 7), to: sq(7, 1), promote: true }),
            ("G*5h", Move::Drop { piece_type: PieceType::KI, to: sq(4, 7) }),
        ];
        for (usi, want) in ok_tests {
            assert_eq!(Move::from_usi(usi).unwrap(), want);
            assert_eq!(want.to_usi(), usi);
        }
    }

    #[test]
    fn test_move_from_usi_errors() {
        let ng_tests = [
            "", "7g", "P", "7g0f", "7g7f*", "10g7f*", "G+5h", "G*5j", "A*5h", "K*5e", "P*5e+",
            // 非ASCIIは文字境界を跨ぐ前に弾く
            "７六歩", "aé7f",
        ];
        for usi in ng_tests {
            assert!(Move::from_usi(usi).is_err(), "should fail: {usi}");
        }
    }

    #[test]
    fn test_sentinel_usi() {
        assert_eq!(Move::Toryo.to_usi(), "resign");
        assert_eq!(Move::Initial.to_usi(), "none");
    }

    #[test]
    fn test_move_to() {
        assert_eq!(Move::from_usi("7g7f").unwrap().to(), Some(sq(2, 5)));
        assert_eq!(Move::from_usi("P*5e").unwrap().to(), Some(sq(4, 4)));
        assert_eq!(Move::Toryo.to(), None);
        assert_eq!(Move::Initial.to(), None);
    }
}
