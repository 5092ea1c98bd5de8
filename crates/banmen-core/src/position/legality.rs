//! 合法性判定
//!
//! 疑似合法手から王手放置と打ち歩詰めを取り除く。判定はクローンした
//! 局面への推測適用で行う。

use super::Position;
use crate::types::{Color, Move, PieceType, Square};

impl Position {
    /// 指定した側の玉の位置。いなければ None
    fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            let piece = self.board().get(sq);
            piece.piece_type() == PieceType::OU && piece.color() == Some(color)
        })
    }

    /// 指定した側の玉に王手が掛かっているか
    ///
    /// 玉がいない局面は王手なし扱い。推測適用の途中では玉が取られた
    /// 形の局面も通るため、その場合に備えている。
    pub(crate) fn in_check_against(&self, color: Color) -> bool {
        let Some(king) = self.king_square(color) else {
            log::debug!("no {color:?} king on board, treating as not in check");
            return false;
        };
        // 再帰を避けるため、相手の手は合法性検査なしの疑似合法手を使う
        self.pseudo_legal_moves(color.flip())
            .iter()
            .any(|mv| mv.to() == Some(king))
    }

    /// 手番側の玉に王手が掛かっているか
    pub fn in_check(&self) -> bool {
        self.in_check_against(self.side_to_move())
    }

    /// 疑似合法手 `mv` が合法かどうか
    ///
    /// 1. クローンに適用して自玉に王手が残れば非合法
    /// 2. 歩打ちで相手が王手かつ応手なしなら打ち歩詰めで非合法
    fn move_is_legal(&self, mv: Move) -> bool {
        let mut probe = self.clone();
        if probe.apply_move(mv).is_err() {
            return false;
        }
        if probe.in_check_against(self.side_to_move()) {
            return false;
        }
        if let Move::Drop { piece_type: PieceType::FU, .. } = mv {
            if probe.in_check() && probe.is_checkmate() {
                return false;
            }
        }
        true
    }

    /// 合法手をすべて生成する
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pseudo_legal_moves(self.side_to_move())
            .into_iter()
            .filter(|&mv| self.move_is_legal(mv))
            .collect()
    }

    /// `mv` が合法手かどうか
    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// 手番側に合法手が一つもないか
    ///
    /// 将棋ではステイルメイトも手番側の負けなので詰みと区別しない。
    pub fn is_checkmate(&self) -> bool {
        self.legal_moves().is_empty()
    }
}
