//! 疑似合法手の生成
//!
//! 駒の利きに沿った手と打ち駒を列挙する。王手放置と打ち歩詰めは
//! ここでは除外しない（`legality` が受け持つ）。

use super::Position;
use crate::types::{Color, Move, Piece, PieceType, Square};

/// (筋, 段) のずらし量
type Offset = (i8, i8);

// 先手・後手それぞれのひとマス移動。後手は段方向の鏡像
const FU_STEPS: [[Offset; 1]; 2] = [[(0, -1)], [(0, 1)]];
const KE_STEPS: [[Offset; 2]; 2] = [[(-1, -2), (1, -2)], [(-1, 2), (1, 2)]];
const GI_STEPS: [[Offset; 5]; 2] = [
    [(-1, -1), (0, -1), (1, -1), (-1, 1), (1, 1)],
    [(-1, 1), (0, 1), (1, 1), (-1, -1), (1, -1)],
];
const KI_STEPS: [[Offset; 6]; 2] = [
    [(-1, 0), (-1, -1), (0, -1), (1, -1), (1, 0), (0, 1)],
    [(-1, 0), (-1, 1), (0, 1), (1, 1), (1, 0), (0, -1)],
];
// 対称な利きは先後で共有する
const KA_STEPS: [Offset; 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];
const HI_STEPS: [Offset; 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
const OU_STEPS: [Offset; 8] =
    [(-1, 0), (-1, -1), (0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1)];

impl Position {
    /// 指定した側の疑似合法手をすべて生成する
    ///
    /// 王手放置や打ち歩詰めになる手も含む。
    pub fn pseudo_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        let c = color.index();
        for from in Square::all() {
            let piece = self.board().get(from);
            if piece.color() != Some(color) {
                continue;
            }
            match piece.piece_type() {
                PieceType::FU => self.hopping_moves(&mut moves, from, color, &FU_STEPS[c]),
                PieceType::KE => self.hopping_moves(&mut moves, from, color, &KE_STEPS[c]),
                PieceType::GI => self.hopping_moves(&mut moves, from, color, &GI_STEPS[c]),
                // 成った小駒は金の動き
                PieceType::KI
                | PieceType::TO
                | PieceType::NY
                | PieceType::NK
                | PieceType::NG => self.hopping_moves(&mut moves, from, color, &KI_STEPS[c]),
                PieceType::OU => self.hopping_moves(&mut moves, from, color, &OU_STEPS),
                PieceType::KY => self.sliding_moves(&mut moves, from, color, &FU_STEPS[c]),
                PieceType::KA => self.sliding_moves(&mut moves, from, color, &KA_STEPS),
                PieceType::HI => self.sliding_moves(&mut moves, from, color, &HI_STEPS),
                // 馬・龍は元の走りに王の一歩を足したもの
                PieceType::UM => {
                    self.sliding_moves(&mut moves, from, color, &KA_STEPS);
                    self.hopping_moves(&mut moves, from, color, &HI_STEPS);
                }
                PieceType::RY => {
                    self.sliding_moves(&mut moves, from, color, &HI_STEPS);
                    self.hopping_moves(&mut moves, from, color, &KA_STEPS);
                }
                _ => {}
            }
        }
        self.drop_moves(&mut moves, color);
        moves
    }

    /// 飛び駒以外のひとマス移動を列挙する
    fn hopping_moves(&self, moves: &mut Vec<Move>, from: Square, color: Color, steps: &[Offset]) {
        let piece = self.board().get(from);
        for &(dfile, drank) in steps {
            let Some(to) = from.add(dfile, drank) else {
                continue;
            };
            let target = self.board().get(to);
            if target.color() == Some(color) {
                continue;
            }
            if !piece.must_promote_on(to.rank()) {
                moves.push(Move::Normal { from, to, promote: false });
            }
            if piece.can_promote(from, to) {
                moves.push(Move::Normal { from, to, promote: true });
            }
        }
    }

    /// 走り駒の移動を列挙する。駒に当たったらその筋は打ち切り
    fn sliding_moves(&self, moves: &mut Vec<Move>, from: Square, color: Color, steps: &[Offset]) {
        let piece = self.board().get(from);
        for &(dfile, drank) in steps {
            let mut cur = from;
            while let Some(to) = cur.add(dfile, drank) {
                let target = self.board().get(to);
                if target.color() == Some(color) {
                    break;
                }
                if !piece.must_promote_on(to.rank()) {
                    moves.push(Move::Normal { from, to, promote: false });
                }
                if piece.can_promote(from, to) {
                    moves.push(Move::Normal { from, to, promote: true });
                }
                if target.is_some() {
                    break;
                }
                cur = to;
            }
        }
    }

    /// 打ち駒を列挙する
    ///
    /// 動けない段への打ち込みと二歩は除外する。
    fn drop_moves(&self, moves: &mut Vec<Move>, color: Color) {
        // 自分の生の歩がある筋
        let mut pawn_files = [false; 9];
        for sq in Square::all() {
            let piece = self.board().get(sq);
            if piece.piece_type() == PieceType::FU && piece.color() == Some(color) {
                pawn_files[sq.file() as usize] = true;
            }
        }

        let hand = self.hand(color);
        for to in Square::all() {
            if self.board().get(to).is_some() {
                continue;
            }
            for pt in PieceType::HAND_PIECES {
                if !hand.has(pt) {
                    continue;
                }
                if Piece::new(pt, color).must_promote_on(to.rank()) {
                    continue;
                }
                if pt == PieceType::FU && pawn_files[to.file() as usize] {
                    continue;
                }
                moves.push(Move::Drop { piece_type: pt, to });
            }
        }
    }
}
