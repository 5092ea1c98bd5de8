//! 手駒（Hand）
//!
//! 片側分の手駒を32bitにパックする。
//!
//! ビット配置:
//! - bit 0-4:   歩 (5bit, 最大18枚)
//! - bit 5-7:   香 (3bit)
//! - bit 8-10:  桂 (3bit)
//! - bit 11-13: 銀 (3bit)
//! - bit 14-16: 金 (3bit)
//! - bit 17-18: 角 (2bit)
//! - bit 19-20: 飛 (2bit)
//!
//! SFENの手駒フィールドは両側をまとめて書くため、対の変換は
//! `Hand::sfen` / `Hand::from_sfen` が受け持つ。

use super::{Color, Piece, PieceType};
use crate::error::ParseError;

/// 手駒（片側分、32bitパック）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Hand(u32);

impl Hand {
    /// 空の手駒
    pub const EMPTY: Hand = Hand(0);

    const FU_SHIFT: u32 = 0;
    const FU_MASK: u32 = 0x1F;
    const KY_SHIFT: u32 = 5;
    const KY_MASK: u32 = 0x07;
    const KE_SHIFT: u32 = 8;
    const KE_MASK: u32 = 0x07;
    const GI_SHIFT: u32 = 11;
    const GI_MASK: u32 = 0x07;
    const KI_SHIFT: u32 = 14;
    const KI_MASK: u32 = 0x07;
    const KA_SHIFT: u32 = 17;
    const KA_MASK: u32 = 0x03;
    const HI_SHIFT: u32 = 19;
    const HI_MASK: u32 = 0x03;

    const fn shift_mask(pt: PieceType) -> Option<(u32, u32)> {
        match pt {
            PieceType::FU => Some((Self::FU_SHIFT, Self::FU_MASK)),
            PieceType::KY => Some((Self::KY_SHIFT, Self::KY_MASK)),
            PieceType::KE => Some((Self::KE_SHIFT, Self::KE_MASK)),
            PieceType::GI => Some((Self::GI_SHIFT, Self::GI_MASK)),
            PieceType::KI => Some((Self::KI_SHIFT, Self::KI_MASK)),
            PieceType::KA => Some((Self::KA_SHIFT, Self::KA_MASK)),
            PieceType::HI => Some((Self::HI_SHIFT, Self::HI_MASK)),
            _ => None,
        }
    }

    /// 指定駒種の枚数を取得。手駒になれない駒種は0
    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        match Self::shift_mask(pt) {
            Some((shift, mask)) => (self.0 >> shift) & mask,
            None => 0,
        }
    }

    /// 指定駒種を持っているか
    #[inline]
    pub const fn has(self, pt: PieceType) -> bool {
        self.count(pt) > 0
    }

    /// 1枚追加。手駒になれない駒種や枠の溢れは None
    #[inline]
    pub const fn add(self, pt: PieceType) -> Option<Hand> {
        self.add_n(pt, 1)
    }

    /// n枚追加。ビット幅に収まらない枚数は None
    #[inline]
    pub const fn add_n(self, pt: PieceType, n: u32) -> Option<Hand> {
        match Self::shift_mask(pt) {
            Some((_, mask)) => {
                let count = self.count(pt) + n;
                if count > mask {
                    None
                } else {
                    Some(self.set(pt, count))
                }
            }
            None => None,
        }
    }

    /// 1枚減らす。持っていない場合や駒種が不正な場合は None
    #[inline]
    pub const fn sub(self, pt: PieceType) -> Option<Hand> {
        match Self::shift_mask(pt) {
            Some((shift, _)) => {
                if self.count(pt) > 0 {
                    Some(Hand(self.0 - (1 << shift)))
                } else {
                    None
                }
            }
            None => None,
        }
    }

    /// 指定枚数をセット（マスク幅で切り詰め）
    #[inline]
    pub const fn set(self, pt: PieceType, count: u32) -> Hand {
        match Self::shift_mask(pt) {
            Some((shift, mask)) => Hand((self.0 & !(mask << shift)) | ((count & mask) << shift)),
            None => self,
        }
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 両側の手駒をSFEN形式に変換
    ///
    /// 飛角金銀桂香歩の順、先手（大文字）が先。2枚以上は枚数を前置し、
    /// 両方空なら "-"。
    pub fn sfen(black: Hand, white: Hand) -> String {
        let mut b = String::new();
        let mut w = String::new();
        for &pt in PieceType::HAND_PIECES.iter().rev() {
            let n = black.count(pt);
            if n > 0 {
                if n > 1 {
                    b.push_str(&n.to_string());
                }
                b.push_str(Piece::new(pt, Color::Black).to_usi());
            }
            let n = white.count(pt);
            if n > 0 {
                if n > 1 {
                    w.push_str(&n.to_string());
                }
                w.push_str(Piece::new(pt, Color::White).to_usi());
            }
        }
        if b.is_empty() && w.is_empty() {
            return "-".to_string();
        }
        b + &w
    }

    /// SFEN形式の手駒フィールドから両側の手駒を復元
    pub fn from_sfen(sfen: &str) -> Result<(Hand, Hand), ParseError> {
        if sfen.is_empty() {
            return Err(ParseError::InvalidHand(sfen.to_string()));
        }
        if sfen == "-" {
            return Ok((Hand::EMPTY, Hand::EMPTY));
        }

        let mut hands = [Hand::EMPTY, Hand::EMPTY];
        let mut num: u32 = 0;
        for c in sfen.chars() {
            if let Some(d) = c.to_digit(10) {
                num = num * 10 + d;
                continue;
            }
            let piece = Piece::from_usi_char(c)
                .ok_or_else(|| ParseError::InvalidHand(sfen.to_string()))?;
            let pt = piece.piece_type();
            // color() は from_usi_char の成功時に必ず Some
            let Some(color) = piece.color() else {
                return Err(ParseError::InvalidHand(sfen.to_string()));
            };
            let n = if num == 0 { 1 } else { num };
            hands[color.index()] = hands[color.index()]
                .add_n(pt, n)
                .ok_or_else(|| ParseError::InvalidHand(sfen.to_string()))?;
            num = 0;
        }
        if num != 0 {
            return Err(ParseError::InvalidHand(sfen.to_string()));
        }
        Ok((hands[0], hands[1]))
    }
}
