//! 駒種（PieceType）と駒（Piece）
//!
//! 内部表現は5bitのパック形式。
//! - bit 0-3: 駒種（FU=1 .. OU=8、成りはbit 3）
//! - bit 4:   手番（0 = 先手, 1 = 後手）
//!
//! 成りフラグ 0x08 と OU=8 はビットが重なるため、成り・生の変換は
//! 金・玉を特別扱いする。`is_promoted()` は「これ以上成れない」駒
//! （成駒・金・玉・駒なし）で真になる。

use super::{Color, Square};
use crate::error::ParseError;
use std::fmt;

/// 成りフラグ
const PROMOTE: u8 = 0x08;
/// 後手フラグ
const WHITE: u8 = 0x10;

/// 駒種（先後の区別なし）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PieceType(u8);

impl PieceType {
    /// 駒なし
    pub const NONE: PieceType = PieceType(0);
    /// 歩
    pub const FU: PieceType = PieceType(1);
    /// 香
    pub const KY: PieceType = PieceType(2);
    /// 桂
    pub const KE: PieceType = PieceType(3);
    /// 銀
    pub const GI: PieceType = PieceType(4);
    /// 金
    pub const KI: PieceType = PieceType(5);
    /// 角
    pub const KA: PieceType = PieceType(6);
    /// 飛
    pub const HI: PieceType = PieceType(7);
    /// 玉
    pub const OU: PieceType = PieceType(8);
    /// と金
    pub const TO: PieceType = PieceType(1 | PROMOTE);
    /// 成香
    pub const NY: PieceType = PieceType(2 | PROMOTE);
    /// 成桂
    pub const NK: PieceType = PieceType(3 | PROMOTE);
    /// 成銀
    pub const NG: PieceType = PieceType(4 | PROMOTE);
    /// 馬
    pub const UM: PieceType = PieceType(6 | PROMOTE);
    /// 龍
    pub const RY: PieceType = PieceType(7 | PROMOTE);

    /// 手駒になる駒種（打ち駒の走査順）
    pub const HAND_PIECES: [PieceType; 7] = [
        PieceType::FU,
        PieceType::KY,
        PieceType::KE,
        PieceType::GI,
        PieceType::KI,
        PieceType::KA,
        PieceType::HI,
    ];

    /// 成り駒を返す。金・玉・駒なしはそのまま
    #[inline]
    pub const fn promote(self) -> PieceType {
        match self {
            PieceType::NONE | PieceType::KI | PieceType::OU => self,
            _ => PieceType(self.0 | PROMOTE),
        }
    }

    /// 生駒を返す。玉はそのまま
    #[inline]
    pub const fn unpromote(self) -> PieceType {
        match self {
            PieceType::OU => self,
            _ => PieceType(self.0 & !PROMOTE),
        }
    }

    /// これ以上成れない駒かどうか
    #[inline]
    pub fn is_promoted(self) -> bool {
        self == self.promote()
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// USI形式（"P", "+P" 等）に変換
    pub const fn to_usi(self) -> &'static str {
        match self {
            PieceType::FU => "P",
            PieceType::KY => "L",
            PieceType::KE => "N",
            PieceType::GI => "S",
            PieceType::KI => "G",
            PieceType::KA => "B",
            PieceType::HI => "R",
            PieceType::OU => "K",
            PieceType::TO => "+P",
            PieceType::NY => "+L",
            PieceType::NK => "+N",
            PieceType::NG => "+S",
            PieceType::UM => "+B",
            PieceType::RY => "+R",
            _ => "_",
        }
    }

    /// 打てる駒のUSI文字（大文字）から変換
    pub const fn from_usi_char(c: char) -> Option<PieceType> {
        match c {
            'P' => Some(PieceType::FU),
            'L' => Some(PieceType::KY),
            'N' => Some(PieceType::KE),
            'S' => Some(PieceType::GI),
            'G' => Some(PieceType::KI),
            'B' => Some(PieceType::KA),
            'R' => Some(PieceType::HI),
            _ => None,
        }
    }

    /// KIF形式（"歩", "と" 等）に変換
    pub const fn to_kif(self) -> &'static str {
        match self {
            PieceType::FU => "歩",
            PieceType::KY => "香",
            PieceType::KE => "桂",
            PieceType::GI => "銀",
            PieceType::KI => "金",
            PieceType::KA => "角",
            PieceType::HI => "飛",
            PieceType::OU => "王",
            PieceType::TO => "と",
            PieceType::NY => "杏",
            PieceType::NK => "圭",
            PieceType::NG => "全",
            PieceType::UM => "馬",
            PieceType::RY => "龍",
            _ => "・",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_usi())
    }
}

/// 駒（先後の区別あり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    /// 駒なし
    pub const NONE: Piece = Piece(0);

    // 先手の駒
    pub const B_FU: Piece = Piece(1);
    pub const B_KY: Piece = Piece(2);
    pub const B_KE: Piece = Piece(3);
    pub const B_GI: Piece = Piece(4);
    pub const B_KI: Piece = Piece(5);
    pub const B_KA: Piece = Piece(6);
    pub const B_HI: Piece = Piece(7);
    pub const B_OU: Piece = Piece(8);
    pub const B_TO: Piece = Piece(1 | PROMOTE);
    pub const B_NY: Piece = Piece(2 | PROMOTE);
    pub const B_NK: Piece = Piece(3 | PROMOTE);
    pub const B_NG: Piece = Piece(4 | PROMOTE);
    pub const B_UM: Piece = Piece(6 | PROMOTE);
    pub const B_RY: Piece = Piece(7 | PROMOTE);

    // 後手の駒（+16）
    pub const W_FU: Piece = Piece(1 | WHITE);
    pub const W_KY: Piece = Piece(2 | WHITE);
    pub const W_KE: Piece = Piece(3 | WHITE);
    pub const W_GI: Piece = Piece(4 | WHITE);
    pub const W_KI: Piece = Piece(5 | WHITE);
    pub const W_KA: Piece = Piece(6 | WHITE);
    pub const W_HI: Piece = Piece(7 | WHITE);
    pub const W_OU: Piece = Piece(8 | WHITE);
    pub const W_TO: Piece = Piece(1 | PROMOTE | WHITE);
    pub const W_NY: Piece = Piece(2 | PROMOTE | WHITE);
    pub const W_NK: Piece = Piece(3 | PROMOTE | WHITE);
    pub const W_NG: Piece = Piece(4 | PROMOTE | WHITE);
    pub const W_UM: Piece = Piece(6 | PROMOTE | WHITE);
    pub const W_RY: Piece = Piece(7 | PROMOTE | WHITE);

    /// 駒種と手番から生成
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Piece {
        match color {
            Color::Black => Piece(piece_type.raw()),
            Color::White => Piece(piece_type.raw() | WHITE),
        }
    }

    /// 駒種を取得
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        PieceType(self.0 & !WHITE)
    }

    /// 手番を取得。駒なしは None
    #[inline]
    pub const fn color(self) -> Option<Color> {
        if self.0 == 0 {
            None
        } else if self.0 & WHITE == 0 {
            Some(Color::Black)
        } else {
            Some(Color::White)
        }
    }

    /// 駒がないか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// 駒があるか
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// 成り駒を返す。金・玉・駒なしはそのまま
    #[inline]
    pub const fn promote(self) -> Piece {
        Piece(self.piece_type().promote().raw() | (self.0 & WHITE))
    }

    /// 生駒を返す。玉はそのまま
    #[inline]
    pub const fn unpromote(self) -> Piece {
        Piece(self.piece_type().unpromote().raw() | (self.0 & WHITE))
    }

    /// これ以上成れない駒かどうか
    #[inline]
    pub fn is_promoted(self) -> bool {
        self == self.promote()
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// その段に置くと以後動けなくなる駒かどうか
    ///
    /// 先手の歩・香は一段目、桂は二段目まで。後手はその鏡像。
    /// 成らずの手の抑制と打ち駒の禁止の両方に使う。
    #[inline]
    pub fn must_promote_on(self, rank: u8) -> bool {
        match self {
            Piece::B_FU | Piece::B_KY => rank == 0,
            Piece::W_FU | Piece::W_KY => rank == 8,
            Piece::B_KE => rank <= 1,
            Piece::W_KE => rank >= 7,
            _ => false,
        }
    }

    /// from から to への移動で成れるかどうか
    ///
    /// 成駒・金・玉は不可。敵陣三段目（先手は rank 0-2、後手は rank 6-8）に
    /// 出入りする移動で成れる。
    pub fn can_promote(self, from: Square, to: Square) -> bool {
        if self.is_promoted() {
            return false;
        }
        match self.color() {
            Some(Color::Black) => from.rank() <= 2 || to.rank() <= 2,
            Some(Color::White) => from.rank() >= 6 || to.rank() >= 6,
            None => false,
        }
    }

    /// USI形式（"P", "+p" 等、小文字は後手）に変換
    pub const fn to_usi(self) -> &'static str {
        match self {
            Piece::B_FU => "P",
            Piece::B_KY => "L",
            Piece::B_KE => "N",
            Piece::B_GI => "S",
            Piece::B_KI => "G",
            Piece::B_KA => "B",
            Piece::B_HI => "R",
            Piece::B_OU => "K",
            Piece::B_TO => "+P",
            Piece::B_NY => "+L",
            Piece::B_NK => "+N",
            Piece::B_NG => "+S",
            Piece::B_UM => "+B",
            Piece::B_RY => "+R",
            Piece::W_FU => "p",
            Piece::W_KY => "l",
            Piece::W_KE => "n",
            Piece::W_GI => "s",
            Piece::W_KI => "g",
            Piece::W_KA => "b",
            Piece::W_HI => "r",
            Piece::W_OU => "k",
            Piece::W_TO => "+p",
            Piece::W_NY => "+l",
            Piece::W_NK => "+n",
            Piece::W_NG => "+s",
            Piece::W_UM => "+b",
            Piece::W_RY => "+r",
            _ => "_",
        }
    }

    /// 生駒のUSI文字から変換（大文字=先手、小文字=後手）
    pub const fn from_usi_char(c: char) -> Option<Piece> {
        match c {
            'P' => Some(Piece::B_FU),
            'L' => Some(Piece::B_KY),
            'N' => Some(Piece::B_KE),
            'S' => Some(Piece::B_GI),
            'G' => Some(Piece::B_KI),
            'B' => Some(Piece::B_KA),
            'R' => Some(Piece::B_HI),
            'K' => Some(Piece::B_OU),
            'p' => Some(Piece::W_FU),
            'l' => Some(Piece::W_KY),
            'n' => Some(Piece::W_KE),
            's' => Some(Piece::W_GI),
            'g' => Some(Piece::W_KI),
            'b' => Some(Piece::W_KA),
            'r' => Some(Piece::W_HI),
            'k' => Some(Piece::W_OU),
            _ => None,
        }
    }

    /// 文字列からの変換（"+p" のような2文字形式も受ける）
    pub fn from_usi(s: &str) -> Result<Piece, ParseError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(c), None, _) => {
                Piece::from_usi_char(c).ok_or_else(|| ParseError::InvalidPiece(s.to_string()))
            }
            (Some('+'), Some(c), None) => {
                let piece = Piece::from_usi_char(c)
                    .ok_or_else(|| ParseError::InvalidPiece(s.to_string()))?;
                let promoted = piece.promote();
                // "+G" のような成れない駒は受け付けない
                if promoted == piece {
                    return Err(ParseError::InvalidPiece(s.to_string()));
                }
                Ok(promoted)
            }
            _ => Err(ParseError::InvalidPiece(s.to_string())),
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::NONE
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_usi())
    }
}
