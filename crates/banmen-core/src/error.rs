//! エラー型

use crate::types::Square;
use thiserror::Error;

/// SFEN / USI / KIF 文字列の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    #[error("invalid piece: {0:?}")]
    InvalidPiece(String),
    #[error("invalid move: {0:?}")]
    InvalidMove(String),
    #[error("invalid board sfen: {0}")]
    InvalidBoard(String),
    #[error("invalid hand sfen: {0}")]
    InvalidHand(String),
    #[error("invalid sfen: {0}")]
    InvalidSfen(String),
}

/// 指し手適用時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// 合法手集合に含まれない手
    #[error("illegal move: {0}")]
    Illegal(String),
    #[error("no piece on source square {0}")]
    EmptySource(Square),
    #[error("piece on {0} does not belong to the side to move")]
    NotOwnPiece(Square),
    #[error("cannot capture own piece on {0}")]
    CaptureOwnPiece(Square),
    /// 成駒（または金・玉）に成りフラグが付いた手
    #[error("piece cannot promote")]
    CannotPromote,
    #[error("drop destination {0} is occupied")]
    DropOnOccupiedSquare(Square),
    #[error("piece not in hand")]
    NotInHand,
    /// 玉など手駒になれない駒を取った手
    #[error("captured piece cannot enter the hand")]
    CannotHoldCapture,
    /// Initial / Toryo は盤上に適用できない
    #[error("sentinel move cannot be applied to a position")]
    SentinelMove,
}
