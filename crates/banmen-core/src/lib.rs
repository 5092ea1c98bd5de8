//! banmen-core: 将棋のルール中核ライブラリ
//!
//! 局面の表現と合法手生成、SFEN・USI・KIF表記の相互変換、直線的な
//! 対局履歴を提供する。探索や評価、千日手の検出は持たない。
//!
//! ```
//! use banmen_core::{Move, Position};
//!
//! let mut position = Position::startpos();
//! assert_eq!(position.legal_moves().len(), 30);
//!
//! let mv = Move::from_usi("7g7f").unwrap();
//! position.do_move(mv).unwrap();
//! assert_eq!(
//!     position.sfen(),
//!     "lnsgkgsnl/1r5b1/ppppppppp/9/9/2P6/PP1PPPPPP/1B5R1/LNSGKGSNL w - 2"
//! );
//! ```

pub mod board;
pub mod error;
pub mod game;
pub mod position;
pub mod types;

pub use board::Board;
pub use error::{MoveError, ParseError};
pub use game::{GameNode, GameTree};
pub use position::{Position, START_SFEN};
pub use types::{Color, Hand, Move, MoveData, Piece, PieceType, Square};
