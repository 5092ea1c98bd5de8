//! 対局履歴（GameTree）
//!
//! 局面と指し手の直線的な履歴をカーソル付きで保持する。分岐は
//! 保存しない。途中から別の手を指すと以降の履歴は捨てられる。

use crate::error::{MoveError, ParseError};
use crate::position::Position;
use crate::types::{Move, MoveData};

/// 履歴上の1局面
#[derive(Debug, Clone)]
pub struct GameNode {
    position: Position,
    move_data: MoveData,
}

impl GameNode {
    /// この節点の局面
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// この局面に至った指し手の情報
    pub fn move_data(&self) -> &MoveData {
        &self.move_data
    }
}

/// 対局履歴
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<GameNode>,
    current: usize,
}

impl GameTree {
    /// 平手初期局面を根とする履歴を作る
    pub fn new() -> GameTree {
        GameTree {
            nodes: vec![GameNode {
                position: Position::startpos(),
                move_data: MoveData::INITIAL,
            }],
            current: 0,
        }
    }

    /// 任意のSFEN局面を根とする履歴を作る
    pub fn from_sfen(sfen: &str) -> Result<GameTree, ParseError> {
        let position = Position::from_sfen(sfen)?;
        Ok(GameTree {
            nodes: vec![GameNode { position, move_data: MoveData::INITIAL }],
            current: 0,
        })
    }

    /// 現在の節点
    pub fn current(&self) -> &GameNode {
        &self.nodes[self.current]
    }

    /// 根の節点
    pub fn root(&self) -> &GameNode {
        &self.nodes[0]
    }

    /// 根から末尾までの節点を順に返す
    pub fn mainline(&self) -> impl Iterator<Item = &GameNode> {
        self.nodes.iter()
    }

    /// 現局面から `mv` を指す
    ///
    /// 次の節点が同じ手ならカーソルを進めるだけ。別の手なら以降の
    /// 履歴を捨てて新しい節点を繋ぐ。非合法手はエラー。
    pub fn do_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if let Some(next) = self.nodes.get(self.current + 1) {
            if next.move_data.mv == mv {
                self.current += 1;
                return Ok(());
            }
        }

        let before = self.current().move_data.mv.to();
        let move_data = MoveData::new(mv, self.current().position(), before);
        let mut position = self.current().position().clone();
        position.do_move(mv)?;

        if self.nodes.len() > self.current + 1 {
            log::debug!(
                "discarding {} node(s) after ply {}",
                self.nodes.len() - self.current - 1,
                self.current().position().ply()
            );
        }
        self.nodes.truncate(self.current + 1);
        self.nodes.push(GameNode { position, move_data });
        self.current += 1;
        Ok(())
    }

    /// カーソルを1手進める。末尾にいたら false
    pub fn next(&mut self) -> bool {
        if self.current + 1 >= self.nodes.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// カーソルを1手戻す。根にいたら false
    pub fn prev(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }
}

impl Default for GameTree {
    fn default() -> Self {
        GameTree::new()
    }
}
