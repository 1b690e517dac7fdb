//! 对局状态
//!
//! `GameState` 是一个值：所有状态转换都接收 `&self` 并返回新的 `GameState`，
//! 被拒绝的操作原样返回当前状态，调用方通过比较前后两个值判断是否生效。
//! 棋子集合在每次转换时复制，旧值不会被后续走子修改。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{initial_pieces, Board};
use crate::error::{ChessError, Result};
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Piece, PieceId, PieceType, Position, Side};
use crate::rules::RuleValidator;

/// 选子阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// 等待选择棋子
    #[default]
    AwaitingSelection,
    /// 已选中棋子，等待目标位置
    AwaitingDestination(PieceId),
}

/// 对局状态
///
/// 反序列化经过 `from_pieces` 的布局检查，棋子重新按编号排序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameStateSnapshot")]
pub struct GameState {
    /// 棋盘上的棋子，按编号排序
    pieces: Vec<Piece>,
    /// 选子阶段
    phase: Phase,
    /// 当前走子方
    side_to_move: Side,
    /// 走法历史
    move_history: Vec<Move>,
    /// 胜方（最近一步吃掉了将/帅时设置）
    winner: Option<Side>,
}

impl GameState {
    /// 创建标准开局，红方先走
    pub fn new() -> Self {
        Self {
            pieces: initial_pieces(),
            phase: Phase::AwaitingSelection,
            side_to_move: Side::Red,
            move_history: Vec::new(),
            winner: None,
        }
    }

    /// 由任意棋子集合创建局面
    ///
    /// 只检查编号唯一、位置合法且不重叠，不要求双方各有一个将帅。
    pub fn from_pieces(mut pieces: Vec<Piece>, side_to_move: Side) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut cells = HashSet::new();
        for piece in &pieces {
            if !piece.position.is_valid() {
                return Err(ChessError::InvalidLayout {
                    reason: format!("piece {} is off the board", piece.id),
                });
            }
            if !ids.insert(piece.id) {
                return Err(ChessError::InvalidLayout {
                    reason: format!("duplicate piece id {}", piece.id),
                });
            }
            if !cells.insert(piece.position) {
                return Err(ChessError::InvalidLayout {
                    reason: format!("two pieces on {}", piece.position),
                });
            }
        }
        pieces.sort_by_key(|p| p.id);

        Ok(Self {
            pieces,
            phase: Phase::AwaitingSelection,
            side_to_move,
            move_history: Vec::new(),
            winner: None,
        })
    }

    // ---- 查询 ----

    /// 全部棋子
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// 按编号查找棋子
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.pieces[i])
    }

    /// 查找指定坐标上的棋子
    pub fn piece_at(&self, x: i32, y: i32) -> Option<&Piece> {
        let pos = Position::from_coords(x, y)?;
        self.pieces.iter().find(|p| p.position == pos)
    }

    /// 当前局面的棋盘快照
    pub fn board(&self) -> Board {
        Board::from_pieces(&self.pieces)
    }

    /// 当前走子方
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// 选子阶段
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 当前选中的棋子
    pub fn selected_piece(&self) -> Option<&Piece> {
        match self.phase {
            Phase::AwaitingSelection => None,
            Phase::AwaitingDestination(id) => self.piece(id),
        }
    }

    /// 走法历史
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    /// 最近一步
    pub fn last_move(&self) -> Option<&Move> {
        self.move_history.last()
    }

    /// 胜方
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// 是否已分出胜负
    ///
    /// 仅供调用方参考，引擎本身不会拒绝终局后的走子。
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// 判断棋子走到目标位置是否合法（只读，可用于界面高亮）
    pub fn is_valid_move(&self, id: PieceId, x: i32, y: i32) -> bool {
        match self.piece(id) {
            Some(piece) => RuleValidator::is_legal(&self.board(), piece, x, y),
            None => false,
        }
    }

    /// 棋子的全部合法目标位置
    pub fn valid_destinations(&self, id: PieceId) -> Vec<Position> {
        let Some(piece) = self.piece(id) else {
            return Vec::new();
        };
        MoveGenerator::generate_for_piece(&self.board(), piece)
            .into_iter()
            .map(|mv| mv.to)
            .collect()
    }

    // ---- 状态转换 ----

    /// 选择棋子；不是当前走子方的棋子时原样返回
    pub fn select_piece(&self, id: PieceId) -> GameState {
        self.try_select_piece(id).unwrap_or_else(|e| {
            debug!("选子被拒绝: {}", e);
            self.clone()
        })
    }

    /// 选择棋子，返回拒绝原因
    pub fn try_select_piece(&self, id: PieceId) -> Result<GameState> {
        let piece = self.piece(id).ok_or(ChessError::NoPiece)?;
        if piece.side != self.side_to_move {
            return Err(ChessError::NotYourTurn);
        }

        debug!("选中棋子 {}", piece);
        Ok(GameState {
            phase: Phase::AwaitingDestination(id),
            ..self.clone()
        })
    }

    /// 取消选中
    pub fn clear_selection(&self) -> GameState {
        GameState {
            phase: Phase::AwaitingSelection,
            ..self.clone()
        }
    }

    /// 将当前选中的棋子走到目标位置；未选子或走法非法时原样返回
    pub fn move_piece(&self, to_x: i32, to_y: i32) -> GameState {
        self.try_move_piece(to_x, to_y).unwrap_or_else(|e| {
            debug!("走子被拒绝: {}", e);
            self.clone()
        })
    }

    /// 走选中的棋子，返回拒绝原因
    pub fn try_move_piece(&self, to_x: i32, to_y: i32) -> Result<GameState> {
        let piece = *self.selected_piece().ok_or(ChessError::NoSelection)?;
        self.commit(piece, to_x, to_y)
    }

    /// 直接指定棋子走子（供 AI 调用，不经过选子）
    pub fn move_piece_direct(&self, id: PieceId, to_x: i32, to_y: i32) -> GameState {
        self.try_move_piece_direct(id, to_x, to_y).unwrap_or_else(|e| {
            debug!("走子被拒绝: {}", e);
            self.clone()
        })
    }

    /// 直接指定棋子走子，返回拒绝原因
    pub fn try_move_piece_direct(&self, id: PieceId, to_x: i32, to_y: i32) -> Result<GameState> {
        let piece = *self.piece(id).ok_or(ChessError::NoPiece)?;
        self.commit(piece, to_x, to_y)
    }

    /// 悔一步棋；没有历史时原样返回
    pub fn undo_move(&self) -> GameState {
        self.try_undo_move().unwrap_or_else(|e| {
            debug!("悔棋被拒绝: {}", e);
            self.clone()
        })
    }

    /// 悔一步棋，返回拒绝原因
    ///
    /// 悔棋后胜方总是清空：只有最近一步吃将才会产生胜方，
    /// 退回之前的局面一定是未分胜负的。
    pub fn try_undo_move(&self) -> Result<GameState> {
        let last = *self.move_history.last().ok_or(ChessError::NothingToUndo)?;
        if self.piece(last.piece.id).is_none() {
            return Err(ChessError::NoPiece);
        }

        let mut pieces: Vec<Piece> = self
            .pieces
            .iter()
            .map(|p| if p.id == last.piece.id { last.piece } else { *p })
            .collect();

        if let Some(captured) = last.captured {
            let slot = pieces.partition_point(|p| p.id < captured.id);
            pieces.insert(slot, captured);
        }

        let mut move_history = self.move_history.clone();
        move_history.pop();

        debug!("悔棋: {}", last);
        Ok(GameState {
            pieces,
            phase: Phase::AwaitingSelection,
            side_to_move: self.side_to_move.opponent(),
            move_history,
            winner: None,
        })
    }

    /// 提交走法：校验、吃子、换边、记录历史、判定胜负
    fn commit(&self, piece: Piece, to_x: i32, to_y: i32) -> Result<GameState> {
        let board = self.board();
        RuleValidator::validate(&board, &piece, to_x, to_y)?;

        let to = Position::from_coords(to_x, to_y)
            .ok_or(ChessError::OutOfBounds { x: to_x, y: to_y })?;
        let captured = board.get(to);

        let pieces: Vec<Piece> = self
            .pieces
            .iter()
            .filter(|p| Some(p.id) != captured.map(|c| c.id))
            .map(|p| if p.id == piece.id { p.moved_to(to) } else { *p })
            .collect();

        let mv = match captured {
            Some(c) => Move::with_capture(piece, to, c),
            None => Move::new(piece, to),
        };

        let mut move_history = self.move_history.clone();
        move_history.push(mv);

        let winner = captured
            .filter(|c| c.piece_type == PieceType::King)
            .map(|_| piece.side);

        if mv.is_capture() {
            debug!("吃子: {}", mv);
        } else {
            debug!("走子: {}", mv);
        }
        if let Some(side) = winner {
            info!("{} 吃掉对方将帅，获胜", side);
        }

        Ok(GameState {
            pieces,
            phase: Phase::AwaitingSelection,
            side_to_move: self.side_to_move.opponent(),
            move_history,
            winner,
        })
    }
}

/// 反序列化用的原始字段
#[derive(Deserialize)]
struct GameStateSnapshot {
    pieces: Vec<Piece>,
    phase: Phase,
    side_to_move: Side,
    move_history: Vec<Move>,
    winner: Option<Side>,
}

impl TryFrom<GameStateSnapshot> for GameState {
    type Error = ChessError;

    fn try_from(snapshot: GameStateSnapshot) -> Result<Self> {
        let state = GameState::from_pieces(snapshot.pieces, snapshot.side_to_move)?;
        if let Phase::AwaitingDestination(id) = snapshot.phase {
            if state.piece(id).is_none() {
                return Err(ChessError::InvalidLayout {
                    reason: format!("selected piece {} is not on the board", id),
                });
            }
        }

        Ok(GameState {
            phase: snapshot.phase,
            move_history: snapshot.move_history,
            winner: snapshot.winner,
            ..state
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
