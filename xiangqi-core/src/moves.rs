//! 走法记录和走法枚举

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::game::GameState;
use crate::piece::{Piece, Position, Side};
use crate::rules::RuleValidator;

/// 走法
///
/// 一步棋的完整记录，也是悔棋的唯一依据。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 走子前的棋子
    pub piece: Piece,
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

impl Move {
    /// 创建新走法（起点取棋子当前位置）
    pub fn new(piece: Piece, to: Position) -> Self {
        Self {
            piece,
            from: piece.position,
            to,
            captured: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(piece: Piece, to: Position, captured: Piece) -> Self {
        Self {
            piece,
            from: piece.position,
            to,
            captured: Some(captured),
        }
    }

    /// 是否吃子
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.piece.display_char(), self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " x{}", captured.display_char())?;
        }
        Ok(())
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 枚举指定阵营的全部合法走法
    ///
    /// 对该阵营每个棋子尝试全部 90 个格子，逐一交给 `RuleValidator` 判断。
    /// 生成的走法不填写被吃棋子，吃子在提交走法时才确定。
    pub fn generate(state: &GameState, side: Side) -> Vec<Move> {
        let board = state.board();
        let mut moves = Vec::with_capacity(64);

        for piece in state.pieces().iter().filter(|p| p.side == side) {
            Self::generate_piece_moves(&board, piece, &mut moves);
        }

        moves
    }

    /// 枚举单个棋子的全部合法目标
    pub fn generate_for_piece(board: &Board, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        Self::generate_piece_moves(board, piece, &mut moves);
        moves
    }

    fn generate_piece_moves(board: &Board, piece: &Piece, moves: &mut Vec<Move>) {
        for to in Position::all() {
            if RuleValidator::is_legal(board, piece, to.x as i32, to.y as i32) {
                moves.push(Move::new(*piece, to));
            }
        }
    }
}
