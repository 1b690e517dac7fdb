//! 走法规则校验
//!
//! 给定棋盘快照、一个棋子和目标坐标，判断走法是否符合该棋子的走法规则。
//! 纯函数，不修改任何状态。
//!
//! 本引擎不做将军检测：走子后己方将帅是否被攻击不在校验范围内，
//! 唯一的胜负条件是吃掉对方的将/帅。

use tracing::trace;

use crate::board::Board;
use crate::error::{ChessError, Result};
use crate::piece::{Piece, PieceType, Position};

/// 规则校验器
pub struct RuleValidator;

impl RuleValidator {
    /// 判断走法是否合法
    ///
    /// 任何输入（包括越界坐标）都不会 panic，非法时返回 false。
    pub fn is_legal(board: &Board, piece: &Piece, to_x: i32, to_y: i32) -> bool {
        Self::validate(board, piece, to_x, to_y).is_ok()
    }

    /// 校验走法，返回拒绝原因
    pub fn validate(board: &Board, piece: &Piece, to_x: i32, to_y: i32) -> Result<()> {
        let to = Position::from_coords(to_x, to_y)
            .ok_or(ChessError::OutOfBounds { x: to_x, y: to_y })?;
        let from = piece.position;

        if from == to {
            return Err(ChessError::SameSquare { x: to.x, y: to.y });
        }

        if let Some(target) = board.get(to) {
            if target.side == piece.side {
                return Err(ChessError::FriendlyCapture { x: to.x, y: to.y });
            }
        }

        let legal = match piece.piece_type {
            PieceType::Rook => Self::rook_move(board, from, to),
            PieceType::Horse => Self::horse_move(board, from, to),
            PieceType::Elephant => Self::elephant_move(board, piece, to),
            PieceType::Advisor => Self::advisor_move(piece, to),
            PieceType::King => Self::king_move(board, piece, to),
            PieceType::Cannon => Self::cannon_move(board, from, to),
            PieceType::Pawn => Self::pawn_move(piece, to),
        };

        trace!(piece = %piece, to = %to, legal, "走法校验");

        if legal {
            Ok(())
        } else {
            Err(ChessError::IllegalMove {
                piece_type: piece.piece_type,
                from_x: from.x,
                from_y: from.y,
                to_x: to.x,
                to_y: to.y,
            })
        }
    }

    /// 车：直线移动，路径上不能有棋子
    fn rook_move(board: &Board, from: Position, to: Position) -> bool {
        board.count_between(from, to) == Some(0)
    }

    /// 马：走日字，不能蹩马腿
    fn horse_move(board: &Board, from: Position, to: Position) -> bool {
        let dx = to.x as i32 - from.x as i32;
        let dy = to.y as i32 - from.y as i32;
        let is_horse_move =
            (dx.abs() == 1 && dy.abs() == 2) || (dx.abs() == 2 && dy.abs() == 1);
        if !is_horse_move {
            return false;
        }

        // 马腿在长边方向上距起点一格
        let (lx, ly) = if dx.abs() == 2 {
            (dx.signum(), 0)
        } else {
            (0, dy.signum())
        };
        match from.offset(lx, ly) {
            Some(leg) => !board.is_occupied(leg),
            None => false,
        }
    }

    /// 象：走田字，不能过河，不能塞象眼
    fn elephant_move(board: &Board, piece: &Piece, to: Position) -> bool {
        let from = piece.position;
        let dx = to.x as i32 - from.x as i32;
        let dy = to.y as i32 - from.y as i32;
        if dx.abs() != 2 || dy.abs() != 2 {
            return false;
        }

        if !to.is_home_side(piece.side) {
            return false;
        }

        match from.offset(dx / 2, dy / 2) {
            Some(eye) => !board.is_occupied(eye),
            None => false,
        }
    }

    /// 士：斜走一格，不能出九宫
    fn advisor_move(piece: &Piece, to: Position) -> bool {
        let from = piece.position;
        let dx = (to.x as i32 - from.x as i32).abs();
        let dy = (to.y as i32 - from.y as i32).abs();
        dx == 1 && dy == 1 && to.is_in_palace(piece.side)
    }

    /// 将/帅：直走一格，不能出九宫，不能走到与对方将帅照面的位置
    ///
    /// 照面检查只作用于将帅自身的走法，基于走子前的棋盘判断目标格与
    /// 对方将帅之间是否有棋子。
    fn king_move(board: &Board, piece: &Piece, to: Position) -> bool {
        let from = piece.position;
        let dx = (to.x as i32 - from.x as i32).abs();
        let dy = (to.y as i32 - from.y as i32).abs();
        if dx + dy != 1 {
            return false;
        }

        if !to.is_in_palace(piece.side) {
            return false;
        }

        if let Some(enemy_king) = board.find_king(piece.side.opponent()) {
            if enemy_king.x() == to.x && board.count_between(to, enemy_king.position) == Some(0)
            {
                return false;
            }
        }

        true
    }

    /// 炮：直线移动；不吃子时路径必须为空，吃子时中间恰好隔一个炮架
    fn cannon_move(board: &Board, from: Position, to: Position) -> bool {
        let Some(screens) = board.count_between(from, to) else {
            return false;
        };

        if board.is_occupied(to) {
            screens == 1
        } else {
            screens == 0
        }
    }

    /// 兵/卒：每次一格；过河前只能前进，过河后可以横走，永远不能后退
    fn pawn_move(piece: &Piece, to: Position) -> bool {
        let from = piece.position;
        let dx = to.x as i32 - from.x as i32;
        let dy = to.y as i32 - from.y as i32;
        let forward = piece.side.forward();

        if dx == 0 && dy == forward {
            return true;
        }

        let crossed_river = !from.is_home_side(piece.side);
        crossed_river && dy == 0 && dx.abs() == 1
    }
}
