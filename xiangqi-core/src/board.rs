//! 棋盘快照
//!
//! `Board` 是由棋子集合构建出的 90 格占位表，只读，供规则校验快速查询。

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_CELLS, INITIAL_PIECE_COUNT};
use crate::piece::{Piece, PieceId, PieceType, Position, Side};

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 9x10 棋盘，索引为 y * 9 + x，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_CELLS],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        Self::from_pieces(&initial_pieces())
    }

    /// 由棋子集合构建棋盘（同一格出现多个棋子时后者覆盖前者）
    pub fn from_pieces(pieces: &[Piece]) -> Self {
        let mut board = Self::empty();
        for piece in pieces {
            board.place(*piece);
        }
        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 指定位置是否有棋子
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// 按棋子自身的位置放置棋子
    pub fn place(&mut self, piece: Piece) {
        if piece.position.is_valid() {
            self.squares[piece.position.to_index()] = Some(piece);
        }
    }

    /// 清空指定位置
    pub fn clear(&mut self, pos: Position) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = None;
        }
    }

    /// 统计同一直线上两点之间（不含端点）的棋子数
    ///
    /// 两点不在同一行或同一列时返回 None。
    pub fn count_between(&self, from: Position, to: Position) -> Option<usize> {
        if from.x == to.x {
            let (min_y, max_y) = (from.y.min(to.y), from.y.max(to.y));
            Some(
                ((min_y + 1)..max_y)
                    .filter(|&y| self.is_occupied(Position::new_unchecked(from.x, y)))
                    .count(),
            )
        } else if from.y == to.y {
            let (min_x, max_x) = (from.x.min(to.x), from.x.max(to.x));
            Some(
                ((min_x + 1)..max_x)
                    .filter(|&x| self.is_occupied(Position::new_unchecked(x, from.y)))
                    .count(),
            )
        } else {
            None
        }
    }

    /// 查找指定阵营的将/帅
    pub fn find_king(&self, side: Side) -> Option<Piece> {
        self.squares
            .iter()
            .flatten()
            .find(|p| p.piece_type == PieceType::King && p.side == side)
            .copied()
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<Piece> {
        self.squares.iter().flatten().copied().collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 标准开局的 32 个棋子
///
/// 黑方在上（y=0 为底线），红方在下（y=9 为底线）。编号按摆放顺序分配。
pub fn initial_pieces() -> Vec<Piece> {
    use PieceType::*;

    const BACK_RANK: [PieceType; 9] = [
        Rook, Horse, Elephant, Advisor, King, Advisor, Elephant, Horse, Rook,
    ];

    let mut layout: Vec<(PieceType, Side, u8, u8)> = Vec::with_capacity(INITIAL_PIECE_COUNT);

    // 黑方：底线 y=0，炮在 y=2，卒在 y=3
    for (x, piece_type) in BACK_RANK.iter().enumerate() {
        layout.push((*piece_type, Side::Black, x as u8, 0));
    }
    layout.push((Cannon, Side::Black, 1, 2));
    layout.push((Cannon, Side::Black, 7, 2));
    for x in (0..9).step_by(2) {
        layout.push((Pawn, Side::Black, x, 3));
    }

    // 红方：底线 y=9，炮在 y=7，兵在 y=6
    for (x, piece_type) in BACK_RANK.iter().enumerate() {
        layout.push((*piece_type, Side::Red, x as u8, 9));
    }
    layout.push((Cannon, Side::Red, 1, 7));
    layout.push((Cannon, Side::Red, 7, 7));
    for x in (0..9).step_by(2) {
        layout.push((Pawn, Side::Red, x, 6));
    }

    layout
        .into_iter()
        .enumerate()
        .map(|(i, (piece_type, side, x, y))| {
            Piece::new(
                PieceId(i as u8),
                piece_type,
                side,
                Position::new_unchecked(x, y),
            )
        })
        .collect()
}
