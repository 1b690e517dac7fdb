//! 错误类型定义

use thiserror::Error;

use crate::piece::PieceType;

/// 象棋规则错误
///
/// 对外的状态转换接口不会返回错误，被拒绝的操作直接返回原状态；
/// 这里的错误只用于 `try_*` 诊断接口，说明拒绝的原因。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 目标位置超出棋盘
    #[error("Position out of bounds: ({x}, {y})")]
    OutOfBounds { x: i32, y: i32 },

    /// 起点与终点相同
    #[error("Destination equals origin: ({x}, {y})")]
    SameSquare { x: u8, y: u8 },

    /// 目标位置是己方棋子
    #[error("Cannot capture own piece at ({x}, {y})")]
    FriendlyCapture { x: u8, y: u8 },

    /// 不符合棋子走法
    #[error("Illegal {piece_type:?} move: from ({from_x}, {from_y}) to ({to_x}, {to_y})")]
    IllegalMove {
        piece_type: PieceType,
        from_x: u8,
        from_y: u8,
        to_x: u8,
        to_y: u8,
    },

    /// 不是该棋子所属阵营的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 棋子不存在
    #[error("No such piece")]
    NoPiece,

    /// 尚未选中棋子
    #[error("No piece selected")]
    NoSelection,

    /// 没有可悔的棋
    #[error("Move history is empty")]
    NothingToUndo,

    /// 棋子布局无效（编号重复、位置重叠或越界）
    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
