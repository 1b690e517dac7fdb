//! 棋盘常量定义

/// 棋盘宽度（列数）
pub const BOARD_WIDTH: usize = 9;

/// 棋盘高度（行数）
pub const BOARD_HEIGHT: usize = 10;

/// 棋盘格子总数
pub const BOARD_CELLS: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// 初始棋子数量
pub const INITIAL_PIECE_COUNT: usize = 32;

/// 黑方半场最大行号（y <= 4），红方半场从 5 开始
pub const RIVER_BLACK_EDGE: u8 = 4;

/// 红方半场最小行号
pub const RIVER_RED_EDGE: u8 = 5;

/// 九宫格列范围
pub const PALACE_MIN_X: u8 = 3;
pub const PALACE_MAX_X: u8 = 5;
