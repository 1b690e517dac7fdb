//! FEN 局面格式
//!
//! 格式：`<棋盘> <走子方>`，其余字段（回合数等）解析时忽略。
//!
//! 棋盘按行从 y=0（黑方底线）写到 y=9（红方底线），行之间用 `/` 分隔，
//! 数字表示连续空格数。红方大写、黑方小写：K 帅 A 仕 B 相 N 马 R 车 C 炮 P 兵。
//!
//! 示例：
//! `rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR r`
//!
//! 只描述局面，不涉及走法记谱。

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::{ChessError, Result};
use crate::game::GameState;
use crate::piece::{Piece, PieceId, PieceType, Position, Side};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR r";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为对局状态
    ///
    /// 棋子编号按从上到下、从左到右的扫描顺序分配。
    pub fn parse(fen: &str) -> Result<GameState> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let Some(board_str) = parts.first() else {
            return Err(ChessError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        };

        let pieces = Self::parse_board(board_str)?;

        // 走子方（默认红方）
        let side_to_move = match parts.get(1) {
            Some(s) => {
                let c = s.chars().next().unwrap_or('r');
                Side::from_fen_char(c).ok_or_else(|| ChessError::InvalidFen {
                    reason: format!("Invalid side to move: {}", s),
                })?
            }
            None => Side::Red,
        };

        GameState::from_pieces(pieces, side_to_move)
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Vec<Piece>> {
        let rows: Vec<&str> = board_str.split('/').collect();
        if rows.len() != BOARD_HEIGHT {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_HEIGHT, rows.len()),
            });
        }

        let mut pieces = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let mut x = 0usize;

            for c in row.chars() {
                if x >= BOARD_WIDTH {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", y),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    x += empty_count as usize;
                } else if let Some((piece_type, side)) = PieceType::from_fen_char(c) {
                    let id = u8::try_from(pieces.len()).map_err(|_| ChessError::InvalidFen {
                        reason: "Too many pieces".to_string(),
                    })?;
                    pieces.push(Piece::new(
                        PieceId(id),
                        piece_type,
                        side,
                        Position::new_unchecked(x as u8, y as u8),
                    ));
                    x += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if x != BOARD_WIDTH {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", y, x, BOARD_WIDTH),
                });
            }
        }

        Ok(pieces)
    }

    /// 将对局状态转换为 FEN 字符串
    pub fn to_string(state: &GameState) -> String {
        let board = state.board();
        let mut rows = Vec::with_capacity(BOARD_HEIGHT);

        for y in 0..BOARD_HEIGHT {
            let mut row = String::new();
            let mut empty = 0;
            for x in 0..BOARD_WIDTH {
                match board.get(Position::new_unchecked(x as u8, y as u8)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        format!("{} {}", rows.join("/"), state.side_to_move().to_fen_char())
    }
}
