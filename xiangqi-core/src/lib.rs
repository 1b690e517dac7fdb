//! 中国象棋规则引擎
//!
//! 包含:
//! - 棋子、位置、棋盘快照等核心数据结构
//! - 各棋子走法规则校验
//! - 对局状态：选子、走子、吃子、换边、悔棋、胜负判定
//! - 全部合法走法枚举
//! - FEN 局面格式

mod board;
mod constants;
mod error;
mod fen;
mod game;
mod moves;
mod piece;
mod rules;

pub use board::{initial_pieces, Board};
pub use constants::*;
pub use error::{ChessError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use game::{GameState, Phase};
pub use moves::{Move, MoveGenerator};
pub use piece::{Piece, PieceId, PieceType, Position, Side};
pub use rules::RuleValidator;
