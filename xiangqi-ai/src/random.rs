//! 随机走子
//!
//! 枚举一方的全部合法走法后均匀随机选一个。不评估局面，不搜索。

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use xiangqi_core::{GameState, Move, MoveGenerator, Side};

use crate::config::SelectorConfig;

/// 随机走子器
///
/// 随机源由调用方注入，测试中可使用固定种子得到确定的结果。
#[derive(Debug, Clone)]
pub struct RandomMoveSelector<R: Rng = ChaCha8Rng> {
    rng: R,
}

impl<R: Rng> RandomMoveSelector<R> {
    /// 使用给定的随机源创建
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// 为指定阵营随机选择一个合法走法；没有合法走法时返回 None
    ///
    /// 返回的走法不含被吃棋子，吃子在 `GameState` 提交时确定。
    pub fn pick_move(&mut self, state: &GameState, side: Side) -> Option<Move> {
        let candidates = MoveGenerator::generate(state, side);
        debug!("{} 共有 {} 个合法走法", side, candidates.len());

        candidates.choose(&mut self.rng).copied()
    }

    /// 为指定阵营选一步并直接提交，返回所选走法和新状态
    pub fn play(&mut self, state: &GameState, side: Side) -> Option<(Move, GameState)> {
        let mv = self.pick_move(state, side)?;
        let next = state.move_piece_direct(mv.piece.id, mv.to.x as i32, mv.to.y as i32);
        info!("AI 走棋: {}", mv);
        Some((mv, next))
    }
}

impl RandomMoveSelector<ChaCha8Rng> {
    /// 使用固定种子创建（结果可复现）
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// 使用系统熵创建
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }

    /// 按配置创建：有种子时使用种子，否则使用系统熵
    pub fn from_config(config: &SelectorConfig) -> Self {
        match config.seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Default for RandomMoveSelector<ChaCha8Rng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}
