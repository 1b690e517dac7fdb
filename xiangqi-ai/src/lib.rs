//! 中国象棋 AI
//!
//! 目前只有随机走子：在一方全部合法走法中均匀随机选择。

mod config;
mod random;

pub use config::SelectorConfig;
pub use random::RandomMoveSelector;
