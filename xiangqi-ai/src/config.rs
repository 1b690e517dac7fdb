//! AI 配置

use serde::{Deserialize, Serialize};

/// 随机走子器配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// 随机种子；为空时使用系统熵
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SelectorConfig {
    /// 固定种子的配置
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}
