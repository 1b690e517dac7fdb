//! 游戏设置模块
//!
//! 提供设置数据结构和 JSON 持久化

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xiangqi_ai::SelectorConfig;
use xiangqi_core::Side;

/// 设置读写错误
#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 翻转棋盘视角
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoardFlip {
    /// 红方视角（红方在下）
    #[default]
    RedBottom,
    /// 黑方视角（黑方在下）
    BlackBottom,
    /// 跟随玩家阵营
    FollowPlayer,
}

impl BoardFlip {
    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            BoardFlip::RedBottom => "红方在下",
            BoardFlip::BlackBottom => "黑方在下",
            BoardFlip::FollowPlayer => "跟随玩家",
        }
    }

    /// 是否需要翻转（默认坐标系红方在下）
    pub fn is_flipped(&self, player_side: Side) -> bool {
        match self {
            BoardFlip::RedBottom => false,
            BoardFlip::BlackBottom => true,
            BoardFlip::FollowPlayer => player_side == Side::Black,
        }
    }
}

/// 游戏设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 玩家执子方
    pub human_side: Side,
    /// 是否由电脑走另一方（关闭时为本地双人）
    pub ai_enabled: bool,
    /// 电脑随机种子
    pub ai: SelectorConfig,
    /// 走子提示：选中棋子后列出可走位置
    pub show_move_hints: bool,
    /// 显示坐标
    pub show_coordinates: bool,
    /// 翻转棋盘
    pub board_flip: BoardFlip,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            human_side: Side::Red,
            ai_enabled: true,
            ai: SelectorConfig::default(),
            show_move_hints: true,
            show_coordinates: true,
            board_flip: BoardFlip::default(),
        }
    }
}

impl Settings {
    /// 获取设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("xiangqi");
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载设置，失败时使用默认设置
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("无法获取配置目录，使用默认设置");
            return Self::default();
        };
        Self::load_or_default(&path)
    }

    /// 从指定文件加载设置，失败时使用默认设置
    ///
    /// 文件不存在时写入一份默认设置，方便手工修改。
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("设置文件不存在，使用默认设置");
            let settings = Self::default();
            if let Err(e) = settings.save_to(path) {
                tracing::warn!("无法写入默认设置: {}", e);
            }
            return settings;
        }

        match Self::load_from(path) {
            Ok(settings) => {
                tracing::info!("已加载设置: {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("设置文件无效: {}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 从指定文件加载设置
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 保存设置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("设置已保存: {:?}", path);
        Ok(())
    }

    /// 电脑执子方（未启用电脑时为 None）
    pub fn engine_side(&self) -> Option<Side> {
        self.ai_enabled.then(|| self.human_side.opponent())
    }
}
