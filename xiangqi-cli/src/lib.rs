//! 中国象棋终端客户端
//!
//! 在终端中进行本地双人或人机对局

pub mod game;
pub mod render;
pub mod settings;
