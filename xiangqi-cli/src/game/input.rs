//! 输入处理
//!
//! 把一行文本解析为游戏命令。坐标输入相当于在棋盘上点击一次。

use thiserror::Error;

/// 输入解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// 空输入
    #[error("Empty input")]
    Empty,

    /// 无法识别的命令
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// 坐标格式错误
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// 游戏命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 点击棋盘上的一个交叉点
    Click { x: i32, y: i32 },
    /// 取消选择
    Deselect,
    /// 列出选中棋子的可走位置
    Moves,
    /// 悔棋
    Undo,
    /// 重新开局
    Restart,
    /// 重新显示棋盘
    Board,
    /// 输出 FEN
    Fen,
    /// 帮助
    Help,
    /// 退出
    Quit,
}

impl Command {
    /// 解析一行输入
    ///
    /// 坐标可写成 `x y` 或 `x,y`；越界坐标照常返回，由规则引擎拒绝。
    pub fn parse(line: &str) -> Result<Command, InputError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(InputError::Empty);
        }

        let command = match line.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Command::Quit,
            "u" | "undo" => Command::Undo,
            "n" | "new" | "restart" => Command::Restart,
            "m" | "moves" => Command::Moves,
            "d" | "deselect" => Command::Deselect,
            "b" | "board" => Command::Board,
            "fen" => Command::Fen,
            "h" | "help" | "?" => Command::Help,
            _ => return Self::parse_click(line),
        };
        Ok(command)
    }

    fn parse_click(line: &str) -> Result<Command, InputError> {
        let parts: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        let looks_numeric = parts
            .iter()
            .all(|p| p.trim_start_matches('-').chars().all(|c| c.is_ascii_digit()));
        if !looks_numeric {
            return Err(InputError::UnknownCommand(line.to_string()));
        }

        match parts.as_slice() {
            [x, y] => {
                let x = x
                    .parse()
                    .map_err(|_| InputError::InvalidCoordinate(line.to_string()))?;
                let y = y
                    .parse()
                    .map_err(|_| InputError::InvalidCoordinate(line.to_string()))?;
                Ok(Command::Click { x, y })
            }
            _ => Err(InputError::InvalidCoordinate(line.to_string())),
        }
    }
}

/// 帮助文本
pub const HELP: &str = "\
命令:
  x y      点击坐标 (x: 0-8 列, y: 0-9 行)：选子 / 走子 / 再点一次取消
  m        列出选中棋子的可走位置
  d        取消选择
  u        悔棋
  n        重新开局
  b        显示棋盘
  fen      输出当前局面 FEN
  h        帮助
  q        退出";
