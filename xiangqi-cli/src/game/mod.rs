//! 游戏逻辑模块
//!
//! 管理本地对局和命令行交互

mod input;
mod session;

pub use input::*;
pub use session::*;

use std::io::{self, BufRead, Write};

use tracing::{debug, info};
use xiangqi_core::Side;

use crate::render::{render_board, RenderOptions};
use crate::settings::Settings;

/// 游戏模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// 人机对战（电脑随机走子）
    LocalPvE { engine_side: Side },
    /// 本地双人对战（同一终端轮流输入）
    LocalPvP,
}

impl GameMode {
    /// 电脑执子方
    pub fn engine_side(&self) -> Option<Side> {
        match self {
            GameMode::LocalPvE { engine_side } => Some(*engine_side),
            GameMode::LocalPvP => None,
        }
    }

    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::LocalPvE { .. } => "人机对战",
            GameMode::LocalPvP => "双人对战",
        }
    }
}

/// 运行交互循环，直到输入结束或收到退出命令
pub fn run<R: BufRead, W: Write>(settings: &Settings, input: R, output: &mut W) -> io::Result<()> {
    let mut session = Session::from_settings(settings);
    let options = RenderOptions {
        flipped: settings.board_flip.is_flipped(settings.human_side),
        coordinates: settings.show_coordinates,
    };
    info!("开始对局: {}", session.mode().display_name());

    writeln!(
        output,
        "中国象棋 - {}，{}（输入 h 查看帮助）",
        session.mode().display_name(),
        settings.board_flip.display_name()
    )?;
    if let Some(mv) = session.state().last_move() {
        writeln!(output, "电脑: {}", mv)?;
    }
    write_board(&session, settings, options, output)?;

    let mut lines = input.lines();
    loop {
        write!(output, "{} > ", session.state().side_to_move())?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(InputError::Empty) => continue,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };
        debug!("命令: {:?}", command);

        let feedback = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            Command::Fen => {
                writeln!(output, "{}", session.fen())?;
                continue;
            }
            Command::Board => {
                write_board(&session, settings, options, output)?;
                continue;
            }
            Command::Moves => {
                writeln!(output, "{}", session.destinations())?;
                continue;
            }
            Command::Click { x, y } => session.click(x, y),
            Command::Deselect => session.deselect(),
            Command::Undo => session.undo(),
            Command::Restart => session.restart(),
        };

        writeln!(output, "{}", feedback)?;
        if matches!(
            feedback,
            Feedback::Selected(_)
                | Feedback::Deselected
                | Feedback::Moved { .. }
                | Feedback::EngineStuck(_)
                | Feedback::Undone { .. }
                | Feedback::Restarted(_)
        ) {
            write_board(&session, settings, options, output)?;
        }
        if matches!(feedback, Feedback::Moved { .. }) {
            if let Some(winner) = session.state().winner() {
                info!("对局结束，{}获胜", winner);
                writeln!(output, "将帅被吃，{}获胜！", winner)?;
            }
        }
    }

    info!("退出对局");
    Ok(())
}

fn write_board<W: Write>(
    session: &Session,
    settings: &Settings,
    options: RenderOptions,
    output: &mut W,
) -> io::Result<()> {
    let hints = match session.state().selected_piece() {
        Some(piece) if settings.show_move_hints => session.state().valid_destinations(piece.id),
        _ => Vec::new(),
    };
    writeln!(output, "{}", render_board(session.state(), &hints, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use xiangqi_ai::SelectorConfig;

    fn play(settings: &Settings, script: &str) -> String {
        let mut output = Vec::new();
        run(settings, Cursor::new(script.to_string()), &mut output).expect("交互循环");
        String::from_utf8(output).expect("UTF-8 输出")
    }

    fn pvp_settings() -> Settings {
        Settings {
            ai_enabled: false,
            ..Settings::default()
        }
    }

    #[test]
    fn test_game_mode() {
        let pve = GameMode::LocalPvE {
            engine_side: Side::Black,
        };
        assert_eq!(pve.engine_side(), Some(Side::Black));
        assert_eq!(pve.display_name(), "人机对战");
        assert_eq!(GameMode::LocalPvP.engine_side(), None);
    }

    #[test]
    fn test_run_pvp_script() {
        let output = play(&pvp_settings(), "1 7\n4 7\nfen\nq\n");
        assert!(output.contains("双人对战，红方在下"));
        assert!(output.contains("走棋: 炮 (1, 7) -> (4, 7)"));
        assert!(output.contains("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/4C2C1/9/RNBAKABNR b"));
    }

    #[test]
    fn test_run_reports_bad_input() {
        let output = play(&pvp_settings(), "hello\n\n4 4\n1 9\n1 8\n");
        assert!(output.contains("Unknown command: hello"));
        assert!(output.contains("请先选择己方棋子"));
        assert!(output.contains("无效操作"));
    }

    #[test]
    fn test_run_pve_engine_replies() {
        let settings = Settings {
            ai: SelectorConfig::seeded(3),
            ..Settings::default()
        };
        let output = play(&settings, "4 6\n4 5\nu\n");
        assert!(output.contains("人机对战"));
        assert!(output.contains("电脑: "));
        assert!(output.contains("已悔棋 2 步"));
    }

    #[test]
    fn test_run_engine_opens_as_red() {
        let settings = Settings {
            human_side: Side::Black,
            ai: SelectorConfig::seeded(4),
            ..Settings::default()
        };
        let output = play(&settings, "");
        assert!(output.contains("电脑: "));
        assert!(output.contains("黑方 > "));
    }

    #[test]
    fn test_run_reports_engine_reopening_after_undo() {
        let settings = Settings {
            human_side: Side::Black,
            ai: SelectorConfig::seeded(1),
            ..Settings::default()
        };
        let output = play(&settings, "u\n");
        assert!(output.contains("已悔棋 1 步\n电脑: "));
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let output = play(&pvp_settings(), "h\n");
        assert!(output.contains("命令:"));
        assert!(output.ends_with("红方 > \n"));
    }
}
