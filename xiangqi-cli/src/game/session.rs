//! 本地对局会话
//!
//! 把点击翻译成规则引擎的选子/走子调用，并在人机模式下让电脑应着。
//! 会话本身不包含任何规则判断。

use std::fmt;

use xiangqi_ai::RandomMoveSelector;
use xiangqi_core::{ChessError, Fen, GameState, Move, Piece, Position, Side};

use super::GameMode;
use crate::settings::Settings;

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// 选中棋子
    Selected(Piece),
    /// 取消选中
    Deselected,
    /// 走子成功，附带电脑的应着
    Moved { played: Move, reply: Option<Move> },
    /// 电脑无子可走
    EngineStuck(Side),
    /// 操作被拒绝
    Rejected(ChessError),
    /// 点击没有产生任何效果
    Ignored,
    /// 悔棋若干步（退回开局且电脑先手时附带电脑重走的第一步）
    Undone { plies: usize, reply: Option<Move> },
    /// 重新开局（附带电脑先手的走法）
    Restarted(Option<Move>),
    /// 可走位置
    Destinations(Vec<Position>),
    /// 已分出胜负，只接受悔棋或重新开局
    GameOver(Side),
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Selected(piece) => write!(f, "选中 {}", piece),
            Feedback::Deselected => write!(f, "已取消选择"),
            Feedback::Moved { played, reply } => {
                write!(f, "走棋: {}", played)?;
                if let Some(reply) = reply {
                    write!(f, "\n电脑: {}", reply)?;
                }
                Ok(())
            }
            Feedback::EngineStuck(side) => write!(f, "{}无子可走", side),
            Feedback::Rejected(e) => write!(f, "无效操作: {}", e),
            Feedback::Ignored => write!(f, "请先选择己方棋子"),
            Feedback::Undone { plies, reply } => {
                write!(f, "已悔棋 {} 步", plies)?;
                if let Some(reply) = reply {
                    write!(f, "\n电脑: {}", reply)?;
                }
                Ok(())
            }
            Feedback::Restarted(None) => write!(f, "新的一局"),
            Feedback::Restarted(Some(mv)) => write!(f, "新的一局\n电脑: {}", mv),
            Feedback::Destinations(targets) if targets.is_empty() => write!(f, "没有可走位置"),
            Feedback::Destinations(targets) => {
                let list: Vec<String> = targets.iter().map(|p| p.to_string()).collect();
                write!(f, "可走位置: {}", list.join(" "))
            }
            Feedback::GameOver(winner) => write!(f, "{}已获胜，输入 undo 或 new 继续", winner),
        }
    }
}

/// 本地对局会话
pub struct Session {
    state: GameState,
    mode: GameMode,
    selector: RandomMoveSelector,
}

impl Session {
    /// 创建会话；电脑先手时立即走第一步
    pub fn new(mode: GameMode, selector: RandomMoveSelector) -> Self {
        let mut session = Self {
            state: GameState::new(),
            mode,
            selector,
        };
        session.engine_reply();
        session
    }

    /// 按设置创建会话
    pub fn from_settings(settings: &Settings) -> Self {
        let mode = match settings.engine_side() {
            Some(engine_side) => GameMode::LocalPvE { engine_side },
            None => GameMode::LocalPvP,
        };
        Self::new(mode, RandomMoveSelector::from_config(&settings.ai))
    }

    /// 当前局面
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 对局模式
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// 是否轮到电脑走棋
    pub fn should_ai_move(&self) -> bool {
        !self.state.is_over() && self.mode.engine_side() == Some(self.state.side_to_move())
    }

    /// 点击棋盘
    ///
    /// 未选子时点击己方棋子即选中；已选子时再点同一个棋子取消选择，
    /// 点另一个己方棋子改选，否则尝试走到该位置。
    pub fn click(&mut self, x: i32, y: i32) -> Feedback {
        if let Some(winner) = self.state.winner() {
            return Feedback::GameOver(winner);
        }
        if self.should_ai_move() {
            // 电脑之前无子可走，轮次停在电脑方
            return Feedback::EngineStuck(self.state.side_to_move());
        }

        let touched = self.state.piece_at(x, y).copied();
        let selected = self.state.selected_piece().copied();
        let side = self.state.side_to_move();

        match (selected, touched) {
            (Some(sel), Some(t)) if sel.id == t.id => {
                self.state = self.state.clear_selection();
                Feedback::Deselected
            }
            (_, Some(t)) if t.side == side => self.select(t),
            (None, _) => Feedback::Ignored,
            (Some(_), _) => self.play(x, y),
        }
    }

    fn select(&mut self, piece: Piece) -> Feedback {
        match self.state.try_select_piece(piece.id) {
            Ok(next) => {
                self.state = next;
                Feedback::Selected(piece)
            }
            Err(e) => Feedback::Rejected(e),
        }
    }

    fn play(&mut self, x: i32, y: i32) -> Feedback {
        match self.state.try_move_piece(x, y) {
            Ok(next) => {
                self.state = next;
                let Some(played) = self.state.last_move().copied() else {
                    return Feedback::Ignored;
                };
                if self.state.is_over() {
                    return Feedback::Moved {
                        played,
                        reply: None,
                    };
                }
                match self.engine_reply() {
                    Some(reply) => Feedback::Moved {
                        played,
                        reply: Some(reply),
                    },
                    None if self.should_ai_move() => {
                        Feedback::EngineStuck(self.state.side_to_move())
                    }
                    None => Feedback::Moved {
                        played,
                        reply: None,
                    },
                }
            }
            Err(e) => Feedback::Rejected(e),
        }
    }

    /// 轮到电脑时让电脑走一步，返回所走的棋
    fn engine_reply(&mut self) -> Option<Move> {
        if !self.should_ai_move() {
            return None;
        }
        let side = self.state.side_to_move();
        let (mv, next) = self.selector.play(&self.state, side)?;
        self.state = next;
        // 提交后的记录带有被吃棋子
        self.state.last_move().copied().or(Some(mv))
    }

    /// 取消选择
    pub fn deselect(&mut self) -> Feedback {
        self.state = self.state.clear_selection();
        Feedback::Deselected
    }

    /// 选中棋子的可走位置
    pub fn destinations(&self) -> Feedback {
        match self.state.selected_piece() {
            Some(piece) => Feedback::Destinations(self.state.valid_destinations(piece.id)),
            None => Feedback::Rejected(ChessError::NoSelection),
        }
    }

    /// 悔棋
    ///
    /// 人机模式下如果最后一步是电脑走的，连同玩家的上一步一起退回。
    pub fn undo(&mut self) -> Feedback {
        let engine_side = self.mode.engine_side();
        let plies = match self.state.last_move() {
            None => return Feedback::Rejected(ChessError::NothingToUndo),
            Some(last) if Some(last.piece.side) == engine_side => 2,
            Some(_) => 1,
        };

        let mut undone = 0;
        for _ in 0..plies {
            match self.state.try_undo_move() {
                Ok(prev) => {
                    self.state = prev;
                    undone += 1;
                }
                Err(_) => break,
            }
        }

        // 电脑先手时退回到开局，需要电脑重新走第一步
        let reply = self.engine_reply();
        Feedback::Undone {
            plies: undone,
            reply,
        }
    }

    /// 重新开局
    pub fn restart(&mut self) -> Feedback {
        self.state = GameState::new();
        Feedback::Restarted(self.engine_reply())
    }

    /// 当前局面 FEN
    pub fn fen(&self) -> String {
        Fen::to_string(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pve(seed: u64) -> Session {
        Session::new(
            GameMode::LocalPvE {
                engine_side: Side::Black,
            },
            RandomMoveSelector::from_seed(seed),
        )
    }

    fn pvp() -> Session {
        Session::new(GameMode::LocalPvP, RandomMoveSelector::from_seed(0))
    }

    #[test]
    fn test_select_and_move_pvp() {
        let mut session = pvp();
        assert!(matches!(session.click(1, 7), Feedback::Selected(_)));
        let feedback = session.click(4, 7);
        assert!(matches!(feedback, Feedback::Moved { reply: None, .. }));
        assert_eq!(session.state().side_to_move(), Side::Black);
        assert_eq!(
            session.state().piece_at(4, 7).map(|p| p.side),
            Some(Side::Red)
        );
    }

    #[test]
    fn test_click_empty_without_selection() {
        let mut session = pvp();
        assert_eq!(session.click(4, 4), Feedback::Ignored);
        // 对方棋子也不能选
        assert_eq!(session.click(4, 0), Feedback::Ignored);
        assert!(session.state().selected_piece().is_none());
    }

    #[test]
    fn test_click_selected_piece_deselects() {
        let mut session = pvp();
        session.click(1, 9);
        assert_eq!(session.click(1, 9), Feedback::Deselected);
        assert!(session.state().selected_piece().is_none());
    }

    #[test]
    fn test_reselect_other_piece() {
        let mut session = pvp();
        session.click(1, 9);
        assert!(matches!(session.click(7, 9), Feedback::Selected(p) if p.x() == 7));
        assert_eq!(session.state().selected_piece().map(|p| p.x()), Some(7));
    }

    #[test]
    fn test_illegal_destination_rejected() {
        let mut session = pvp();
        session.click(1, 9);
        let before = session.state().clone();
        assert!(matches!(
            session.click(1, 8),
            Feedback::Rejected(ChessError::IllegalMove { .. })
        ));
        assert_eq!(session.state(), &before);
        assert!(matches!(
            session.click(20, 8),
            Feedback::Rejected(ChessError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_engine_replies_in_pve() {
        let mut session = pve(5);
        session.click(4, 6);
        let feedback = session.click(4, 5);
        let Feedback::Moved {
            played,
            reply: Some(reply),
        } = feedback
        else {
            panic!("电脑应该应着: {:?}", feedback);
        };
        assert_eq!(played.piece.side, Side::Red);
        assert_eq!(reply.piece.side, Side::Black);
        assert_eq!(session.state().side_to_move(), Side::Red);
        assert_eq!(session.state().move_history().len(), 2);
    }

    #[test]
    fn test_undo_in_pve_takes_back_both_plies() {
        let mut session = pve(8);
        session.click(4, 6);
        session.click(4, 5);
        assert_eq!(
            session.undo(),
            Feedback::Undone {
                plies: 2,
                reply: None
            }
        );
        assert_eq!(session.state(), &GameState::new());
        assert_eq!(
            session.undo(),
            Feedback::Rejected(ChessError::NothingToUndo)
        );
    }

    #[test]
    fn test_undo_in_pvp_takes_back_one_ply() {
        let mut session = pvp();
        session.click(4, 6);
        session.click(4, 5);
        assert_eq!(
            session.undo(),
            Feedback::Undone {
                plies: 1,
                reply: None
            }
        );
        assert_eq!(session.state().side_to_move(), Side::Red);
    }

    #[test]
    fn test_engine_moves_first_when_red() {
        let session = Session::new(
            GameMode::LocalPvE {
                engine_side: Side::Red,
            },
            RandomMoveSelector::from_seed(1),
        );
        assert_eq!(session.state().move_history().len(), 1);
        assert_eq!(session.state().side_to_move(), Side::Black);
    }

    #[test]
    fn test_undo_when_engine_moved_first() {
        let mut session = Session::new(
            GameMode::LocalPvE {
                engine_side: Side::Red,
            },
            RandomMoveSelector::from_seed(1),
        );
        // 只有电脑的第一步：退回后电脑重新走第一步
        let Feedback::Undone {
            plies: 1,
            reply: Some(reply),
        } = session.undo()
        else {
            panic!("退回开局后电脑应重新走第一步");
        };
        assert_eq!(reply.piece.side, Side::Red);
        assert_eq!(session.state().last_move(), Some(&reply));
        assert_eq!(session.state().move_history().len(), 1);
        assert_eq!(session.state().side_to_move(), Side::Black);
    }

    #[test]
    fn test_game_over_blocks_clicks() {
        let mut session = pvp();
        session.state = Fen::parse("4k4/9/9/9/4R4/9/9/9/9/3K5 r").expect("FEN 有效");
        session.click(4, 4);
        assert!(matches!(session.click(4, 0), Feedback::Moved { .. }));
        assert_eq!(session.state().winner(), Some(Side::Red));
        assert_eq!(session.click(3, 9), Feedback::GameOver(Side::Red));

        // 悔棋后可以继续
        assert_eq!(
            session.undo(),
            Feedback::Undone {
                plies: 1,
                reply: None
            }
        );
        assert!(matches!(session.click(3, 9), Feedback::Selected(_)));
    }

    #[test]
    fn test_destinations() {
        let mut session = pvp();
        assert_eq!(
            session.destinations(),
            Feedback::Rejected(ChessError::NoSelection)
        );
        session.click(1, 9);
        let Feedback::Destinations(mut targets) = session.destinations() else {
            panic!("应返回可走位置");
        };
        targets.sort_by_key(|p| p.to_index());
        assert_eq!(
            targets,
            vec![Position::new_unchecked(0, 7), Position::new_unchecked(2, 7)]
        );
    }

    #[test]
    fn test_feedback_display() {
        assert_eq!(
            Feedback::Undone {
                plies: 2,
                reply: None
            }
            .to_string(),
            "已悔棋 2 步"
        );
        assert_eq!(
            Feedback::GameOver(Side::Red).to_string(),
            "红方已获胜，输入 undo 或 new 继续"
        );
        assert_eq!(
            Feedback::Destinations(vec![Position::new_unchecked(0, 7)]).to_string(),
            "可走位置: (0, 7)"
        );
    }

    #[test]
    fn test_restart() {
        let mut session = pvp();
        session.click(4, 6);
        session.click(4, 5);
        assert_eq!(session.restart(), Feedback::Restarted(None));
        assert_eq!(session.state(), &GameState::new());
    }

    #[test]
    fn test_engine_stuck() {
        let mut session = pve(2);
        // 黑方没有棋子
        session.state = Fen::parse("9/9/9/9/9/9/9/9/4R4/3K5 r").expect("FEN 有效");
        session.click(4, 8);
        assert_eq!(session.click(4, 4), Feedback::EngineStuck(Side::Black));
        assert_eq!(session.click(3, 9), Feedback::EngineStuck(Side::Black));
    }
}
