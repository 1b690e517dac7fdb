//! 文本棋盘渲染

use xiangqi_core::{GameState, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// 全角数字，与汉字棋子等宽
const FULL_WIDTH_DIGITS: [char; 10] = ['０', '１', '２', '３', '４', '５', '６', '７', '８', '９'];

/// 空交叉点
const EMPTY_CELL: char = '＋';

/// 可走位置提示
const HINT_CELL: char = '＊';

/// 河界
const RIVER: &str = "～～～～楚河～～～汉界～～～～";

/// 渲染选项
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// 黑方在下
    pub flipped: bool,
    /// 显示行列坐标
    pub coordinates: bool,
}

/// 把局面渲染为多行文本
///
/// 每个交叉点前有一个分隔字符，选中的棋子用 `[ ]` 括起。
/// `hints` 中的空位置用 `＊` 标出，用于显示选中棋子的可走位置。
pub fn render_board(state: &GameState, hints: &[Position], options: RenderOptions) -> String {
    let board = state.board();
    let selected = state.selected_piece().map(|p| p.position);

    let mut rows: Vec<usize> = (0..BOARD_HEIGHT).collect();
    let mut columns: Vec<usize> = (0..BOARD_WIDTH).collect();
    if options.flipped {
        rows.reverse();
        columns.reverse();
    }

    let mut lines = Vec::with_capacity(BOARD_HEIGHT + 2);
    if options.coordinates {
        let header: String = columns
            .iter()
            .map(|&x| format!(" {}", FULL_WIDTH_DIGITS[x]))
            .collect();
        lines.push(format!(" {}", header));
    }

    for (i, &y) in rows.iter().enumerate() {
        if i == BOARD_HEIGHT / 2 {
            lines.push(format!("  {}", RIVER));
        }

        let mut line = if options.coordinates {
            y.to_string()
        } else {
            String::new()
        };
        let mut previous_selected = false;
        for &x in &columns {
            let pos = Position::new_unchecked(x as u8, y as u8);
            let is_selected = selected == Some(pos);
            line.push(match (is_selected, previous_selected) {
                (true, _) => '[',
                (false, true) => ']',
                (false, false) => ' ',
            });
            line.push(match board.get(pos) {
                Some(piece) => piece.display_char(),
                None if hints.contains(&pos) => HINT_CELL,
                None => EMPTY_CELL,
            });
            previous_selected = is_selected;
        }
        if previous_selected {
            line.push(']');
        }

        lines.push(line);
    }

    lines.join("\n")
}
