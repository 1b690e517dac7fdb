//! 双方随机走子的完整对局演示
//!
//! 运行: RUST_LOG=debug cargo run -p xiangqi-ai --example random_game

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xiangqi_ai::{RandomMoveSelector, SelectorConfig};
use xiangqi_core::{Fen, GameState};

const MAX_PLIES: usize = 300;

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok());
    let mut selector = RandomMoveSelector::from_config(&SelectorConfig { seed });
    let mut state = GameState::new();

    for ply in 1..=MAX_PLIES {
        let side = state.side_to_move();
        let Some((mv, next)) = selector.play(&state, side) else {
            println!("第 {} 步: {} 无子可走", ply, side);
            break;
        };
        println!("{:>3}. {}", ply, mv);
        state = next;

        if let Some(winner) = state.winner() {
            println!("{} 获胜", winner);
            break;
        }
    }

    println!("最终局面: {}", Fen::to_string(&state));
}
