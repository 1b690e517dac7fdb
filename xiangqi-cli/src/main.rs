use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xiangqi_cli::game;
use xiangqi_cli::settings::Settings;

fn main() -> Result<()> {
    // 初始化日志（输出到 stderr，不干扰棋盘）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("xiangqi_cli=info".parse()?),
        )
        .init();

    info!("中国象棋启动中...");

    let settings = Settings::load();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    game::run(&settings, stdin.lock(), &mut stdout)?;

    Ok(())
}
