use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use enhance_csv::cli::{Cli, USAGE};
use enhance_csv::utils::logging;
use enhance_csv::{App, Config};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            error!("{}", e);
            error!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    // 缺少输入文件时不做任何文件操作
    let input = match cli.input_path() {
        Ok(input) => input.to_path_buf(),
        Err(e) => {
            error!("{}", e);
            error!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &input).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, input: &std::path::Path) -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config)
        .run(input, cli.row_limit())
        .await
        .with_context(|| format!("处理 {} 失败", input.display()))?;

    Ok(())
}
