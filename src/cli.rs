//! 命令行参数

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{AppError, AppResult};

pub const USAGE: &str = "Usage: enhance_csv <input.csv> [rowLimit]";

/// 为 CSV 中的每一行生成个性化的冷邮件开场白
#[derive(Debug, Parser)]
#[command(name = "enhance_csv", version)]
pub struct Cli {
    /// 输入 CSV 文件路径（必填）
    #[arg(allow_hyphen_values = true)]
    pub input: Option<PathBuf>,

    /// 只处理前 N 行，0 或非数字表示全部
    #[arg(allow_hyphen_values = true)]
    pub row_limit: Option<String>,

    /// 多余的参数，忽略
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub extra: Vec<String>,
}

impl Cli {
    /// 输入路径，缺失时返回参数错误
    pub fn input_path(&self) -> AppResult<&Path> {
        self.input
            .as_deref()
            .ok_or_else(|| AppError::Usage("缺少输入文件路径".to_string()))
    }

    pub fn row_limit(&self) -> usize {
        parse_row_limit(self.row_limit.as_deref())
    }
}

/// 解析行数限制
///
/// 取开头的连续数字（`"12abc"` → 12）；非数字、负数或空值都视为 0（不限制）。
pub fn parse_row_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return 0;
    };
    let digits: String = raw
        .trim_start()
        .trim_start_matches('+')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row_limit() {
        assert_eq!(parse_row_limit(None), 0);
        assert_eq!(parse_row_limit(Some("25")), 25);
        assert_eq!(parse_row_limit(Some(" 7")), 7);
        assert_eq!(parse_row_limit(Some("12abc")), 12);
        assert_eq!(parse_row_limit(Some("abc")), 0);
        assert_eq!(parse_row_limit(Some("-3")), 0);
        assert_eq!(parse_row_limit(Some("")), 0);
    }

    #[test]
    fn test_cli_parses_positional_args() {
        let cli = Cli::try_parse_from(["enhance_csv", "/data/leads.csv", "10"]).unwrap();
        assert_eq!(cli.input_path().unwrap(), Path::new("/data/leads.csv"));
        assert_eq!(cli.row_limit(), 10);

        let cli = Cli::try_parse_from(["enhance_csv", "leads.csv", "-2"]).unwrap();
        assert_eq!(cli.row_limit(), 0);
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let cli = Cli::try_parse_from(["enhance_csv", "l.csv", "1", "extra"]).unwrap();
        assert_eq!(cli.input_path().unwrap(), Path::new("l.csv"));
        assert_eq!(cli.row_limit(), 1);
        assert_eq!(cli.extra, vec!["extra"]);
    }

    #[test]
    fn test_hyphen_prefixed_input_path() {
        let cli = Cli::try_parse_from(["enhance_csv", "-x.csv"]).unwrap();
        assert_eq!(cli.input_path().unwrap(), Path::new("-x.csv"));
        assert_eq!(cli.row_limit(), 0);
    }

    #[test]
    fn test_missing_input_is_usage_error() {
        let cli = Cli::try_parse_from(["enhance_csv"]).unwrap();
        assert!(matches!(cli.input_path(), Err(AppError::Usage(_))));
        assert_eq!(cli.row_limit(), 0);
    }
}
