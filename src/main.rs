//! 转写器命令行入口
//!
//! 围绕清单驱动的引擎提供三个子命令：枚举语言、取地址文本、
//! 生成示例清单。

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use transcriber::config::ConfigManager;
use transcriber::{Address, TranscribeResult};

#[derive(Parser)]
#[command(name = "transcriber", version, about = "按行寻址的多语言文本转写引擎")]
struct Cli {
    /// 清单文件路径（缺省时走搜索路径）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 枚举清单中的语言及其源文件状态
    List,
    /// 取给定地址在指定语言下的文本
    Get {
        /// 语言标识（前缀或展示名，大小写不敏感）
        #[arg(short, long)]
        lang: Option<String>,
        /// 单行地址（0 起始），可重复
        #[arg(long)]
        line: Vec<usize>,
        /// 行区间 `start..end`（end 可省略）
        #[arg(long)]
        range: Vec<String>,
    },
    /// 写出一份可编辑的示例清单
    ExampleConfig {
        /// 输出路径
        #[arg(default_value = "transcriber.toml")]
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("transcriber: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> TranscribeResult<()> {
    if let Command::ExampleConfig { path } = &cli.command {
        ConfigManager::generate_example_config(path)?;
        println!("已写出示例清单: {}", path.display());
        return Ok(());
    }

    let manager = match &cli.config {
        Some(path) => ConfigManager::from_config(ConfigManager::load_from_file(path)?)?,
        None => ConfigManager::new()?,
    };

    match cli.command {
        Command::List => list_languages(&manager),
        Command::Get { lang, line, range } => get_text(&manager, lang, line, range),
        Command::ExampleConfig { .. } => unreachable!("handled above"),
    }
}

/// 枚举语言：前缀、展示名、源路径与可用性
fn list_languages(manager: &ConfigManager) -> TranscribeResult<()> {
    let registry = manager.build_registry()?;
    let config = manager.config();

    for lang in registry.iter() {
        let path = PathBuf::from(&config.basepath)
            .join(format!("{}{}", lang.filename(), config.extension));
        let status = if path.exists() { "ok" } else { "missing" };
        println!(
            "{:<6} {:<20} {} ({})",
            lang.prefix(),
            lang.name(),
            path.display(),
            status
        );
    }
    Ok(())
}

fn get_text(
    manager: &ConfigManager,
    lang: Option<String>,
    lines: Vec<usize>,
    ranges: Vec<String>,
) -> TranscribeResult<()> {
    let (registry, mut transcriber) = manager.build_transcriber()?;

    if let Some(identifier) = lang {
        let lang = registry.find(&identifier).ok_or_else(|| {
            transcriber::TranscribeError::Config(format!("未知语言: '{}'", identifier))
        })?;
        if transcriber.language() != &lang {
            transcriber.set_language(Arc::clone(&lang))?;
        }
    }

    let mut addresses: Vec<Address> = lines.into_iter().map(Address::line).collect();
    for spec in ranges {
        addresses.push(parse_range(&spec)?);
    }
    if addresses.is_empty() {
        return Err(transcriber::TranscribeError::Config(
            "需要至少一个 --line 或 --range".to_string(),
        ));
    }

    for address in addresses {
        println!("{}", transcriber.get(address)?);
    }
    Ok(())
}

/// 解析 `start..end` 形式的区间；end 可省略
fn parse_range(spec: &str) -> TranscribeResult<Address> {
    let bad = || transcriber::TranscribeError::Config(format!("无效区间: '{}'", spec));

    let (start, end) = spec.split_once("..").ok_or_else(bad)?;
    let start: usize = start.trim().parse().map_err(|_| bad())?;
    let end = end.trim();
    let end: Option<usize> = if end.is_empty() {
        None
    } else {
        Some(end.parse().map_err(|_| bad())?)
    };

    Ok(Address::range(start, end))
}
