//! 日志模块：env_logger 彩色控制台 + 文件（含轮转），或 tracing-subscriber JSON 输出
use crate::config::{LogFormat, LoggingConfig};
use env_logger::fmt::Formatter;
use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter, Record};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use tracing_subscriber::EnvFilter;

const LOG_MAX_SIZE_MB: u64 = 10;
const LOG_MAX_ROTATIONS: usize = 5;

static INIT_LOGGER: Once = Once::new();
// 全局文件写入器，控制台 formatter 顺带写文件
static FILE_WRITER: Mutex<Option<File>> = Mutex::new(None);

pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_uppercase().as_str() {
        "TRACE" => LevelFilter::Trace,
        "DEBUG" => LevelFilter::Debug,
        "INFO" => LevelFilter::Info,
        "WARN" => LevelFilter::Warn,
        "ERROR" => LevelFilter::Error,
        "OFF" => LevelFilter::Off,
        other => {
            eprintln!("⚠️ 无效日志级别「{}」，使用默认 INFO", other);
            LevelFilter::Info
        }
    }
}

// ==================== 初始化日志系统 ====================
pub fn init_logger(config: &LoggingConfig) {
    INIT_LOGGER.call_once(|| {
        let level_filter = parse_level(&config.level);
        match config.format {
            LogFormat::Json => init_json(level_filter),
            LogFormat::Text => init_text(config, level_filter),
        }
    });
}

fn init_json(level_filter: LevelFilter) {
    let filter = EnvFilter::new(format!(
        "{},ethers_providers=warn",
        level_filter.to_string().to_lowercase()
    ));
    // fmt().try_init() 会同时安装 LogTracer，log 宏的输出也走这里
    if let Err(e) = tracing_subscriber::fmt()
        .json()
        .with_current_span(false)
        .with_env_filter(filter)
        .try_init()
    {
        eprintln!("❌ JSON 日志初始化失败: {}", e);
    }
}

fn init_text(config: &LoggingConfig, level_filter: LevelFilter) {
    let log_file_path = if config.file_enabled {
        open_log_file(&config.dir, &config.file_name)
    } else {
        None
    };
    let file_enabled = log_file_path.is_some();

    let mut console_builder = Builder::new();
    console_builder
        .filter(None, level_filter)
        .filter(Some("ethers_providers"), LevelFilter::Warn)
        .write_style(WriteStyle::Auto)
        .format(move |f: &mut Formatter, record: &Record| {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S.%3f");

            let level_color = match record.level() {
                Level::Error => "\x1b[91m",
                Level::Warn => "\x1b[93m",
                Level::Info => "\x1b[92m",
                Level::Debug => "\x1b[96m",
                Level::Trace => "\x1b[95m",
            };
            let reset = "\x1b[0m";
            let module = record.module_path().unwrap_or("unknown");

            let console_log = writeln!(
                f,
                "[{}] [{}{:>5}{}] [{}] - {}",
                now,
                level_color,
                record.level(),
                reset,
                module,
                record.args()
            );

            if file_enabled {
                let file_log = format!(
                    "[{}] [线程: {}] [模块: {}] [级别: {}] - {}\n",
                    now,
                    std::thread::current().name().unwrap_or("unknown"),
                    module,
                    record.level(),
                    record.args()
                );
                // 文件写入失败不影响控制台输出
                if let Ok(mut guard) = FILE_WRITER.lock() {
                    if let Some(file) = guard.as_mut() {
                        let _ = file.write_all(file_log.as_bytes());
                    }
                }
            }

            console_log
        })
        .target(Target::Stdout);

    match console_builder.try_init() {
        Ok(()) => log::info!(
            "✅ 日志系统初始化完成 | 级别: {} | 日志文件: {}",
            level_filter,
            log_file_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
        Err(e) => eprintln!("❌ 控制台日志初始化失败: {}", e),
    }
}

fn open_log_file(dir: &str, file_name: &str) -> Option<PathBuf> {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("❌ 创建日志目录失败: {}", e);
        return None;
    }
    if let Err(e) = rotate_logs(dir, file_name) {
        eprintln!("⚠️ 日志轮转失败: {}", e);
    }

    let path = Path::new(dir).join(file_name);
    match File::create(&path) {
        Ok(f) => {
            if let Ok(mut guard) = FILE_WRITER.lock() {
                *guard = Some(f);
            }
            Some(path)
        }
        Err(e) => {
            eprintln!("❌ 创建日志文件失败: {}", e);
            None
        }
    }
}

// ==================== 日志轮转 ====================
fn rotate_logs(log_dir: &str, log_file: &str) -> io::Result<()> {
    let log_path = Path::new(log_dir).join(log_file);

    if !log_path.exists() {
        return Ok(());
    }

    let file_size_mb = fs::metadata(&log_path)?.len() / (1024 * 1024);
    if file_size_mb < LOG_MAX_SIZE_MB {
        return Ok(());
    }

    for i in (1..LOG_MAX_ROTATIONS).rev() {
        let src = Path::new(log_dir).join(format!("{}.{}", log_file, i));
        let dest = Path::new(log_dir).join(format!("{}.{}", log_file, i + 1));
        if src.exists() {
            fs::rename(&src, &dest)?;
        }
    }

    fs::rename(&log_path, Path::new(log_dir).join(format!("{}.1", log_file)))?;
    Ok(())
}

// ==================== 便捷日志宏 ====================
#[macro_export]
macro_rules! log_trace { ($($arg:tt)*) => { log::trace!($($arg)*) }; }
#[macro_export]
macro_rules! log_debug { ($($arg:tt)*) => { log::debug!($($arg)*) }; }
#[macro_export]
macro_rules! log_info  { ($($arg:tt)*) => { log::info!($($arg)*) }; }
#[macro_export]
macro_rules! log_warn  { ($($arg:tt)*) => { log::warn!($($arg)*) }; }
#[macro_export]
macro_rules! log_error { ($($arg:tt)*) => { log::error!($($arg)*) }; }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn rotation_skips_small_files() {
        let dir = std::env::temp_dir().join(format!("tx-simulator-log-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let dir_str = dir.to_str().unwrap();
        fs::write(dir.join("small.log"), b"hello").unwrap();

        rotate_logs(dir_str, "small.log").unwrap();

        assert!(dir.join("small.log").exists());
        assert!(!dir.join("small.log.1").exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
