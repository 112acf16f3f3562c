//! Unified logging for overtext.
//!
//! Installs a `log::Log` bridge that routes every `log::info!()` etc. from
//! all workspace crates to `<tmp>/overtext_debug.log`. When `RUST_LOG` is
//! set, records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` CLI flag, then `RUST_LOG`, then the
//! config file's `log_level` (applied later via [`apply_config_level`]).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

const LOG_FILE_NAME: &str = "overtext_debug.log";

struct LogState {
    file: Option<File>,
    file_attempted: bool,
    mirror_stderr: bool,
    /// True when the CLI or `RUST_LOG` chose the level
    level_fixed: bool,
}

impl LogState {
    fn open_file(&mut self, level: LevelFilter) {
        if self.file_attempted || level == LevelFilter::Off {
            return;
        }
        self.file_attempted = true;

        let path = log_path();
        // Failing to open the log file must not stop rendering
        if let Ok(mut file) = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)
        {
            let _ = writeln!(
                file,
                "{}\novertext debug session started at {} (level={})\n{}",
                "=".repeat(80),
                timestamp(),
                level,
                "=".repeat(80)
            );
            self.file = Some(file);
        }
    }
}

static STATE: OnceLock<Mutex<LogState>> = OnceLock::new();

struct LogBridge;

static BRIDGE: LogBridge = LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(state) = STATE.get() else {
            return;
        };

        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );

        let mut state = state.lock();
        if let Some(file) = state.file.as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if state.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(state) = STATE.get()
            && let Some(file) = state.lock().file.as_mut()
        {
            let _ = file.flush();
        }
    }
}

/// Location of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Most verbose level named in a `RUST_LOG`-style directive list.
///
/// Accepts plain levels (`debug`) and `target=level` directives; anything
/// unparseable is ignored.
pub fn parse_env_level(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next().unwrap_or(directive);
            LevelFilter::from_str(level.trim()).ok()
        })
        .max()
}

/// Pick the effective level: CLI flag, then environment, then config.
pub fn resolve_level(
    cli: Option<LevelFilter>,
    env: Option<LevelFilter>,
    config: LevelFilter,
) -> LevelFilter {
    cli.or(env).unwrap_or(config)
}

/// Install the bridge. Call once, early in `main`.
///
/// Until [`apply_config_level`] runs, the level is the CLI flag or
/// `RUST_LOG`, or `Off` when neither is set.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let env_value = std::env::var("RUST_LOG").ok();
    let env_level = env_value.as_deref().and_then(parse_env_level);
    let level = resolve_level(cli_level, env_level, LevelFilter::Off);

    let state = STATE.get_or_init(|| {
        Mutex::new(LogState {
            file: None,
            file_attempted: false,
            mirror_stderr: env_value.is_some(),
            level_fixed: cli_level.is_some() || env_level.is_some(),
        })
    });
    state.lock().open_file(level);

    if log::set_logger(&BRIDGE).is_err() {
        // Another logger won the race (e.g. a test harness); keep it
        return;
    }
    log::set_max_level(level);
}

/// Apply the config file's level unless the CLI or `RUST_LOG` already chose one.
pub fn apply_config_level(level: LevelFilter) {
    let Some(state) = STATE.get() else {
        return;
    };
    let mut state = state.lock();
    if state.level_fixed {
        return;
    }
    state.open_file(level);
    log::set_max_level(level);
}
