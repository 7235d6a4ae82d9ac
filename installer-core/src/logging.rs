use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILE: &str = "/var/log/installer/wizard.log";

/// Initialise `env_logger`. `RUST_LOG` overrides the default `info` level.
pub fn init_with(log_file: Option<PathBuf>) {
    use env_logger::Target;

    let path = log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    // The wizard owns the terminal, so stderr is only a last resort.
    let target = open_log_file(&path)
        .map(|file| Target::Pipe(Box::new(file)))
        .unwrap_or(Target::Stderr);

    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(target)
        .try_init();
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}
