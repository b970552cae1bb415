//! Per-run debug log file

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// `<log_dir>/<folder>_<pid>_<timestamp>.log`, named after the working directory
pub fn get_log_file_path(log_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let current_dir = std::env::current_dir()?;
    let folder_name = current_dir
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("unknown"))
        .to_string_lossy();

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let pid = std::process::id();

    std::fs::create_dir_all(log_dir)?;

    Ok(log_dir.join(format!("{folder_name}_{pid}_{timestamp}.log")))
}

pub fn create_log_file(log_dir: &Path) -> Result<std::fs::File, Box<dyn std::error::Error>> {
    let log_path = get_log_file_path(log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    eprintln!("Log file created: {}", log_path.display());

    Ok(log_file)
}
