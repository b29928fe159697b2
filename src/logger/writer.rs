use std::fs::{File, OpenOptions};
use std::sync::Arc;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// Open the configured log file, creating its parent directory first.
///
/// The returned handle is shared across threads; `&File` implements `Write`,
/// so `Arc<File>` is a `MakeWriter` as-is.
pub(crate) fn open_log_file(config: &FileConfig) -> Result<Arc<File>, LoggerError> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LoggerError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if config.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    let file = options
        .open(&config.path)
        .map_err(|source| LoggerError::OpenFile {
            path: config.path.clone(),
            source,
        })?;

    Ok(Arc::new(file))
}
