use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdError {
    #[error("IDファイルが見つかりません: {0}")]
    Missing(PathBuf),
    #[error("IDファイルを読めませんでした: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// CSVの1列目だけをIDとして使う。先頭行はヘッダとして読み飛ばし、
/// 他の列は無視する。重複はそのまま残す。
pub fn load_identifiers(path: &Path) -> Result<Vec<String>, IdError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(IdError::Missing(path.to_path_buf()))
        }
        Err(err) => {
            return Err(IdError::Read {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };

    let mut ids = Vec::new();
    for line in raw.lines().skip(1) {
        let field = line.split(',').next().unwrap_or("");
        let field = field.trim().trim_matches('"').trim();
        if field.is_empty() {
            continue;
        }
        ids.push(field.to_string());
    }

    Ok(ids)
}
