use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartMode {
    /// 1: 単一フォルダを処理し、zipはresultフォルダに置く。
    Standard,
    /// 2: フォルダ内の各サブフォルダを個別ジョブとして処理し、
    /// zipはresultフォルダに集約する。
    Advanced,
    /// 2.1: 2と同じだが、zipを各サブフォルダ内に置く。
    AdvancedColocated,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub start_mode: StartMode,
    pub name_of_file_with_ids: String,
    pub path_to_folder: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("設定ファイルが見つかりません: {0}")]
    NotFound(PathBuf),
    #[error("設定ファイルを読めませんでした: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("設定ファイルのJSONが不正です")]
    InvalidJson(#[source] serde_json::Error),
    #[error("必須キーがありません: {0}")]
    MissingKey(&'static str),
    #[error("start_modeの値が不正です: {0} (1 / 2 / 2.1 のみ)")]
    InvalidMode(f64),
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    start_mode: Option<f64>,
    name_of_file_with_ids: Option<String>,
    path_to_folder: Option<String>,
}

pub fn load_run_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()))
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };
    let raw: RawConfig = serde_json::from_str(&raw).map_err(ConfigError::InvalidJson)?;

    let mode_code = raw
        .start_mode
        .ok_or(ConfigError::MissingKey("start_mode"))?;
    let start_mode = StartMode::from_code(mode_code)?;
    let name_of_file_with_ids = raw
        .name_of_file_with_ids
        .ok_or(ConfigError::MissingKey("name_of_file_with_ids"))?;
    let path_to_folder = raw
        .path_to_folder
        .ok_or(ConfigError::MissingKey("path_to_folder"))?;

    Ok(RunConfig {
        start_mode,
        name_of_file_with_ids,
        path_to_folder: PathBuf::from(path_to_folder),
    })
}

impl StartMode {
    fn from_code(code: f64) -> Result<Self, ConfigError> {
        if code == 1.0 {
            Ok(Self::Standard)
        } else if code == 2.0 {
            Ok(Self::Advanced)
        } else if code == 2.1 {
            Ok(Self::AdvancedColocated)
        } else {
            Err(ConfigError::InvalidMode(code))
        }
    }
}
