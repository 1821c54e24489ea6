use crate::archive::{rename_and_archive, ArchiveSummary};
use crate::config::{RunConfig, StartMode};
use crate::ids::{load_identifiers, IdError};
use crate::listing::{list_entries, ListError};
use crate::logging::RunLog;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub directory: PathBuf,
    pub archive: ArchiveSummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub jobs: Vec<JobSummary>,
    pub skipped_dirs: usize,
}

/// 設定に応じてジョブを順番に実行する。zipの保存先を集約する場合は
/// `result_root` が使われる。ジョブは直列で、1ジョブのzipを閉じてから
/// 次のジョブを開く。
pub fn run(config: &RunConfig, result_root: &Path, log: &mut RunLog) -> Result<RunSummary> {
    match config.start_mode {
        StartMode::Standard => run_standard(config, result_root, log),
        StartMode::Advanced => run_advanced(config, result_root, false, log),
        StartMode::AdvancedColocated => run_advanced(config, result_root, true, log),
    }
}

fn run_standard(config: &RunConfig, result_root: &Path, log: &mut RunLog) -> Result<RunSummary> {
    let files = list_entries(&config.path_to_folder, true).with_context(|| {
        format!(
            "画像フォルダを読めませんでした: {}",
            config.path_to_folder.display()
        )
    })?;
    let ids = load_identifiers(Path::new(&config.name_of_file_with_ids))?;

    let archive = match rename_and_archive(&files, &ids, Some(result_root), None, log) {
        Ok(archive) => archive,
        Err(err) => {
            log.error(format!("{err:#}"));
            return Err(err);
        }
    };

    Ok(RunSummary {
        jobs: vec![JobSummary {
            directory: config.path_to_folder.clone(),
            archive,
        }],
        skipped_dirs: 0,
    })
}

fn run_advanced(
    config: &RunConfig,
    result_root: &Path,
    colocated: bool,
    log: &mut RunLog,
) -> Result<RunSummary> {
    let entries = list_entries(&config.path_to_folder, false).with_context(|| {
        format!(
            "処理フォルダを読めませんでした: {}",
            config.path_to_folder.display()
        )
    })?;

    let mut summary = RunSummary::default();

    for dir in entries.into_iter().filter(|path| path.is_dir()) {
        let ids_path = dir.join(&config.name_of_file_with_ids);
        let ids = match load_identifiers(&ids_path) {
            Ok(ids) => ids,
            Err(IdError::Missing(path)) => {
                log.warn(format!(
                    "IDファイルが無いためスキップします: {}",
                    path.display()
                ));
                summary.skipped_dirs += 1;
                continue;
            }
            Err(err) => {
                log.error(format!("{err}"));
                return Err(err.into());
            }
        };

        let files = match list_entries(&dir, true) {
            Ok(files) => files,
            Err(err @ (ListError::DirectoryNotFound(_) | ListError::PermissionDenied(_))) => {
                log.warn(format!("フォルダを処理できないためスキップします: {err}"));
                summary.skipped_dirs += 1;
                continue;
            }
            Err(err) => {
                log.error(format!("{err}"));
                return Err(err.into());
            }
        };

        let dir_name = dir
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_else(|| "job".to_string());
        let destination = if colocated {
            dir.clone()
        } else {
            result_root.to_path_buf()
        };

        let archive = match rename_and_archive(&files, &ids, Some(&destination), Some(&dir_name), log)
        {
            Ok(archive) => archive,
            Err(err) => {
                log.error(format!("{err:#}"));
                return Err(err);
            }
        };

        summary.jobs.push(JobSummary {
            directory: dir,
            archive,
        });
    }

    Ok(summary)
}
