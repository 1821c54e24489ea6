use crate::logging::RunLog;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::ZipWriter;

const IMAGE_SUFFIX: &str = ".png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryOutcome {
    Written,
    SkippedNonImage,
    PermissionDenied,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    pub source: PathBuf,
    pub entry_name: Option<String>,
    pub outcome: EntryOutcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveStats {
    pub written: usize,
    pub skipped_non_image: usize,
    pub permission_denied: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSummary {
    pub archive_path: PathBuf,
    pub records: Vec<EntryRecord>,
    pub stats: ArchiveStats,
}

/// 全IDと全ファイルの組ごとに `<id>.<part_code>.png` という名前で
/// zipへコピーを書き込む。エントリ順はID優先のネスト順で固定。
/// 同名エントリの重複は許容する(追記運用では両世代が残り、名前での
/// 展開は最後のエントリが有効になる)。
pub fn rename_and_archive(
    file_refs: &[PathBuf],
    identifiers: &[String],
    destination_dir: Option<&Path>,
    archive_base_name: Option<&str>,
    log: &mut RunLog,
) -> Result<ArchiveSummary> {
    let destination = destination_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("result"));
    fs::create_dir_all(&destination).with_context(|| {
        format!(
            "保存先フォルダを作成できませんでした: {}",
            destination.display()
        )
    })?;

    let base_name = match archive_base_name {
        Some(name) => name.to_string(),
        None => destination
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_else(|| "result".to_string()),
    };
    let archive_path = destination.join(format!("{base_name}.zip"));

    let mut writer = open_for_append(&archive_path)?;
    let mut records = Vec::with_capacity(identifiers.len() * file_refs.len());
    let mut stats = ArchiveStats::default();

    for identifier in identifiers {
        for path in file_refs {
            let file_name = path
                .file_name()
                .map(|v| v.to_string_lossy().to_string())
                .unwrap_or_default();

            let Some(part_code) = file_name.strip_suffix(IMAGE_SUFFIX) else {
                log.info(format!("{file_name} はpng画像ではありません。"));
                stats.skipped_non_image += 1;
                records.push(EntryRecord {
                    source: path.clone(),
                    entry_name: None,
                    outcome: EntryOutcome::SkippedNonImage,
                });
                continue;
            };

            let entry_name = format!("{identifier}.{part_code}{IMAGE_SUFFIX}");
            match fs::read(path) {
                Ok(bytes) => {
                    writer
                        .start_file(entry_name.as_str(), FileOptions::default())
                        .with_context(|| {
                            format!("zipエントリを作成できませんでした: {entry_name}")
                        })?;
                    writer.write_all(&bytes).with_context(|| {
                        format!("zipへの書き込みに失敗しました: {entry_name}")
                    })?;
                    log.info(format!(
                        "'{entry_name}' を {} に追加しました。",
                        archive_path.display()
                    ));
                    stats.written += 1;
                    records.push(EntryRecord {
                        source: path.clone(),
                        entry_name: Some(entry_name),
                        outcome: EntryOutcome::Written,
                    });
                }
                Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                    log.warn(format!(
                        "権限がないためスキップします: {}",
                        path.display()
                    ));
                    stats.permission_denied += 1;
                    records.push(EntryRecord {
                        source: path.clone(),
                        entry_name: Some(entry_name),
                        outcome: EntryOutcome::PermissionDenied,
                    });
                }
                Err(err) => {
                    return Err(anyhow::Error::from(err).context(format!(
                        "ファイルを読めませんでした: {}",
                        path.display()
                    )));
                }
            }
        }
    }

    writer.finish().with_context(|| {
        format!("zipを閉じられませんでした: {}", archive_path.display())
    })?;

    Ok(ArchiveSummary {
        archive_path,
        records,
        stats,
    })
}

fn open_for_append(archive_path: &Path) -> Result<ZipWriter<File>> {
    if archive_path.exists() {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(archive_path)
            .with_context(|| {
                format!("zipファイルを開けませんでした: {}", archive_path.display())
            })?;
        ZipWriter::new_append(file).with_context(|| {
            format!(
                "zipファイルに追記できませんでした: {}",
                archive_path.display()
            )
        })
    } else {
        let file = File::create(archive_path).with_context(|| {
            format!("zipファイルを作成できませんでした: {}", archive_path.display())
        })?;
        Ok(ZipWriter::new(file))
    }
}
