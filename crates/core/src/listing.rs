use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("フォルダが存在しません: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("フォルダを読む権限がありません: {0}")]
    PermissionDenied(PathBuf),
    #[error("フォルダ走査に失敗しました: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn list_entries(directory: &Path, files_only: bool) -> Result<Vec<PathBuf>, ListError> {
    if !directory.is_dir() {
        return Err(ListError::DirectoryNotFound(directory.to_path_buf()));
    }

    let read = fs::read_dir(directory).map_err(|err| classify(directory, err))?;

    let mut out = Vec::new();
    for entry in read {
        let entry = entry.map_err(|err| classify(directory, err))?;
        let path = entry.path();
        if files_only && !path.is_file() {
            continue;
        }
        out.push(path);
    }
    out.sort();

    Ok(out)
}

fn classify(directory: &Path, err: io::Error) -> ListError {
    match err.kind() {
        io::ErrorKind::NotFound => ListError::DirectoryNotFound(directory.to_path_buf()),
        io::ErrorKind::PermissionDenied => ListError::PermissionDenied(directory.to_path_buf()),
        _ => ListError::Io {
            path: directory.to_path_buf(),
            source: err,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{list_entries, ListError};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lists_every_direct_child_when_not_restricted() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("b.png"), b"b").expect("write b");
        fs::write(temp.path().join("a.png"), b"a").expect("write a");
        fs::create_dir(temp.path().join("sub")).expect("create sub");

        let entries = list_entries(temp.path(), false).expect("list");
        assert_eq!(
            entries,
            vec![
                temp.path().join("a.png"),
                temp.path().join("b.png"),
                temp.path().join("sub"),
            ]
        );
    }

    #[test]
    fn files_only_excludes_directories() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.png"), b"a").expect("write a");
        fs::create_dir(temp.path().join("sub")).expect("create sub");

        let entries = list_entries(temp.path(), true).expect("list");
        assert_eq!(entries, vec![temp.path().join("a.png")]);
    }

    #[test]
    fn missing_directory_is_a_typed_error() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("nope");

        let err = list_entries(&missing, true).expect_err("should fail");
        assert!(matches!(err, ListError::DirectoryNotFound(path) if path == missing));
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let temp = tempdir().expect("tempdir");
        let file = temp.path().join("a.png");
        fs::write(&file, b"a").expect("write a");

        let err = list_entries(&file, false).expect_err("should fail");
        assert!(matches!(err, ListError::DirectoryNotFound(_)));
    }
}
