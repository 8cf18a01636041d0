//! File-backed token store: the client's persisted storage.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::domain::{AuthToken, TokenStore, TokenStoreError};

/// Keeps the bearer token in a single file.
///
/// A missing, unreadable or blank file means "signed out".
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<AuthToken> {
        match fs::read_to_string(&self.path) {
            Ok(content) => AuthToken::new(content).ok(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read token file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token.as_str())?;
        tracing::debug!("Stored token in {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        // テスト項目: トークンを保存・読み込み・削除できる
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));
        let token = AuthToken::new("abc.def".to_string()).unwrap();

        // when (操作):
        store.save(&token).unwrap();

        // then (期待する結果):
        assert_eq!(store.load(), Some(token));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_missing_or_blank_file_means_signed_out() {
        // テスト項目: ファイルが無い・空の場合は未ログイン扱い
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let store = FileTokenStore::new(&path);

        assert_eq!(store.load(), None);
        assert!(store.clear().is_ok());

        fs::write(&path, "\n").unwrap();
        assert_eq!(store.load(), None);
    }
}
