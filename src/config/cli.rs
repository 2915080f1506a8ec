use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// 本機檔案系統存儲，所有路徑相對於 `base_path`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 先寫入暫存檔再改名，中斷時不會留下寫到一半的檔案
        let mut tmp_name = full_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &full_path)?;
        Ok(())
    }

    async fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let root = self.resolve(dir);
        let mut files = Vec::new();
        let mut pending = vec![root.clone()];

        while let Some(current) = pending.pop() {
            for entry in fs::read_dir(&current)? {
                let entry = entry?;
                let path = entry.path();
                // file_type 不追蹤符號連結，避免連結迴圈
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_symlink() && path.is_dir() {
                    tracing::warn!("⚠️ Not following directory symlink: {}", path.display());
                } else if let Ok(relative) = path.strip_prefix(&root) {
                    files.push(relative.to_string_lossy().replace('\\', "/"));
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("nested/report.txt", b"hello").await.unwrap();
        let data = storage.read_file("nested/report.txt").await.unwrap();

        assert_eq!(data, b"hello");
        assert!(!temp_dir.path().join("nested/report.txt.tmp").exists());
    }

    #[tokio::test]
    async fn test_list_files_is_recursive_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("cvs/b.txt", b"b").await.unwrap();
        storage.write_file("cvs/a.txt", b"a").await.unwrap();
        storage.write_file("cvs/more/c.md", b"c").await.unwrap();

        let files = storage.list_files("cvs").await.unwrap();
        assert_eq!(files, vec!["a.txt", "b.txt", "more/c.md"]);
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        assert!(storage.read_file("missing.csv").await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_files_does_not_follow_symlink_cycles() {
        let temp_dir = TempDir::new().unwrap();
        let cvs = temp_dir.path().join("cvs");
        fs::create_dir_all(cvs.join("inner")).unwrap();
        fs::write(cvs.join("inner/a.txt"), b"a").unwrap();
        std::os::unix::fs::symlink(&cvs, cvs.join("inner/loop")).unwrap();

        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        let files = storage.list_files("cvs").await.unwrap();

        assert_eq!(files, vec!["inner/a.txt".to_string()]);
    }
}
