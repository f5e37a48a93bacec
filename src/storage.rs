use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;

/// File-persistence collaborator behind registration uploads and
/// `GET /uploads/:filename`. Object-safe so handlers can be tested
/// against an in-memory double.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, name: &str, body: Bytes) -> anyhow::Result<()>;
    async fn load(&self, name: &str) -> anyhow::Result<Option<Bytes>>;
}

/// Stores uploads as plain files under a root directory, keyed by the
/// original filename. Identical names overwrite.
#[derive(Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub async fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("create upload dir {}", root.display()))?;
        Ok(Self { root })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl FileStore for DiskStore {
    async fn save(&self, name: &str, body: Bytes) -> anyhow::Result<()> {
        let path = self.path_for(name);
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    async fn load(&self, name: &str) -> anyhow::Result<Option<Bytes>> {
        let path = self.path_for(name);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }
}

/// Reduces an uploaded filename to its final path component so a crafted
/// part name cannot escape the upload directory. Returns `None` when
/// nothing usable remains.
pub fn sanitize_filename(name: &str) -> Option<String> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("userhub-{}-{}", tag, std::process::id()))
    }

    #[tokio::test]
    async fn save_then_load_returns_same_bytes() {
        let store = DiskStore::new(temp_root("roundtrip")).await.unwrap();
        store
            .save("avatar.png", Bytes::from_static(b"\x89PNG-ish"))
            .await
            .unwrap();
        let loaded = store.load("avatar.png").await.unwrap();
        assert_eq!(loaded, Some(Bytes::from_static(b"\x89PNG-ish")));
    }

    #[tokio::test]
    async fn saving_same_name_overwrites() {
        let store = DiskStore::new(temp_root("overwrite")).await.unwrap();
        store.save("pic.jpg", Bytes::from_static(b"first")).await.unwrap();
        store.save("pic.jpg", Bytes::from_static(b"second")).await.unwrap();
        let loaded = store.load("pic.jpg").await.unwrap();
        assert_eq!(loaded, Some(Bytes::from_static(b"second")));
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let store = DiskStore::new(temp_root("missing")).await.unwrap();
        assert_eq!(store.load("nope.gif").await.unwrap(), None);
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("avatar.png").as_deref(), Some("avatar.png"));
        assert_eq!(
            sanitize_filename("../../etc/passwd").as_deref(),
            Some("passwd")
        );
        assert_eq!(sanitize_filename("a/b/c.png").as_deref(), Some("c.png"));
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename(""), None);
    }
}
