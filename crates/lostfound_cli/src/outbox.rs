use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use lostfound_contract::{decode_canonical, encode_canonical, LostItemRecord};
use lostfound_ports::{LostItemStore, StoreError};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Writes each report as `<id>.json` with its image next to it as `<id>.b64`.
#[derive(Debug, Clone)]
pub struct OutboxStore {
    dir: PathBuf,
}

impl OutboxStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn image_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.b64"))
    }

    pub async fn load(&self, id: &str) -> Result<LostItemRecord> {
        if !is_plain_id(id) {
            bail!("invalid lost item id {id:?}");
        }
        let path = self.record_path(id);
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        decode_canonical(&bytes).with_context(|| format!("invalid record at {}", path.display()))
    }
}

fn is_plain_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn write_failed(path: &Path, err: impl std::fmt::Display) -> StoreError {
    StoreError::WriteFailed(format!("{}: {err}", path.display()))
}

#[async_trait]
impl LostItemStore for OutboxStore {
    async fn create_lost_item(
        &self,
        record: &LostItemRecord,
        encoded_image: &str,
    ) -> Result<(), StoreError> {
        if !is_plain_id(&record.id) {
            return Err(StoreError::InvalidPayload(format!(
                "record id {:?} is not usable as a file name",
                record.id
            )));
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| write_failed(&self.dir, err))?;

        let document = encode_canonical(record)
            .map_err(|err| StoreError::InvalidPayload(err.to_string()))?;

        let record_path = self.record_path(&record.id);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&record_path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => StoreError::Duplicate(record.id.clone()),
                _ => write_failed(&record_path, err),
            })?;

        let written: Result<(), StoreError> = async {
            file.write_all(&document)
                .await
                .map_err(|err| write_failed(&record_path, err))?;
            file.flush()
                .await
                .map_err(|err| write_failed(&record_path, err))?;

            let image_path = self.image_path(&record.id);
            tokio::fs::write(&image_path, encoded_image.as_bytes())
                .await
                .map_err(|err| write_failed(&image_path, err))
        }
        .await;

        if let Err(error) = written {
            warn!(id = %record.id, error = %error, "outbox write failed; removing partial record");
            drop(file);
            let _ = tokio::fs::remove_file(&record_path).await;
            return Err(error);
        }

        info!(
            id = %record.id,
            path = %record_path.display(),
            "lost item written to outbox"
        );
        Ok(())
    }
}
