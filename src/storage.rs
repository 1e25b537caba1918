// Object storage wrapper around the AWS S3 client. Credentials come from a
// named profile in the shared credentials file, matching how the bucket is
// provisioned for this app. Transfers are single-shot with no retry beyond
// what the SDK does internally.

use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::config::S3Settings;
use crate::error::{AppError, Result};

/// Generate a fresh object key for an upload into the given user folder.
/// The random token makes keys unique by construction; identical file
/// contents uploaded twice still get two distinct keys.
pub fn object_key(folder: &str) -> String {
    format!("{}/{}.jpg", folder, Uuid::new_v4())
}

/// S3 client plus the bucket every operation targets, constructed once at
/// startup and shared by the handlers.
#[derive(Clone)]
pub struct ObjectStore {
    client: Client,
    bucket: String,
}

impl ObjectStore {
    pub async fn connect(settings: &S3Settings) -> Self {
        let credentials = ProfileFileCredentialsProvider::builder()
            .profile_name(&settings.access_profile)
            .build();
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).credentials_provider(credentials);
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let config = loader.load().await;
        Self {
            client: Client::new(&config),
            bucket: settings.bucket_name.clone(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket
    }

    /// Number of objects currently in the bucket.
    pub async fn count_objects(&self) -> Result<usize> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .into_paginator()
            .send();
        let mut total = 0usize;
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| AppError::Storage(e.to_string()))?;
            total += page.contents().len();
        }
        Ok(total)
    }

    /// Stream a local file's bytes to the given key. Overwrites silently if
    /// the key already exists (not expected given unique key generation).
    pub async fn upload_file(&self, local_path: &Path, key: &str) -> Result<()> {
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Fetch an object into a temp file in the current directory. The caller
    /// renames it into place, so the temp file lands on the same filesystem
    /// as the final name.
    pub async fn download_file(&self, key: &str) -> Result<NamedTempFile> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?
            .into_bytes();

        let mut temp = tempfile::Builder::new()
            .prefix(".photocat-")
            .suffix(".part")
            .tempfile_in(".")?;
        temp.write_all(&bytes)?;
        temp.flush()?;
        Ok(temp)
    }

    /// Best-effort removal, used to compensate when the metadata insert
    /// fails after the object was already stored.
    pub async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_lives_under_the_folder() {
        let key = object_key("folder-token");
        assert!(key.starts_with("folder-token/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn key_token_is_a_uuid() {
        let key = object_key("f");
        let token = key
            .strip_prefix("f/")
            .and_then(|rest| rest.strip_suffix(".jpg"))
            .unwrap();
        assert!(Uuid::parse_str(token).is_ok());
    }

    #[test]
    fn sequential_keys_differ() {
        assert_ne!(object_key("f"), object_key("f"));
    }
}
