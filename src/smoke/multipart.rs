// S3 Smoke-Test Harness for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Sequential multipart upload of a file.
//!
//! An [`UploadSession`] is opened with [`UploadSession::initiate`], fed chunks
//! in ascending part order, and closed by exactly one of
//! [`UploadSession::complete`] or [`UploadSession::abort`]. Both consume the
//! session. Any failure after initiation aborts the upload on the server
//! before the error is returned.

use crate::s3::client::S3Client;
use crate::s3::error::{Error, ValidationErr};
use crate::s3::response::a_response_traits::{HasEtagFromBody, HasEtagFromHeaders};
use crate::s3::types::{PartInfo, S3Api};
use crate::smoke::chunked_reader::{Chunk, spawn_chunk_producer};
use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::Path;
use thiserror::Error;
use tokio::sync::mpsc;

/// The four multipart calls the upload pipeline needs from a storage backend.
#[async_trait]
pub trait MultipartBackend: Send + Sync {
    /// Starts a session and returns its upload id.
    async fn create_multipart_upload(&self, bucket: &str, key: &str) -> Result<String, Error>;

    /// Uploads one part and returns its ETag.
    async fn upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: u16,
        data: Bytes,
    ) -> Result<String, Error>;

    /// Assembles the uploaded parts and returns the object's ETag.
    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[PartInfo],
    ) -> Result<String, Error>;

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<(), Error>;
}

#[async_trait]
impl MultipartBackend for S3Client {
    async fn create_multipart_upload(&self, bucket: &str, key: &str) -> Result<String, Error> {
        let resp = S3Client::create_multipart_upload(self, bucket, key)
            .build()
            .send()
            .await?;
        Ok(resp.upload_id()?)
    }

    async fn upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: u16,
        data: Bytes,
    ) -> Result<String, Error> {
        let resp = S3Client::upload_part(self, bucket, key, upload_id, part_number, data)
            .build()
            .send()
            .await?;
        let etag = resp.etag()?;
        if etag.is_empty() {
            return Err(ValidationErr::MissingEtag(format!(
                "{bucket}/{key} part {part_number}"
            ))
            .into());
        }
        Ok(etag)
    }

    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[PartInfo],
    ) -> Result<String, Error> {
        let resp = S3Client::complete_multipart_upload(self, bucket, key, upload_id, parts.to_vec())
            .build()
            .send()
            .await?;
        Ok(resp.etag()?)
    }

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<(), Error> {
        S3Client::abort_multipart_upload(self, bucket, key, upload_id)
            .build()
            .send()
            .await?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum MultipartError {
    #[error("failed to open upload source: {0}")]
    Source(#[source] io::Error),

    #[error("failed to initiate multipart upload: {0}")]
    Initiate(#[source] Error),

    #[error("failed to upload part {part_number}: {source}")]
    UploadPart {
        part_number: u16,
        #[source]
        source: Error,
    },

    #[error("failed to read part {part_number}: {source}")]
    ReadChunk {
        part_number: u16,
        #[source]
        source: io::Error,
    },

    #[error("part {got} arrived where part {expected} was expected")]
    PartOrder { expected: u16, got: u16 },

    #[error("no parts were uploaded")]
    NoParts,

    #[error("failed to complete multipart upload: {0}")]
    Complete(#[source] Error),
}

impl MultipartError {
    /// True when a request was cancelled by the client timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            MultipartError::Initiate(e) | MultipartError::Complete(e) => e.is_timeout(),
            MultipartError::UploadPart { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Short name of the phase that failed, used in status lines.
    pub fn phase(&self) -> &'static str {
        match self {
            MultipartError::Source(_) => "OpenSource",
            MultipartError::Initiate(_) => "CreateMultipartUpload",
            MultipartError::UploadPart { .. }
            | MultipartError::ReadChunk { .. }
            | MultipartError::PartOrder { .. } => "UploadPart",
            MultipartError::NoParts | MultipartError::Complete(_) => "CompleteMultipartUpload",
        }
    }
}

/// Outcome of a completed multipart upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedUpload {
    pub bucket: String,
    pub key: String,
    pub upload_id: String,
    pub parts: Vec<PartInfo>,
    /// ETag returned by the server, quotes removed.
    pub etag: String,
}

/// An in-progress multipart upload.
#[derive(Debug)]
pub struct UploadSession<'a, B: MultipartBackend + ?Sized> {
    backend: &'a B,
    bucket: String,
    key: String,
    upload_id: String,
    parts: Vec<PartInfo>,
}

impl<'a, B: MultipartBackend + ?Sized> UploadSession<'a, B> {
    pub async fn initiate(
        backend: &'a B,
        bucket: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self, MultipartError> {
        let bucket = bucket.into();
        let key = key.into();
        let upload_id = backend
            .create_multipart_upload(&bucket, &key)
            .await
            .map_err(MultipartError::Initiate)?;
        log::info!("initiated multipart upload {upload_id} for {bucket}/{key}");

        Ok(Self {
            backend,
            bucket,
            key,
            upload_id,
            parts: Vec::new(),
        })
    }

    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    /// Parts uploaded so far, in part-number order.
    pub fn parts(&self) -> &[PartInfo] {
        &self.parts
    }

    async fn upload_chunk(&mut self, chunk: Chunk) -> Result<&PartInfo, MultipartError> {
        let expected = self.parts.len() as u16 + 1;
        if chunk.number != expected {
            return Err(MultipartError::PartOrder {
                expected,
                got: chunk.number,
            });
        }

        let size = chunk.data.len() as u64;
        let etag = self
            .backend
            .upload_part(&self.bucket, &self.key, &self.upload_id, chunk.number, chunk.data)
            .await
            .map_err(|source| MultipartError::UploadPart {
                part_number: chunk.number,
                source,
            })?;
        log::info!("uploaded part {} ({size} bytes) etag {etag}", chunk.number);

        self.parts.push(PartInfo::new(chunk.number, etag, size));
        Ok(&self.parts[self.parts.len() - 1])
    }

    /// Uploads every chunk received from `chunks`, in order, calling
    /// `on_part` after each one. On failure the session is aborted.
    pub async fn upload_parts<F>(
        mut self,
        chunks: &mut mpsc::Receiver<io::Result<Chunk>>,
        mut on_part: F,
    ) -> Result<Self, MultipartError>
    where
        F: FnMut(&PartInfo),
    {
        while let Some(item) = chunks.recv().await {
            let result = match item {
                Ok(chunk) => self.upload_chunk(chunk).await.map(|part| on_part(part)),
                Err(source) => Err(MultipartError::ReadChunk {
                    part_number: self.parts.len() as u16 + 1,
                    source,
                }),
            };
            if let Err(e) = result {
                self.abort_best_effort().await;
                return Err(e);
            }
        }
        Ok(self)
    }

    /// Submits the part list. A session without parts, or a failed
    /// completion, is aborted before the error is returned.
    pub async fn complete(self) -> Result<CompletedUpload, MultipartError> {
        if self.parts.is_empty() {
            self.abort_best_effort().await;
            return Err(MultipartError::NoParts);
        }

        let etag = match self
            .backend
            .complete_multipart_upload(&self.bucket, &self.key, &self.upload_id, &self.parts)
            .await
        {
            Ok(etag) => etag.trim_matches('"').to_string(),
            Err(e) => {
                self.abort_best_effort().await;
                return Err(MultipartError::Complete(e));
            }
        };
        log::info!(
            "completed multipart upload {} with {} parts",
            self.upload_id,
            self.parts.len()
        );

        Ok(CompletedUpload {
            bucket: self.bucket,
            key: self.key,
            upload_id: self.upload_id,
            parts: self.parts,
            etag,
        })
    }

    pub async fn abort(self) -> Result<(), Error> {
        self.backend
            .abort_multipart_upload(&self.bucket, &self.key, &self.upload_id)
            .await
    }

    async fn abort_best_effort(self) {
        let upload_id = self.upload_id.clone();
        match self.abort().await {
            Ok(()) => log::info!("aborted multipart upload {upload_id}"),
            Err(e) => log::warn!("failed to abort multipart upload {upload_id}: {e}"),
        }
    }
}

/// Uploads the file at `path` as `bucket/key` in `part_size` parts.
///
/// The file is opened before the session is initiated, so an unreadable
/// file never leaves an upload behind.
pub async fn upload_file_multipart<B, F>(
    backend: &B,
    bucket: &str,
    key: &str,
    path: impl AsRef<Path>,
    part_size: usize,
    on_part: F,
) -> Result<CompletedUpload, MultipartError>
where
    B: MultipartBackend + ?Sized,
    F: FnMut(&PartInfo),
{
    let (mut chunks, producer) =
        spawn_chunk_producer(path, part_size).map_err(MultipartError::Source)?;

    let session = UploadSession::initiate(backend, bucket, key).await?;
    let session = session.upload_parts(&mut chunks, on_part).await;
    drop(chunks);
    if let Err(e) = producer.await {
        log::warn!("chunk producer task failed: {e}");
    }

    session?.complete().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MultipartBackend for Recorder {
        async fn create_multipart_upload(&self, _: &str, _: &str) -> Result<String, Error> {
            self.calls.lock().unwrap().push("create".into());
            Ok("upload-1".into())
        }

        async fn upload_part(
            &self,
            _: &str,
            _: &str,
            _: &str,
            part_number: u16,
            _: Bytes,
        ) -> Result<String, Error> {
            self.calls.lock().unwrap().push(format!("part {part_number}"));
            Ok(format!("\"etag-{part_number}\""))
        }

        async fn complete_multipart_upload(
            &self,
            _: &str,
            _: &str,
            _: &str,
            parts: &[PartInfo],
        ) -> Result<String, Error> {
            self.calls.lock().unwrap().push(format!("complete {}", parts.len()));
            Ok("\"final-2\"".into())
        }

        async fn abort_multipart_upload(&self, _: &str, _: &str, _: &str) -> Result<(), Error> {
            self.calls.lock().unwrap().push("abort".into());
            Ok(())
        }
    }

    fn chunk(number: u16) -> io::Result<Chunk> {
        Ok(Chunk {
            number,
            data: Bytes::from_static(b"data"),
        })
    }

    #[tokio::test]
    async fn out_of_order_chunk_aborts() {
        let backend = Recorder::default();
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(chunk(1)).await.unwrap();
        tx.send(chunk(3)).await.unwrap();
        drop(tx);

        let session = UploadSession::initiate(&backend, "b", "k").await.unwrap();
        let err = session.upload_parts(&mut rx, |_| {}).await.unwrap_err();
        assert!(matches!(err, MultipartError::PartOrder { expected: 2, got: 3 }));
        assert_eq!(backend.calls(), vec!["create", "part 1", "abort"]);
    }

    #[tokio::test]
    async fn read_error_aborts() {
        let backend = Recorder::default();
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(chunk(1)).await.unwrap();
        tx.send(Err(io::Error::other("bad sector"))).await.unwrap();
        drop(tx);

        let session = UploadSession::initiate(&backend, "b", "k").await.unwrap();
        let err = session.upload_parts(&mut rx, |_| {}).await.unwrap_err();
        assert!(matches!(err, MultipartError::ReadChunk { part_number: 2, .. }));
        assert_eq!(err.phase(), "UploadPart");
        assert_eq!(backend.calls().last().map(String::as_str), Some("abort"));
    }

    #[tokio::test]
    async fn completion_strips_quotes_and_reports_parts() {
        let backend = Recorder::default();
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(chunk(1)).await.unwrap();
        tx.send(chunk(2)).await.unwrap();
        drop(tx);

        let mut seen = Vec::new();
        let session = UploadSession::initiate(&backend, "b", "k").await.unwrap();
        let done = session
            .upload_parts(&mut rx, |p| seen.push(p.number))
            .await
            .unwrap()
            .complete()
            .await
            .unwrap();

        assert_eq!(seen, vec![1, 2]);
        assert_eq!(done.etag, "final-2");
        assert_eq!(done.parts[0].etag, "\"etag-1\"");
        assert_eq!(done.upload_id, "upload-1");
        assert_eq!(backend.calls(), vec!["create", "part 1", "part 2", "complete 2"]);
    }

    #[tokio::test]
    async fn empty_session_is_aborted() {
        let backend = Recorder::default();
        let session = UploadSession::initiate(&backend, "b", "k").await.unwrap();
        let err = session.complete().await.unwrap_err();
        assert!(matches!(err, MultipartError::NoParts));
        assert_eq!(backend.calls(), vec!["create", "abort"]);
    }

    #[tokio::test]
    async fn unreadable_file_never_initiates() {
        let backend = Recorder::default();
        let err = upload_file_multipart(&backend, "b", "k", "/nonexistent/s3smoke", 5, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, MultipartError::Source(_)));
        assert!(backend.calls().is_empty());
    }
}
