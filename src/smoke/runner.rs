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

//! The ordered sequence of smoke-test checks.
//!
//! Checks run one after another against a single bucket. A failed fatal
//! check stops the run; delete operations and the ETag self-checks only
//! count as failures. The generated payload file is removed in every case.

use crate::s3::S3Client;
use crate::s3::error::{Error, ValidationErr};
use crate::s3::response::a_response_traits::{HasEtagFromHeaders, HasObjectMeta};
use crate::s3::response::DeleteResult;
use crate::s3::s3_error_response::S3ErrorCode;
use crate::s3::types::{ObjectToDelete, S3Api};
use crate::s3::utils::{md5_hex, to_iso8601utc, UtcTime};
use crate::smoke::config::SmokeConfig;
use crate::smoke::error::SmokeError;
use crate::smoke::etag::{composite_etag, etag_matches, file_md5_hex};
use crate::smoke::multipart::upload_file_multipart;
use crate::smoke::payload::{generate_payload_file, remove_payload_file};
use crate::smoke::report::{Reporter, Tally};
use bytes::Bytes;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// One smoke-test run.
pub struct SmokeTest<O: Write, E: Write> {
    client: S3Client,
    config: SmokeConfig,
    reporter: Reporter<O, E>,
}

impl SmokeTest<io::Stdout, io::Stderr> {
    pub fn new(client: S3Client, config: SmokeConfig) -> Self {
        Self::with_reporter(client, config, Reporter::stdio())
    }
}

fn opt(v: Option<impl Display>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn time(v: Option<UtcTime>) -> String {
    v.map(to_iso8601utc).unwrap_or_default()
}

impl<O: Write, E: Write> SmokeTest<O, E> {
    pub fn with_reporter(client: S3Client, config: SmokeConfig, reporter: Reporter<O, E>) -> Self {
        Self {
            client,
            config,
            reporter,
        }
    }

    /// Generates the payload, runs every check and removes the payload.
    ///
    /// Returns the tally when no fatal check failed.
    pub async fn run(mut self) -> Result<Tally, SmokeError> {
        self.reporter.info("s3smoke starting...");

        let path = self.config.payload_file.clone();
        let mb = self.config.payload_mb;
        let generated = blocking(move || generate_payload_file(&path, mb)).await;
        let result = match generated {
            Ok(()) => self.run_checks().await,
            Err(e) => Err(SmokeError::payload(&self.config.payload_file, e)),
        };

        if let Err(e) = remove_payload_file(&self.config.payload_file) {
            log::warn!(
                "failed to remove payload file {}: {e}",
                self.config.payload_file.display()
            );
        }

        self.reporter.info("s3smoke ending...");
        self.reporter.summary();
        result.map(|()| self.reporter.tally())
    }

    async fn run_checks(&mut self) -> Result<(), SmokeError> {
        let path = self.config.payload_file.clone();
        let file_md5 = {
            let path = path.clone();
            blocking(move || file_md5_hex(path))
                .await
                .map_err(|e| SmokeError::payload(&self.config.payload_file, e))?
        };
        log::info!("payload {} md5 {file_md5}", path.display());

        self.create_bucket().await?;
        self.list_buckets().await?;
        self.put_object(&path, &file_md5).await?;
        self.list_objects().await?;
        self.head_object().await?;
        self.get_object(&file_md5).await?;
        self.delete_object().await;
        self.multipart_upload(path).await?;
        self.delete_objects().await;
        self.delete_bucket().await;
        Ok(())
    }

    /// Reports a failed fatal request and turns it into the run's error.
    fn fatal(&mut self, operation: &'static str, err: Error) -> SmokeError {
        self.reporter
            .request_failed(operation, &err, err.is_timeout());
        SmokeError::request(operation, err)
    }

    fn parsed<T>(
        &mut self,
        operation: &'static str,
        r: Result<T, ValidationErr>,
    ) -> Result<T, SmokeError> {
        r.map_err(|e| self.fatal(operation, e.into()))
    }

    async fn create_bucket(&mut self) -> Result<(), SmokeError> {
        const OP: &str = "CreateBucket";
        self.reporter.section(OP);
        let resp = self
            .client
            .create_bucket(&self.config.bucket)
            .acl(String::from("private"))
            .build()
            .send()
            .await;
        match resp {
            Ok(resp) => {
                let location = opt(resp.location());
                self.reporter.ok(OP, format_args!("Location={location}"));
                Ok(())
            }
            Err(e) if e.s3_error_code() == Some(S3ErrorCode::BucketAlreadyOwnedByYou) => {
                self.reporter.ok(
                    OP,
                    format_args!("bucket {} already owned by you", self.config.bucket),
                );
                Ok(())
            }
            Err(e) => Err(self.fatal(OP, e)),
        }
    }

    async fn list_buckets(&mut self) -> Result<(), SmokeError> {
        const OP: &str = "ListBuckets";
        self.reporter.section(OP);
        let resp = self
            .client
            .list_buckets()
            .build()
            .send()
            .await
            .map_err(|e| self.fatal(OP, e))?;
        let buckets = self.parsed(OP, resp.buckets())?;
        let owner = self.parsed(OP, resp.owner())?;
        let owner = owner.map(|o| o.display_name).unwrap_or_default();

        self.reporter
            .ok(OP, format_args!("{} buckets", buckets.len()));
        for (idx, bucket) in buckets.iter().enumerate() {
            self.reporter.info(format_args!(
                "{idx}: Name={}; CreationDate={}; Owner={owner}",
                bucket.name,
                to_iso8601utc(bucket.creation_date)
            ));
        }
        Ok(())
    }

    async fn put_object(&mut self, path: &Path, file_md5: &str) -> Result<(), SmokeError> {
        const OP: &str = "PutObject";
        self.reporter.section(OP);
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| SmokeError::payload(path, e))?;
        let resp = self
            .client
            .put_object(&self.config.bucket, &self.config.object_key, Bytes::from(data))
            .build()
            .send()
            .await
            .map_err(|e| self.fatal(OP, e))?;
        let etag = self.parsed(OP, resp.etag())?;

        if etag_matches(&etag, file_md5) {
            self.reporter.ok(
                OP,
                format_args!("ETag={etag}; VersionId={}", opt(resp.version_id())),
            );
        } else {
            self.reporter
                .failed(OP, format_args!("ETag({etag}) != fileMd5({file_md5})"));
        }
        Ok(())
    }

    async fn list_objects(&mut self) -> Result<(), SmokeError> {
        const OP: &str = "ListObjectsV2";
        self.reporter.section(OP);
        let resp = self
            .client
            .list_objects(&self.config.bucket)
            .prefix(self.config.prefix.clone())
            .delimiter(String::from("/"))
            .fetch_owner(true)
            .build()
            .send()
            .await
            .map_err(|e| self.fatal(OP, e))?;

        match resp.contents.first() {
            Some(entry) => self.reporter.ok(
                OP,
                format_args!(
                    "Key={}; LastModified={}; Owner={}",
                    entry.name,
                    time(entry.last_modified),
                    opt(entry.owner.as_ref().map(|o| &o.display_name)),
                ),
            ),
            None => self.reporter.ok(
                OP,
                format_args!("no objects under prefix {:?}", self.config.prefix),
            ),
        }
        for prefix in &resp.common_prefixes {
            self.reporter
                .info(format_args!("CommonPrefix={}", prefix.name));
        }
        Ok(())
    }

    async fn head_object(&mut self) -> Result<(), SmokeError> {
        const OP: &str = "HeadObject";
        self.reporter.section(OP);
        let resp = self
            .client
            .stat_object(&self.config.bucket, &self.config.object_key)
            .build()
            .send()
            .await
            .map_err(|e| self.fatal(OP, e))?;
        let etag = self.parsed(OP, resp.etag())?;
        let last_modified = self.parsed(OP, resp.last_modified())?;
        let size = self.parsed(OP, resp.size())?;
        self.reporter.ok(
            OP,
            format_args!(
                "ETag={etag}; LastModified={}; Size={size}; ContentType={}",
                time(last_modified),
                opt(resp.content_type())
            ),
        );
        Ok(())
    }

    async fn get_object(&mut self, file_md5: &str) -> Result<(), SmokeError> {
        const OP: &str = "GetObject";
        self.reporter.section(OP);
        let resp = self
            .client
            .get_object(&self.config.bucket, &self.config.object_key)
            .build()
            .send()
            .await
            .map_err(|e| self.fatal(OP, e))?;
        let etag = self.parsed(OP, resp.etag())?;
        let last_modified = self.parsed(OP, resp.last_modified())?;

        let content = resp.content().clone();
        let body_md5 = blocking(move || Ok(md5_hex(&content))).await;
        match body_md5 {
            Ok(body_md5) if body_md5 == file_md5 => self.reporter.ok(
                OP,
                format_args!("ETag={etag}; LastModified={}", time(last_modified)),
            ),
            Ok(body_md5) => self
                .reporter
                .failed(OP, format_args!("bodyMd5({body_md5}) != fileMd5({file_md5})")),
            Err(e) => self.reporter.failed(OP, e),
        }
        Ok(())
    }

    async fn delete_object(&mut self) {
        const OP: &str = "DeleteObject";
        self.reporter.section(OP);
        let resp = self
            .client
            .delete_object(&self.config.bucket, self.config.object_key.as_str())
            .build()
            .send()
            .await;
        match resp {
            Ok(resp) => self.reporter.ok(
                OP,
                format_args!(
                    "Key={}; DeleteMarker={}",
                    self.config.object_key,
                    resp.is_delete_marker()
                ),
            ),
            Err(e) => self.reporter.request_failed(OP, &e, e.is_timeout()),
        }
    }

    async fn multipart_upload(&mut self, path: PathBuf) -> Result<(), SmokeError> {
        self.reporter.section("MultipartUpload");
        let part_size = usize::try_from(self.config.part_size)
            .map_err(|e| SmokeError::Config(format!("part size: {e}")))?;
        let key = self.config.multipart_key();

        let reporter = &mut self.reporter;
        let uploaded = upload_file_multipart(
            &self.client,
            &self.config.bucket,
            &key,
            &path,
            part_size,
            |part| {
                reporter.ok(
                    "UploadPart",
                    format_args!(
                        "PartNumber={}; ETag={}; Size={}",
                        part.number, part.etag, part.size
                    ),
                )
            },
        )
        .await;

        let completed = match uploaded {
            Ok(completed) => completed,
            Err(e) => {
                self.reporter
                    .request_failed(e.phase(), &e, e.is_timeout());
                return Err(e.into());
            }
        };
        self.reporter.ok(
            "CompleteMultipartUpload",
            format_args!(
                "Key={}; UploadId={}; Parts={}; ETag={}",
                completed.key,
                completed.upload_id,
                completed.parts.len(),
                completed.etag
            ),
        );

        match blocking(move || composite_etag(path, part_size)).await {
            Ok(file_etag) if etag_matches(&completed.etag, &file_etag) => self
                .reporter
                .ok("CompleteMultipartUpload", format_args!("ETag matches fileEtag({file_etag})")),
            Ok(file_etag) => self.reporter.warning(
                "CompleteMultipartUpload",
                format_args!("ETag({}) != fileEtag({file_etag})", completed.etag),
            ),
            Err(e) => self.reporter.warning(
                "CompleteMultipartUpload",
                format_args!("failed to compute fileEtag: {e}"),
            ),
        }
        Ok(())
    }

    async fn delete_objects(&mut self) {
        const OP: &str = "DeleteObjects";
        self.reporter.section(OP);
        let objects: Vec<ObjectToDelete> = vec![
            self.config.object_key.as_str().into(),
            self.config.multipart_key().into(),
        ];
        let resp = self
            .client
            .delete_objects(&self.config.bucket, objects)
            .quiet(false)
            .build()
            .send()
            .await;
        let results = match resp.and_then(|r| r.result()) {
            Ok(results) => results,
            Err(e) => {
                self.reporter.request_failed(OP, &e, e.is_timeout());
                return;
            }
        };
        for result in results {
            match result {
                DeleteResult::Deleted(obj) => self.reporter.ok(
                    OP,
                    format_args!("Key={}; DeleteMarker={}", obj.name, obj.delete_marker),
                ),
                DeleteResult::Error(err) => self.reporter.failed(
                    OP,
                    format_args!(
                        "Key={}; Code={}; Message={}",
                        err.object_name, err.code, err.message
                    ),
                ),
            }
        }
    }

    async fn delete_bucket(&mut self) {
        const OP: &str = "DeleteBucket";
        self.reporter.section(OP);
        match self
            .client
            .delete_bucket(&self.config.bucket)
            .build()
            .send()
            .await
        {
            Ok(_) => self
                .reporter
                .ok(OP, format_args!("Bucket={}", self.config.bucket)),
            Err(e) => self.reporter.request_failed(OP, &e, e.is_timeout()),
        }
    }
}

/// Runs a file-system or hashing pass off the async executor.
async fn blocking<T, F>(f: F) -> io::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(io::Error::other)?
}
