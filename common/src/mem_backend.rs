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

//! In-memory multipart backend with failure injection.

use async_trait::async_trait;
use bytes::Bytes;
use s3smoke::s3::error::{Error, NetworkError};
use s3smoke::s3::types::PartInfo;
use s3smoke::smoke::multipart::MultipartBackend;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// One backend call, in the order it was received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Create { key: String },
    UploadPart { upload_id: String, part_number: u16, size: usize },
    Complete { upload_id: String, parts: Vec<u16> },
    Abort { upload_id: String },
}

#[derive(Debug, Default)]
struct Session {
    key: String,
    parts: BTreeMap<u16, Bytes>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u32,
    sessions: HashMap<String, Session>,
    objects: HashMap<String, (Bytes, String)>,
    calls: Vec<Call>,
}

/// Stores parts in memory and assembles them like an S3 server does,
/// including the `<md5-of-md5s>-<n>` ETag.
#[derive(Debug, Default)]
pub struct MemBackend {
    state: Mutex<State>,
    fail_create: bool,
    fail_part: Option<u16>,
    fail_complete: bool,
    fail_abort: bool,
}

fn injected(status: u16) -> Error {
    NetworkError::ServerError(status).into()
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Rejects the upload of `part_number`.
    pub fn failing_part(mut self, part_number: u16) -> Self {
        self.fail_part = Some(part_number);
        self
    }

    pub fn failing_complete(mut self) -> Self {
        self.fail_complete = true;
        self
    }

    pub fn failing_abort(mut self) -> Self {
        self.fail_abort = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of sessions neither completed nor aborted.
    pub fn open_sessions(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    /// Content and ETag of an assembled object.
    pub fn object(&self, key: &str) -> Option<(Bytes, String)> {
        self.state.lock().unwrap().objects.get(key).cloned()
    }
}

#[async_trait]
impl MultipartBackend for MemBackend {
    async fn create_multipart_upload(&self, _bucket: &str, key: &str) -> Result<String, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create { key: key.into() });
        if self.fail_create {
            return Err(injected(503));
        }
        state.next_id += 1;
        let upload_id = format!("upload-{}", state.next_id);
        state.sessions.insert(
            upload_id.clone(),
            Session {
                key: key.into(),
                ..Default::default()
            },
        );
        Ok(upload_id)
    }

    async fn upload_part(
        &self,
        _bucket: &str,
        _key: &str,
        upload_id: &str,
        part_number: u16,
        data: Bytes,
    ) -> Result<String, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::UploadPart {
            upload_id: upload_id.into(),
            part_number,
            size: data.len(),
        });
        if self.fail_part == Some(part_number) {
            return Err(injected(500));
        }
        let etag = format!("{:x}", md5::compute(&data));
        let session = state.sessions.get_mut(upload_id).ok_or_else(|| injected(404))?;
        session.parts.insert(part_number, data);
        Ok(etag)
    }

    async fn complete_multipart_upload(
        &self,
        _bucket: &str,
        _key: &str,
        upload_id: &str,
        parts: &[PartInfo],
    ) -> Result<String, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Complete {
            upload_id: upload_id.into(),
            parts: parts.iter().map(|p| p.number).collect(),
        });
        if self.fail_complete {
            return Err(injected(500));
        }
        let session = state.sessions.remove(upload_id).ok_or_else(|| injected(404))?;

        let mut content = Vec::new();
        let mut digests = Vec::new();
        for part in parts {
            let data = session.parts.get(&part.number).ok_or_else(|| injected(400))?;
            content.extend_from_slice(data);
            digests.extend_from_slice(&md5::compute(data).0);
        }
        let etag = format!("{:x}-{}", md5::compute(&digests), parts.len());
        state
            .objects
            .insert(session.key, (Bytes::from(content), etag.clone()));
        Ok(format!("\"{etag}\""))
    }

    async fn abort_multipart_upload(
        &self,
        _bucket: &str,
        _key: &str,
        upload_id: &str,
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Abort {
            upload_id: upload_id.into(),
        });
        if self.fail_abort {
            return Err(injected(500));
        }
        state.sessions.remove(upload_id);
        Ok(())
    }
}
