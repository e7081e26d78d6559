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

use rand::distr::{Alphanumeric, SampleString};
use s3smoke::smoke::payload::random_payload_bytes;
use std::path::{Path, PathBuf};

pub fn rand_bucket_name() -> String {
    format!(
        "smoke-{}",
        Alphanumeric.sample_string(&mut rand::rng(), 8).to_lowercase()
    )
}

pub fn rand_object_name() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 8)
}

/// A file in the system temp directory, removed on drop.
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Reserves a unique path without creating the file.
    pub fn reserve() -> Self {
        let path = std::env::temp_dir().join(format!("s3smoke-{}.data", rand_object_name()));
        Self { path }
    }

    pub fn with_contents(data: &[u8]) -> Self {
        let file = Self::reserve();
        std::fs::write(&file.path, data).unwrap();
        file
    }

    /// Fills the file with `len` bytes of payload alphabet.
    pub fn random(len: usize) -> Self {
        Self::with_contents(&random_payload_bytes(&mut rand::rng(), len))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Vec<u8> {
        std::fs::read(&self.path).unwrap()
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
