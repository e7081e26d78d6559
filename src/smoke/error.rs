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

//! Error type of the smoke-test harness

use crate::s3::error::Error;
use crate::smoke::multipart::MultipartError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmokeError {
    /// A fatal check failed because its request failed.
    #[error("{operation} failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: Error,
    },

    #[error("multipart upload failed: {0}")]
    Multipart(#[from] MultipartError),

    #[error("payload file {}: {source}", path.display())]
    Payload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SmokeError {
    pub fn request(operation: &'static str, source: Error) -> Self {
        SmokeError::Request { operation, source }
    }

    pub fn payload(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SmokeError::Payload {
            path: path.into(),
            source,
        }
    }

    /// True when the failure was a request cancelled by the client timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            SmokeError::Request { source, .. } => source.is_timeout(),
            SmokeError::Multipart(e) => e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::error::NetworkError;

    #[test]
    fn messages_name_the_operation() {
        let err = SmokeError::request("ListBuckets", NetworkError::ServerError(500).into());
        assert!(err.to_string().starts_with("ListBuckets failed: "));
        assert!(!err.is_timeout());

        let err = SmokeError::payload(
            "./test.data",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "payload file ./test.data: gone");
    }
}
