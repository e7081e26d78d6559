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

//! Error definitions for S3 operations

use crate::s3::s3_error_response::{S3ErrorCode, S3ErrorResponse};
use thiserror::Error;

/// Errors raised before a request leaves the client, or while decoding a
/// response that does not have the expected shape.
#[derive(Error, Debug)]
pub enum ValidationErr {
    #[error("Invalid bucket name: '{bucket_name}': {reason}")]
    InvalidBucketName { bucket_name: String, reason: String },

    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),

    #[error("Invalid upload ID: {0}")]
    InvalidUploadId(String),

    #[error("Invalid part number {0}; must be between 1 and 10000")]
    InvalidPartNumber(u16),

    #[error("Server returned no ETag for {0}")]
    MissingEtag(String),

    #[error("No parts provided for {0}")]
    EmptyParts(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("URL build error: {0}")]
    UrlBuildError(String),

    #[error("Invalid URI: {0}")]
    InvalidUrl(#[from] http::uri::InvalidUri),

    #[error("XML error: {message}")]
    XmlError { message: String },

    #[error("XML parse error: {0}")]
    XmlParseError(#[from] xmltree::ParseError),

    #[error("Invalid header value: {0}")]
    StrError(#[from] reqwest::header::ToStrError),

    #[error("Time parse error: {0}")]
    TimeParseError(#[from] chrono::ParseError),

    #[error("Integer parse error: {0}")]
    IntError(#[from] std::num::ParseIntError),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl ValidationErr {
    pub fn xml(message: impl Into<String>) -> Self {
        ValidationErr::XmlError {
            message: message.into(),
        }
    }
}

/// Errors reported by the server.
#[derive(Error, Debug)]
pub enum S3ServerError {
    #[error("S3 operation failed: {0}")]
    S3Error(Box<S3ErrorResponse>),

    #[error(
        "Invalid server response received; {message}; HTTP status code: {http_status_code}; content-type: {content_type}"
    )]
    InvalidServerResponse {
        message: String,
        http_status_code: u16,
        content_type: String,
    },
}

/// Errors raised by the transport.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Network error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Server failed with HTTP status code {0}")]
    ServerError(u16),
}

#[derive(Error, Debug)]
pub enum IoError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("S3 validation error: {0}")]
    Validation(#[from] ValidationErr),

    #[error("S3 server error: {0}")]
    S3Server(#[from] S3ServerError),

    #[error("S3 network error: {0}")]
    Network(#[from] NetworkError),

    #[error("S3 IO error: {0}")]
    Io(#[from] IoError),
}

impl Error {
    /// Returns true when the request was cancelled because the client's
    /// request timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Network(NetworkError::ReqwestError(e)) => e.is_timeout(),
            Error::Validation(ValidationErr::HttpError(e)) => e.is_timeout(),
            _ => false,
        }
    }

    /// Returns the S3 error code when the server answered with an error response.
    pub fn s3_error_code(&self) -> Option<S3ErrorCode> {
        match self {
            Error::S3Server(S3ServerError::S3Error(e)) => Some(e.code()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    #[test]
    fn s3_error_code_is_exposed() {
        let resp = S3ErrorResponse::new(
            HeaderMap::new(),
            S3ErrorCode::BucketAlreadyOwnedByYou,
            None,
            "/test-bucket".into(),
            String::new(),
            String::new(),
            Some("test-bucket".into()),
            None,
        );
        let err = Error::S3Server(S3ServerError::S3Error(Box::new(resp)));
        assert_eq!(
            err.s3_error_code(),
            Some(S3ErrorCode::BucketAlreadyOwnedByYou)
        );
        assert!(!err.is_timeout());
    }

    #[test]
    fn non_server_errors_have_no_code() {
        let err: Error = NetworkError::ServerError(503).into();
        assert_eq!(err.s3_error_code(), None);
        assert!(!err.is_timeout());
        assert_eq!(
            err.to_string(),
            "S3 network error: Server failed with HTTP status code 503"
        );
    }
}
