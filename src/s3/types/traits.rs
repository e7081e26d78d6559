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

//! Core traits for S3 request and response handling.

use super::s3_request::S3Request;
use crate::s3::error::{Error, ValidationErr};
use async_trait::async_trait;

/// Trait for converting a request builder into a concrete S3 HTTP request.
///
/// [`S3Api::send`] uses this trait to turn a builder into an executable
/// request before sending it.
pub trait ToS3Request: Sized {
    /// Consumes this request builder and returns a [`S3Request`].
    ///
    /// Argument validation (bucket and object names, part numbers, upload ids)
    /// happens here, so an invalid request never reaches the network.
    fn to_s3request(self) -> Result<S3Request, ValidationErr>;
}

/// Trait for converting HTTP responses into strongly typed S3 response objects.
#[async_trait]
pub trait FromS3Response: Sized {
    /// Converts the result of executing `s3req` into a typed response.
    ///
    /// Errors already produced by the transport or the server are passed
    /// through unchanged.
    async fn from_s3response(
        s3req: S3Request,
        response: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error>;
}

/// Common interface for all S3 API request builders.
#[async_trait]
pub trait S3Api: ToS3Request {
    /// The response type associated with this request builder.
    type S3Response: FromS3Response;

    /// Sends the S3 API request and returns the corresponding typed response.
    async fn send(self) -> Result<Self::S3Response, Error> {
        let mut req: S3Request = self.to_s3request()?;
        let resp: Result<reqwest::Response, Error> = req.execute().await;
        Self::S3Response::from_s3response(req, resp).await
    }
}
