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

//! # s3-smoke
//!
//! A smoke-test harness for S3-compatible object storage. It drives a fixed
//! sequence of bucket and object operations against one endpoint, verifies
//! the results through MD5 and multipart ETag comparison, and prints one
//! status line per check.
//!
//! The crate has two layers:
//!
//! - [`s3`]: a small S3 client. Each operation on [`s3::client::S3Client`]
//!   returns a request builder; [`s3::types::S3Api::send`] signs the request
//!   with AWS Signature V4, executes it and returns a typed response.
//! - [`smoke`]: the harness itself. A chunked file reader, the multipart
//!   upload pipeline, composite ETag verification, payload generation,
//!   status reporting and the check runner.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use s3smoke::s3::client::S3Client;
//! use s3smoke::s3::creds::StaticProvider;
//! use s3smoke::s3::types::S3Api;
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = StaticProvider::new("minioadmin", "minioadmin", None);
//!     let client = S3Client::new("http://localhost:9000".parse().unwrap(), Some(provider), None).unwrap();
//!
//!     let resp = client
//!         .list_buckets()
//!         .build()
//!         .send()
//!         .await
//!         .expect("request failed");
//!
//!     for bucket in resp.buckets().unwrap() {
//!         println!("{}", bucket.name);
//!     }
//! }
//! ```

#![allow(clippy::result_large_err)]
#![allow(clippy::too_many_arguments)]
pub mod s3;
pub mod smoke;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
