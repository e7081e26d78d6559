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

use super::S3Client;
use crate::s3::builders::{ListBuckets, ListBucketsBldr};

impl S3Client {
    /// Creates a [`ListBuckets`] request builder to list all buckets owned by
    /// the authenticated sender.
    ///
    /// To execute the request, call [`ListBuckets::send()`](crate::s3::types::S3Api::send),
    /// which returns a [`Result`] containing a [`ListBucketsResponse`](crate::s3::response::ListBucketsResponse).
    pub fn list_buckets(&self) -> ListBucketsBldr {
        ListBuckets::builder().client(self.clone())
    }
}
