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

use crate::impl_from_s3response;
use crate::impl_has_s3fields;
use crate::s3::response::a_response_traits::{HasBucket, HasRegion};
use crate::s3::types::S3Request;
use bytes::Bytes;
use http::HeaderMap;

/// Response of
/// [delete_bucket()](crate::s3::client::S3Client::delete_bucket)
/// API
#[derive(Clone, Debug)]
pub struct DeleteBucketResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(DeleteBucketResponse);
impl_has_s3fields!(DeleteBucketResponse);

impl HasBucket for DeleteBucketResponse {}
impl HasRegion for DeleteBucketResponse {}
