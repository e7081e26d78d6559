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
use crate::s3::response::a_response_traits::{
    HasBucket, HasEtagFromHeaders, HasObject, HasObjectMeta, HasRegion,
};
use crate::s3::types::S3Request;
use bytes::Bytes;
use http::HeaderMap;

/// Response of [stat_object()](crate::s3::client::S3Client::stat_object) API
#[derive(Clone, Debug)]
pub struct StatObjectResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(StatObjectResponse);
impl_has_s3fields!(StatObjectResponse);

impl HasBucket for StatObjectResponse {}
impl HasRegion for StatObjectResponse {}
impl HasObject for StatObjectResponse {}
impl HasEtagFromHeaders for StatObjectResponse {}
impl HasObjectMeta for StatObjectResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::response::test_utils::{request, response};
    use crate::s3::types::FromS3Response;
    use http::Method;

    #[tokio::test]
    async fn missing_headers_default() {
        let resp = StatObjectResponse::from_s3response(
            request(Method::HEAD, "test-harbor-s3", Some("b/test.data")),
            Ok(response(200, &[], b"")),
        )
        .await
        .unwrap();
        assert_eq!(resp.etag().unwrap(), "");
        assert_eq!(resp.size().unwrap(), 0);
        assert!(resp.last_modified().unwrap().is_none());
    }
}
