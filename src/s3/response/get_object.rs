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

/// Response of [get_object()](crate::s3::client::S3Client::get_object) API.
///
/// The object data is fully buffered; see [`GetObjectResponse::content`].
#[derive(Clone, Debug)]
pub struct GetObjectResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(GetObjectResponse);
impl_has_s3fields!(GetObjectResponse);

impl HasBucket for GetObjectResponse {}
impl HasRegion for GetObjectResponse {}
impl HasObject for GetObjectResponse {}
impl HasEtagFromHeaders for GetObjectResponse {}
impl HasObjectMeta for GetObjectResponse {}

impl GetObjectResponse {
    /// The object data.
    pub fn content(&self) -> &Bytes {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::response::test_utils::{request, response};
    use crate::s3::types::FromS3Response;
    use http::Method;

    #[tokio::test]
    async fn exposes_content_and_metadata() {
        let resp = GetObjectResponse::from_s3response(
            request(Method::GET, "test-harbor-s3", Some("b/test.data")),
            Ok(response(
                200,
                &[
                    ("etag", "\"5d41402abc4b2a76b9719d911017c592\""),
                    ("content-length", "5"),
                    ("last-modified", "Thu, 02 Jan 2025 03:04:05 GMT"),
                ],
                b"hello",
            )),
        )
        .await
        .unwrap();

        assert_eq!(resp.content().as_ref(), b"hello");
        assert_eq!(resp.etag().unwrap(), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(resp.size().unwrap(), 5);
        assert_eq!(
            resp.last_modified().unwrap().unwrap().to_rfc3339(),
            "2025-01-02T03:04:05+00:00"
        );
        assert_eq!(resp.object(), "b/test.data");
    }
}
