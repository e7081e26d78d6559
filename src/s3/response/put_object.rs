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
use crate::s3::error::{Error, S3ServerError, ValidationErr};
use crate::s3::header_constants::*;
use crate::s3::response::a_response_traits::{
    HasBucket, HasEtagFromBody, HasEtagFromHeaders, HasObject, HasRegion, HasS3Fields,
};
use crate::s3::s3_error_response::S3ErrorResponse;
use crate::s3::types::{FromS3Response, S3Request};
use crate::s3::utils::{get_text_option, get_text_result};
use async_trait::async_trait;
use bytes::{Buf, Bytes};
use http::HeaderMap;
use std::mem;
use xmltree::Element;

// region: put-object

/// Response of [put_object()](crate::s3::client::S3Client::put_object) API
#[derive(Clone, Debug)]
pub struct PutObjectResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(PutObjectResponse);
impl_has_s3fields!(PutObjectResponse);

impl HasBucket for PutObjectResponse {}
impl HasObject for PutObjectResponse {}
impl HasRegion for PutObjectResponse {}
impl HasEtagFromHeaders for PutObjectResponse {}

impl PutObjectResponse {
    /// Value of `x-amz-version-id`, present when bucket versioning is enabled.
    pub fn version_id(&self) -> Option<&str> {
        self.headers
            .get(X_AMZ_VERSION_ID)
            .and_then(|v| v.to_str().ok())
    }
}

// endregion: put-object

// region: create-multipart-upload

/// Response of [create_multipart_upload()](crate::s3::client::S3Client::create_multipart_upload) API
#[derive(Clone, Debug)]
pub struct CreateMultipartUploadResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(CreateMultipartUploadResponse);
impl_has_s3fields!(CreateMultipartUploadResponse);

impl HasBucket for CreateMultipartUploadResponse {}
impl HasObject for CreateMultipartUploadResponse {}
impl HasRegion for CreateMultipartUploadResponse {}

impl CreateMultipartUploadResponse {
    /// Returns the upload ID assigned by the server.
    pub fn upload_id(&self) -> Result<String, ValidationErr> {
        let root = Element::parse(self.body.clone().reader())?;
        let upload_id = get_text_result(&root, "UploadId")?;
        if upload_id.is_empty() {
            return Err(ValidationErr::xml("empty <UploadId> in response"));
        }
        Ok(upload_id)
    }
}

// endregion: create-multipart-upload

// region: upload-part

/// Response of [upload_part()](crate::s3::client::S3Client::upload_part) API
#[derive(Clone, Debug)]
pub struct UploadPartResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(UploadPartResponse);
impl_has_s3fields!(UploadPartResponse);

impl HasBucket for UploadPartResponse {}
impl HasObject for UploadPartResponse {}
impl HasRegion for UploadPartResponse {}
impl HasEtagFromHeaders for UploadPartResponse {}

// endregion: upload-part

// region: complete-multipart-upload

/// Response of [complete_multipart_upload()](crate::s3::client::S3Client::complete_multipart_upload) API
///
/// The server may report a failed assembly inside a `200 OK` body; such
/// responses are turned into [`S3ServerError::S3Error`].
#[derive(Clone, Debug)]
pub struct CompleteMultipartUploadResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_has_s3fields!(CompleteMultipartUploadResponse);

impl HasBucket for CompleteMultipartUploadResponse {}
impl HasObject for CompleteMultipartUploadResponse {}
impl HasRegion for CompleteMultipartUploadResponse {}
impl HasEtagFromBody for CompleteMultipartUploadResponse {}

impl CompleteMultipartUploadResponse {
    pub fn location(&self) -> Result<Option<String>, ValidationErr> {
        let root = Element::parse(self.body().clone().reader())?;
        Ok(get_text_option(&root, "Location"))
    }
}

#[async_trait]
impl FromS3Response for CompleteMultipartUploadResponse {
    async fn from_s3response(
        request: S3Request,
        response: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error> {
        let mut resp: reqwest::Response = response?;
        let headers: HeaderMap = mem::take(resp.headers_mut());
        let body: Bytes = resp.bytes().await.map_err(ValidationErr::from)?;

        let root = Element::parse(body.clone().reader()).map_err(ValidationErr::from)?;
        if root.name == "Error" {
            let e = S3ErrorResponse::new_from_element(&root, headers)?;
            return Err(Error::S3Server(S3ServerError::S3Error(Box::new(e))));
        }

        Ok(Self {
            request,
            headers,
            body,
        })
    }
}

// endregion: complete-multipart-upload

// region: abort-multipart-upload

/// Response of [abort_multipart_upload()](crate::s3::client::S3Client::abort_multipart_upload) API
#[derive(Clone, Debug)]
pub struct AbortMultipartUploadResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(AbortMultipartUploadResponse);
impl_has_s3fields!(AbortMultipartUploadResponse);

impl HasBucket for AbortMultipartUploadResponse {}
impl HasObject for AbortMultipartUploadResponse {}
impl HasRegion for AbortMultipartUploadResponse {}

// endregion: abort-multipart-upload

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::response::test_utils::{request, response};
    use crate::s3::s3_error_response::S3ErrorCode;
    use http::Method;

    #[tokio::test]
    async fn upload_id_is_parsed() {
        let resp = CreateMultipartUploadResponse::from_s3response(
            request(Method::POST, "test-harbor-s3", Some("a/obj")),
            Ok(response(
                200,
                &[],
                b"<InitiateMultipartUploadResult><Bucket>test-harbor-s3</Bucket>\
                  <Key>a/obj</Key><UploadId>VXBsb2FkIElE</UploadId></InitiateMultipartUploadResult>",
            )),
        )
        .await
        .unwrap();
        assert_eq!(resp.upload_id().unwrap(), "VXBsb2FkIElE");
    }

    #[tokio::test]
    async fn part_etag_is_unquoted() {
        let resp = UploadPartResponse::from_s3response(
            request(Method::PUT, "test-harbor-s3", Some("a/obj")),
            Ok(response(200, &[("etag", "\"abc\"")], b"")),
        )
        .await
        .unwrap();
        assert_eq!(resp.etag().unwrap(), "abc");
    }

    #[tokio::test]
    async fn complete_etag_from_body() {
        let resp = CompleteMultipartUploadResponse::from_s3response(
            request(Method::POST, "test-harbor-s3", Some("a/obj")),
            Ok(response(
                200,
                &[],
                b"<CompleteMultipartUploadResult><Location>http://localhost:9000/test-harbor-s3/a/obj</Location>\
                  <Bucket>test-harbor-s3</Bucket><Key>a/obj</Key>\
                  <ETag>&quot;3858f62230ac3c915f300c664312c11f-2&quot;</ETag></CompleteMultipartUploadResult>",
            )),
        )
        .await
        .unwrap();
        assert_eq!(resp.etag().unwrap(), "3858f62230ac3c915f300c664312c11f-2");
        assert!(resp.location().unwrap().unwrap().ends_with("/a/obj"));
    }

    #[tokio::test]
    async fn complete_error_inside_ok_is_an_error() {
        let err = CompleteMultipartUploadResponse::from_s3response(
            request(Method::POST, "test-harbor-s3", Some("a/obj")),
            Ok(response(
                200,
                &[],
                b"<Error><Code>InvalidPart</Code><Message>part missing</Message></Error>",
            )),
        )
        .await
        .unwrap_err();
        assert_eq!(err.s3_error_code(), Some(S3ErrorCode::InvalidPart));
    }
}
