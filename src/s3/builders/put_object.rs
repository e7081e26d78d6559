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

use crate::s3::client::{MAX_MULTIPART_COUNT, S3Client};
use crate::s3::error::ValidationErr;
use crate::s3::header_constants::*;
use crate::s3::multimap_ext::{Multimap, MultimapExt};
use crate::s3::response::{
    AbortMultipartUploadResponse, CompleteMultipartUploadResponse, CreateMultipartUploadResponse,
    PutObjectResponse, UploadPartResponse,
};
use crate::s3::types::{PartInfo, S3Api, S3Request, ToS3Request};
use crate::s3::utils::{check_bucket_name, check_object_name, insert, md5sum_hash};
use bytes::Bytes;
use http::Method;
use std::fmt::Write;
use typed_builder::TypedBuilder;

// region: put-object

/// Argument builder for the [`PutObject`](https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutObject.html) S3 API operation.
///
/// Uploads the whole body in one request.
#[derive(Clone, Debug, TypedBuilder)]
pub struct PutObject {
    #[builder(!default)] // force required
    client: S3Client,
    #[builder(default, setter(into))]
    extra_headers: Option<Multimap>,
    #[builder(default, setter(into))]
    extra_query_params: Option<Multimap>,
    #[builder(default, setter(into))]
    region: Option<String>,
    #[builder(setter(into))] // force required + accept Into<String>
    bucket: String,
    #[builder(setter(into))] // force required + accept Into<String>
    object: String,
    #[builder(!default, setter(into))] // force required
    data: Bytes,
    #[builder(default, setter(into))]
    content_type: Option<String>,
}

/// Builder type alias for [`PutObject`].
pub type PutObjectBldr =
    PutObjectBuilder<((S3Client,), (), (), (), (String,), (String,), (Bytes,), ())>;

impl S3Api for PutObject {
    type S3Response = PutObjectResponse;
}

impl ToS3Request for PutObject {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket, true)?;
        check_object_name(&self.object)?;

        let mut headers: Multimap = self.extra_headers.unwrap_or_default();
        if let Some(v) = self.content_type {
            headers.add(CONTENT_TYPE, v);
        }

        Ok(S3Request::builder()
            .client(self.client)
            .method(Method::PUT)
            .region(self.region)
            .bucket(self.bucket)
            .object(self.object)
            .query_params(self.extra_query_params.unwrap_or_default())
            .headers(headers)
            .body(self.data)
            .build())
    }
}

// endregion: put-object

// region: create-multipart-upload

/// Argument builder for the [`CreateMultipartUpload`](https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateMultipartUpload.html) S3 API operation.
#[derive(Clone, Debug, TypedBuilder)]
pub struct CreateMultipartUpload {
    #[builder(!default)] // force required
    client: S3Client,
    #[builder(default, setter(into))]
    extra_headers: Option<Multimap>,
    #[builder(default, setter(into))]
    extra_query_params: Option<Multimap>,
    #[builder(default, setter(into))]
    region: Option<String>,
    #[builder(setter(into))] // force required + accept Into<String>
    bucket: String,
    #[builder(setter(into))] // force required + accept Into<String>
    object: String,
}

/// Builder type alias for [`CreateMultipartUpload`].
pub type CreateMultipartUploadBldr =
    CreateMultipartUploadBuilder<((S3Client,), (), (), (), (String,), (String,))>;

impl S3Api for CreateMultipartUpload {
    type S3Response = CreateMultipartUploadResponse;
}

impl ToS3Request for CreateMultipartUpload {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket, true)?;
        check_object_name(&self.object)?;

        Ok(S3Request::builder()
            .client(self.client)
            .method(Method::POST)
            .region(self.region)
            .bucket(self.bucket)
            .object(self.object)
            .query_params(insert(self.extra_query_params, "uploads"))
            .headers(self.extra_headers.unwrap_or_default())
            .build())
    }
}

// endregion: create-multipart-upload

// region: upload-part

/// Argument builder for the [`UploadPart`](https://docs.aws.amazon.com/AmazonS3/latest/API/API_UploadPart.html) S3 API operation.
#[derive(Clone, Debug, TypedBuilder)]
pub struct UploadPart {
    #[builder(!default)] // force required
    client: S3Client,
    #[builder(default, setter(into))]
    extra_headers: Option<Multimap>,
    #[builder(default, setter(into))]
    extra_query_params: Option<Multimap>,
    #[builder(default, setter(into))]
    region: Option<String>,
    #[builder(setter(into))] // force required + accept Into<String>
    bucket: String,
    #[builder(setter(into))] // force required + accept Into<String>
    object: String,
    #[builder(setter(into))] // force required + accept Into<String>
    upload_id: String,
    #[builder(!default)] // force required
    part_number: u16,
    #[builder(!default, setter(into))] // force required
    data: Bytes,
}

/// Builder type alias for [`UploadPart`].
pub type UploadPartBldr = UploadPartBuilder<(
    (S3Client,),
    (),
    (),
    (),
    (String,),
    (String,),
    (String,),
    (u16,),
    (Bytes,),
)>;

impl S3Api for UploadPart {
    type S3Response = UploadPartResponse;
}

impl ToS3Request for UploadPart {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket, true)?;
        check_object_name(&self.object)?;
        check_upload_id(&self.upload_id)?;
        if !(1..=MAX_MULTIPART_COUNT).contains(&self.part_number) {
            return Err(ValidationErr::InvalidPartNumber(self.part_number));
        }

        let mut query_params: Multimap = self.extra_query_params.unwrap_or_default();
        query_params.add("partNumber", self.part_number.to_string());
        query_params.add("uploadId", self.upload_id);

        Ok(S3Request::builder()
            .client(self.client)
            .method(Method::PUT)
            .region(self.region)
            .bucket(self.bucket)
            .object(self.object)
            .query_params(query_params)
            .headers(self.extra_headers.unwrap_or_default())
            .body(self.data)
            .build())
    }
}

// endregion: upload-part

// region: complete-multipart-upload

/// Argument builder for the [`CompleteMultipartUpload`](https://docs.aws.amazon.com/AmazonS3/latest/API/API_CompleteMultipartUpload.html) S3 API operation.
///
/// `parts` must be in ascending part-number order.
#[derive(Clone, Debug, TypedBuilder)]
pub struct CompleteMultipartUpload {
    #[builder(!default)] // force required
    client: S3Client,
    #[builder(default, setter(into))]
    extra_headers: Option<Multimap>,
    #[builder(default, setter(into))]
    extra_query_params: Option<Multimap>,
    #[builder(default, setter(into))]
    region: Option<String>,
    #[builder(setter(into))] // force required + accept Into<String>
    bucket: String,
    #[builder(setter(into))] // force required + accept Into<String>
    object: String,
    #[builder(setter(into))] // force required + accept Into<String>
    upload_id: String,
    #[builder(!default)] // force required
    parts: Vec<PartInfo>,
}

/// Builder type alias for [`CompleteMultipartUpload`].
pub type CompleteMultipartUploadBldr = CompleteMultipartUploadBuilder<(
    (S3Client,),
    (),
    (),
    (),
    (String,),
    (String,),
    (String,),
    (Vec<PartInfo>,),
)>;

impl S3Api for CompleteMultipartUpload {
    type S3Response = CompleteMultipartUploadResponse;
}

impl ToS3Request for CompleteMultipartUpload {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket, true)?;
        check_object_name(&self.object)?;
        check_upload_id(&self.upload_id)?;
        if self.parts.is_empty() {
            return Err(ValidationErr::EmptyParts(format!(
                "upload {} of {}/{}",
                self.upload_id, self.bucket, self.object
            )));
        }

        let bytes: Bytes = complete_multipart_xml(&self.parts).into();

        let mut headers: Multimap = self.extra_headers.unwrap_or_default();
        headers.add(CONTENT_TYPE, "application/xml");
        headers.add(CONTENT_MD5, md5sum_hash(bytes.as_ref()));

        let mut query_params: Multimap = self.extra_query_params.unwrap_or_default();
        query_params.add("uploadId", self.upload_id);

        Ok(S3Request::builder()
            .client(self.client)
            .method(Method::POST)
            .region(self.region)
            .bucket(self.bucket)
            .object(self.object)
            .query_params(query_params)
            .headers(headers)
            .body(bytes)
            .build())
    }
}

fn complete_multipart_xml(parts: &[PartInfo]) -> String {
    let mut data = String::from("<CompleteMultipartUpload>");
    for part in parts {
        let _ = write!(
            data,
            "<Part><PartNumber>{}</PartNumber><ETag>{}</ETag></Part>",
            part.number, part.etag
        );
    }
    data.push_str("</CompleteMultipartUpload>");
    data
}

// endregion: complete-multipart-upload

// region: abort-multipart-upload

/// Argument builder for the [`AbortMultipartUpload`](https://docs.aws.amazon.com/AmazonS3/latest/API/API_AbortMultipartUpload.html) S3 API operation.
#[derive(Clone, Debug, TypedBuilder)]
pub struct AbortMultipartUpload {
    #[builder(!default)] // force required
    client: S3Client,
    #[builder(default, setter(into))]
    extra_headers: Option<Multimap>,
    #[builder(default, setter(into))]
    extra_query_params: Option<Multimap>,
    #[builder(default, setter(into))]
    region: Option<String>,
    #[builder(setter(into))] // force required + accept Into<String>
    bucket: String,
    #[builder(setter(into))] // force required + accept Into<String>
    object: String,
    #[builder(setter(into))] // force required + accept Into<String>
    upload_id: String,
}

/// Builder type alias for [`AbortMultipartUpload`].
pub type AbortMultipartUploadBldr =
    AbortMultipartUploadBuilder<((S3Client,), (), (), (), (String,), (String,), (String,))>;

impl S3Api for AbortMultipartUpload {
    type S3Response = AbortMultipartUploadResponse;
}

impl ToS3Request for AbortMultipartUpload {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket, true)?;
        check_object_name(&self.object)?;
        check_upload_id(&self.upload_id)?;

        let mut query_params: Multimap = self.extra_query_params.unwrap_or_default();
        query_params.add("uploadId", self.upload_id);

        Ok(S3Request::builder()
            .client(self.client)
            .method(Method::DELETE)
            .region(self.region)
            .bucket(self.bucket)
            .object(self.object)
            .query_params(query_params)
            .headers(self.extra_headers.unwrap_or_default())
            .build())
    }
}

// endregion: abort-multipart-upload

fn check_upload_id(upload_id: &str) -> Result<(), ValidationErr> {
    if upload_id.is_empty() {
        return Err(ValidationErr::InvalidUploadId(
            "upload ID cannot be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::creds::StaticProvider;

    fn client() -> S3Client {
        S3Client::new::<StaticProvider>(Default::default(), None, None).unwrap()
    }

    #[test]
    fn upload_part_rejects_out_of_range_part_numbers() {
        for n in [0u16, 10_001] {
            let err = UploadPart::builder()
                .client(client())
                .bucket("test-harbor-s3")
                .object("a/obj")
                .upload_id("id")
                .part_number(n)
                .data(Bytes::from_static(b"x"))
                .build()
                .to_s3request()
                .unwrap_err();
            assert!(matches!(err, ValidationErr::InvalidPartNumber(v) if v == n));
        }
    }

    #[test]
    fn upload_part_sets_query() {
        let req = UploadPart::builder()
            .client(client())
            .bucket("test-harbor-s3")
            .object("a/obj")
            .upload_id("abc")
            .part_number(3)
            .data(Bytes::from_static(b"xyz"))
            .build()
            .to_s3request()
            .unwrap();
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.query_params.get("partNumber").map(String::as_str), Some("3"));
        assert_eq!(req.query_params.get("uploadId").map(String::as_str), Some("abc"));
        assert_eq!(req.body().map(|b| b.len()), Some(3));
    }

    #[test]
    fn upload_part_requires_upload_id() {
        let err = UploadPart::builder()
            .client(client())
            .bucket("test-harbor-s3")
            .object("a/obj")
            .upload_id("")
            .part_number(1)
            .data(Bytes::new())
            .build()
            .to_s3request()
            .unwrap_err();
        assert!(matches!(err, ValidationErr::InvalidUploadId(_)));
    }

    #[test]
    fn complete_body_lists_parts_in_order() {
        let parts = vec![PartInfo::new(1, "e1", 5), PartInfo::new(2, "e2", 1)];
        let req = CompleteMultipartUpload::builder()
            .client(client())
            .bucket("test-harbor-s3")
            .object("a/obj")
            .upload_id("abc")
            .parts(parts)
            .build()
            .to_s3request()
            .unwrap();
        let body = std::str::from_utf8(req.body().unwrap()).unwrap().to_string();
        assert_eq!(
            body,
            "<CompleteMultipartUpload>\
             <Part><PartNumber>1</PartNumber><ETag>e1</ETag></Part>\
             <Part><PartNumber>2</PartNumber><ETag>e2</ETag></Part>\
             </CompleteMultipartUpload>"
        );
        assert_eq!(
            req.headers().get(CONTENT_MD5).map(String::as_str),
            Some(md5sum_hash(body.as_bytes()).as_str())
        );
        assert_eq!(req.method, Method::POST);
    }

    #[test]
    fn complete_rejects_empty_parts() {
        let err = CompleteMultipartUpload::builder()
            .client(client())
            .bucket("test-harbor-s3")
            .object("a/obj")
            .upload_id("abc")
            .parts(Vec::new())
            .build()
            .to_s3request()
            .unwrap_err();
        assert!(matches!(err, ValidationErr::EmptyParts(_)));
    }

    #[test]
    fn create_and_abort_use_upload_queries() {
        let req = CreateMultipartUpload::builder()
            .client(client())
            .bucket("test-harbor-s3")
            .object("a/obj")
            .build()
            .to_s3request()
            .unwrap();
        assert!(req.query_params.contains_key("uploads"));
        assert_eq!(req.method, Method::POST);

        let req = AbortMultipartUpload::builder()
            .client(client())
            .bucket("test-harbor-s3")
            .object("a/obj")
            .upload_id("abc")
            .build()
            .to_s3request()
            .unwrap();
        assert_eq!(req.method, Method::DELETE);
        assert_eq!(req.query_params.get("uploadId").map(String::as_str), Some("abc"));
    }
}
