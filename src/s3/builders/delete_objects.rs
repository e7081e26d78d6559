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

use crate::s3::client::S3Client;
use crate::s3::error::ValidationErr;
use crate::s3::header_constants::*;
use crate::s3::multimap_ext::{Multimap, MultimapExt};
use crate::s3::response::{DeleteObjectResponse, DeleteObjectsResponse};
use crate::s3::types::{ObjectToDelete, S3Api, S3Request, ToS3Request};
use crate::s3::utils::{check_bucket_name, check_object_name, insert, md5sum_hash};
use bytes::Bytes;
use http::Method;
use typed_builder::TypedBuilder;

/// Maximum number of keys a single DeleteObjects request may carry.
pub const MAX_DELETE_KEYS: usize = 1000;

// region: delete-object

/// Argument builder for the [`DeleteObject`](https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteObject.html) S3 API operation.
#[derive(Clone, Debug, TypedBuilder)]
pub struct DeleteObject {
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
    #[builder(setter(into))] // force required
    object: ObjectToDelete,
}

/// Builder type alias for [`DeleteObject`].
pub type DeleteObjectBldr =
    DeleteObjectBuilder<((S3Client,), (), (), (), (String,), (ObjectToDelete,))>;

impl S3Api for DeleteObject {
    type S3Response = DeleteObjectResponse;
}

impl ToS3Request for DeleteObject {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket, true)?;
        check_object_name(&self.object.key)?;

        Ok(S3Request::builder()
            .client(self.client)
            .method(Method::DELETE)
            .region(self.region)
            .bucket(self.bucket)
            .object(self.object.key)
            .query_params(self.extra_query_params.unwrap_or_default())
            .headers(self.extra_headers.unwrap_or_default())
            .build())
    }
}

// endregion: delete-object

// region: delete-objects

/// Argument builder for the [`DeleteObjects`](https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteObjects.html) S3 API operation.
///
/// In quiet mode the server only reports keys that failed to delete.
#[derive(Clone, Debug, TypedBuilder)]
pub struct DeleteObjects {
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
    #[builder(!default)] // force required
    objects: Vec<ObjectToDelete>,
    #[builder(default)]
    quiet: bool,
}

/// Builder type alias for [`DeleteObjects`].
pub type DeleteObjectsBldr =
    DeleteObjectsBuilder<((S3Client,), (), (), (), (String,), (Vec<ObjectToDelete>,), ())>;

impl S3Api for DeleteObjects {
    type S3Response = DeleteObjectsResponse;
}

impl ToS3Request for DeleteObjects {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket, true)?;
        if self.objects.is_empty() {
            return Err(ValidationErr::InvalidObjectName(
                "no objects to delete".into(),
            ));
        }
        if self.objects.len() > MAX_DELETE_KEYS {
            return Err(ValidationErr::InvalidObjectName(format!(
                "at most {MAX_DELETE_KEYS} objects can be deleted per request, got {}",
                self.objects.len()
            )));
        }
        for object in &self.objects {
            check_object_name(&object.key)?;
        }

        let bytes: Bytes = delete_objects_xml(&self.objects, self.quiet).into();

        let mut headers: Multimap = self.extra_headers.unwrap_or_default();
        headers.add(CONTENT_TYPE, "application/xml");
        headers.add(CONTENT_MD5, md5sum_hash(bytes.as_ref()));

        Ok(S3Request::builder()
            .client(self.client)
            .method(Method::POST)
            .region(self.region)
            .bucket(self.bucket)
            .query_params(insert(self.extra_query_params, "delete"))
            .headers(headers)
            .body(bytes)
            .build())
    }
}

fn delete_objects_xml(objects: &[ObjectToDelete], quiet: bool) -> String {
    let mut data = String::from("<Delete>");
    if quiet {
        data.push_str("<Quiet>true</Quiet>");
    }
    for object in objects {
        data.push_str("<Object><Key>");
        data.push_str(&xml_escape(&object.key));
        data.push_str("</Key></Object>");
    }
    data.push_str("</Delete>");
    data
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

// endregion: delete-objects
