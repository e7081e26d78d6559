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

use crate::s3::error::{Error, ValidationErr};
use crate::s3::header_constants::*;
use crate::s3::response::a_response_traits::{HasBucket, HasObject, HasRegion};
use crate::s3::types::S3Request;
use crate::s3::utils::{get_text_default, get_text_option, get_text_result};
use crate::{impl_from_s3response, impl_has_s3fields};
use bytes::{Buf, Bytes};
use http::HeaderMap;
use xmltree::{Element, XMLNode};

#[derive(Clone, Debug)]
pub struct DeleteObjectResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(DeleteObjectResponse);
impl_has_s3fields!(DeleteObjectResponse);

impl HasBucket for DeleteObjectResponse {}
impl HasObject for DeleteObjectResponse {}
impl HasRegion for DeleteObjectResponse {}

impl DeleteObjectResponse {
    /// Value of the `x-amz-delete-marker` header.
    pub fn is_delete_marker(&self) -> bool {
        self.headers
            .get(X_AMZ_DELETE_MARKER)
            .map(|v| v == "true")
            .unwrap_or(false)
    }
}

/// Error info returned by the S3 API when an object could not be deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteError {
    pub code: String,
    pub message: String,
    pub object_name: String,
}

/// Information about an object that was deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletedObject {
    pub name: String,
    pub delete_marker: bool,
}

/// Result of deleting an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteResult {
    Deleted(DeletedObject),
    Error(DeleteError),
}

impl From<DeleteResult> for Result<DeletedObject, DeleteError> {
    fn from(result: DeleteResult) -> Self {
        match result {
            DeleteResult::Deleted(obj) => Ok(obj),
            DeleteResult::Error(err) => Err(err),
        }
    }
}

impl DeleteResult {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteResult::Deleted(_))
    }
    pub fn is_error(&self) -> bool {
        matches!(self, DeleteResult::Error(_))
    }
}

/// Response of
/// [delete_objects()](crate::s3::client::S3Client::delete_objects)
/// S3 API.
#[derive(Clone, Debug)]
pub struct DeleteObjectsResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(DeleteObjectsResponse);
impl_has_s3fields!(DeleteObjectsResponse);

impl HasBucket for DeleteObjectsResponse {}
impl HasRegion for DeleteObjectsResponse {}

impl DeleteObjectsResponse {
    /// Returns one entry per `<Deleted>` or `<Error>` element, in body order.
    /// Other elements are skipped.
    pub fn result(&self) -> Result<Vec<DeleteResult>, Error> {
        let root = Element::parse(self.body.clone().reader()).map_err(ValidationErr::from)?;
        let mut result = Vec::new();
        for elem in root.children.iter().filter_map(XMLNode::as_element) {
            match elem.name.as_str() {
                "Deleted" => result.push(DeleteResult::Deleted(DeletedObject {
                    name: get_text_result(elem, "Key")?,
                    delete_marker: get_text_default(elem, "DeleteMarker")
                        .eq_ignore_ascii_case("true"),
                })),
                "Error" => result.push(DeleteResult::Error(DeleteError {
                    code: get_text_default(elem, "Code"),
                    message: get_text_default(elem, "Message"),
                    object_name: get_text_option(elem, "Key").unwrap_or_default(),
                })),
                _ => {}
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::response::test_utils::{request, response};
    use crate::s3::types::FromS3Response;
    use http::Method;

    #[tokio::test]
    async fn mixed_results_keep_order() {
        let resp = DeleteObjectsResponse::from_s3response(
            request(Method::POST, "test-harbor-s3", None),
            Ok(response(
                200,
                &[],
                b"<DeleteResult xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">\
                  <Deleted><Key>a/one</Key></Deleted>\
                  <Error><Key>a/two</Key><Code>AccessDenied</Code><Message>Access Denied</Message></Error>\
                  <Deleted><Key>a/three</Key><DeleteMarker>true</DeleteMarker></Deleted>\
                  </DeleteResult>",
            )),
        )
        .await
        .unwrap();

        let result = resp.result().unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(
            result[0],
            DeleteResult::Deleted(DeletedObject {
                name: "a/one".into(),
                delete_marker: false,
            })
        );
        assert!(result[1].is_error());
        let err: Result<DeletedObject, DeleteError> = result[1].clone().into();
        assert_eq!(err.unwrap_err().code, "AccessDenied");
        assert!(matches!(&result[2], DeleteResult::Deleted(d) if d.delete_marker));
    }

    #[tokio::test]
    async fn delete_marker_header() {
        let resp = DeleteObjectResponse::from_s3response(
            request(Method::DELETE, "test-harbor-s3", Some("b/test.data")),
            Ok(response(204, &[("x-amz-delete-marker", "true")], b"")),
        )
        .await
        .unwrap();
        assert!(resp.is_delete_marker());
        assert_eq!(resp.object(), "b/test.data");
    }
}
