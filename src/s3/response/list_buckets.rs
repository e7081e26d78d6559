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
use crate::s3::error::ValidationErr;
use crate::s3::response::a_response_traits::HasS3Fields;
use crate::s3::types::{Bucket, Owner, S3Request};
use crate::s3::utils::{from_iso8601utc, get_text_default, get_text_result};
use bytes::{Buf, Bytes};
use http::HeaderMap;
use xmltree::Element;

/// Response of [list_buckets()](crate::s3::client::S3Client::list_buckets) API
#[derive(Clone, Debug)]
pub struct ListBucketsResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,
}

impl_from_s3response!(ListBucketsResponse);
impl_has_s3fields!(ListBucketsResponse);

impl ListBucketsResponse {
    /// Returns the list of buckets in the account.
    pub fn buckets(&self) -> Result<Vec<Bucket>, ValidationErr> {
        let mut root = Element::parse(self.body().clone().reader())?;
        let buckets_xml = root
            .get_mut_child("Buckets")
            .ok_or(ValidationErr::xml("<Buckets> tag not found"))?;

        let mut buckets: Vec<Bucket> = Vec::new();
        while let Some(bucket) = buckets_xml.take_child("Bucket") {
            buckets.push(Bucket {
                name: get_text_result(&bucket, "Name")?,
                creation_date: from_iso8601utc(&get_text_result(&bucket, "CreationDate")?)?,
            });
        }
        Ok(buckets)
    }

    /// Owner of the buckets, when the server reports one.
    pub fn owner(&self) -> Result<Option<Owner>, ValidationErr> {
        let root = Element::parse(self.body().clone().reader())?;
        Ok(root.get_child("Owner").map(|o| Owner {
            id: get_text_default(o, "ID"),
            display_name: get_text_default(o, "DisplayName"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::response::test_utils::{request, response};
    use crate::s3::types::FromS3Response;
    use http::Method;

    const BODY: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Owner><ID>02d6176db174dc93cb1b899f7c6078f08654445fe8cf1b6ce98d8855f66bdbf4</ID><DisplayName>minio</DisplayName></Owner>
  <Buckets>
    <Bucket><Name>test-harbor-s3</Name><CreationDate>2025-01-02T03:04:05.000Z</CreationDate></Bucket>
    <Bucket><Name>other</Name><CreationDate>2024-12-31T23:59:59.000Z</CreationDate></Bucket>
  </Buckets>
</ListAllMyBucketsResult>"#;

    #[tokio::test]
    async fn parses_buckets_and_owner() {
        let mut req = request(Method::GET, "x", None);
        req.bucket = None;
        let resp = ListBucketsResponse::from_s3response(req, Ok(response(200, &[], BODY)))
            .await
            .unwrap();

        let buckets = resp.buckets().unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].name, "test-harbor-s3");
        assert_eq!(
            buckets[0].creation_date.to_rfc3339(),
            "2025-01-02T03:04:05+00:00"
        );
        assert_eq!(resp.owner().unwrap().unwrap().to_string(), "minio");
    }

    #[tokio::test]
    async fn missing_buckets_tag_is_an_error() {
        let resp = ListBucketsResponse::from_s3response(
            request(Method::GET, "x", None),
            Ok(response(200, &[], b"<ListAllMyBucketsResult/>")),
        )
        .await
        .unwrap();
        assert!(matches!(resp.buckets(), Err(ValidationErr::XmlError { .. })));
    }
}
