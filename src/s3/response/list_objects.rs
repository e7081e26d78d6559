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

use crate::impl_has_s3fields;
use crate::s3::error::{Error, ValidationErr};
use crate::s3::response::a_response_traits::{HasBucket, HasRegion};
use crate::s3::types::{FromS3Response, ListEntry, Owner, S3Request};
use crate::s3::utils::{from_iso8601utc, get_text_default, get_text_option, get_text_result, trim_quotes};
use async_trait::async_trait;
use bytes::{Buf, Bytes};
use http::HeaderMap;
use std::mem;
use xmltree::{Element, XMLNode};

fn child_elements<'a>(root: &'a Element, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
    root.children.iter().filter_map(move |node| match node {
        XMLNode::Element(e) if e.name == tag => Some(e),
        _ => None,
    })
}

fn parse_list_objects_contents(root: &Element) -> Result<Vec<ListEntry>, ValidationErr> {
    let mut contents = Vec::new();
    for content in child_elements(root, "Contents") {
        let size: Option<u64> = get_text_option(content, "Size")
            .map(|x| x.parse::<u64>())
            .transpose()?;
        let last_modified = get_text_option(content, "LastModified")
            .map(|x| from_iso8601utc(&x))
            .transpose()?;
        let owner = content.get_child("Owner").map(|o| Owner {
            id: get_text_default(o, "ID"),
            display_name: get_text_default(o, "DisplayName"),
        });

        contents.push(ListEntry {
            name: get_text_result(content, "Key")?,
            last_modified,
            etag: get_text_option(content, "ETag").map(trim_quotes),
            size,
            storage_class: get_text_option(content, "StorageClass"),
            owner,
            is_prefix: false,
        });
    }
    Ok(contents)
}

fn parse_list_objects_common_prefixes(root: &Element) -> Result<Vec<ListEntry>, ValidationErr> {
    let mut prefixes = Vec::new();
    for common_prefix in child_elements(root, "CommonPrefixes") {
        prefixes.push(ListEntry {
            name: get_text_result(common_prefix, "Prefix")?,
            last_modified: None,
            etag: None,
            size: None,
            storage_class: None,
            owner: None,
            is_prefix: true,
        });
    }
    Ok(prefixes)
}

/// Response of [list_objects()](crate::s3::client::S3Client::list_objects) S3 API,
/// one page of a ListObjectsV2 listing.
#[derive(Clone, Debug)]
pub struct ListObjectsResponse {
    request: S3Request,
    headers: HeaderMap,
    body: Bytes,

    pub name: String,
    pub prefix: Option<String>,
    pub delimiter: Option<String>,
    pub is_truncated: bool,
    pub key_count: Option<u16>,
    pub max_keys: Option<u16>,
    pub next_continuation_token: Option<String>,
    /// Objects on this page.
    pub contents: Vec<ListEntry>,
    /// Entries taken from `<CommonPrefixes>`, with `is_prefix` set.
    pub common_prefixes: Vec<ListEntry>,
}

impl_has_s3fields!(ListObjectsResponse);

impl HasBucket for ListObjectsResponse {}
impl HasRegion for ListObjectsResponse {}

#[async_trait]
impl FromS3Response for ListObjectsResponse {
    async fn from_s3response(
        request: S3Request,
        response: Result<reqwest::Response, Error>,
    ) -> Result<Self, Error> {
        let mut resp: reqwest::Response = response?;
        let headers: HeaderMap = mem::take(resp.headers_mut());
        let body: Bytes = resp.bytes().await.map_err(ValidationErr::from)?;

        let root = Element::parse(body.clone().reader()).map_err(ValidationErr::from)?;

        let is_truncated = get_text_option(&root, "IsTruncated")
            .map(|x| x.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let key_count = get_text_option(&root, "KeyCount")
            .map(|x| x.parse::<u16>())
            .transpose()
            .map_err(ValidationErr::from)?;
        let max_keys = get_text_option(&root, "MaxKeys")
            .map(|x| x.parse::<u16>())
            .transpose()
            .map_err(ValidationErr::from)?;

        Ok(Self {
            name: get_text_result(&root, "Name")?,
            prefix: get_text_option(&root, "Prefix"),
            delimiter: get_text_option(&root, "Delimiter"),
            is_truncated,
            key_count,
            max_keys,
            next_continuation_token: get_text_option(&root, "NextContinuationToken")
                .filter(|v| !v.is_empty()),
            contents: parse_list_objects_contents(&root)?,
            common_prefixes: parse_list_objects_common_prefixes(&root)?,
            request,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::response::test_utils::{request, response};
    use http::Method;

    const BODY: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>test-harbor-s3</Name><Prefix>a/</Prefix><KeyCount>2</KeyCount><MaxKeys>1000</MaxKeys>
  <Delimiter>/</Delimiter><IsTruncated>false</IsTruncated>
  <Contents>
    <Key>a/s3_object_16MB.data</Key><LastModified>2025-01-02T03:04:05.000Z</LastModified>
    <ETag>&quot;0123456789abcdef0123456789abcdef-4&quot;</ETag><Size>16777216</Size>
    <Owner><ID>02d6176d</ID><DisplayName>minio</DisplayName></Owner>
    <StorageClass>STANDARD</StorageClass>
  </Contents>
  <CommonPrefixes><Prefix>a/nested/</Prefix></CommonPrefixes>
</ListBucketResult>"#;

    #[tokio::test]
    async fn parses_contents_and_prefixes() {
        let resp = ListObjectsResponse::from_s3response(
            request(Method::GET, "test-harbor-s3", None),
            Ok(response(200, &[("content-type", "application/xml")], BODY)),
        )
        .await
        .unwrap();

        assert_eq!(resp.name, "test-harbor-s3");
        assert_eq!(resp.key_count, Some(2));
        assert!(!resp.is_truncated);
        assert!(resp.next_continuation_token.is_none());

        assert_eq!(resp.contents.len(), 1);
        let entry = &resp.contents[0];
        assert_eq!(entry.name, "a/s3_object_16MB.data");
        assert_eq!(entry.size, Some(16_777_216));
        assert_eq!(
            entry.etag.as_deref(),
            Some("0123456789abcdef0123456789abcdef-4")
        );
        assert_eq!(entry.owner.as_ref().map(|o| o.to_string()).as_deref(), Some("minio"));
        assert!(!entry.is_prefix);

        assert_eq!(resp.common_prefixes.len(), 1);
        assert_eq!(resp.common_prefixes[0].name, "a/nested/");
        assert!(resp.common_prefixes[0].is_prefix);
    }

    #[tokio::test]
    async fn empty_listing() {
        let resp = ListObjectsResponse::from_s3response(
            request(Method::GET, "test-harbor-s3", None),
            Ok(response(
                200,
                &[],
                b"<ListBucketResult><Name>test-harbor-s3</Name><KeyCount>0</KeyCount>\
                  <IsTruncated>false</IsTruncated></ListBucketResult>",
            )),
        )
        .await
        .unwrap();
        assert!(resp.contents.is_empty());
        assert!(resp.common_prefixes.is_empty());
    }
}
