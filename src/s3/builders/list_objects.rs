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
use crate::s3::multimap_ext::{Multimap, MultimapExt};
use crate::s3::response::ListObjectsResponse;
use crate::s3::types::{S3Api, S3Request, ToS3Request};
use crate::s3::utils::check_bucket_name;
use http::Method;
use typed_builder::TypedBuilder;

/// Argument builder for the [`ListObjectsV2`](https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListObjectsV2.html) S3 API operation.
///
/// One request returns one page of at most `max_keys` entries. Pass the
/// response's `next_continuation_token` as `continuation_token` to fetch the
/// next page.
#[derive(Clone, Debug, TypedBuilder)]
pub struct ListObjects {
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

    /// Limit results to keys beginning with this prefix.
    #[builder(default, setter(into))]
    prefix: Option<String>,
    /// Group keys sharing a prefix up to this character into `CommonPrefixes`.
    #[builder(default, setter(into))]
    delimiter: Option<String>,
    /// Ask the server to include the owner of each object.
    #[builder(default)]
    fetch_owner: bool,
    #[builder(default, setter(into))]
    max_keys: Option<u16>,
    #[builder(default, setter(into))]
    start_after: Option<String>,
    #[builder(default, setter(into))]
    continuation_token: Option<String>,
}

/// Builder type alias for [`ListObjects`].
pub type ListObjectsBldr =
    ListObjectsBuilder<((S3Client,), (), (), (), (String,), (), (), (), (), (), ())>;

impl S3Api for ListObjects {
    type S3Response = ListObjectsResponse;
}

impl ToS3Request for ListObjects {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket, true)?;

        let mut query_params: Multimap = self.extra_query_params.unwrap_or_default();
        query_params.add("list-type", "2");
        query_params.add("delimiter", self.delimiter.unwrap_or_default());
        query_params.add("prefix", self.prefix.unwrap_or_default());
        if self.fetch_owner {
            query_params.add("fetch-owner", "true");
        }
        if let Some(v) = self.max_keys {
            query_params.add("max-keys", v.to_string());
        }
        if let Some(v) = self.start_after {
            query_params.add("start-after", v);
        }
        if let Some(v) = self.continuation_token {
            query_params.add("continuation-token", v);
        }

        Ok(S3Request::builder()
            .client(self.client)
            .method(Method::GET)
            .region(self.region)
            .bucket(self.bucket)
            .query_params(query_params)
            .headers(self.extra_headers.unwrap_or_default())
            .build())
    }
}
