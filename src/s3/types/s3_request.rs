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

//! S3Request struct and implementation for executing HTTP requests.

use crate::s3::client::{DEFAULT_REGION, S3Client};
use crate::s3::error::Error;
use crate::s3::multimap_ext::Multimap;
use bytes::Bytes;
use http::Method;
use typed_builder::TypedBuilder;

/// Generic S3Request
#[derive(Clone, Debug, TypedBuilder)]
pub struct S3Request {
    #[builder(!default)] // force required
    pub(crate) client: S3Client,

    #[builder(!default)] // force required
    pub(crate) method: Method,

    #[builder(default, setter(into))]
    region: Option<String>,

    #[builder(default, setter(into))]
    pub(crate) bucket: Option<String>,

    #[builder(default, setter(into))]
    pub(crate) object: Option<String>,

    #[builder(default)]
    pub(crate) query_params: Multimap,

    #[builder(default)]
    headers: Multimap,

    #[builder(default, setter(into))]
    body: Option<Bytes>,

    /// region computed by [`S3Request::execute`]
    #[builder(default, setter(skip))]
    pub(crate) inner_region: String,
}

impl S3Request {
    /// Region the request is signed for: the explicit region, else the
    /// client's configured region, else `us-east-1`.
    fn compute_inner_region(&self) -> String {
        match &self.region {
            Some(r) if !r.is_empty() => r.clone(),
            _ => match self.client.region() {
                "" => DEFAULT_REGION.to_string(),
                r => r.to_string(),
            },
        }
    }

    pub fn headers(&self) -> &Multimap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Execute the request, returning the response. Only used in [`S3Api::send()`](crate::s3::types::S3Api::send)
    pub async fn execute(&mut self) -> Result<reqwest::Response, Error> {
        self.inner_region = self.compute_inner_region();

        self.client
            .execute(
                self.method.clone(),
                &self.inner_region,
                &mut self.headers,
                &self.query_params,
                self.bucket.as_deref(),
                self.object.as_deref(),
                self.body.clone(),
            )
            .await
    }
}
