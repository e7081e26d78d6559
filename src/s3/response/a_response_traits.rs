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

use crate::s3::error::ValidationErr;
use crate::s3::header_constants::*;
use crate::s3::types::S3Request;
use crate::s3::utils::{from_http_header_value, get_text_result, trim_quotes, UtcTime};
use bytes::{Buf, Bytes};
use http::HeaderMap;

#[macro_export]
/// Implements the `FromS3Response` trait for the specified types.
macro_rules! impl_from_s3response {
    ($($ty:ty),* $(,)?) => {
        $(
            #[async_trait::async_trait]
            impl $crate::s3::types::FromS3Response for $ty {
                async fn from_s3response(
                    request: $crate::s3::types::S3Request,
                    response: Result<reqwest::Response, $crate::s3::error::Error>,
                ) -> Result<Self, $crate::s3::error::Error> {
                    let mut resp: reqwest::Response = response?;
                    Ok(Self {
                        request,
                        headers: std::mem::take(resp.headers_mut()),
                        body: resp
                            .bytes()
                            .await
                            .map_err($crate::s3::error::ValidationErr::from)?,
                    })
                }
            }
        )*
    };
}

#[macro_export]
/// Implements the `HasS3Fields` trait for the specified types.
macro_rules! impl_has_s3fields {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::s3::response::a_response_traits::HasS3Fields for $ty {
                /// The request that was sent to the S3 API.
                fn request(&self) -> &$crate::s3::types::S3Request {
                    &self.request
                }

                /// The response headers of the S3 API.
                fn headers(&self) -> &http::HeaderMap {
                    &self.headers
                }

                /// The response body of the S3 API.
                fn body(&self) -> &bytes::Bytes {
                    &self.body
                }
            }
        )*
    };
}

pub trait HasS3Fields {
    /// The request that was sent to the S3 API.
    fn request(&self) -> &S3Request;
    /// HTTP headers returned by the server, containing metadata such as `Content-Type`, `ETag`, etc.
    fn headers(&self) -> &HeaderMap;
    /// The response body returned by the server.
    fn body(&self) -> &Bytes;
}

/// Returns the name of the S3 bucket.
pub trait HasBucket: HasS3Fields {
    #[inline]
    fn bucket(&self) -> &str {
        self.request().bucket.as_deref().unwrap_or_default()
    }
}

/// Returns the object key (name) of the S3 object.
pub trait HasObject: HasS3Fields {
    #[inline]
    fn object(&self) -> &str {
        self.request().object.as_deref().unwrap_or_default()
    }
}

/// Returns the region the request was signed for.
pub trait HasRegion: HasS3Fields {
    #[inline]
    fn region(&self) -> &str {
        &self.request().inner_region
    }
}

/// Returns the `ETag` header without its surrounding quotes; empty when absent.
pub trait HasEtagFromHeaders: HasS3Fields {
    #[inline]
    fn etag(&self) -> Result<String, ValidationErr> {
        let etag = match self.headers().get(ETAG) {
            Some(v) => v.to_str()?.to_string(),
            None => String::new(),
        };
        Ok(trim_quotes(etag))
    }
}

/// Returns the `<ETag>` element of an XML response body without its quotes.
pub trait HasEtagFromBody: HasS3Fields {
    fn etag(&self) -> Result<String, ValidationErr> {
        let root = xmltree::Element::parse(self.body().clone().reader())?;
        let etag: String = get_text_result(&root, "ETag")?;
        Ok(trim_quotes(etag))
    }
}

/// Object metadata carried in the headers of GET and HEAD responses.
pub trait HasObjectMeta: HasS3Fields {
    /// Value of `Content-Length`.
    fn size(&self) -> Result<u64, ValidationErr> {
        match self.headers().get(CONTENT_LENGTH) {
            Some(v) => Ok(v.to_str()?.parse::<u64>()?),
            None => Ok(0),
        }
    }

    /// Value of `Last-Modified`, if the server sent one.
    fn last_modified(&self) -> Result<Option<UtcTime>, ValidationErr> {
        match self.headers().get(LAST_MODIFIED) {
            Some(v) => Ok(Some(from_http_header_value(v.to_str()?)?)),
            None => Ok(None),
        }
    }

    fn content_type(&self) -> Option<&str> {
        self.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}
