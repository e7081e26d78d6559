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

use crate::s3::client::{DEFAULT_REGION, S3Client};
use crate::s3::error::ValidationErr;
use crate::s3::header_constants::*;
use crate::s3::multimap_ext::{Multimap, MultimapExt};
use crate::s3::response::CreateBucketResponse;
use crate::s3::types::{S3Api, S3Request, ToS3Request};
use crate::s3::utils::check_bucket_name;
use bytes::Bytes;
use http::Method;
use typed_builder::TypedBuilder;

/// Argument builder for the [`CreateBucket`](https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateBucket.html) S3 API operation.
///
/// This struct constructs the parameters required for the [`S3Client::create_bucket`](crate::s3::client::S3Client::create_bucket) method.
#[derive(Clone, Debug, TypedBuilder)]
pub struct CreateBucket {
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
    /// Canned ACL sent as `x-amz-acl`, e.g. `private`.
    #[builder(default, setter(into))]
    acl: Option<String>,
}

/// Builder type alias for [`CreateBucket`].
///
/// Constructed via [`CreateBucket::builder()`](CreateBucket::builder) and used to build a [`CreateBucket`] instance.
pub type CreateBucketBldr = CreateBucketBuilder<((S3Client,), (), (), (), (String,), ())>;

impl S3Api for CreateBucket {
    type S3Response = CreateBucketResponse;
}

impl ToS3Request for CreateBucket {
    fn to_s3request(self) -> Result<S3Request, ValidationErr> {
        check_bucket_name(&self.bucket, true)?;

        let region: String = match (self.region, self.client.region()) {
            (Some(r), _) if !r.is_empty() => r,
            (_, "") => DEFAULT_REGION.to_string(),
            (_, r) => r.to_string(),
        };

        let mut headers: Multimap = self.extra_headers.unwrap_or_default();
        if let Some(acl) = self.acl {
            headers.add(X_AMZ_ACL, acl);
        }

        let body: Option<Bytes> = match region.as_str() {
            DEFAULT_REGION => None,
            _ => Some(Bytes::from(format!(
                "<CreateBucketConfiguration><LocationConstraint>{region}</LocationConstraint></CreateBucketConfiguration>",
            ))),
        };

        Ok(S3Request::builder()
            .client(self.client)
            .method(Method::PUT)
            .region(region)
            .bucket(self.bucket)
            .query_params(self.extra_query_params.unwrap_or_default())
            .headers(headers)
            .body(body)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::http::BaseUrl;

    fn client(region: &str) -> S3Client {
        let mut base_url: BaseUrl = "http://localhost:9000".parse().unwrap();
        base_url.region = region.to_string();
        S3Client::new::<crate::s3::creds::StaticProvider>(base_url, None, None).unwrap()
    }

    #[test]
    fn default_region_sends_no_body() {
        let req = CreateBucket::builder()
            .client(client(""))
            .bucket("test-harbor-s3")
            .acl(Some("private".to_string()))
            .build()
            .to_s3request()
            .unwrap();
        assert!(req.body().is_none());
        assert_eq!(req.headers().get(X_AMZ_ACL).map(String::as_str), Some("private"));
    }

    #[test]
    fn other_region_sends_location_constraint() {
        let req = CreateBucket::builder()
            .client(client("eu-west-1"))
            .bucket("test-harbor-s3")
            .build()
            .to_s3request()
            .unwrap();
        let body = req.body().unwrap();
        assert!(
            std::str::from_utf8(body)
                .unwrap()
                .contains("<LocationConstraint>eu-west-1</LocationConstraint>")
        );
    }

    #[test]
    fn invalid_bucket_name_is_rejected() {
        let err = CreateBucket::builder()
            .client(client(""))
            .bucket("A")
            .build()
            .to_s3request()
            .unwrap_err();
        assert!(matches!(err, ValidationErr::InvalidBucketName { .. }));
    }
}
