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

//! S3 client to perform bucket and object operations.
//!
//! Every operation method returns a request builder; call `.build().send().await`
//! to execute it. Requests are signed with AWS Signature V4 when a credential
//! provider is configured and are sent path-style to the base URL.

use bytes::Bytes;
use http::HeaderMap;
pub use http::Method;
use std::mem;
use std::sync::Arc;
use std::time::Duration;

use crate::s3::creds::Provider;
use crate::s3::error::{Error, IoError, NetworkError, S3ServerError, ValidationErr};
use crate::s3::header_constants::*;
use crate::s3::http::BaseUrl;
use crate::s3::multimap_ext::{Multimap, MultimapExt};
use crate::s3::s3_error_response::{S3ErrorCode, S3ErrorResponse};
use crate::s3::signer::sign_v4_s3;
use crate::s3::utils::{sha256_hash, to_amz_date, utc_now};

mod create_bucket;
mod delete_bucket;
mod delete_objects;
mod get_object;
mod list_buckets;
mod list_objects;
mod put_object;
mod stat_object;

/// The default AWS region to be used if no other region is specified.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Minimum allowed size (in bytes) for a multipart upload part (except the last).
pub const MIN_PART_SIZE: u64 = 5_242_880; // 5 MiB

/// Maximum allowed size (in bytes) for a single multipart upload part.
pub const MAX_PART_SIZE: u64 = 5_368_709_120; // 5 GiB

/// Maximum number of parts allowed in a multipart upload.
pub const MAX_MULTIPART_COUNT: u16 = 10_000;

/// Client Builder manufactures a [`S3Client`] using given parameters.
#[derive(Debug)]
pub struct S3ClientBuilder {
    base_url: BaseUrl,
    /// Set the credential provider. If not, set anonymous access is used.
    provider: Option<Arc<dyn Provider + Send + Sync + 'static>>,
    /// Set flag to ignore certificate check. This is insecure and should only be used for testing.
    ignore_cert_check: Option<bool>,
    /// Set the app info as an Option of (app_name, app_version) pair. This will show up in the client's user-agent.
    app_info: Option<(String, String)>,
    /// Total time allowed for a request, from connect until the body is read.
    request_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl S3ClientBuilder {
    /// Creates a builder given a base URL for the S3 compatible object storage service.
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            provider: None,
            ignore_cert_check: None,
            app_info: None,
            request_timeout: None,
            connect_timeout: None,
        }
    }

    /// Set the credential provider. If not, set anonymous access is used.
    pub fn provider<P: Provider + Send + Sync + 'static>(mut self, provider: Option<P>) -> Self {
        self.provider = provider.map(|p| Arc::new(p) as Arc<dyn Provider + Send + Sync + 'static>);
        self
    }

    /// Set the app info as an Option of (app_name, app_version) pair. This will
    /// show up in the client's user-agent.
    pub fn app_info(mut self, app_info: Option<(String, String)>) -> Self {
        self.app_info = app_info;
        self
    }

    /// Set flag to ignore certificate check. This is insecure and should only
    /// be used for testing.
    pub fn ignore_cert_check(mut self, ignore_cert_check: Option<bool>) -> Self {
        self.ignore_cert_check = ignore_cert_check;
        self
    }

    /// Set the overall request timeout. A request that runs longer fails with
    /// an error for which [`Error::is_timeout`] returns true.
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Build the Client.
    pub fn build(self) -> Result<S3Client, Error> {
        let mut builder = reqwest::Client::builder().no_gzip();

        let mut user_agent = String::from("s3smoke (")
            + std::env::consts::OS
            + "; "
            + std::env::consts::ARCH
            + ") s3-smoke/"
            + env!("CARGO_PKG_VERSION");
        if let Some((app_name, app_version)) = self.app_info {
            user_agent.push_str(format!(" {app_name}/{app_version}").as_str());
        }
        builder = builder.user_agent(user_agent);

        if let Some(v) = self.request_timeout {
            builder = builder.timeout(v);
        }
        if let Some(v) = self.connect_timeout {
            builder = builder.connect_timeout(v);
        }

        #[cfg(any(
            feature = "default-tls",
            feature = "native-tls",
            feature = "rustls-tls"
        ))]
        if let Some(v) = self.ignore_cert_check {
            builder = builder.danger_accept_invalid_certs(v);
        }

        Ok(S3Client {
            http_client: builder.build().map_err(ValidationErr::from)?,
            shared: Arc::new(SharedClientItems {
                base_url: self.base_url,
                provider: self.provider,
            }),
        })
    }
}

/// Simple Storage Service (aka S3) client to perform bucket and object operations.
///
/// If credential provider is passed, all S3 operation requests are signed using
/// AWS Signature Version 4; else they are performed anonymously.
#[derive(Clone, Debug)]
pub struct S3Client {
    http_client: reqwest::Client,
    pub(crate) shared: Arc<SharedClientItems>,
}

impl S3Client {
    /// Returns a S3 client with given base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3smoke::s3::client::S3Client;
    /// use s3smoke::s3::creds::StaticProvider;
    /// use s3smoke::s3::http::BaseUrl;
    ///
    /// let base_url: BaseUrl = "http://localhost:9000".parse().unwrap();
    /// let static_provider = StaticProvider::new("minioadmin", "minioadmin", None);
    /// let client = S3Client::new(base_url, Some(static_provider), None).unwrap();
    /// ```
    pub fn new<P: Provider + Send + Sync + 'static>(
        base_url: BaseUrl,
        provider: Option<P>,
        ignore_cert_check: Option<bool>,
    ) -> Result<Self, Error> {
        S3ClientBuilder::new(base_url)
            .provider(provider)
            .ignore_cert_check(ignore_cert_check)
            .build()
    }

    /// Region configured on the base URL; empty when unset.
    pub fn region(&self) -> &str {
        &self.shared.base_url.region
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.shared.base_url
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn execute(
        &self,
        method: Method,
        region: &str,
        headers: &mut Multimap,
        query_params: &Multimap,
        bucket_name: Option<&str>,
        object_name: Option<&str>,
        body: Option<Bytes>,
    ) -> Result<reqwest::Response, Error> {
        let url = self
            .shared
            .base_url
            .build_url(query_params, bucket_name, object_name)?;

        headers.add(HOST, url.host_header_value());

        let sha256: String = match method {
            Method::PUT | Method::POST => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.add(CONTENT_TYPE, "application/octet-stream");
                }
                headers.add(
                    CONTENT_LENGTH,
                    body.as_ref().map_or(0, |b| b.len()).to_string(),
                );
                match body {
                    None => EMPTY_SHA256.into(),
                    Some(ref v) => {
                        let data = v.clone();
                        tokio::task::spawn_blocking(move || sha256_hash(&data))
                            .await
                            .map_err(|e| IoError::IOError(std::io::Error::other(e)))?
                    }
                }
            }
            _ => EMPTY_SHA256.into(),
        };
        headers.add(X_AMZ_CONTENT_SHA256, sha256.clone());

        let date = utc_now();
        headers.add(X_AMZ_DATE, to_amz_date(date));

        if let Some(p) = &self.shared.provider {
            let creds = p.fetch();
            if let Some(token) = creds.session_token {
                headers.add(X_AMZ_SECURITY_TOKEN, token);
            }
            sign_v4_s3(
                &method,
                &url.path,
                region,
                headers,
                query_params,
                &creds.access_key,
                &creds.secret_key,
                &sha256,
                date,
            );
        }

        log::debug!("{method} {url}");

        let mut req = self.http_client.request(method.clone(), url.to_string());
        for (key, values) in headers.iter_all() {
            for value in values {
                req = req.header(key, value);
            }
        }
        if matches!(method, Method::PUT | Method::POST) {
            req = req.body(body.unwrap_or_default());
        }

        let mut resp = req.send().await.map_err(NetworkError::ReqwestError)?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status_code = resp.status().as_u16();
        let headers: HeaderMap = mem::take(resp.headers_mut());
        let body: Bytes = resp.bytes().await.map_err(NetworkError::ReqwestError)?;

        let e: S3ErrorResponse = create_s3_error_response(
            body,
            status_code,
            headers,
            &url.path,
            bucket_name,
            object_name,
        )?;
        log::debug!("{method} {} failed: {e}", url.path);

        Err(Error::S3Server(S3ServerError::S3Error(Box::new(e))))
    }
}

#[derive(Debug)]
pub(crate) struct SharedClientItems {
    pub(crate) base_url: BaseUrl,
    pub(crate) provider: Option<Arc<dyn Provider + Send + Sync + 'static>>,
}

/// Builds the typed error for a non-success response. An XML body is parsed
/// as an S3 `<Error>`; bodiless responses (HEAD) get a code derived from the
/// HTTP status.
pub(crate) fn create_s3_error_response(
    body: Bytes,
    http_status_code: u16,
    headers: HeaderMap,
    resource: &str,
    bucket_name: Option<&str>,
    object_name: Option<&str>,
) -> Result<S3ErrorResponse, Error> {
    if !body.is_empty() {
        let content_type = headers
            .get(CONTENT_TYPE)
            .ok_or_else(|| {
                Error::S3Server(S3ServerError::InvalidServerResponse {
                    message: "missing Content-Type header".into(),
                    http_status_code,
                    content_type: String::new(),
                })
            })?
            .to_str()
            .map_err(ValidationErr::from)?;

        return if content_type.to_lowercase().contains("xml") {
            S3ErrorResponse::new_from_body(body, headers)
        } else {
            Err(Error::S3Server(S3ServerError::InvalidServerResponse {
                message: format!("expected content-type 'application/xml', but got {content_type}"),
                http_status_code,
                content_type: content_type.into(),
            }))
        };
    }

    let (code, message) = match http_status_code {
        301 => (S3ErrorCode::PermanentRedirect, "Moved Permanently".into()),
        307 => (S3ErrorCode::Redirect, "Temporary redirect".into()),
        400 => (S3ErrorCode::BadRequest, "Bad request".into()),
        403 => (S3ErrorCode::AccessDenied, "Access denied".into()),
        404 => match (bucket_name, object_name) {
            (_, Some(_)) => (S3ErrorCode::NoSuchKey, "Object does not exist".into()),
            (Some(_), None) => (S3ErrorCode::NoSuchBucket, "Bucket does not exist".into()),
            (None, None) => (
                S3ErrorCode::ResourceNotFound,
                "Request resource not found".into(),
            ),
        },
        405 | 501 => (
            S3ErrorCode::MethodNotAllowed,
            "The specified method is not allowed against this resource".into(),
        ),
        409 => match bucket_name {
            Some(_) => (S3ErrorCode::NoSuchBucket, "Bucket does not exist".into()),
            None => (
                S3ErrorCode::ResourceConflict,
                "Request resource conflicts".into(),
            ),
        },
        _ => {
            return Err(Error::Network(NetworkError::ServerError(http_status_code)));
        }
    };

    let header_text = |name: &str| -> Result<String, Error> {
        match headers.get(name) {
            Some(v) => Ok(v.to_str().map_err(ValidationErr::from)?.to_string()),
            None => Ok(String::new()),
        }
    };
    let request_id = header_text(X_AMZ_REQUEST_ID)?;
    let host_id = header_text(X_AMZ_ID_2)?;

    Ok(S3ErrorResponse::new(
        headers,
        code,
        Some(message),
        resource.to_string(),
        request_id,
        host_id,
        bucket_name.map(String::from),
        object_name.map(String::from),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn bodiless_404_on_object_is_no_such_key() {
        let mut headers = HeaderMap::new();
        headers.insert(X_AMZ_REQUEST_ID, HeaderValue::from_static("REQ1"));
        let e = create_s3_error_response(
            Bytes::new(),
            404,
            headers,
            "/bucket/key",
            Some("bucket"),
            Some("key"),
        )
        .unwrap();
        assert_eq!(e.code(), S3ErrorCode::NoSuchKey);
        assert_eq!(e.request_id(), "REQ1");
        assert_eq!(e.object_name().as_deref(), Some("key"));
    }

    #[test]
    fn bodiless_404_on_bucket_is_no_such_bucket() {
        let e = create_s3_error_response(
            Bytes::new(),
            404,
            HeaderMap::new(),
            "/bucket",
            Some("bucket"),
            None,
        )
        .unwrap();
        assert_eq!(e.code(), S3ErrorCode::NoSuchBucket);
    }

    #[test]
    fn xml_error_body_is_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        let body = Bytes::from_static(
            b"<Error><Code>BucketAlreadyOwnedByYou</Code><Message>owned</Message>\
              <BucketName>test-harbor-s3</BucketName><Resource>/test-harbor-s3</Resource>\
              <RequestId>1</RequestId><HostId>2</HostId></Error>",
        );
        let e = create_s3_error_response(body, 409, headers, "/test-harbor-s3", Some("test-harbor-s3"), None)
            .unwrap();
        assert_eq!(e.code(), S3ErrorCode::BucketAlreadyOwnedByYou);
    }

    #[test]
    fn non_xml_error_body_is_invalid_response() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
        let err = create_s3_error_response(
            Bytes::from_static(b"<html>bad gateway</html>"),
            502,
            headers,
            "/",
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::S3Server(S3ServerError::InvalidServerResponse {
                http_status_code: 502,
                ..
            })
        ));
    }

    #[test]
    fn unknown_bodiless_status_is_server_error() {
        let err =
            create_s3_error_response(Bytes::new(), 503, HeaderMap::new(), "/", None, None).unwrap_err();
        assert!(matches!(err, Error::Network(NetworkError::ServerError(503))));
    }
}
