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

//! HTTP URL definitions

use crate::s3::error::ValidationErr;
use crate::s3::multimap_ext::{Multimap, MultimapExt};
use crate::s3::utils::urlencode_object_key;
use http::Uri;
use std::fmt;
use std::str::FromStr;

/// Represents HTTP URL
#[derive(Clone, Debug)]
pub struct Url {
    pub https: bool,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub query: Multimap,
}

impl Url {
    pub fn host_header_value(&self) -> String {
        if self.port > 0 {
            return format!("{}:{}", self.host, self.port);
        }
        self.host.clone()
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.host.is_empty() {
            return Err(fmt::Error);
        }

        f.write_str(if self.https { "https://" } else { "http://" })?;
        f.write_str(&self.host_header_value())?;

        if !self.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&self.path)?;

        if !self.query.is_empty() {
            f.write_str("?")?;
            f.write_str(&self.query.to_query_string())?;
        }

        Ok(())
    }
}

/// Represents Base URL of S3 endpoint.
///
/// Requests are always built path-style (`scheme://host:port/bucket/key`), which
/// every S3-compatible server accepts.
#[derive(Clone, Debug)]
pub struct BaseUrl {
    pub https: bool,
    host: String,
    port: u16,
    pub region: String,
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            https: false,
            host: "127.0.0.1".to_string(),
            port: 9000,
            region: String::new(),
        }
    }
}

impl FromStr for BaseUrl {
    type Err = ValidationErr;

    /// Convert a string to a BaseUrl.
    ///
    /// ```
    /// use s3smoke::s3::http::BaseUrl;
    ///
    /// let base_url: BaseUrl = "http://s3.obs.cstcloud.cn".parse().unwrap();
    /// assert!(!base_url.https);
    /// let base_url: BaseUrl = "localhost:9000".parse().unwrap();
    /// assert!(base_url.https);
    /// ```
    fn from_str(s: &str) -> Result<Self, ValidationErr> {
        let url = s.parse::<Uri>()?;

        let https = match url.scheme() {
            None => true,
            Some(scheme) => match scheme.as_str() {
                "http" => false,
                "https" => true,
                _ => {
                    return Err(ValidationErr::InvalidBaseUrl(
                        "scheme must be http or https".into(),
                    ));
                }
            },
        };

        let host = match url.host() {
            Some(h) if !h.is_empty() => h,
            _ => {
                return Err(ValidationErr::InvalidBaseUrl(
                    "valid host must be provided".into(),
                ));
            }
        };

        let host = match host.parse::<std::net::Ipv6Addr>() {
            Ok(_) => format!("[{host}]"),
            Err(_) => host.to_string(),
        };

        let mut port = url.port_u16().unwrap_or(0);
        if (https && port == 443) || (!https && port == 80) {
            port = 0;
        }

        if url.path() != "/" && !url.path().is_empty() {
            return Err(ValidationErr::InvalidBaseUrl(
                "path must be empty for base URL".into(),
            ));
        }

        if url.query().is_some() {
            return Err(ValidationErr::InvalidBaseUrl(
                "query must be none for base URL".into(),
            ));
        }

        Ok(BaseUrl {
            https,
            host,
            port,
            region: String::new(),
        })
    }
}

impl BaseUrl {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Builds URL from base URL for given parameters for S3 operation
    pub fn build_url(
        &self,
        query: &Multimap,
        bucket_name: Option<&str>,
        object_name: Option<&str>,
    ) -> Result<Url, ValidationErr> {
        let mut path = String::from("/");

        if let Some(bucket) = bucket_name {
            if bucket.is_empty() {
                return Err(ValidationErr::UrlBuildError(
                    "bucket name cannot be empty".into(),
                ));
            }
            path.push_str(bucket);

            if let Some(v) = object_name {
                if !v.starts_with('/') {
                    path.push('/');
                }
                path.push_str(&urlencode_object_key(v));
            }
        } else if object_name.is_some() {
            return Err(ValidationErr::UrlBuildError(
                "object name requires a bucket name".into(),
            ));
        }

        Ok(Url {
            https: self.https,
            host: self.host.clone(),
            port: self.port,
            path,
            query: query.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url() {
        let u: BaseUrl = "http://s3.obs.cstcloud.cn".parse().unwrap();
        assert!(!u.https);
        assert_eq!(u.host(), "s3.obs.cstcloud.cn");
        assert_eq!(u.port(), 0);

        let u: BaseUrl = "https://localhost:9000/".parse().unwrap();
        assert!(u.https);
        assert_eq!(u.port(), 9000);

        let u: BaseUrl = "http://[::1]:9000".parse().unwrap();
        assert_eq!(u.host(), "[::1]");

        let u: BaseUrl = "https://play.min.io:443".parse().unwrap();
        assert_eq!(u.port(), 0);
    }

    #[test]
    fn test_parse_base_url_rejects_invalid() {
        assert!("ftp://localhost".parse::<BaseUrl>().is_err());
        assert!("http://localhost/bucket".parse::<BaseUrl>().is_err());
        assert!("http://localhost/?a=b".parse::<BaseUrl>().is_err());
    }

    #[test]
    fn test_build_url_path_style() {
        let base: BaseUrl = "http://localhost:9000".parse().unwrap();
        let mut query = Multimap::new();
        query.add("uploadId", "abc");
        query.add("partNumber", "1");

        let url = base
            .build_url(&query, Some("test-harbor-s3"), Some("a/s3 object.data"))
            .unwrap();
        assert_eq!(url.path, "/test-harbor-s3/a/s3%20object.data");
        assert_eq!(url.host_header_value(), "localhost:9000");
        let s = url.to_string();
        assert!(s.starts_with("http://localhost:9000/test-harbor-s3/a/s3%20object.data?"));
        assert!(s.contains("uploadId=abc"));
        assert!(s.contains("partNumber=1"));

        let url = base.build_url(&Multimap::new(), None, None).unwrap();
        assert_eq!(url.to_string(), "http://localhost:9000/");
    }

    #[test]
    fn test_build_url_requires_bucket_for_object() {
        let base = BaseUrl::default();
        assert!(base.build_url(&Multimap::new(), None, Some("key")).is_err());
        assert!(base.build_url(&Multimap::new(), Some(""), None).is_err());
    }
}
