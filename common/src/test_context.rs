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

use crate::cleanup_guard::CleanupGuard;
use crate::utils::rand_bucket_name;
use s3smoke::s3::S3Client;
use s3smoke::s3::client::S3ClientBuilder;
use s3smoke::s3::creds::StaticProvider;
use s3smoke::s3::http::BaseUrl;
use s3smoke::s3::types::S3Api;
use std::time::Duration;

/// Connection settings of a live endpoint, read from the environment.
#[derive(Clone)]
pub struct TestContext {
    pub client: S3Client,
    pub base_url: BaseUrl,
    pub access_key: String,
    pub secret_key: String,
    pub ignore_cert_check: Option<bool>,
}

impl TestContext {
    pub fn new_from_env() -> Self {
        const DEFAULT_SERVER_ENDPOINT: &str = "http://localhost:9000";
        const DEFAULT_ACCESS_KEY: &str = "minioadmin";
        const DEFAULT_SECRET_KEY: &str = "minioadmin";
        const DEFAULT_IGNORE_CERT_CHECK: &str = "false";
        const DEFAULT_SERVER_REGION: &str = "us-east-1";

        let host: String =
            std::env::var("SERVER_ENDPOINT").unwrap_or(DEFAULT_SERVER_ENDPOINT.to_string());
        log::debug!("SERVER_ENDPOINT={host}");
        let access_key: String =
            std::env::var("ACCESS_KEY").unwrap_or(DEFAULT_ACCESS_KEY.to_string());
        log::debug!("ACCESS_KEY={access_key}");
        let secret_key: String =
            std::env::var("SECRET_KEY").unwrap_or(DEFAULT_SECRET_KEY.to_string());
        log::debug!("SECRET_KEY=*****");
        let secure: Option<bool> = std::env::var("ENABLE_HTTPS")
            .ok()
            .and_then(|v| v.parse().ok());
        log::debug!("ENABLE_HTTPS={secure:?}");
        let ignore_cert_check: bool = std::env::var("IGNORE_CERT_CHECK")
            .unwrap_or(DEFAULT_IGNORE_CERT_CHECK.to_string())
            .parse()
            .unwrap_or(true);
        log::debug!("IGNORE_CERT_CHECK={ignore_cert_check}");
        let region: String =
            std::env::var("SERVER_REGION").unwrap_or(DEFAULT_SERVER_REGION.to_string());
        log::debug!("SERVER_REGION={region:?}");

        let mut base_url: BaseUrl = host.parse().unwrap();
        if let Some(secure) = secure {
            base_url.https = secure;
        }
        base_url.region = region;

        let client = S3ClientBuilder::new(base_url.clone())
            .provider(Some(StaticProvider::new(&access_key, &secret_key, None)))
            .ignore_cert_check(Some(ignore_cert_check))
            .request_timeout(Some(Duration::from_secs(60)))
            .build()
            .unwrap();

        Self {
            client,
            base_url,
            access_key,
            secret_key,
            ignore_cert_check: Some(ignore_cert_check),
        }
    }

    /// Creates a bucket with a random name; the guard removes it again.
    pub async fn create_bucket_helper(&self) -> (String, CleanupGuard) {
        let bucket_name = rand_bucket_name();
        let _resp = self
            .client
            .create_bucket(&bucket_name)
            .build()
            .send()
            .await
            .unwrap();
        let guard = CleanupGuard::new(self.client.clone(), &bucket_name);
        (bucket_name, guard)
    }
}
