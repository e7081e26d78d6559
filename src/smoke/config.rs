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

//! Command-line and environment configuration.

use crate::s3::client::{MAX_MULTIPART_COUNT, MAX_PART_SIZE, MIN_PART_SIZE, S3Client, S3ClientBuilder};
use crate::s3::creds::StaticProvider;
use crate::s3::http::BaseUrl;
use crate::s3::utils::{check_bucket_name, check_object_name};
use crate::smoke::error::SmokeError;
use crate::smoke::payload::MIB;
use clap::Parser;
use clap::builder::FalseyValueParser;
use std::path::PathBuf;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings of a smoke-test run
#[derive(Parser, Debug, Clone)]
#[command(
    name = "s3smoke",
    about = "Smoke test for S3-compatible object storage",
    version,
    long_about = r#"
Runs a fixed sequence of bucket and object operations against one S3
endpoint and prints one status line per check.

All options can also be set through environment variables; command-line
arguments take precedence.

EXAMPLE:
  export SERVER_ENDPOINT=http://localhost:9000
  export ACCESS_KEY=minioadmin SECRET_KEY=minioadmin
  s3smoke --bucket test-harbor-s3 --payload-mb 16
"#
)]
pub struct SmokeConfig {
    /// S3 endpoint URL, e.g. http://localhost:9000
    #[arg(long, env = "SERVER_ENDPOINT", default_value = "http://localhost:9000")]
    pub endpoint: String,

    #[arg(long, env = "SERVER_REGION", default_value = "us-east-1")]
    pub region: String,

    #[arg(long, env = "ACCESS_KEY")]
    pub access_key: String,

    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Force TLS on or off; when unset the endpoint's scheme decides
    #[arg(long, env = "ENABLE_HTTPS")]
    pub enable_https: Option<bool>,

    /// Accept invalid TLS certificates
    #[arg(long, env = "IGNORE_CERT_CHECK", value_parser = FalseyValueParser::new())]
    pub ignore_cert_check: bool,

    #[arg(long, env = "SMOKE_BUCKET", default_value = "test-harbor-s3")]
    pub bucket: String,

    /// Key of the single-request object
    #[arg(long, env = "SMOKE_OBJECT_KEY", default_value = "b/test.data")]
    pub object_key: String,

    /// Prefix of the multipart object, also used for the listing check
    #[arg(long, env = "SMOKE_PREFIX", default_value = "a/")]
    pub prefix: String,

    /// Local path of the generated payload
    #[arg(long, env = "SMOKE_PAYLOAD_FILE", default_value = "./test.data")]
    pub payload_file: PathBuf,

    /// Payload size in MiB
    #[arg(long, env = "SMOKE_PAYLOAD_MB", default_value_t = 16)]
    pub payload_mb: usize,

    /// Multipart part size in bytes
    #[arg(long, env = "SMOKE_PART_SIZE", default_value_t = MIN_PART_SIZE)]
    pub part_size: u64,

    #[arg(long, env = "SMOKE_REQUEST_TIMEOUT", default_value_t = 300)]
    pub request_timeout_secs: u64,
}

impl SmokeConfig {
    /// Key of the multipart object: `<prefix>s3_object_<mb>MB.data`.
    pub fn multipart_key(&self) -> String {
        format!("{}s3_object_{}MB.data", self.prefix, self.payload_mb)
    }

    pub fn payload_bytes(&self) -> u64 {
        (self.payload_mb as u64).saturating_mul(MIB as u64)
    }

    pub fn validate(&self) -> Result<(), SmokeError> {
        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(SmokeError::Config(
                "access key and secret key are required".into(),
            ));
        }
        check_bucket_name(&self.bucket, true).map_err(|e| SmokeError::Config(e.to_string()))?;
        check_object_name(&self.object_key).map_err(|e| SmokeError::Config(e.to_string()))?;
        check_object_name(self.multipart_key()).map_err(|e| SmokeError::Config(e.to_string()))?;

        if self.payload_mb == 0 {
            return Err(SmokeError::Config("payload size must be positive".into()));
        }
        if self.payload_bytes() > MAX_PART_SIZE {
            return Err(SmokeError::Config(format!(
                "payload of {} MiB exceeds the single PUT limit of {MAX_PART_SIZE} bytes",
                self.payload_mb
            )));
        }
        if !(MIN_PART_SIZE..=MAX_PART_SIZE).contains(&self.part_size) {
            return Err(SmokeError::Config(format!(
                "part size {} must be between {MIN_PART_SIZE} and {MAX_PART_SIZE} bytes",
                self.part_size
            )));
        }
        let parts = self.payload_bytes().div_ceil(self.part_size);
        if parts > MAX_MULTIPART_COUNT as u64 {
            return Err(SmokeError::Config(format!(
                "payload of {} MiB needs {parts} parts of {} bytes; at most {MAX_MULTIPART_COUNT} are allowed",
                self.payload_mb, self.part_size
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(SmokeError::Config("request timeout must be positive".into()));
        }

        self.base_url()?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<BaseUrl, SmokeError> {
        let mut base_url: BaseUrl = self
            .endpoint
            .parse()
            .map_err(|e| SmokeError::Config(format!("endpoint '{}': {e}", self.endpoint)))?;
        if let Some(https) = self.enable_https {
            base_url.https = https;
        }
        base_url.region = self.region.clone();
        Ok(base_url)
    }

    pub fn build_client(&self) -> Result<S3Client, SmokeError> {
        let provider = StaticProvider::new(&self.access_key, &self.secret_key, None);
        S3ClientBuilder::new(self.base_url()?)
            .provider(Some(provider))
            .ignore_cert_check(Some(self.ignore_cert_check))
            .request_timeout(Some(Duration::from_secs(self.request_timeout_secs)))
            .connect_timeout(Some(CONNECT_TIMEOUT))
            .app_info(Some(("s3smoke".into(), env!("CARGO_PKG_VERSION").into())))
            .build()
            .map_err(|e| SmokeError::Config(format!("failed to build client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> SmokeConfig {
        let mut args = vec![
            "s3smoke",
            "--access-key",
            "minioadmin",
            "--secret-key",
            "minioadmin",
            "--endpoint",
            "http://localhost:9000",
            "--bucket",
            "test-harbor-s3",
            "--prefix",
            "a/",
            "--payload-mb",
            "16",
            "--part-size",
            "5242880",
        ];
        args.extend_from_slice(extra);
        SmokeConfig::try_parse_from(args).unwrap()
    }

    #[test]
    fn multipart_key_uses_prefix_and_size() {
        let cfg = parse(&[]);
        assert_eq!(cfg.multipart_key(), "a/s3_object_16MB.data");
        cfg.validate().unwrap();
    }

    #[test]
    fn part_size_bounds() {
        let cfg = parse(&["--part-size", "1024"]);
        assert!(matches!(cfg.validate(), Err(SmokeError::Config(_))));
    }

    #[test]
    fn payload_above_single_put_limit() {
        let cfg = parse(&["--payload-mb", "5121", "--part-size", "104857600"]);
        assert!(matches!(cfg.validate(), Err(SmokeError::Config(_))));

        let cfg = parse(&["--payload-mb", "5120", "--part-size", "104857600"]);
        cfg.validate().unwrap();
    }

    #[test]
    fn ignore_cert_check_env_reads_as_flag() {
        // SAFETY: no other test reads or writes this variable
        unsafe { std::env::set_var("IGNORE_CERT_CHECK", "yes") };
        let enabled = parse(&[]).ignore_cert_check;
        unsafe { std::env::set_var("IGNORE_CERT_CHECK", "0") };
        let disabled = parse(&[]).ignore_cert_check;
        unsafe { std::env::remove_var("IGNORE_CERT_CHECK") };

        assert!(enabled);
        assert!(!disabled);
    }

    #[test]
    fn zero_payload_is_rejected() {
        let cfg = parse(&["--payload-mb", "0"]);
        assert!(matches!(cfg.validate(), Err(SmokeError::Config(_))));
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let cfg = parse(&["--endpoint", "ftp://localhost"]);
        assert!(matches!(cfg.validate(), Err(SmokeError::Config(_))));
    }

    #[test]
    fn https_override_and_region() {
        let cfg = parse(&["--enable-https", "true", "--region", "eu-west-1"]);
        let base_url = cfg.base_url().unwrap();
        assert!(base_url.https);
        assert_eq!(base_url.region, "eu-west-1");

        let cfg = parse(&[]);
        assert!(!cfg.base_url().unwrap().https);
    }
}
