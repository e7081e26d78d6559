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

//! Round trips against a live endpoint. Run with
//! `SERVER_ENDPOINT=... ACCESS_KEY=... SECRET_KEY=... cargo test -- --ignored`.

use bytes::Bytes;
use s3_smoke_common::test_context::TestContext;
use s3_smoke_common::utils::{ScratchFile, rand_bucket_name, rand_object_name};
use s3smoke::s3::response::a_response_traits::{HasBucket, HasEtagFromHeaders, HasObject};
use s3smoke::s3::response::{GetObjectResponse, ListObjectsResponse, PutObjectResponse};
use s3smoke::s3::s3_error_response::S3ErrorCode;
use s3smoke::s3::types::S3Api;
use s3smoke::s3::utils::md5_hex;
use s3smoke::smoke::config::SmokeConfig;
use s3smoke::smoke::etag::composite_etag;
use s3smoke::smoke::multipart::upload_file_multipart;
use s3smoke::smoke::payload::MIB;
use s3smoke::smoke::report::Reporter;
use s3smoke::smoke::runner::SmokeTest;

#[tokio::test]
#[ignore = "needs a live S3 endpoint"]
async fn put_then_get_returns_identical_bytes() {
    let ctx = TestContext::new_from_env();
    let (bucket_name, guard) = ctx.create_bucket_helper().await;
    let object_name = rand_object_name();
    let data = Bytes::from(vec![b'k'; 64 * 1024]);

    let put: PutObjectResponse = ctx
        .client
        .put_object(&bucket_name, &object_name, data.clone())
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(put.bucket(), bucket_name);
    assert_eq!(put.object(), object_name);
    assert_eq!(put.etag().unwrap(), md5_hex(&data));

    let get: GetObjectResponse = ctx
        .client
        .get_object(&bucket_name, &object_name)
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(get.content(), &data);

    let listing: ListObjectsResponse = ctx
        .client
        .list_objects(&bucket_name)
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(listing.contents.len(), 1);
    assert_eq!(listing.contents[0].name, object_name);

    guard.cleanup().await;
}

#[tokio::test]
#[ignore = "needs a live S3 endpoint"]
async fn multipart_etag_matches_local_composite() {
    let ctx = TestContext::new_from_env();
    let (bucket_name, guard) = ctx.create_bucket_helper().await;
    let object_name = rand_object_name();
    let file = ScratchFile::random(11 * MIB);
    let part_size = 5 * MIB;

    let completed = upload_file_multipart(
        &ctx.client,
        &bucket_name,
        &object_name,
        file.path(),
        part_size,
        |_| {},
    )
    .await
    .unwrap();

    assert_eq!(completed.parts.len(), 3);
    assert_eq!(
        completed.etag,
        composite_etag(file.path(), part_size).unwrap()
    );

    guard.cleanup().await;
}

#[tokio::test]
#[ignore = "needs a live S3 endpoint"]
async fn head_of_missing_object_is_no_such_key() {
    let ctx = TestContext::new_from_env();
    let (bucket_name, guard) = ctx.create_bucket_helper().await;

    let err = ctx
        .client
        .stat_object(&bucket_name, rand_object_name())
        .build()
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.s3_error_code(), Some(S3ErrorCode::NoSuchKey));

    guard.cleanup().await;
}

#[tokio::test]
#[ignore = "needs a live S3 endpoint"]
async fn full_run_reports_no_failures() {
    let ctx = TestContext::new_from_env();
    let payload = ScratchFile::reserve();
    let bucket = rand_bucket_name();
    let endpoint =
        std::env::var("SERVER_ENDPOINT").unwrap_or("http://localhost:9000".to_string());

    let config = SmokeConfig {
        endpoint,
        region: ctx.base_url.region.clone(),
        access_key: ctx.access_key.clone(),
        secret_key: ctx.secret_key.clone(),
        enable_https: Some(ctx.base_url.https),
        ignore_cert_check: ctx.ignore_cert_check.unwrap_or(false),
        bucket,
        object_key: "b/test.data".into(),
        prefix: "a/".into(),
        payload_file: payload.path().to_path_buf(),
        payload_mb: 6,
        part_size: 5 * MIB as u64,
        request_timeout_secs: 60,
    };
    config.validate().unwrap();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let tally = SmokeTest::with_reporter(ctx.client.clone(), config, Reporter::new(&mut out, &mut err))
        .run()
        .await
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert_eq!(tally.failed, 0, "stdout:\n{out}\nstderr:\n{}", String::from_utf8_lossy(&err));
    assert_eq!(tally.warnings, 0);
    assert!(out.contains("@@@ MultipartUpload"));
    assert!(out.contains("[Ok] UploadPart; PartNumber=2;"));
    assert!(out.contains("s3smoke ending..."));
    assert!(!payload.path().exists());
}
