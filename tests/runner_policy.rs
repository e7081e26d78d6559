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

//! Fatal and non-fatal check handling, driven against a local stub endpoint.

use s3_smoke_common::stub_server::StubS3;
use s3_smoke_common::utils::ScratchFile;
use s3smoke::s3::error::{Error, ValidationErr};
use s3smoke::smoke::config::SmokeConfig;
use s3smoke::smoke::error::SmokeError;
use s3smoke::smoke::multipart::{MultipartError, upload_file_multipart};
use s3smoke::smoke::payload::MIB;
use s3smoke::smoke::report::{Reporter, Tally};
use s3smoke::smoke::runner::SmokeTest;

fn stub_config(stub: &StubS3, payload: &ScratchFile) -> SmokeConfig {
    SmokeConfig {
        endpoint: stub.endpoint(),
        region: "us-east-1".into(),
        access_key: "minioadmin".into(),
        secret_key: "minioadmin".into(),
        enable_https: Some(false),
        ignore_cert_check: false,
        bucket: "test-harbor-s3".into(),
        object_key: "b/test.data".into(),
        prefix: "a/".into(),
        payload_file: payload.path().to_path_buf(),
        payload_mb: 1,
        part_size: 5 * MIB as u64,
        request_timeout_secs: 10,
    }
}

struct Outcome {
    result: Result<Tally, SmokeError>,
    out: String,
    err: String,
}

async fn run_against(stub: &StubS3, payload: &ScratchFile) -> Outcome {
    let config = stub_config(stub, payload);
    let client = config.build_client().unwrap();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = SmokeTest::with_reporter(client, config, Reporter::new(&mut out, &mut err))
        .run()
        .await;
    Outcome {
        result,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

#[tokio::test]
async fn clean_run_has_no_failures() {
    let stub = StubS3::start().await;
    let payload = ScratchFile::reserve();

    let run = run_against(&stub, &payload).await;
    let tally = run.result.unwrap();

    assert_eq!(tally.failed, 0, "stdout:\n{}\nstderr:\n{}", run.out, run.err);
    assert!(run.out.contains("[Ok] CreateBucket; Location=/test-harbor-s3"));
    assert!(run.out.contains("[Ok] UploadPart; PartNumber=1;"));
    assert!(run.out.contains("[Ok] DeleteObjects; Key=a/s3_object_1MB.data;"));
    assert!(run.out.contains("s3smoke finished:"));
    assert!(!payload.path().exists());
}

#[tokio::test]
async fn bucket_already_owned_counts_as_ok() {
    let stub = StubS3::start().await;
    stub.fail("CreateBucket", 409, "BucketAlreadyOwnedByYou");
    let payload = ScratchFile::reserve();

    let run = run_against(&stub, &payload).await;

    assert!(run.result.is_ok(), "stderr:\n{}", run.err);
    assert!(
        run.out
            .contains("[Ok] CreateBucket; bucket test-harbor-s3 already owned by you")
    );
    assert!(stub.operations().contains(&"ListBuckets"));
}

#[tokio::test]
async fn list_buckets_failure_stops_the_run() {
    let stub = StubS3::start().await;
    stub.fail("ListBuckets", 500, "InternalError");
    let payload = ScratchFile::reserve();

    let run = run_against(&stub, &payload).await;

    match run.result {
        Err(SmokeError::Request { operation, .. }) => assert_eq!(operation, "ListBuckets"),
        other => panic!("expected a ListBuckets failure, got {other:?}"),
    }
    assert_eq!(stub.operations(), vec!["CreateBucket", "ListBuckets"]);
    assert!(run.err.contains("[Failed] ListBuckets; failed to request,"));
    assert!(!run.out.contains("@@@ PutObject"));
    assert!(run.out.contains("s3smoke ending..."));
    assert!(!payload.path().exists());
}

#[tokio::test]
async fn delete_object_failure_is_not_fatal() {
    let stub = StubS3::start().await;
    stub.fail("DeleteObject", 500, "InternalError");
    let payload = ScratchFile::reserve();

    let run = run_against(&stub, &payload).await;
    let tally = run.result.unwrap();

    assert_eq!(tally.failed, 1);
    assert!(run.err.contains("[Failed] DeleteObject; failed to request,"));
    assert!(run.out.contains("@@@ MultipartUpload"));
    assert!(run.out.contains("@@@ DeleteBucket"));
    assert!(stub.operations().contains(&"CompleteMultipartUpload"));
    assert!(!payload.path().exists());
}

#[tokio::test]
async fn missing_part_etag_aborts_the_upload() {
    let stub = StubS3::start().await;
    stub.omit_part_etag();
    let payload = ScratchFile::reserve();
    let client = stub_config(&stub, &payload).build_client().unwrap();
    let file = ScratchFile::random(MIB);

    let err = upload_file_multipart(
        &client,
        "test-harbor-s3",
        "a/part.data",
        file.path(),
        5 * MIB,
        |_| {},
    )
    .await
    .unwrap_err();

    match err {
        MultipartError::UploadPart {
            part_number,
            source: Error::Validation(ValidationErr::MissingEtag(_)),
        } => assert_eq!(part_number, 1),
        other => panic!("expected a missing part ETag, got {other:?}"),
    }
    assert_eq!(
        stub.operations(),
        vec!["CreateMultipartUpload", "UploadPart", "AbortMultipartUpload"]
    );
}
