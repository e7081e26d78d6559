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

use s3smoke::s3::S3Client;
use s3smoke::s3::types::S3Api;

/// Cleanup guard that removes the bucket when it is dropped
pub struct CleanupGuard {
    client: S3Client,
    bucket_name: String,
}

impl CleanupGuard {
    #[allow(dead_code)]
    pub fn new<S: Into<String>>(client: S3Client, bucket_name: S) -> Self {
        Self {
            client,
            bucket_name: bucket_name.into(),
        }
    }

    pub async fn cleanup(&self) {
        cleanup(self.client.clone(), &self.bucket_name).await;
    }
}

/// Deletes up to one listing page of objects, then the bucket itself.
async fn empty_and_delete_bucket(
    client: &S3Client,
    bucket_name: &str,
) -> Result<(), s3smoke::s3::error::Error> {
    let listing = client.list_objects(bucket_name).build().send().await?;
    let keys: Vec<_> = listing
        .contents
        .into_iter()
        .map(|entry| entry.name.into())
        .collect();
    if !keys.is_empty() {
        client
            .delete_objects(bucket_name, keys)
            .quiet(true)
            .build()
            .send()
            .await?;
    }
    client.delete_bucket(bucket_name).build().send().await?;
    Ok(())
}

pub async fn cleanup(client: S3Client, bucket_name: &str) {
    tokio::select!(
        _ = tokio::time::sleep(std::time::Duration::from_secs(60)) => {
            eprintln!("Cleanup timeout after 60s while removing bucket {bucket_name}");
        },
        outcome = empty_and_delete_bucket(&client, bucket_name) => {
            if let Err(e) = outcome {
                eprintln!("Error removing bucket '{bucket_name}':\n{e}");
            }
        }
    );
}
