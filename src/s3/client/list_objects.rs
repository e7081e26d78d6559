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

use super::S3Client;
use crate::s3::builders::{ListObjects, ListObjectsBldr};

impl S3Client {
    /// Creates a [`ListObjects`] request builder for one page of a
    /// ListObjectsV2 listing.
    ///
    /// To execute the request, call [`ListObjects::send()`](crate::s3::types::S3Api::send),
    /// which returns a [`Result`] containing a [`ListObjectsResponse`](crate::s3::response::ListObjectsResponse).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use s3smoke::s3::client::S3Client;
    /// use s3smoke::s3::types::S3Api;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = S3Client::new::<s3smoke::s3::creds::StaticProvider>(Default::default(), None, None).unwrap();
    ///     let resp = client
    ///         .list_objects("bucket-name")
    ///         .prefix(Some("a/".to_string()))
    ///         .delimiter(Some("/".to_string()))
    ///         .build().send().await.unwrap();
    ///     for entry in resp.contents.iter().chain(resp.common_prefixes.iter()) {
    ///         println!("{}", entry.name);
    ///     }
    /// }
    /// ```
    pub fn list_objects<S: Into<String>>(&self, bucket: S) -> ListObjectsBldr {
        ListObjects::builder().client(self.clone()).bucket(bucket)
    }
}
