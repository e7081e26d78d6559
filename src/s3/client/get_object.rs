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
use crate::s3::builders::{GetObject, GetObjectBldr};

impl S3Client {
    /// Creates a [`GetObject`] request builder to download an object.
    ///
    /// To execute the request, call [`GetObject::send()`](crate::s3::types::S3Api::send),
    /// which returns a [`Result`] containing a [`GetObjectResponse`](crate::s3::response::GetObjectResponse).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use s3smoke::s3::client::S3Client;
    /// use s3smoke::s3::response::GetObjectResponse;
    /// use s3smoke::s3::response::a_response_traits::HasEtagFromHeaders;
    /// use s3smoke::s3::types::S3Api;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = S3Client::new::<s3smoke::s3::creds::StaticProvider>(Default::default(), None, None).unwrap();
    ///     let resp: GetObjectResponse = client
    ///         .get_object("bucket-name", "object-name")
    ///         .build().send().await.unwrap();
    ///     println!("{} bytes, etag {}", resp.content().len(), resp.etag().unwrap());
    /// }
    /// ```
    pub fn get_object<S1: Into<String>, S2: Into<String>>(
        &self,
        bucket: S1,
        object: S2,
    ) -> GetObjectBldr {
        GetObject::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
    }
}
