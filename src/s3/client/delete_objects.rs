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
use crate::s3::builders::{
    DeleteObject, DeleteObjectBldr, DeleteObjects, DeleteObjectsBldr,
};
use crate::s3::types::ObjectToDelete;

impl S3Client {
    /// Creates a [`DeleteObject`] request builder to delete a single object.
    ///
    /// To execute the request, call [`DeleteObject::send()`](crate::s3::types::S3Api::send),
    /// which returns a [`Result`] containing a [`DeleteObjectResponse`](crate::s3::response::DeleteObjectResponse).
    pub fn delete_object<S: Into<String>, D: Into<ObjectToDelete>>(
        &self,
        bucket: S,
        object: D,
    ) -> DeleteObjectBldr {
        DeleteObject::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
    }

    /// Creates a [`DeleteObjects`] request builder to delete up to 1000
    /// objects in one request.
    ///
    /// To execute the request, call [`DeleteObjects::send()`](crate::s3::types::S3Api::send),
    /// which returns a [`Result`] containing a [`DeleteObjectsResponse`](crate::s3::response::DeleteObjectsResponse).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use s3smoke::s3::client::S3Client;
    /// use s3smoke::s3::response::DeleteResult;
    /// use s3smoke::s3::types::S3Api;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = S3Client::new::<s3smoke::s3::creds::StaticProvider>(Default::default(), None, None).unwrap();
    ///     let resp = client
    ///         .delete_objects("bucket-name", vec!["a/one".into(), "a/two".into()])
    ///         .build().send().await.unwrap();
    ///     for r in resp.result().unwrap() {
    ///         match r {
    ///             DeleteResult::Deleted(d) => println!("deleted {}", d.name),
    ///             DeleteResult::Error(e) => println!("{}: {}", e.object_name, e.code),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn delete_objects<S: Into<String>>(
        &self,
        bucket: S,
        objects: Vec<ObjectToDelete>,
    ) -> DeleteObjectsBldr {
        DeleteObjects::builder()
            .client(self.clone())
            .bucket(bucket)
            .objects(objects)
    }
}
