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

//! Responses for [`S3Client`](crate::s3::client::S3Client) APIs

pub mod a_response_traits;

mod create_bucket;
mod delete_bucket;
mod delete_objects;
mod get_object;
mod list_buckets;
mod list_objects;
mod put_object;
mod stat_object;

pub use create_bucket::CreateBucketResponse;
pub use delete_bucket::DeleteBucketResponse;
pub use delete_objects::{
    DeleteError, DeleteObjectResponse, DeleteObjectsResponse, DeleteResult, DeletedObject,
};
pub use get_object::GetObjectResponse;
pub use list_buckets::ListBucketsResponse;
pub use list_objects::ListObjectsResponse;
pub use put_object::{
    AbortMultipartUploadResponse, CompleteMultipartUploadResponse, CreateMultipartUploadResponse,
    PutObjectResponse, UploadPartResponse,
};
pub use stat_object::StatObjectResponse;

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::s3::client::S3Client;
    use crate::s3::creds::StaticProvider;
    use crate::s3::types::S3Request;
    use bytes::Bytes;
    use http::Method;

    pub(crate) fn request(method: Method, bucket: &str, object: Option<&str>) -> S3Request {
        let client = S3Client::new::<StaticProvider>(Default::default(), None, None).unwrap();
        S3Request::builder()
            .client(client)
            .method(method)
            .bucket(bucket.to_string())
            .object(object.map(String::from))
            .build()
    }

    pub(crate) fn response(status: u16, headers: &[(&str, &str)], body: &'static [u8]) -> reqwest::Response {
        let mut builder = http::Response::builder().status(status);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        reqwest::Response::from(builder.body(Bytes::from_static(body)).unwrap())
    }
}
