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
    AbortMultipartUpload, AbortMultipartUploadBldr, CompleteMultipartUpload,
    CompleteMultipartUploadBldr, CreateMultipartUpload, CreateMultipartUploadBldr, PutObject,
    PutObjectBldr, UploadPart, UploadPartBldr,
};
use crate::s3::types::PartInfo;
use bytes::Bytes;

impl S3Client {
    /// Creates a [`PutObject`] request builder to upload `data` in a single request.
    ///
    /// To execute the request, call [`PutObject::send()`](crate::s3::types::S3Api::send),
    /// which returns a [`Result`] containing a [`PutObjectResponse`](crate::s3::response::PutObjectResponse).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use s3smoke::s3::client::S3Client;
    /// use s3smoke::s3::response::a_response_traits::HasEtagFromHeaders;
    /// use s3smoke::s3::types::S3Api;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = S3Client::new::<s3smoke::s3::creds::StaticProvider>(Default::default(), None, None).unwrap();
    ///     let resp = client
    ///         .put_object("bucket-name", "object-name", "hello".into())
    ///         .build().send().await.unwrap();
    ///     println!("etag: {}", resp.etag().unwrap());
    /// }
    /// ```
    pub fn put_object<S1: Into<String>, S2: Into<String>>(
        &self,
        bucket: S1,
        object: S2,
        data: Bytes,
    ) -> PutObjectBldr {
        PutObject::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
            .data(data)
    }

    /// Creates a [`CreateMultipartUpload`] request builder.
    ///
    /// To execute the request, call [`CreateMultipartUpload::send()`](crate::s3::types::S3Api::send),
    /// which returns a [`Result`] containing a [`CreateMultipartUploadResponse`](crate::s3::response::CreateMultipartUploadResponse).
    pub fn create_multipart_upload<S1: Into<String>, S2: Into<String>>(
        &self,
        bucket: S1,
        object: S2,
    ) -> CreateMultipartUploadBldr {
        CreateMultipartUpload::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
    }

    /// Creates an [`UploadPart`] request builder. Part numbers run from 1 to 10000.
    pub fn upload_part<S1: Into<String>, S2: Into<String>, S3: Into<String>>(
        &self,
        bucket: S1,
        object: S2,
        upload_id: S3,
        part_number: u16,
        data: Bytes,
    ) -> UploadPartBldr {
        UploadPart::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
            .upload_id(upload_id)
            .part_number(part_number)
            .data(data)
    }

    /// Creates a [`CompleteMultipartUpload`] request builder.
    pub fn complete_multipart_upload<S1: Into<String>, S2: Into<String>, S3: Into<String>>(
        &self,
        bucket: S1,
        object: S2,
        upload_id: S3,
        parts: Vec<PartInfo>,
    ) -> CompleteMultipartUploadBldr {
        CompleteMultipartUpload::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
            .upload_id(upload_id)
            .parts(parts)
    }

    /// Creates an [`AbortMultipartUpload`] request builder.
    pub fn abort_multipart_upload<S1: Into<String>, S2: Into<String>, S3: Into<String>>(
        &self,
        bucket: S1,
        object: S2,
        upload_id: S3,
    ) -> AbortMultipartUploadBldr {
        AbortMultipartUpload::builder()
            .client(self.clone())
            .bucket(bucket)
            .object(object)
            .upload_id(upload_id)
    }
}
