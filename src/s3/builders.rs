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

//! Argument builders for [`S3Client`](crate::s3::client::S3Client) APIs

mod create_bucket;
mod delete_bucket;
mod delete_objects;
mod get_object;
mod list_buckets;
mod list_objects;
mod put_object;

pub use create_bucket::*;
pub use delete_bucket::*;
pub use delete_objects::*;
pub use get_object::*;
pub use list_buckets::*;
pub use list_objects::*;
pub use put_object::*;
