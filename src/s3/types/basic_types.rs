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

//! Basic S3 data types: Bucket, Owner, ListEntry, PartInfo

use crate::s3::utils::UtcTime;
use std::fmt;

/// Owner of a bucket or an object
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Owner {
    pub id: String,
    pub display_name: String,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.display_name.is_empty() {
            f.write_str(&self.id)
        } else {
            f.write_str(&self.display_name)
        }
    }
}

/// Contains the bucket name and creation date
#[derive(Clone, Debug)]
pub struct Bucket {
    pub name: String,
    pub creation_date: UtcTime,
}

/// Contains information of an item of
/// [list_objects()](crate::s3::client::S3Client::list_objects) API
#[derive(Clone, Debug)]
pub struct ListEntry {
    pub name: String,
    pub last_modified: Option<UtcTime>,
    pub etag: Option<String>,
    pub size: Option<u64>,
    pub storage_class: Option<String>,
    pub owner: Option<Owner>,
    /// True for entries taken from `<CommonPrefixes>`
    pub is_prefix: bool,
}

/// Contains part number and etag of an uploaded multipart part
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartInfo {
    pub number: u16,
    pub etag: String,
    pub size: u64,
}

impl PartInfo {
    pub fn new(number: u16, etag: impl Into<String>, size: u64) -> Self {
        Self {
            number,
            etag: etag.into(),
            size,
        }
    }
}

/// Key of an object to remove with
/// [delete_objects()](crate::s3::client::S3Client::delete_objects)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectToDelete {
    pub key: String,
}

impl From<&str> for ObjectToDelete {
    fn from(key: &str) -> Self {
        Self { key: key.to_owned() }
    }
}

impl From<String> for ObjectToDelete {
    fn from(key: String) -> Self {
        Self { key }
    }
}
