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

//! Module layout of the harness
//!
//! [`runner::SmokeTest`] drives the checks. The multipart pipeline is split
//! into [`chunked_reader`] (file to parts), [`multipart`] (session life
//! cycle) and [`etag`] (local composite ETag).

pub mod chunked_reader;
pub mod config;
pub mod error;
pub mod etag;
pub mod multipart;
pub mod payload;
pub mod report;
pub mod runner;
