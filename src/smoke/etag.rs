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

//! Local recomputation of S3 ETags.
//!
//! A single-request upload has the hex MD5 of the object as its ETag. A
//! multipart upload has a composite ETag: the hex MD5 of the concatenated
//! binary MD5 digests of every part, followed by `-<part count>`.

use crate::smoke::chunked_reader::ChunkedReader;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const HASH_BUFFER_SIZE: usize = 5 * 1024 * 1024;

/// Hex MD5 digest of a whole file, read in 5 MiB blocks.
pub fn file_md5_hex(path: impl AsRef<Path>) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut ctx = md5::Context::new();
    let mut buf = vec![0u8; HASH_BUFFER_SIZE];
    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        ctx.consume(&buf[..n]);
    }
    Ok(format!("{:x}", ctx.compute()))
}

/// Composite multipart ETag of a file split into `part_size` parts.
///
/// An empty file has no parts and yields the MD5 of nothing with a `-0` suffix.
pub fn composite_etag(path: impl AsRef<Path>, part_size: usize) -> io::Result<String> {
    composite_etag_of(ChunkedReader::open(path, part_size)?)
}

pub(crate) fn composite_etag_of<R: Read>(chunks: ChunkedReader<R>) -> io::Result<String> {
    let mut ctx = md5::Context::new();
    let mut count = 0usize;
    for chunk in chunks {
        let chunk = chunk?;
        ctx.consume(md5::compute(&chunk.data).0);
        count += 1;
    }
    Ok(format!("{:x}-{count}", ctx.compute()))
}

/// Compares two ETags, ignoring surrounding double quotes.
pub fn etag_matches(a: &str, b: &str) -> bool {
    a.trim_matches('"') == b.trim_matches('"')
}
