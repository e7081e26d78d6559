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

//! Test payload generation.

use rand::RngCore;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Symbols used for payload bytes: lowercase letters and digits without the
/// easily confused `i`, `l`, `o` and `0`.
pub const PAYLOAD_ALPHABET: &[u8; 32] = b"abcdefghjkmnpqrstuvwxyz123456789";

pub const MIB: usize = 1024 * 1024;

/// Returns `n` random bytes drawn from [`PAYLOAD_ALPHABET`].
pub fn random_payload_bytes(rng: &mut impl RngCore, n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    rng.fill_bytes(&mut buf);
    for b in buf.iter_mut() {
        *b = PAYLOAD_ALPHABET[(*b & 31) as usize];
    }
    buf
}

/// Creates (or truncates) `path` and fills it with `mb` MiB of random
/// alphabet bytes, written one MiB at a time.
pub fn generate_payload_file(path: impl AsRef<Path>, mb: usize) -> io::Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let mut rng = rand::rng();
    for _ in 0..mb {
        writer.write_all(&random_payload_bytes(&mut rng, MIB))?;
    }
    writer.flush()?;
    log::info!("generated {mb} MiB payload at {}", path.display());
    Ok(())
}

pub fn remove_payload_file(path: impl AsRef<Path>) -> io::Result<()> {
    std::fs::remove_file(path)
}
