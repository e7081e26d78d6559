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

//! Fixed-size chunking of a file for multipart upload.

use bytes::{Bytes, BytesMut};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::s3::client::MAX_MULTIPART_COUNT;

/// One part of a file: its 1-based position and its bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub number: u16,
    pub data: Bytes,
}

/// Iterator over consecutive `part_size` chunks of a file.
///
/// Every chunk except the last is exactly `part_size` bytes. An empty file
/// yields nothing, and a file whose size is a multiple of `part_size` ends
/// without a trailing empty chunk. After an error item the iterator is
/// exhausted.
#[derive(Debug)]
pub struct ChunkedReader<R> {
    reader: R,
    part_size: usize,
    next_number: u32,
    done: bool,
}

impl ChunkedReader<File> {
    pub fn open(path: impl AsRef<Path>, part_size: usize) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::new(file, part_size)
    }
}

impl<R: Read> ChunkedReader<R> {
    pub fn new(reader: R, part_size: usize) -> io::Result<Self> {
        if part_size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "part size must be positive",
            ));
        }
        Ok(Self {
            reader,
            part_size,
            next_number: 1,
            done: false,
        })
    }

    /// Fills `buf` as far as the source allows; returns the byte count, which
    /// is short only at end of input.
    fn read_full(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for ChunkedReader<R> {
    type Item = io::Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = BytesMut::zeroed(self.part_size);
        let n = match self.read_full(&mut buf) {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        if n < self.part_size {
            self.done = true;
        }
        if n == 0 {
            return None;
        }
        if self.next_number > MAX_MULTIPART_COUNT as u32 {
            self.done = true;
            return Some(Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("file has more than {MAX_MULTIPART_COUNT} parts of {} bytes", self.part_size),
            )));
        }

        buf.truncate(n);
        let number = self.next_number as u16;
        self.next_number += 1;
        Some(Ok(Chunk {
            number,
            data: buf.freeze(),
        }))
    }
}

/// Opens `path` and reads it on a blocking task, sending chunks through a
/// channel of capacity 1.
///
/// Open failures are returned directly. The producer stops once the receiver
/// is dropped.
pub fn spawn_chunk_producer(
    path: impl AsRef<Path>,
    part_size: usize,
) -> io::Result<(mpsc::Receiver<io::Result<Chunk>>, JoinHandle<()>)> {
    let reader = ChunkedReader::open(path, part_size)?;
    let (tx, rx) = mpsc::channel(1);

    let handle = tokio::task::spawn_blocking(move || {
        for item in reader {
            if tx.blocking_send(item).is_err() {
                log::debug!("chunk receiver dropped; stopping producer");
                break;
            }
        }
    });

    Ok((rx, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lengths(size: usize, part_size: usize) -> Vec<usize> {
        let data = vec![7u8; size];
        ChunkedReader::new(Cursor::new(data), part_size)
            .unwrap()
            .map(|c| c.unwrap().data.len())
            .collect()
    }

    #[test]
    fn sixteen_mib_in_five_mib_parts() {
        const MIB: usize = 1024 * 1024;
        assert_eq!(lengths(16 * MIB, 5 * MIB), vec![5 * MIB, 5 * MIB, 5 * MIB, MIB]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_chunk() {
        assert_eq!(lengths(30, 10), vec![10, 10, 10]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(lengths(0, 10).is_empty());
    }

    #[test]
    fn zero_part_size_is_rejected() {
        let err = ChunkedReader::new(Cursor::new(vec![1u8]), 0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn missing_file_fails_to_open() {
        assert!(ChunkedReader::open("/nonexistent/s3smoke/payload", 10).is_err());
        assert!(spawn_chunk_producer("/nonexistent/s3smoke/payload", 10).is_err());
    }

    #[test]
    fn chunks_are_numbered_and_contiguous() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let chunks: Vec<Chunk> = ChunkedReader::new(Cursor::new(data.clone()), 300)
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        let numbers: Vec<u16> = chunks.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
        assert_eq!(joined, data);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn read_error_ends_the_sequence() {
        let mut reader = ChunkedReader::new(FailingReader, 4).unwrap();
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[tokio::test]
    async fn producer_delivers_all_chunks() {
        let dir = std::env::temp_dir().join(format!("s3smoke-chunk-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("producer.data");
        std::fs::write(&path, vec![1u8; 25]).unwrap();

        let (mut rx, handle) = spawn_chunk_producer(&path, 10).unwrap();
        let mut sizes = Vec::new();
        while let Some(chunk) = rx.recv().await {
            sizes.push(chunk.unwrap().data.len());
        }
        handle.await.unwrap();
        assert_eq!(sizes, vec![10, 10, 5]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    quickcheck! {
        fn chunk_lengths_cover_input(size: u16, part: u8) -> bool {
            let size = size as usize;
            let part = (part as usize).max(1);
            let lens = lengths(size, part);
            let expected_count = size.div_ceil(part);
            let last_ok = match lens.last() {
                None => size == 0,
                Some(&l) => l == size - part * (expected_count - 1),
            };
            lens.len() == expected_count
                && lens.iter().sum::<usize>() == size
                && lens.iter().all(|&l| l > 0 && l <= part)
                && last_ok
        }
    }
}
