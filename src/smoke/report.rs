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

//! Line-oriented status output of a smoke-test run.

use std::fmt::{self, Display};
use std::io::{self, Write};

/// Counts of reported results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub ok: usize,
    pub failed: usize,
    pub warnings: usize,
}

impl Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ok, {} failed, {} warnings",
            self.ok, self.failed, self.warnings
        )
    }
}

/// Writes status lines: results to `out`, request failures to `err`.
///
/// Line formats:
/// - `@@@ <Section>`
/// - `[Ok] <Operation>; <detail>`
/// - `[Failed] <Operation>; <detail>` for failed verifications
/// - `[Failed] <Operation>; failed to request, <error>` and
///   `[Error] <Operation>; request canceled due to timeout, <error>` on `err`
/// - `[Warning] <Operation>; <detail>`
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    tally: Tally,
}

impl Reporter<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            tally: Tally::default(),
        }
    }

    fn write_line(w: &mut impl Write, line: fmt::Arguments<'_>) {
        if let Err(e) = w.write_fmt(format_args!("{line}\n")) {
            log::debug!("failed to write status line: {e}");
        }
    }

    pub fn section(&mut self, name: &str) {
        Self::write_line(&mut self.out, format_args!("@@@ {name}"));
    }

    /// Free-form line, not counted.
    pub fn info(&mut self, line: impl Display) {
        Self::write_line(&mut self.out, format_args!("{line}"));
    }

    pub fn ok(&mut self, operation: &str, detail: impl Display) {
        self.tally.ok += 1;
        Self::write_line(&mut self.out, format_args!("[Ok] {operation}; {detail}"));
    }

    /// A request succeeded but its result did not verify.
    pub fn failed(&mut self, operation: &str, detail: impl Display) {
        self.tally.failed += 1;
        Self::write_line(&mut self.out, format_args!("[Failed] {operation}; {detail}"));
    }

    /// A request failed; `timed_out` selects the cancellation wording.
    pub fn request_failed(&mut self, operation: &str, err: impl Display, timed_out: bool) {
        self.tally.failed += 1;
        if timed_out {
            Self::write_line(
                &mut self.err,
                format_args!("[Error] {operation}; request canceled due to timeout, {err}"),
            );
        } else {
            Self::write_line(
                &mut self.err,
                format_args!("[Failed] {operation}; failed to request, {err}"),
            );
        }
    }

    pub fn warning(&mut self, operation: &str, detail: impl Display) {
        self.tally.warnings += 1;
        Self::write_line(&mut self.out, format_args!("[Warning] {operation}; {detail}"));
    }

    /// Writes the final tally line.
    pub fn summary(&mut self) {
        let tally = self.tally;
        Self::write_line(&mut self.out, format_args!("s3smoke finished: {tally}"));
        if let Err(e) = self.out.flush() {
            log::debug!("failed to flush status output: {e}");
        }
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn lines_and_tally() {
        let mut r = Reporter::new(Vec::new(), Vec::new());
        r.section("CreateBucket");
        r.ok("CreateBucket", "Location=/test-harbor-s3");
        r.failed("PutObject", "ETag(a) != fileMd5(b)");
        r.warning("CompleteMultipartUpload", "ETag(x-4) != fileEtag(y-4)");
        r.request_failed("ListBuckets", "connection refused", false);
        r.request_failed("GetObject", "operation timed out", true);
        r.summary();

        assert_eq!(
            r.tally(),
            Tally {
                ok: 1,
                failed: 3,
                warnings: 1
            }
        );

        let (out, err) = r.into_writers();
        assert_eq!(
            text(out),
            "@@@ CreateBucket\n\
             [Ok] CreateBucket; Location=/test-harbor-s3\n\
             [Failed] PutObject; ETag(a) != fileMd5(b)\n\
             [Warning] CompleteMultipartUpload; ETag(x-4) != fileEtag(y-4)\n\
             s3smoke finished: 1 ok, 3 failed, 1 warnings\n"
        );
        assert_eq!(
            text(err),
            "[Failed] ListBuckets; failed to request, connection refused\n\
             [Error] GetObject; request canceled due to timeout, operation timed out\n"
        );
    }
}
