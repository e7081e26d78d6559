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

use clap::Parser;
use s3smoke::smoke::config::SmokeConfig;
use s3smoke::smoke::runner::SmokeTest;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init(); // Note: set environment variable RUST_LOG="INFO" to log info and higher
    let config = SmokeConfig::parse();

    let client = match config.validate().and_then(|()| config.build_client()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("s3smoke: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "running smoke test against {} (bucket {})",
        config.endpoint,
        config.bucket
    );

    match SmokeTest::new(client, config).run().await {
        Ok(tally) if tally.failed == 0 => ExitCode::SUCCESS,
        Ok(tally) => {
            log::warn!("non-fatal checks failed: {tally}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("s3smoke: {e}");
            ExitCode::FAILURE
        }
    }
}
