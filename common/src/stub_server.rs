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

//! Plain HTTP/1.1 S3 endpoint backed by memory, for driving the client and
//! the runner without a server. Signatures are not checked.

use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const LAST_MODIFIED: &str = "Wed, 01 Jan 2025 00:00:00 GMT";
const UPLOAD_ID: &str = "stub-upload-1";

#[derive(Default)]
struct StubState {
    failures: HashMap<&'static str, (u16, &'static str)>,
    omit_part_etag: bool,
    operations: Vec<&'static str>,
    objects: HashMap<String, Bytes>,
    parts: BTreeMap<u16, Bytes>,
}

struct Request {
    method: String,
    path: String,
    query: String,
    body: Bytes,
}

impl Request {
    fn bucket_and_key(&self) -> (&str, &str) {
        let path = self.path.trim_start_matches('/');
        path.split_once('/').unwrap_or((path, ""))
    }

    fn has_param(&self, name: &str) -> bool {
        self.param(name).is_some()
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.query.split('&').find_map(|p| {
            let (k, v) = p.split_once('=').unwrap_or((p, ""));
            (k == name).then_some(v)
        })
    }

    /// S3 operation name the request maps to.
    fn operation(&self) -> &'static str {
        let has_key = !self.bucket_and_key().1.is_empty();
        match (self.method.as_str(), has_key) {
            ("GET", _) if self.path == "/" => "ListBuckets",
            ("PUT", false) => "CreateBucket",
            ("DELETE", false) => "DeleteBucket",
            ("GET", false) => "ListObjectsV2",
            ("POST", false) if self.has_param("delete") => "DeleteObjects",
            ("PUT", true) if self.has_param("partNumber") => "UploadPart",
            ("PUT", true) => "PutObject",
            ("POST", true) if self.has_param("uploads") => "CreateMultipartUpload",
            ("POST", true) => "CompleteMultipartUpload",
            ("DELETE", true) if self.has_param("uploadId") => "AbortMultipartUpload",
            ("DELETE", true) => "DeleteObject",
            ("HEAD", true) => "HeadObject",
            ("GET", true) => "GetObject",
            _ => "Unknown",
        }
    }
}

struct Reply {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: Bytes,
    /// Sent as Content-Length without a body, as HEAD replies do.
    head_length: Option<usize>,
}

impl Reply {
    fn ok() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: Bytes::new(),
            head_length: None,
        }
    }

    fn xml(status: u16, body: String) -> Self {
        Self {
            status,
            headers: vec![("content-type", "application/xml".into())],
            body: Bytes::from(body),
            head_length: None,
        }
    }

    fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

fn quoted_md5(data: &[u8]) -> String {
    format!("\"{:x}\"", md5::compute(data))
}

/// A running stub endpoint; the listener stops when this is dropped.
pub struct StubS3 {
    addr: SocketAddr,
    state: Arc<Mutex<StubState>>,
    task: JoinHandle<()>,
}

impl StubS3 {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(StubState::default()));

        let shared = state.clone();
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let state = shared.clone();
                tokio::spawn(async move {
                    if let Err(e) = serve(stream, state).await {
                        log::debug!("stub connection closed: {e}");
                    }
                });
            }
        });

        Self { addr, state, task }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answers every `operation` request with an S3 `<Error>` body.
    pub fn fail(&self, operation: &'static str, status: u16, code: &'static str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(operation, (status, code));
    }

    /// Answers UploadPart without an `ETag` header.
    pub fn omit_part_etag(&self) {
        self.state.lock().unwrap().omit_part_etag = true;
    }

    /// Operations received so far, in order.
    pub fn operations(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().operations.clone()
    }
}

impl Drop for StubS3 {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(stream: TcpStream, state: Arc<Mutex<StubState>>) -> io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        let mut fields = line.split_whitespace();
        let method = fields.next().unwrap_or_default().to_string();
        let target = fields.next().unwrap_or_default().to_string();

        let mut content_length = 0usize;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).await?;
            let header = header.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).await?;

        let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));
        let request = Request {
            method,
            path: path.to_string(),
            query: query.to_string(),
            body: Bytes::from(body),
        };
        let reply = handle(&state, &request);

        let length = reply.head_length.unwrap_or(reply.body.len());
        let mut head = format!("HTTP/1.1 {} Stub\r\n", reply.status);
        for (name, value) in &reply.headers {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        head.push_str(&format!("content-length: {length}\r\n\r\n"));
        write.write_all(head.as_bytes()).await?;
        if reply.head_length.is_none() {
            write.write_all(&reply.body).await?;
        }
        write.flush().await?;
    }
}

fn handle(state: &Mutex<StubState>, req: &Request) -> Reply {
    let operation = req.operation();
    let mut state = state.lock().unwrap();
    state.operations.push(operation);

    if let Some(&(status, code)) = state.failures.get(operation) {
        return Reply::xml(
            status,
            format!(
                "<Error><Code>{code}</Code><Message>{operation} rejected</Message>\
                 <Resource>{}</Resource><RequestId>stub</RequestId></Error>",
                req.path
            ),
        );
    }

    let (bucket, key) = req.bucket_and_key();
    match operation {
        "ListBuckets" => Reply::xml(
            200,
            "<ListAllMyBucketsResult><Owner><ID>stub</ID><DisplayName>stub</DisplayName></Owner>\
             <Buckets><Bucket><Name>test-harbor-s3</Name>\
             <CreationDate>2025-01-01T00:00:00.000Z</CreationDate></Bucket></Buckets>\
             </ListAllMyBucketsResult>"
                .into(),
        ),
        "CreateBucket" => Reply::ok().header("location", format!("/{bucket}")),
        "DeleteBucket" | "DeleteObject" => {
            state.objects.remove(key);
            Reply::ok()
        }
        "ListObjectsV2" => Reply::xml(
            200,
            format!(
                "<ListBucketResult><Name>{bucket}</Name><Prefix>{}</Prefix><KeyCount>0</KeyCount>\
                 <MaxKeys>1000</MaxKeys><IsTruncated>false</IsTruncated></ListBucketResult>",
                req.param("prefix").unwrap_or_default()
            ),
        ),
        "PutObject" => {
            state.objects.insert(key.to_string(), req.body.clone());
            Reply::ok().header("etag", quoted_md5(&req.body))
        }
        "HeadObject" | "GetObject" => match state.objects.get(key) {
            Some(data) => {
                let mut reply = Reply::ok()
                    .header("etag", quoted_md5(data))
                    .header("last-modified", LAST_MODIFIED)
                    .header("content-type", "application/octet-stream");
                if operation == "HeadObject" {
                    reply.head_length = Some(data.len());
                } else {
                    reply.body = data.clone();
                }
                reply
            }
            None => Reply {
                status: 404,
                head_length: Some(0),
                ..Reply::ok()
            },
        },
        "CreateMultipartUpload" => {
            state.parts.clear();
            Reply::xml(
                200,
                format!(
                    "<InitiateMultipartUploadResult><Bucket>{bucket}</Bucket><Key>{key}</Key>\
                     <UploadId>{UPLOAD_ID}</UploadId></InitiateMultipartUploadResult>"
                ),
            )
        }
        "UploadPart" => {
            let number: u16 = req
                .param("partNumber")
                .and_then(|n| n.parse().ok())
                .unwrap_or_default();
            state.parts.insert(number, req.body.clone());
            if state.omit_part_etag {
                Reply::ok()
            } else {
                Reply::ok().header("etag", quoted_md5(&req.body))
            }
        }
        "CompleteMultipartUpload" => {
            let mut content = Vec::new();
            let mut digests = Vec::new();
            for data in state.parts.values() {
                content.extend_from_slice(data);
                digests.extend_from_slice(&md5::compute(data).0);
            }
            let etag = format!("{:x}-{}", md5::compute(&digests), state.parts.len());
            state.parts.clear();
            state.objects.insert(key.to_string(), Bytes::from(content));
            Reply::xml(
                200,
                format!(
                    "<CompleteMultipartUploadResult><Location>/{bucket}/{key}</Location>\
                     <Bucket>{bucket}</Bucket><Key>{key}</Key><ETag>&quot;{etag}&quot;</ETag>\
                     </CompleteMultipartUploadResult>"
                ),
            )
        }
        "AbortMultipartUpload" => {
            state.parts.clear();
            Reply::ok()
        }
        "DeleteObjects" => {
            let body = String::from_utf8_lossy(&req.body);
            let mut deleted = String::new();
            for chunk in body.split("<Key>").skip(1) {
                let name = chunk.split("</Key>").next().unwrap_or_default();
                state.objects.remove(name);
                deleted.push_str(&format!("<Deleted><Key>{name}</Key></Deleted>"));
            }
            Reply::xml(200, format!("<DeleteResult>{deleted}</DeleteResult>"))
        }
        _ => Reply {
            status: 400,
            ..Reply::ok()
        },
    }
}
