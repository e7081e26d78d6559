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

use crate::s3::error::{Error, ValidationErr};
use crate::s3::utils::{get_text_default, get_text_option};
use bytes::{Buf, Bytes};
use http::HeaderMap;
use std::str::FromStr;
use xmltree::Element;

/// Error codes as returned by the server in the `<Code>` element of an error body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum S3ErrorCode {
    #[default]
    NoError,
    PermanentRedirect,
    Redirect,
    BadRequest,
    /// The specified bucket does not exist
    NoSuchBucket,
    /// The specified key does not exist
    NoSuchKey,
    /// The specified multipart upload does not exist
    NoSuchUpload,
    /// The specified method is not allowed against this resource
    MethodNotAllowed,
    /// The bucket you tried to delete is not empty
    BucketNotEmpty,
    /// Your previous request to create the named bucket succeeded and you already own it
    BucketAlreadyOwnedByYou,
    /// The requested bucket name is not available
    BucketAlreadyExists,
    /// One or more of the specified parts could not be found
    InvalidPart,
    /// The list of parts was not in ascending order
    InvalidPartOrder,
    /// Your proposed upload is smaller than the minimum allowed object size
    EntityTooSmall,
    SignatureDoesNotMatch,
    RequestTimeTooSkewed,
    InternalError,
    SlowDown,
    ResourceNotFound,
    ResourceConflict,
    AccessDenied,

    OtherError(String), // catch-all for codes not listed above
}

#[allow(dead_code)]
const ALL_S3_ERROR_CODE: &[S3ErrorCode] = &[
    S3ErrorCode::NoError,
    S3ErrorCode::PermanentRedirect,
    S3ErrorCode::Redirect,
    S3ErrorCode::BadRequest,
    S3ErrorCode::NoSuchBucket,
    S3ErrorCode::NoSuchKey,
    S3ErrorCode::NoSuchUpload,
    S3ErrorCode::MethodNotAllowed,
    S3ErrorCode::BucketNotEmpty,
    S3ErrorCode::BucketAlreadyOwnedByYou,
    S3ErrorCode::BucketAlreadyExists,
    S3ErrorCode::InvalidPart,
    S3ErrorCode::InvalidPartOrder,
    S3ErrorCode::EntityTooSmall,
    S3ErrorCode::SignatureDoesNotMatch,
    S3ErrorCode::RequestTimeTooSkewed,
    S3ErrorCode::InternalError,
    S3ErrorCode::SlowDown,
    S3ErrorCode::ResourceNotFound,
    S3ErrorCode::ResourceConflict,
    S3ErrorCode::AccessDenied,
];

impl FromStr for S3ErrorCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_lowercase().as_str() {
            "noerror" => Ok(S3ErrorCode::NoError),
            "permanentredirect" => Ok(S3ErrorCode::PermanentRedirect),
            "redirect" => Ok(S3ErrorCode::Redirect),
            "badrequest" => Ok(S3ErrorCode::BadRequest),
            "nosuchbucket" => Ok(S3ErrorCode::NoSuchBucket),
            "nosuchkey" => Ok(S3ErrorCode::NoSuchKey),
            "nosuchupload" => Ok(S3ErrorCode::NoSuchUpload),
            "methodnotallowed" => Ok(S3ErrorCode::MethodNotAllowed),
            "bucketnotempty" => Ok(S3ErrorCode::BucketNotEmpty),
            "bucketalreadyownedbyyou" => Ok(S3ErrorCode::BucketAlreadyOwnedByYou),
            "bucketalreadyexists" => Ok(S3ErrorCode::BucketAlreadyExists),
            "invalidpart" => Ok(S3ErrorCode::InvalidPart),
            "invalidpartorder" => Ok(S3ErrorCode::InvalidPartOrder),
            "entitytoosmall" => Ok(S3ErrorCode::EntityTooSmall),
            "signaturedoesnotmatch" => Ok(S3ErrorCode::SignatureDoesNotMatch),
            "requesttimetooskewed" => Ok(S3ErrorCode::RequestTimeTooSkewed),
            "internalerror" => Ok(S3ErrorCode::InternalError),
            "slowdown" => Ok(S3ErrorCode::SlowDown),
            "resourcenotfound" => Ok(S3ErrorCode::ResourceNotFound),
            "resourceconflict" => Ok(S3ErrorCode::ResourceConflict),
            "accessdenied" => Ok(S3ErrorCode::AccessDenied),

            _ => Ok(S3ErrorCode::OtherError(s.to_owned())),
        }
    }
}

impl std::fmt::Display for S3ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            S3ErrorCode::NoError => write!(f, "NoError"),
            S3ErrorCode::PermanentRedirect => write!(f, "PermanentRedirect"),
            S3ErrorCode::Redirect => write!(f, "Redirect"),
            S3ErrorCode::BadRequest => write!(f, "BadRequest"),
            S3ErrorCode::NoSuchBucket => write!(f, "NoSuchBucket"),
            S3ErrorCode::NoSuchKey => write!(f, "NoSuchKey"),
            S3ErrorCode::NoSuchUpload => write!(f, "NoSuchUpload"),
            S3ErrorCode::MethodNotAllowed => write!(f, "MethodNotAllowed"),
            S3ErrorCode::BucketNotEmpty => write!(f, "BucketNotEmpty"),
            S3ErrorCode::BucketAlreadyOwnedByYou => write!(f, "BucketAlreadyOwnedByYou"),
            S3ErrorCode::BucketAlreadyExists => write!(f, "BucketAlreadyExists"),
            S3ErrorCode::InvalidPart => write!(f, "InvalidPart"),
            S3ErrorCode::InvalidPartOrder => write!(f, "InvalidPartOrder"),
            S3ErrorCode::EntityTooSmall => write!(f, "EntityTooSmall"),
            S3ErrorCode::SignatureDoesNotMatch => write!(f, "SignatureDoesNotMatch"),
            S3ErrorCode::RequestTimeTooSkewed => write!(f, "RequestTimeTooSkewed"),
            S3ErrorCode::InternalError => write!(f, "InternalError"),
            S3ErrorCode::SlowDown => write!(f, "SlowDown"),
            S3ErrorCode::ResourceNotFound => write!(f, "ResourceNotFound"),
            S3ErrorCode::ResourceConflict => write!(f, "ResourceConflict"),
            S3ErrorCode::AccessDenied => write!(f, "AccessDenied"),
            S3ErrorCode::OtherError(msg) => write!(f, "{msg}"),
        }
    }
}

/// Typed error returned by the server for a failed S3 operation.
#[derive(Clone, Debug)]
pub struct S3ErrorResponse {
    code: S3ErrorCode,
    message: Option<String>,
    headers: HeaderMap,
    resource: String,
    request_id: String,
    host_id: String,
    bucket_name: Option<String>,
    object_name: Option<String>,
}

impl S3ErrorResponse {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        headers: HeaderMap,
        code: S3ErrorCode,
        message: Option<String>,
        resource: String,
        request_id: String,
        host_id: String,
        bucket_name: Option<String>,
        object_name: Option<String>,
    ) -> Self {
        Self {
            code,
            message,
            headers,
            resource,
            request_id,
            host_id,
            bucket_name,
            object_name,
        }
    }

    pub fn new_from_body(body: Bytes, headers: HeaderMap) -> Result<Self, Error> {
        let root = Element::parse(body.reader()).map_err(ValidationErr::from)?;
        Self::new_from_element(&root, headers)
    }

    /// Builds the response from an already parsed `<Error>` element. Some
    /// operations (CompleteMultipartUpload) report failures inside a 200 body.
    pub fn new_from_element(root: &Element, headers: HeaderMap) -> Result<Self, Error> {
        Ok(Self {
            headers,
            code: S3ErrorCode::from_str(&get_text_default(root, "Code"))?,
            message: get_text_option(root, "Message"),
            resource: get_text_default(root, "Resource"),
            request_id: get_text_default(root, "RequestId"),
            host_id: get_text_default(root, "HostId"),
            bucket_name: get_text_option(root, "BucketName"),
            object_name: get_text_option(root, "Key"),
        })
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
    pub fn code(&self) -> S3ErrorCode {
        self.code.clone()
    }
    pub fn message(&self) -> &Option<String> {
        &self.message
    }
    pub fn resource(&self) -> &str {
        &self.resource
    }
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
    pub fn host_id(&self) -> &str {
        &self.host_id
    }
    pub fn bucket_name(&self) -> &Option<String> {
        &self.bucket_name
    }
    pub fn object_name(&self) -> &Option<String> {
        &self.object_name
    }
}

impl std::fmt::Display for S3ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "code: {}, message: {}, resource: {}, request_id: {}, host_id: {}",
            self.code,
            self.message.as_deref().unwrap_or_default(),
            self.resource,
            self.request_id,
            self.host_id,
        )
    }
}

impl std::error::Error for S3ErrorResponse {}
