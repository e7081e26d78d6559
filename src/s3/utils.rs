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

//! Various utility and helper functions

use crate::s3::error::ValidationErr;
use crate::s3::multimap_ext::{Multimap, MultimapExt};
use base64::engine::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, NaiveDateTime, ParseError, Utc};
use lazy_static::lazy_static;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use sha2::{Digest, Sha256};
use xmltree::Element;

/// Date and time with UTC timezone
pub type UtcTime = DateTime<Utc>;

/// Encodes data using base64 algorithm
pub fn b64encode<T: AsRef<[u8]>>(input: T) -> String {
    BASE64.encode(input)
}

/// URL-encodes a query parameter key or value the way Signature V4 expects.
pub fn url_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Gets hex encoded SHA256 hash of given data
pub fn sha256_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Gets base64 encoded MD5 hash of given data, as sent in `Content-MD5`
pub fn md5sum_hash(data: &[u8]) -> String {
    b64encode(md5::compute(data).as_slice())
}

/// Gets hex encoded MD5 hash of given data
pub fn md5_hex(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// Gets current UTC time
pub fn utc_now() -> UtcTime {
    chrono::offset::Utc::now()
}

/// Gets signer date value of given time
pub fn to_signer_date(time: UtcTime) -> String {
    time.format("%Y%m%d").to_string()
}

/// Gets AMZ date value of given time
pub fn to_amz_date(time: UtcTime) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Gets ISO8601 UTC formatted value of given time
pub fn to_iso8601utc(time: UtcTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S.%3fZ").to_string()
}

/// Parses ISO8601 UTC formatted value to time
pub fn from_iso8601utc(s: &str) -> Result<UtcTime, ParseError> {
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(
        match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S.%3fZ") {
            Ok(d) => d,
            _ => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")?,
        },
        Utc,
    ))
}

/// Parses HTTP header value to time
pub fn from_http_header_value(s: &str) -> Result<UtcTime, ParseError> {
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(
        NaiveDateTime::parse_from_str(s, "%a, %d %b %Y %H:%M:%S GMT")?,
        Utc,
    ))
}

const OBJECT_KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

pub fn urlencode_object_key(key: &str) -> String {
    utf8_percent_encode(key, OBJECT_KEY_ENCODE_SET).collect()
}

/// Strips the double quotes servers put around ETag values.
pub fn trim_quotes(mut s: String) -> String {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s.drain(0..1);
        s.pop();
    }
    s
}

/// Merges `key` (with an empty value) into the optional extra query parameters.
pub fn insert(data: Option<Multimap>, key: impl Into<String>) -> Multimap {
    let mut result: Multimap = data.unwrap_or_default();
    result.add(key.into(), "");
    result
}

/// Validates given bucket name
pub fn check_bucket_name(bucket_name: impl AsRef<str>, strict: bool) -> Result<(), ValidationErr> {
    let bucket_name: &str = bucket_name.as_ref().trim();
    let invalid = |reason: &str| ValidationErr::InvalidBucketName {
        bucket_name: bucket_name.to_string(),
        reason: reason.into(),
    };

    if bucket_name.is_empty() {
        return Err(invalid("bucket name cannot be empty"));
    }
    if bucket_name.len() < 3 {
        return Err(invalid("bucket name cannot be less than 3 characters"));
    }
    if bucket_name.len() > 63 {
        return Err(invalid("bucket name cannot be greater than 63 characters"));
    }

    lazy_static! {
        static ref IPV4_REGEX: Regex = Regex::new(r"^((25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])$").unwrap();
        static ref VALID_BUCKET_NAME_REGEX: Regex =
            Regex::new("^[A-Za-z0-9][A-Za-z0-9\\.\\-_:]{1,61}[A-Za-z0-9]$").unwrap();
        static ref VALID_BUCKET_NAME_STRICT_REGEX: Regex =
            Regex::new("^[a-z0-9][a-z0-9\\.\\-]{1,61}[a-z0-9]$").unwrap();
    }

    if IPV4_REGEX.is_match(bucket_name) {
        return Err(invalid("bucket name cannot be an IP address"));
    }

    if bucket_name.contains("..") || bucket_name.contains(".-") || bucket_name.contains("-.") {
        return Err(invalid(
            "bucket name contains invalid successive characters '..', '.-' or '-.'",
        ));
    }

    if strict {
        if !VALID_BUCKET_NAME_STRICT_REGEX.is_match(bucket_name) {
            return Err(invalid("bucket name does not follow S3 standards strictly"));
        }
    } else if !VALID_BUCKET_NAME_REGEX.is_match(bucket_name) {
        return Err(invalid("bucket name does not follow S3 standards"));
    }

    Ok(())
}

/// Validates given object name
pub fn check_object_name(object_name: impl AsRef<str>) -> Result<(), ValidationErr> {
    let name = object_name.as_ref();
    if name.is_empty() {
        return Err(ValidationErr::InvalidObjectName(
            "object name cannot be empty".into(),
        ));
    }
    if name.len() > 1024 {
        return Err(ValidationErr::InvalidObjectName(format!(
            "object name ('{name}') cannot be greater than 1024 bytes"
        )));
    }
    Ok(())
}

/// Gets text value of given XML element for given tag.
pub fn get_text_result(element: &Element, tag: &str) -> Result<String, ValidationErr> {
    Ok(element
        .get_child(tag)
        .ok_or(ValidationErr::xml(format!("<{tag}> tag not found")))?
        .get_text()
        .ok_or(ValidationErr::xml(format!("text of <{tag}> tag not found")))?
        .to_string())
}

/// Gets optional text value of given XML element for given tag.
pub fn get_text_option(element: &Element, tag: &str) -> Option<String> {
    element
        .get_child(tag)
        .map(|v| v.get_text().unwrap_or_default().to_string())
}

/// Gets default text value of given XML element for given tag.
pub fn get_text_default(element: &Element, tag: &str) -> String {
    element.get_child(tag).map_or(String::new(), |v| {
        v.get_text().unwrap_or_default().to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Buf;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_sha256_hash_empty() {
        assert_eq!(
            sha256_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_md5_helpers() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5sum_hash(b""), "1B2M2Y8AsgTpgAmY7PhCfg==");
    }

    #[test]
    fn test_dates() {
        let t = from_iso8601utc("2013-05-24T00:00:00.000Z").unwrap();
        assert_eq!(to_amz_date(t), "20130524T000000Z");
        assert_eq!(to_signer_date(t), "20130524");
        assert_eq!(to_iso8601utc(t), "2013-05-24T00:00:00.000Z");

        let t = from_iso8601utc("2024-02-29T12:34:56Z").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 2, 29));

        let t = from_http_header_value("Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
        assert_eq!((t.hour(), t.minute()), (7, 28));
    }

    #[test]
    fn test_urlencode_object_key() {
        assert_eq!(urlencode_object_key("b/test.data"), "b/test.data");
        assert_eq!(urlencode_object_key("a b+c"), "a%20b%2Bc");
        assert_eq!(url_encode("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_trim_quotes() {
        assert_eq!(trim_quotes("\"abc\"".into()), "abc");
        assert_eq!(trim_quotes("abc".into()), "abc");
        assert_eq!(trim_quotes("\"".into()), "\"");
    }

    #[test]
    fn test_check_bucket_name() {
        assert!(check_bucket_name("test-harbor-s3", true).is_ok());
        assert!(check_bucket_name("ab", true).is_err());
        assert!(check_bucket_name("192.168.1.1", true).is_err());
        assert!(check_bucket_name("a..b", true).is_err());
        assert!(check_bucket_name("Upper-Case", true).is_err());
        assert!(check_bucket_name("Upper-Case", false).is_ok());
    }

    #[test]
    fn test_check_object_name() {
        assert!(check_object_name("a/s3_object_16MB.data").is_ok());
        assert!(check_object_name("").is_err());
        assert!(check_object_name("k".repeat(1025)).is_err());
    }

    #[test]
    fn test_xml_text_helpers() {
        let body = bytes::Bytes::from_static(b"<Root><A>1</A><B></B></Root>");
        let root = Element::parse(body.reader()).unwrap();
        assert_eq!(get_text_result(&root, "A").unwrap(), "1");
        assert!(get_text_result(&root, "C").is_err());
        assert_eq!(get_text_option(&root, "B"), Some(String::new()));
        assert_eq!(get_text_option(&root, "C"), None);
        assert_eq!(get_text_default(&root, "C"), "");
    }
}
