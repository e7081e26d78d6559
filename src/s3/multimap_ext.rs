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

use crate::s3::utils::url_encode;
use std::collections::BTreeMap;

/// Multimap for string key and string value
pub type Multimap = multimap::MultiMap<String, String>;

/// Trims the value and collapses runs of spaces into one, as required for
/// canonical header values.
fn collapse_spaces(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in s.split(' ').filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

pub trait MultimapExt {
    /// Adds a key-value pair to the multimap
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V);

    /// Adds a multimap to the current multimap
    fn add_multimap(&mut self, other: Multimap);

    /// Converts multimap to HTTP query string
    fn to_query_string(&self) -> String;

    /// Converts multimap to canonical query string
    fn get_canonical_query_string(&self) -> String;

    /// Converts multimap to signed headers and canonical headers
    fn get_canonical_headers(&self) -> (String, String);
}

impl MultimapExt for Multimap {
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.insert(key.into(), value.into());
    }

    fn add_multimap(&mut self, other: Multimap) {
        for (key, values) in other.into_iter() {
            self.insert_many(key, values);
        }
    }

    fn to_query_string(&self) -> String {
        let mut query = String::new();
        for (key, values) in self.iter_all() {
            for value in values {
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str(&url_encode(key));
                query.push('=');
                query.push_str(&url_encode(value));
            }
        }
        query
    }

    fn get_canonical_query_string(&self) -> String {
        let mut pairs: Vec<(String, String)> = self
            .iter_all()
            .flat_map(|(key, values)| values.iter().map(move |v| (url_encode(key), url_encode(v))))
            .collect();
        pairs.sort();

        pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn get_canonical_headers(&self) -> (String, String) {
        let mut btmap: BTreeMap<String, String> = BTreeMap::new();

        for (k, values) in self.iter_all() {
            let key = k.to_lowercase();
            if key == "authorization" || key == "user-agent" {
                continue;
            }

            let mut vs: Vec<&String> = values.iter().collect();
            vs.sort();
            let value = vs
                .into_iter()
                .map(|v| collapse_spaces(v))
                .collect::<Vec<_>>()
                .join(",");

            btmap.insert(key, value);
        }

        let signed_headers = btmap.keys().cloned().collect::<Vec<_>>().join(";");
        let canonical_headers = btmap
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join("\n");

        (signed_headers, canonical_headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(collapse_spaces("  hello   world  "), "hello world");
        assert_eq!(collapse_spaces("application/xml"), "application/xml");
        assert_eq!(collapse_spaces("   "), "");
        // only spaces are collapsed
        assert_eq!(collapse_spaces("a\t\tb"), "a\t\tb");
    }

    #[test]
    fn test_canonical_query_string_is_sorted_and_encoded() {
        let mut query = Multimap::new();
        query.add("prefix", "a/");
        query.add("list-type", "2");
        query.add("delimiter", "/");
        query.add("fetch-owner", "true");
        assert_eq!(
            query.get_canonical_query_string(),
            "delimiter=%2F&fetch-owner=true&list-type=2&prefix=a%2F"
        );
    }

    #[test]
    fn test_canonical_query_string_empty_value() {
        let mut query = Multimap::new();
        query.add("uploads", "");
        assert_eq!(query.get_canonical_query_string(), "uploads=");
    }

    #[test]
    fn test_canonical_headers_skip_authorization() {
        let mut headers = Multimap::new();
        headers.add("Host", "localhost:9000");
        headers.add("X-Amz-Date", "20130524T000000Z");
        headers.add("Authorization", "secret");
        headers.add("User-Agent", "s3smoke");
        headers.add("x-amz-meta-note", "  two   spaces ");

        let (signed, canonical) = headers.get_canonical_headers();
        assert_eq!(signed, "host;x-amz-date;x-amz-meta-note");
        assert_eq!(
            canonical,
            "host:localhost:9000\nx-amz-date:20130524T000000Z\nx-amz-meta-note:two spaces"
        );
    }
}
