// Copyright 2026 Google LLC
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
//! Query string parsing and re-encoding.
//!
//! Parameters are grouped by their decoded name and kept in name order, so
//! encoding is deterministic: `b=2&a=1&a=3` always comes back as
//! `a=1&a=3&b=2`. Each value also remembers the raw (still percent-encoded)
//! spelling of the name it arrived under. Allow-list matching runs on that
//! spelling, and encoding writes it back unchanged, so a name that was
//! allowed once is still allowed after a round trip (`ids[]` stays `ids[]`).

use std::collections::BTreeMap;
use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Param {
    // One entry per value, in step with `values`.
    raw_names: Vec<String>,
    values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Param>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let mut params: BTreeMap<String, Param> = BTreeMap::new();
        for segment in query.split('&').filter(|s| !s.is_empty()) {
            let raw_name = segment.split_once('=').map_or(segment, |(name, _)| name);
            let (name, value) = match form_urlencoded::parse(segment.as_bytes()).next() {
                Some(pair) => pair,
                None => continue,
            };
            let param = params.entry(name.into_owned()).or_default();
            param.raw_names.push(raw_name.to_string());
            param.values.push(value.into_owned());
        }
        QueryParams { params }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Decoded parameter names, in encoding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.params.get(name).map(|p| p.values.as_slice())
    }

    /// Drops every parameter for which `keep` rejects one of its raw name
    /// spellings, along with all of its values. Returns the decoded names
    /// that were dropped.
    pub fn retain_raw_names<F>(&mut self, mut keep: F) -> Vec<String>
    where
        F: FnMut(&str) -> bool,
    {
        let mut removed = Vec::new();
        self.params.retain(|name, param| {
            if param.raw_names.iter().all(|raw| keep(raw.as_str())) {
                true
            } else {
                removed.push(name.clone());
                false
            }
        });
        removed
    }

    /// Encodes as `name=value` pairs joined by `&`, names sorted. Each name
    /// keeps the raw spelling it arrived with; values are re-encoded as
    /// `application/x-www-form-urlencoded`. Returns an empty string when
    /// there are no parameters.
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();
        for param in self.params.values() {
            for (raw_name, value) in param.raw_names.iter().zip(&param.values) {
                let value: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
                pairs.push(format!("{}={}", raw_name, value));
            }
        }
        pairs.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let params = QueryParams::parse("");
        assert!(params.is_empty());
        assert_eq!(params.encode(), "");
    }

    #[test]
    fn test_encode_sorts_names() {
        let params = QueryParams::parse("bb=true&aa=1&testing=1");
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["aa", "bb", "testing"]);
        assert_eq!(params.encode(), "aa=1&bb=true&testing=1");
    }

    #[test]
    fn test_multi_value_kept_in_order() {
        let params = QueryParams::parse("b=2&a=1&b=1&a=3");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a").unwrap(), ["1".to_string(), "3".to_string()]);
        assert_eq!(params.encode(), "a=1&a=3&b=2&b=1");
    }

    #[test]
    fn test_name_without_value_encodes_with_equals() {
        let params = QueryParams::parse("flag&x=1&&");
        assert_eq!(params.get("flag").unwrap(), ["".to_string()]);
        assert_eq!(params.encode(), "flag=&x=1");
    }

    #[test]
    fn test_values_are_decoded_and_reencoded() {
        let params = QueryParams::parse("q=hello%20world&r=a+b&s=%2F");
        assert_eq!(params.get("q").unwrap(), ["hello world".to_string()]);
        assert_eq!(params.get("r").unwrap(), ["a b".to_string()]);
        assert_eq!(params.encode(), "q=hello+world&r=a+b&s=%2F");
    }

    #[test]
    fn test_retain_matches_raw_name() {
        let mut params = QueryParams::parse("x%2Dlive=1&x-live=2&y=3");
        // Both spellings decode to "x-live", only one of them is literally "x-live".
        let removed = params.retain_raw_names(|raw| raw == "x-live" || raw == "y");
        assert_eq!(removed, vec!["x-live".to_string()]);
        assert_eq!(params.encode(), "y=3");
    }

    #[test]
    fn test_encode_keeps_raw_name_spelling() {
        let params = QueryParams::parse("ids[]=1&a~b=x%20y&x%2Dy=2&ids[]=3");
        assert_eq!(params.get("ids[]").unwrap(), ["1".to_string(), "3".to_string()]);
        assert_eq!(params.encode(), "a~b=x+y&ids[]=1&ids[]=3&x%2Dy=2");
        assert_eq!(QueryParams::parse(&params.encode()), params);
    }

    #[test]
    fn test_retain_drops_all_values_of_a_name() {
        let mut params = QueryParams::parse("a=1&keep=1&a=2&a=3");
        let removed = params.retain_raw_names(|raw| raw == "keep");
        assert_eq!(removed, vec!["a".to_string()]);
        assert_eq!(params.get("a"), None);
        assert_eq!(params.encode(), "keep=1");
    }

    #[test]
    fn test_retain_nothing_removed() {
        let mut params = QueryParams::parse("a=1&b=2");
        assert!(params.retain_raw_names(|_| true).is_empty());
        assert_eq!(params.encode(), "a=1&b=2");
    }
}
