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
use crate::error::Result;
use url::{Position, Url};

/// Request headers in arrival order. Names compare case-insensitively and
/// the same name may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Headers::default()
    }

    /// Adds a header without touching existing values of the same name.
    pub fn append(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }

    /// First value of `name`, if any.
    pub fn get<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        self.get_all(name).next()
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An inbound HTTP request as the filter sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Absolute URL, as reconstructed by the proxy.
    pub url: Url,
    /// Request-target sent upstream: path plus `?query` when there is one.
    pub request_uri: String,
    pub headers: Headers,
}

impl Request {
    pub fn new(url: Url) -> Self {
        let request_uri = url[Position::BeforePath..].to_string();
        Request {
            url,
            request_uri,
            headers: Headers::new(),
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        Ok(Request::new(Url::parse(url)?))
    }

    /// Builds a request from the HTTP/2 style pseudo-headers proxies expose.
    /// `path` may be relative and carry a query.
    pub fn from_pseudo_headers(scheme: &str, authority: &str, path: &str) -> Result<Self> {
        let base = Url::parse(&format!("{}://{}", scheme, authority))?;
        let url = Url::options().base_url(Some(&base)).parse(path)?;
        Ok(Request::new(url))
    }

    /// Raw query string, empty when absent.
    pub fn query(&self) -> &str {
        self.url.query().unwrap_or("")
    }

    /// Replaces the query and keeps `request_uri` in step. An empty query
    /// removes the `?` entirely.
    pub fn set_query(&mut self, query: &str) {
        if query.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.set_query(Some(query));
        }
        self.request_uri = self.url[Position::BeforePath..].to_string();
    }
}
