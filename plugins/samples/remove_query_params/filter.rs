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
//! The per-request decision: which query parameters survive.
//!
//! Patterns are compiled once, in [`QueryParameterFilter::new`]. After that
//! the filter is read-only and can be shared by any number of requests.

use crate::config::{Config, Mode};
use crate::error::{Error, Result};
use crate::query::QueryParams;
use crate::request::Request;
use log::{debug, info};
use regex::Regex;

/// Header carrying the pre-mutation URL when parameters were removed.
pub const ORIGINAL_URI_HEADER: &str = "Plugin-Original-Uri";

/// What happened to a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The except pattern matched and filtering was skipped.
    pub except_matched: bool,
    /// Decoded names of the parameters that were dropped.
    pub removed: Vec<String>,
    /// Value of the appended [`ORIGINAL_URI_HEADER`], if one was added.
    pub original_uri_header: Option<String>,
}

impl Outcome {
    pub fn removed_any(&self) -> bool {
        !self.removed.is_empty()
    }
}

#[derive(Debug)]
pub struct QueryParameterFilter {
    config: Config,
    mode: Mode,
    except_uri: Option<Regex>,
    allowed_values: Option<Regex>,
}

fn compile(field: &'static str, pattern: &str) -> Result<Option<Regex>> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|source| Error::PatternCompile {
            field,
            pattern: pattern.to_string(),
            source,
        })
}

impl QueryParameterFilter {
    pub fn new(config: Config) -> Result<Self> {
        let mode = config.mode()?;
        if config.allowed_values_regex.is_empty() && config.except_uri_regex.is_empty() {
            return Err(Error::MissingPattern);
        }
        let except_uri = compile("exceptUriRegex", &config.except_uri_regex)?;
        let allowed_values = compile("allowedValuesRegex", &config.allowed_values_regex)?;

        info!(
            "query parameter filter ready: type={:?} allowedValuesRegex={:?} exceptUriRegex={:?}",
            config.mode, config.allowed_values_regex, config.except_uri_regex
        );
        Ok(QueryParameterFilter {
            config,
            mode,
            except_uri,
            allowed_values,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Filters the query of `req` in place.
    ///
    /// The query is always re-encoded, so even an untouched request comes out
    /// with its parameters sorted by name.
    pub fn apply(&self, req: &mut Request) -> Outcome {
        let original_url = req.url.to_string();
        let mut params = QueryParams::parse(req.query());
        let mut outcome = Outcome::default();

        match self.mode {
            Mode::Inert => {}
            Mode::DeleteExcept => {
                self.delete_except(req, &original_url, &mut params, &mut outcome)
            }
        }

        req.set_query(&params.encode());
        outcome
    }

    fn delete_except(
        &self,
        req: &mut Request,
        original_url: &str,
        params: &mut QueryParams,
        outcome: &mut Outcome,
    ) {
        if let Some(except) = &self.except_uri {
            if except.is_match(original_url) {
                debug!("{} matches exceptUriRegex, query left alone", original_url);
                outcome.except_matched = true;
                return;
            }
        }

        // Without an allow-list nothing is allowed.
        let removed = match &self.allowed_values {
            Some(allowed) => params.retain_raw_names(|name| allowed.is_match(name)),
            None => params.retain_raw_names(|_| false),
        };
        if removed.is_empty() {
            return;
        }

        debug!("removed query parameters {:?} from {}", removed, original_url);
        if self.config.add_original_hostname_header {
            req.headers.append(ORIGINAL_URI_HEADER, original_url);
            outcome.original_uri_header = Some(original_url.to_string());
        }
        outcome.removed = removed;
    }
}
