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
use thiserror::Error;

/// Errors raised while building a filter or a request.
///
/// None of these can happen while a request is being filtered: every pattern
/// is compiled before the first request arrives.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid modification type {0:?}, expected \"deleteexcept\"")]
    InvalidMode(String),

    #[error("either allowedValuesRegex or exceptUriRegex must be set")]
    MissingPattern,

    #[error("{field} {pattern:?} is not a valid regex: {source}")]
    PatternCompile {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("malformed plugin configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("cannot build request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
