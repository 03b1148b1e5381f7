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
use crate::error::{Error, Result};
use serde::Deserialize;
use std::str::FromStr;

/// Plugin configuration, as supplied by the proxy in JSON form.
///
/// ```json
/// {
///   "type": "deleteexcept",
///   "allowedValuesRegex": "^(utm_source|page)$",
///   "exceptUriRegex": "/admin/",
///   "addOriginalHostnameHeader": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Modification type. Only "deleteexcept" is understood; empty is a no-op.
    #[serde(rename = "type", alias = "mode")]
    pub mode: String,
    pub allowed_values_regex: String,
    #[serde(rename = "exceptUriRegex", alias = "exceptURIRegex")]
    pub except_uri_regex: String,
    pub add_original_hostname_header: bool,
}

impl Config {
    /// Parses the raw plugin configuration handed over by the host.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn mode(&self) -> Result<Mode> {
        self.mode.parse()
    }
}

/// How the filter treats the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No mode selected: nothing is removed.
    Inert,
    /// Delete every parameter whose name is not allowed.
    DeleteExcept,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Mode::Inert),
            "deleteexcept" => Ok(Mode::DeleteExcept),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}
