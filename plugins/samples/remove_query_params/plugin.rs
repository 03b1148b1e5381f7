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

// [START serviceextensions_plugin_remove_query_params]
//! Strips query parameters whose names do not match an allow-list regex.
//!
//! Requests whose full URL matches `exceptUriRegex` are left alone. When
//! `addOriginalHostnameHeader` is set and something was removed, the
//! pre-mutation URL is appended as a `Plugin-Original-Uri` request header.
//!
//! The filtering logic is host independent; the proxy-wasm glue below only
//! exists when building for wasm32.

pub mod config;
pub mod error;
pub mod filter;
pub mod query;
pub mod remover;
pub mod request;

pub use config::{Config, Mode};
pub use error::{Error, Result};
pub use filter::{Outcome, QueryParameterFilter, ORIGINAL_URI_HEADER};
pub use remover::{Next, QueryParameterRemover};
pub use request::{Headers, Request};

#[cfg(target_arch = "wasm32")]
mod host {
    use crate::{Config, QueryParameterFilter, Request, ORIGINAL_URI_HEADER};
    use log::*;
    use proxy_wasm::traits::*;
    use proxy_wasm::types::*;
    use std::rc::Rc;

    proxy_wasm::main! {{
        proxy_wasm::set_log_level(LogLevel::Trace);  // log everything, subject to plugin LogConfig
        proxy_wasm::set_root_context(|_| -> Box<dyn RootContext> {
            Box::new(RemoverRootContext { filter: None })
        });
    }}

    struct RemoverRootContext {
        filter: Option<Rc<QueryParameterFilter>>,
    }

    impl Context for RemoverRootContext {}

    impl RootContext for RemoverRootContext {
        fn on_configure(&mut self, _: usize) -> bool {
            let config = match self.get_plugin_configuration() {
                Some(bytes) => Config::from_slice(&bytes),
                None => Ok(Config::default()),
            };
            // Returning false keeps the plugin from serving any traffic.
            match config.and_then(QueryParameterFilter::new) {
                Ok(filter) => {
                    self.filter = Some(Rc::new(filter));
                    true
                }
                Err(err) => {
                    error!("rejecting plugin configuration: {}", err);
                    false
                }
            }
        }

        fn create_http_context(&self, _: u32) -> Option<Box<dyn HttpContext>> {
            Some(Box::new(RemoverHttpContext {
                filter: self.filter.clone(), // shallow copy, ref count only
            }))
        }

        fn get_type(&self) -> Option<ContextType> {
            Some(ContextType::HttpContext)
        }
    }

    struct RemoverHttpContext {
        filter: Option<Rc<QueryParameterFilter>>,
    }

    impl Context for RemoverHttpContext {}

    impl HttpContext for RemoverHttpContext {
        fn on_http_request_headers(&mut self, _: usize, _: bool) -> Action {
            let filter = match self.filter.clone() {
                Some(filter) => filter,
                None => return Action::Continue,
            };
            let path = match self.get_http_request_header(":path") {
                Some(path) => path,
                None => return Action::Continue,
            };
            let scheme = self
                .get_http_request_header(":scheme")
                .unwrap_or_else(|| "http".to_string());
            let authority = self
                .get_http_request_header(":authority")
                .or_else(|| self.get_http_request_header("host"))
                .unwrap_or_default();

            let mut req = match Request::from_pseudo_headers(&scheme, &authority, &path) {
                Ok(req) => req,
                Err(err) => {
                    warn!("leaving {} unfiltered: {}", path, err);
                    return Action::Continue;
                }
            };

            let outcome = filter.apply(&mut req);
            if req.request_uri != path {
                self.set_http_request_header(":path", Some(&req.request_uri));
            }
            if let Some(original) = &outcome.original_uri_header {
                self.add_http_request_header(ORIGINAL_URI_HEADER, original);
            }
            Action::Continue
        }
    }
}
// [END serviceextensions_plugin_remove_query_params]
