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
use crate::config::Config;
use crate::error::Result;
use crate::filter::QueryParameterFilter;
use crate::request::Request;

/// The handler that receives a request once the filter is done with it.
pub trait Next {
    fn handle(&self, req: Request);
}

impl<F> Next for F
where
    F: Fn(Request),
{
    fn handle(&self, req: Request) {
        self(req)
    }
}

/// A [`QueryParameterFilter`] chained in front of another handler.
pub struct QueryParameterRemover<N> {
    next: N,
    name: String,
    filter: QueryParameterFilter,
}

impl<N: Next> QueryParameterRemover<N> {
    pub fn new(next: N, config: Config, name: &str) -> Result<Self> {
        Ok(QueryParameterRemover {
            next,
            name: name.to_string(),
            filter: QueryParameterFilter::new(config)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filter(&self) -> &QueryParameterFilter {
        &self.filter
    }

    /// Filters `req` and hands it to the next handler.
    pub fn serve(&self, mut req: Request) {
        self.filter.apply(&mut req);
        self.next.handle(req);
    }
}
