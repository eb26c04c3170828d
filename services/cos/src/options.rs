// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Option values encoded into query strings and headers.

/// Values encoded into the query string of a request.
///
/// Pairs are appended after the query already present in the request uri,
/// unset options must be left out.
pub trait QueryOptions: Send + Sync {
    /// Ordered `(name, value)` pairs, not encoded yet.
    fn query_pairs(&self) -> Vec<(String, String)>;
}

/// Values sent as request headers.
pub trait HeaderOptions: Send + Sync {
    /// Ordered `(name, value)` pairs. Repeated names are all sent.
    fn header_pairs(&self) -> Vec<(String, String)>;
}

impl QueryOptions for Vec<(String, String)> {
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.clone()
    }
}

impl HeaderOptions for Vec<(String, String)> {
    fn header_pairs(&self) -> Vec<(String, String)> {
        self.clone()
    }
}

/// Collects option pairs, skipping unset values.
#[derive(Debug, Default)]
pub(crate) struct Pairs(Vec<(String, String)>);

impl Pairs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(mut self, name: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.0.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub(crate) fn extend(mut self, pairs: Vec<(String, String)>) -> Self {
        self.0.extend(pairs);
        self
    }

    pub(crate) fn build(self) -> Vec<(String, String)> {
        self.0
    }
}

/// ACL headers shared by bucket and object operations.
///
/// - [ACL](https://cloud.tencent.com/document/product/436/30752)
#[derive(Debug, Clone, Default)]
pub struct AclHeaderOptions {
    /// Canned acl like `private` or `public-read`.
    pub x_cos_acl: Option<String>,
    pub x_cos_grant_read: Option<String>,
    pub x_cos_grant_write: Option<String>,
    pub x_cos_grant_full_control: Option<String>,
}

impl HeaderOptions for AclHeaderOptions {
    fn header_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push("x-cos-acl", self.x_cos_acl.as_ref())
            .push("x-cos-grant-read", self.x_cos_grant_read.as_ref())
            .push("x-cos-grant-write", self.x_cos_grant_write.as_ref())
            .push(
                "x-cos-grant-full-control",
                self.x_cos_grant_full_control.as_ref(),
            )
            .build()
    }
}
