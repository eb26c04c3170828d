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

use crate::constants::*;
use http::{HeaderMap, Method, StatusCode, Uri};
use qcos_core::Error;
use serde::Deserialize;
use std::fmt;

/// Error returned by the service for a non-2xx response.
///
/// - [Error codes](https://cloud.tencent.com/document/product/436/7730)
///
/// It's carried as the source of an [`ErrorKind::Service`](qcos_core::ErrorKind::Service)
/// error, use [`ErrorResponse::from_error`] to get it back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "Error")]
pub struct ErrorResponse {
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "Resource", default)]
    pub resource: String,
    #[serde(rename = "RequestId", default)]
    pub request_id: String,
    #[serde(rename = "TraceId", default)]
    pub trace_id: String,

    /// Status of the failed response.
    #[serde(skip)]
    pub status: StatusCode,
    /// Method of the failed request.
    #[serde(skip)]
    pub method: Method,
    /// Url of the failed request.
    #[serde(skip)]
    pub url: Uri,
    /// Headers of the failed response.
    #[serde(skip)]
    pub headers: HeaderMap,
}

impl ErrorResponse {
    /// Decode the error body of a failed response.
    ///
    /// Bodies that can't be decoded still produce an error response, with
    /// only the fields taken from the status line and headers.
    pub fn decode(
        status: StatusCode,
        method: Method,
        url: Uri,
        headers: HeaderMap,
        body: &[u8],
    ) -> Self {
        let mut resp = if body.iter().all(u8::is_ascii_whitespace) {
            ErrorResponse::default()
        } else {
            quick_xml::de::from_reader(body).unwrap_or_else(|err| {
                log::warn!("failed to decode error response of {method} {url}: {err}");
                ErrorResponse::default()
            })
        };

        if resp.request_id.is_empty() {
            if let Some(v) = header_string(&headers, X_COS_REQUEST_ID) {
                resp.request_id = v;
            }
        }
        if resp.trace_id.is_empty() {
            if let Some(v) = header_string(&headers, X_COS_TRACE_ID) {
                resp.trace_id = v;
            }
        }

        resp.status = status;
        resp.method = method;
        resp.url = url;
        resp.headers = headers;
        resp
    }

    /// Get the error response carried by a service error.
    pub fn from_error(err: &Error) -> Option<&ErrorResponse> {
        err.source_as::<ErrorResponse>()
    }
}

impl From<ErrorResponse> for Error {
    fn from(resp: ErrorResponse) -> Self {
        Error::service(resp.to_string()).with_source(resp)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}(Message: {}, RequestId: {}, TraceId: {})",
            self.method,
            self.url,
            self.status.as_u16(),
            self.code,
            self.message,
            self.request_id,
            self.trace_id
        )
    }
}

impl std::error::Error for ErrorResponse {}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)?
        .to_str()
        .ok()
        .filter(|v| !v.is_empty())
        .map(String::from)
}
