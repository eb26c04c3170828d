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
use http::header::{CONTENT_LENGTH, ETAG};
use http::{HeaderMap, Method, StatusCode, Uri};

/// Response envelope returned by every operation.
///
/// The body has already been consumed when a `Response` is handed out,
/// only the status line and headers are kept.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    method: Method,
    url: Uri,
}

impl Response {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, method: Method, url: Uri) -> Self {
        Self {
            status,
            headers,
            method,
            url,
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Method of the request that produced this response.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Url of the request that produced this response.
    pub fn url(&self) -> &Uri {
        &self.url
    }

    fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.header_str(X_COS_REQUEST_ID)
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.header_str(X_COS_TRACE_ID)
    }

    /// `normal` or `appendable`.
    pub fn object_type(&self) -> Option<&str> {
        self.header_str(X_COS_OBJECT_TYPE)
    }

    pub fn storage_class(&self) -> Option<&str> {
        self.header_str(X_COS_STORAGE_CLASS)
    }

    pub fn version_id(&self) -> Option<&str> {
        self.header_str(X_COS_VERSION_ID)
    }

    /// Server side encryption algorithm, for example `AES256`.
    pub fn server_side_encryption(&self) -> Option<&str> {
        self.header_str(X_COS_SERVER_SIDE_ENCRYPTION)
    }

    pub fn etag(&self) -> Option<&str> {
        self.header_str(ETAG.as_str())
    }

    pub fn content_length(&self) -> Option<u64> {
        self.header_str(CONTENT_LENGTH.as_str())?.parse().ok()
    }

    /// Position of the next append to an appendable object.
    pub fn next_append_position(&self) -> Option<u64> {
        self.header_str(X_COS_NEXT_APPEND_POSITION)?.parse().ok()
    }

    /// User metadata sent as `x-cos-meta-*` headers.
    ///
    /// Names are returned without the prefix, repeated headers yield one
    /// entry per value.
    pub fn meta(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .filter_map(|(k, v)| {
                let name = k.as_str().strip_prefix(X_COS_META_PREFIX)?;
                let value = v.to_str().ok()?;
                Some((name.to_string(), value.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const URL: &str = "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/test";

    #[test]
    fn test_response_accessors() {
        let pairs = [
            ("x-cos-request-id", "NWQ2ZDk5YjFfMjBiNDU4NjRfNjI4Y18x"),
            ("x-cos-object-type", "appendable"),
            ("x-cos-storage-class", "STANDARD_IA"),
            ("x-cos-server-side-encryption", "AES256"),
            ("etag", "\"098f6bcd4621d373cade4e832627b4f6\""),
            ("content-length", "4"),
            ("x-cos-next-append-position", "4"),
            ("x-cos-meta-tag", "a"),
            ("x-cos-meta-tag", "b"),
            ("x-cos-meta-author", "qcos"),
        ];
        let mut headers = HeaderMap::new();
        for (k, v) in pairs {
            headers.append(k, v.parse().unwrap());
        }

        let url = Uri::from_static(URL);
        let resp = Response::new(StatusCode::OK, headers, Method::HEAD, url);

        assert_eq!(resp.request_id(), Some("NWQ2ZDk5YjFfMjBiNDU4NjRfNjI4Y18x"));
        assert_eq!(resp.trace_id(), None);
        assert_eq!(resp.object_type(), Some("appendable"));
        assert_eq!(resp.storage_class(), Some("STANDARD_IA"));
        assert_eq!(resp.server_side_encryption(), Some("AES256"));
        assert_eq!(resp.version_id(), None);
        assert_eq!(resp.etag(), Some("\"098f6bcd4621d373cade4e832627b4f6\""));
        assert_eq!(resp.content_length(), Some(4));
        assert_eq!(resp.next_append_position(), Some(4));

        let mut meta = resp.meta();
        meta.sort();
        assert_eq!(
            meta,
            vec![
                ("author".to_string(), "qcos".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
            ]
        );
    }
}
