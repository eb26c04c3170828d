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

//! Reqwest implementation of [`HttpSend`].
//!
//! Request bodies are streamed to the server and response bodies are handed
//! back unread, so large objects never have to fit in memory.

use async_trait::async_trait;
use bytes::Bytes;
use http_body::Body as _;
use http_body_util::{BodyDataStream, BodyExt};
use qcos_core::body::{RequestBody, ResponseBody};
use qcos_core::{Error, HttpSend, Result};
use reqwest::Client;

/// HttpSend backed by a [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(
        &self,
        req: http::Request<RequestBody>,
    ) -> Result<http::Response<ResponseBody>> {
        let req = into_reqwest_request(req)?;
        log::debug!("sending request: {} {}", req.method(), req.url());

        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::network("failed to send request").with_source(e))?;

        let (parts, body) = http::Response::<reqwest::Body>::from(resp).into_parts();
        let body = body
            .map_err(|e| Error::network("failed to read response body").with_source(e))
            .boxed_unsync();
        Ok(http::Response::from_parts(parts, body))
    }
}

fn into_reqwest_request(req: http::Request<RequestBody>) -> Result<reqwest::Request> {
    let (parts, body) = req.into_parts();

    // Empty bodies are sent as-is so that no chunked encoding is negotiated.
    let body = if body.size_hint().exact() == Some(0) {
        reqwest::Body::from(Bytes::new())
    } else {
        reqwest::Body::wrap_stream(BodyDataStream::new(body))
    };

    let req = http::Request::from_parts(parts, body);
    reqwest::Request::try_from(req)
        .map_err(|e| Error::request_invalid("failed to build reqwest request").with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcos_core::body::{empty_request_body, full_request_body};

    #[test]
    fn test_into_reqwest_request() {
        let uri = "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/a.txt?acl";
        let req = http::Request::put(uri)
            .header("x-cos-acl", "private")
            .body(full_request_body("hello"))
            .unwrap();

        let req = into_reqwest_request(req).unwrap();
        assert_eq!(req.method(), http::Method::PUT);
        assert_eq!(req.url().query(), Some("acl"));
        assert_eq!(req.headers()["x-cos-acl"], "private");
        assert!(req.body().is_some());
    }

    #[test]
    fn test_empty_body_is_not_streamed() {
        let req = http::Request::get("https://service.cos.myqcloud.com/")
            .body(empty_request_body())
            .unwrap();

        let req = into_reqwest_request(req).unwrap();
        let body = req.body().expect("body must exist");
        assert_eq!(body.as_bytes(), Some(&b""[..]));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let sender = ReqwestHttpSend::default();
        let req = http::Request::get("http://127.0.0.1:1/")
            .body(empty_request_body())
            .unwrap();

        let err = sender.http_send(req).await.unwrap_err();
        assert!(err.is_network_error());
    }
}
