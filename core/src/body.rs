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

//! Body types exchanged with [`HttpSend`](crate::HttpSend).
//!
//! Request bodies must be `Sync` so that they can be handed to clients like
//! reqwest, response bodies only need to be `Send`.

use crate::{Error, Result};
use bytes::{Bytes, BytesMut};
use http_body_util::combinators::{BoxBody, UnsyncBoxBody};
use http_body_util::{BodyExt, Empty, Full};

/// Body of an outgoing request.
pub type RequestBody = BoxBody<Bytes, Error>;

/// Body of an incoming response.
pub type ResponseBody = UnsyncBoxBody<Bytes, Error>;

/// Build an empty request body.
pub fn empty_request_body() -> RequestBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

/// Build a request body from in-memory content.
pub fn full_request_body(content: impl Into<Bytes>) -> RequestBody {
    Full::new(content.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Build a response body from in-memory content.
///
/// Mostly useful for [`HttpSend`](crate::HttpSend) test doubles.
pub fn full_response_body(content: impl Into<Bytes>) -> ResponseBody {
    Full::new(content.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Read the whole body into memory.
///
/// The body is consumed until its end even if the content is not needed, so
/// that the underlying connection can be reused.
pub async fn collect_body(mut body: ResponseBody) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    while let Some(frame) = body.frame().await {
        if let Ok(data) = frame?.into_data() {
            buf.extend_from_slice(&data);
        }
    }
    Ok(buf.freeze())
}

/// Drain the body without keeping its content.
///
/// Returns the number of bytes drained.
pub async fn drain_body(mut body: ResponseBody) -> Result<u64> {
    let mut drained = 0;
    while let Some(frame) = body.frame().await {
        if let Ok(data) = frame?.into_data() {
            drained += data.len() as u64;
        }
    }
    Ok(drained)
}
