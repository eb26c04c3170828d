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

//! Tencent Cloud Object Storage (COS) client.
//!
//! Requests are signed with [`RequestSigner`], dispatched by the
//! [`HttpSend`](qcos_core::HttpSend) of the [`Context`](qcos_core::Context)
//! and decoded into typed results. [`Client::service`], [`Client::bucket`]
//! and [`Client::object`] cover the XML API, [`Client::send`] is available
//! for everything else.

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{cos_encode, RequestSigner};

mod error;
pub use error::ErrorResponse;

mod response;
pub use response::Response;

pub mod options;
pub use options::{AclHeaderOptions, HeaderOptions, QueryOptions};

mod client;
pub use client::{
    BaseUrl, Client, DecodeXml, Payload, ResultSink, SendOptions, XmlBody, DEFAULT_EXPIRES_IN,
};

mod acl;
pub use acl::*;

mod service;
pub use service::*;

mod bucket;
pub use bucket::*;

mod object;
pub use object::*;
