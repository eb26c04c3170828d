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

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Env values used in tencent cloud services.
pub const TENCENTCLOUD_SECRET_ID: &str = "TENCENTCLOUD_SECRET_ID";
pub const TKE_SECRET_ID: &str = "TKE_SECRET_ID";
pub const TENCENTCLOUD_SECRET_KEY: &str = "TENCENTCLOUD_SECRET_KEY";
pub const TKE_SECRET_KEY: &str = "TKE_SECRET_KEY";
pub const TENCENTCLOUD_TOKEN: &str = "TENCENTCLOUD_TOKEN";
pub const TENCENTCLOUD_SECURITY_TOKEN: &str = "TENCENTCLOUD_SECURITY_TOKEN";
pub const QCLOUD_SECRET_TOKEN: &str = "QCLOUD_SECRET_TOKEN";
pub const QCOS_BUCKET_URL: &str = "QCOS_BUCKET_URL";
pub const QCOS_SERVICE_URL: &str = "QCOS_SERVICE_URL";

// Headers used in cos.
pub const X_COS_SECURITY_TOKEN: &str = "x-cos-security-token";
pub const X_COS_REQUEST_ID: &str = "x-cos-request-id";
pub const X_COS_TRACE_ID: &str = "x-cos-trace-id";
pub const X_COS_OBJECT_TYPE: &str = "x-cos-object-type";
pub const X_COS_STORAGE_CLASS: &str = "x-cos-storage-class";
pub const X_COS_VERSION_ID: &str = "x-cos-version-id";
pub const X_COS_SERVER_SIDE_ENCRYPTION: &str = "x-cos-server-side-encryption";
pub const X_COS_COPY_SOURCE: &str = "x-cos-copy-source";
pub const X_COS_NEXT_APPEND_POSITION: &str = "x-cos-next-append-position";
pub const X_COS_META_PREFIX: &str = "x-cos-meta-";

/// Headers with this prefix are always signed.
pub const X_COS_PREFIX: &str = "x-cos-";

/// Query parameter carrying a presigned signature.
pub const SIGN_QUERY: &str = "sign";

pub const CONTENT_TYPE_XML: &str = "application/xml";
pub const DEFAULT_SERVICE_URL: &str = "https://service.cos.myqcloud.com";

/// Headers that take part in the signature besides the `x-cos-` ones.
pub const SIGNED_HEADERS: &[&str] = &[
    "host",
    "range",
    "x-cos-acl",
    "x-cos-grant-read",
    "x-cos-grant-write",
    "x-cos-grant-full-control",
    "response-content-type",
    "response-content-language",
    "response-expires",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "cache-control",
    "content-disposition",
    "content-encoding",
    "content-type",
    "content-length",
    "content-md5",
    "expect",
    "expires",
    "x-cos-content-sha1",
    "x-cos-storage-class",
    "if-modified-since",
    "origin",
    "access-control-request-method",
    "access-control-request-headers",
    "x-cos-object-type",
];

/// AsciiSet for [Tencent UriEncode](https://cloud.tencent.com/document/product/436/7778)
///
/// Unreserved characters and `!'()*` stay literal.
pub static COS_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');
