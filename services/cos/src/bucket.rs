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

use crate::acl::{AccessControlPolicy, Owner, PutAclOptions};
use crate::options::{AclHeaderOptions, Pairs, QueryOptions};
use crate::{Client, Payload, Response, ResultSink, SendOptions, XmlBody};
use http::Method;
use qcos_core::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Options of `PUT Bucket`, the acl of the new bucket.
pub type BucketPutOptions = AclHeaderOptions;

/// Operations on the configured bucket, see [`Client::bucket`].
///
/// All operations fail with [`ErrorKind::ConfigInvalid`](qcos_core::ErrorKind::ConfigInvalid)
/// when the client has no bucket url.
#[derive(Debug, Clone, Copy)]
pub struct Bucket<'a> {
    client: &'a Client,
}

impl<'a> Bucket<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn send_options(&self, uri: &str, method: Method) -> Result<SendOptions<'a>> {
        let opts = SendOptions::new(self.client.bucket_url()?, uri, method);
        Ok(opts.with_auth_time(self.client.auth_time()))
    }

    async fn get_xml<T>(&self, uri: &str) -> Result<(T, Response)>
    where
        T: DeserializeOwned + Default + Send,
    {
        let mut res = T::default();
        let opts = self.send_options(uri, Method::GET)?;
        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }

    async fn put_xml(&self, uri: &str, body: &dyn XmlBody) -> Result<Response> {
        let opts = self
            .send_options(uri, Method::PUT)?
            .with_payload(Payload::Xml(body));
        self.client.send(opts, ResultSink::Discard).await
    }

    async fn send_empty(&self, uri: &str, method: Method) -> Result<Response> {
        self.client
            .send(self.send_options(uri, method)?, ResultSink::Discard)
            .await
    }

    /// List objects in the bucket.
    ///
    /// - [GET Bucket](https://cloud.tencent.com/document/product/436/7734)
    pub async fn get(
        &self,
        opt: Option<&BucketGetOptions>,
    ) -> Result<(ListBucketResult, Response)> {
        let mut res = ListBucketResult::default();
        let mut opts = self.send_options("/", Method::GET)?;
        opts.query = opt.map(|v| v as &dyn QueryOptions);

        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }

    /// Create the bucket.
    ///
    /// - [PUT Bucket](https://cloud.tencent.com/document/product/436/7738)
    pub async fn put(&self, opt: Option<&BucketPutOptions>) -> Result<Response> {
        let mut opts = self.send_options("/", Method::PUT)?;
        if let Some(opt) = opt {
            opts = opts.with_header(opt);
        }
        self.client.send(opts, ResultSink::Discard).await
    }

    /// Delete the bucket, it must be empty.
    pub async fn delete(&self) -> Result<Response> {
        self.send_empty("/", Method::DELETE).await
    }

    /// Check that the bucket exists and is accessible.
    ///
    /// Returns a service error with status 403 or 404 otherwise.
    pub async fn head(&self) -> Result<Response> {
        self.send_empty("/", Method::HEAD).await
    }

    pub async fn get_acl(&self) -> Result<(AccessControlPolicy, Response)> {
        self.get_xml("/?acl").await
    }

    /// Replace the acl of the bucket.
    pub async fn put_acl(&self, opt: &PutAclOptions) -> Result<Response> {
        let mut opts = self.send_options("/?acl", Method::PUT)?;
        opts.header = opt.effective_header();
        if let Some(body) = &opt.body {
            opts = opts.with_payload(Payload::Xml(body));
        }
        self.client.send(opts, ResultSink::Discard).await
    }

    pub async fn get_cors(&self) -> Result<(CorsConfiguration, Response)> {
        self.get_xml("/?cors").await
    }

    pub async fn put_cors(&self, cors: &CorsConfiguration) -> Result<Response> {
        self.put_xml("/?cors", cors).await
    }

    pub async fn delete_cors(&self) -> Result<Response> {
        self.send_empty("/?cors", Method::DELETE).await
    }

    /// Returns a service error with status 404 if no lifecycle is configured.
    pub async fn get_lifecycle(&self) -> Result<(LifecycleConfiguration, Response)> {
        self.get_xml("/?lifecycle").await
    }

    pub async fn put_lifecycle(&self, lifecycle: &LifecycleConfiguration) -> Result<Response> {
        self.put_xml("/?lifecycle", lifecycle).await
    }

    pub async fn delete_lifecycle(&self) -> Result<Response> {
        self.send_empty("/?lifecycle", Method::DELETE).await
    }

    pub async fn get_tagging(&self) -> Result<(Tagging, Response)> {
        self.get_xml("/?tagging").await
    }

    pub async fn put_tagging(&self, tagging: &Tagging) -> Result<Response> {
        self.put_xml("/?tagging", tagging).await
    }

    pub async fn delete_tagging(&self) -> Result<Response> {
        self.send_empty("/?tagging", Method::DELETE).await
    }

    /// Region of the bucket.
    pub async fn get_location(&self) -> Result<(LocationConstraint, Response)> {
        self.get_xml("/?location").await
    }

    /// List multipart uploads in progress, at most 1000 each call.
    ///
    /// - [List Multipart Uploads](https://cloud.tencent.com/document/product/436/7736)
    pub async fn list_multipart_uploads(
        &self,
        opt: Option<&ListMultipartUploadsOptions>,
    ) -> Result<(ListMultipartUploadsResult, Response)> {
        let mut res = ListMultipartUploadsResult::default();
        let mut opts = self.send_options("/?uploads", Method::GET)?;
        opts.query = opt.map(|v| v as &dyn QueryOptions);

        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BucketGetOptions {
    pub prefix: Option<String>,
    pub delimiter: Option<String>,
    /// `url` to get keys encoded in the response.
    pub encoding_type: Option<String>,
    pub marker: Option<String>,
    pub max_keys: Option<u64>,
}

impl QueryOptions for BucketGetOptions {
    fn query_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push("prefix", self.prefix.as_ref())
            .push("delimiter", self.delimiter.as_ref())
            .push("encoding-type", self.encoding_type.as_ref())
            .push("marker", self.marker.as_ref())
            .push("max-keys", self.max_keys)
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename = "ListBucketResult")]
pub struct ListBucketResult {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Prefix")]
    pub prefix: String,
    #[serde(rename = "Marker")]
    pub marker: String,
    #[serde(rename = "NextMarker")]
    pub next_marker: String,
    #[serde(rename = "Delimiter")]
    pub delimiter: String,
    #[serde(rename = "MaxKeys")]
    pub max_keys: u64,
    #[serde(rename = "IsTruncated")]
    pub is_truncated: bool,
    #[serde(rename = "EncodingType", alias = "Encoding-Type")]
    pub encoding_type: String,
    #[serde(rename = "Contents")]
    pub contents: Vec<ObjectSummary>,
    #[serde(rename = "CommonPrefixes")]
    pub common_prefixes: Vec<CommonPrefix>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ObjectSummary {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "LastModified")]
    pub last_modified: String,
    #[serde(rename = "ETag")]
    pub etag: String,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "Owner")]
    pub owner: Option<Owner>,
    #[serde(rename = "StorageClass")]
    pub storage_class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommonPrefix {
    #[serde(rename = "Prefix")]
    pub prefix: String,
}

/// Cross origin rules of the bucket.
///
/// - [PUT Bucket cors](https://cloud.tencent.com/document/product/436/8279)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "CORSConfiguration")]
pub struct CorsConfiguration {
    #[serde(rename = "CORSRule")]
    pub rules: Vec<CorsRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsRule {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "AllowedOrigin")]
    pub allowed_origins: Vec<String>,
    #[serde(rename = "AllowedMethod")]
    pub allowed_methods: Vec<String>,
    #[serde(rename = "AllowedHeader")]
    pub allowed_headers: Vec<String>,
    #[serde(rename = "ExposeHeader")]
    pub expose_headers: Vec<String>,
    #[serde(rename = "MaxAgeSeconds", skip_serializing_if = "Option::is_none")]
    pub max_age_seconds: Option<u64>,
}

/// Lifecycle rules of the bucket.
///
/// - [PUT Bucket lifecycle](https://cloud.tencent.com/document/product/436/8280)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "LifecycleConfiguration")]
pub struct LifecycleConfiguration {
    #[serde(rename = "Rule")]
    pub rules: Vec<LifecycleRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleRule {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Filter")]
    pub filter: LifecycleFilter,
    /// `Enabled` or `Disabled`.
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Transition", skip_serializing_if = "Option::is_none")]
    pub transition: Option<LifecycleTransition>,
    #[serde(rename = "Expiration", skip_serializing_if = "Option::is_none")]
    pub expiration: Option<LifecycleExpiration>,
    #[serde(
        rename = "AbortIncompleteMultipartUpload",
        skip_serializing_if = "Option::is_none"
    )]
    pub abort_incomplete_multipart_upload: Option<AbortIncompleteMultipartUpload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleFilter {
    #[serde(rename = "Prefix")]
    pub prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleTransition {
    #[serde(rename = "Days", skip_serializing_if = "Option::is_none")]
    pub days: Option<u64>,
    #[serde(rename = "Date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "StorageClass")]
    pub storage_class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleExpiration {
    #[serde(rename = "Days", skip_serializing_if = "Option::is_none")]
    pub days: Option<u64>,
    #[serde(rename = "Date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbortIncompleteMultipartUpload {
    #[serde(rename = "DaysAfterInitiation")]
    pub days_after_initiation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "Tagging")]
pub struct Tagging {
    #[serde(rename = "TagSet")]
    pub tag_set: TagSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSet {
    #[serde(rename = "Tag")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Tagging {
    /// Build tagging from `(key, value)` pairs.
    pub fn new(tags: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            tag_set: TagSet {
                tags: tags
                    .into_iter()
                    .map(|(key, value)| Tag { key, value })
                    .collect(),
            },
        }
    }
}

/// `<LocationConstraint>ap-beijing</LocationConstraint>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename = "LocationConstraint")]
pub struct LocationConstraint {
    #[serde(rename = "$text")]
    pub location: String,
}

#[derive(Debug, Clone, Default)]
pub struct ListMultipartUploadsOptions {
    pub delimiter: Option<String>,
    pub encoding_type: Option<String>,
    pub prefix: Option<String>,
    pub max_uploads: Option<u64>,
    pub key_marker: Option<String>,
    pub upload_id_marker: Option<String>,
}

impl QueryOptions for ListMultipartUploadsOptions {
    fn query_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push("delimiter", self.delimiter.as_ref())
            .push("encoding-type", self.encoding_type.as_ref())
            .push("prefix", self.prefix.as_ref())
            .push("max-uploads", self.max_uploads)
            .push("key-marker", self.key_marker.as_ref())
            .push("upload-id-marker", self.upload_id_marker.as_ref())
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename = "ListMultipartUploadsResult")]
pub struct ListMultipartUploadsResult {
    #[serde(rename = "Bucket")]
    pub bucket: String,
    #[serde(rename = "EncodingType", alias = "Encoding-Type")]
    pub encoding_type: String,
    #[serde(rename = "KeyMarker")]
    pub key_marker: String,
    #[serde(rename = "UploadIdMarker")]
    pub upload_id_marker: String,
    #[serde(rename = "NextKeyMarker")]
    pub next_key_marker: String,
    #[serde(rename = "NextUploadIdMarker")]
    pub next_upload_id_marker: String,
    #[serde(rename = "MaxUploads")]
    pub max_uploads: u64,
    #[serde(rename = "IsTruncated")]
    pub is_truncated: bool,
    #[serde(rename = "Prefix")]
    pub prefix: String,
    #[serde(rename = "Delimiter")]
    pub delimiter: String,
    #[serde(rename = "Upload")]
    pub uploads: Vec<MultipartUpload>,
    #[serde(rename = "CommonPrefixes")]
    pub common_prefixes: Vec<CommonPrefix>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MultipartUpload {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "UploadId", alias = "UploadID")]
    pub upload_id: String,
    #[serde(rename = "StorageClass")]
    pub storage_class: String,
    #[serde(rename = "Initiator")]
    pub initiator: Owner,
    #[serde(rename = "Owner")]
    pub owner: Owner,
    #[serde(rename = "Initiated")]
    pub initiated: String,
}
