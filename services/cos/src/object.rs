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
use crate::constants::*;
use crate::options::{AclHeaderOptions, HeaderOptions, Pairs, QueryOptions};
use crate::{cos_encode, Client, Payload, Response, ResultSink, SendOptions};
use http::{Method, Uri};
use qcos_core::body::RequestBody;
use qcos_core::time::AuthTime;
use qcos_core::utils::query_encode;
use qcos_core::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::AsyncWrite;

/// Operations on objects of the configured bucket, see [`Client::object`].
///
/// Object names are keys without the leading `/`, they are encoded before
/// being placed in the request path.
#[derive(Debug, Clone, Copy)]
pub struct Object<'a> {
    client: &'a Client,
}

impl<'a> Object<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn send_options(&self, uri: String, method: Method) -> Result<SendOptions<'a>> {
        Ok(
            SendOptions::new(self.client.bucket_url()?, uri, method)
                .with_auth_time(self.client.auth_time()),
        )
    }

    /// Download the object into `writer`.
    ///
    /// With [`ObjectGetOptions::presigned_url`] set, the request goes to that
    /// url as is and isn't signed again.
    ///
    /// - [GET Object](https://cloud.tencent.com/document/product/436/7753)
    pub async fn get(
        &self,
        name: &str,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
        opt: Option<&ObjectGetOptions>,
    ) -> Result<Response> {
        let mut opts = match opt.and_then(|v| v.presigned_url.as_deref()) {
            Some(url) => SendOptions::new(self.client.bucket_url()?, url, Method::GET),
            None => {
                let mut opts = self.send_options(object_path(name), Method::GET)?;
                opts.query = opt.map(|v| v as &dyn QueryOptions);
                opts
            }
        };
        opts.header = opt.map(|v| v as &dyn HeaderOptions);

        self.client.send(opts, ResultSink::Writer(writer)).await
    }

    /// Upload the object from `body`.
    ///
    /// `content_length` becomes the `Content-Length` of the request unless
    /// the options carry one.
    ///
    /// - [PUT Object](https://cloud.tencent.com/document/product/436/7749)
    pub async fn put(
        &self,
        name: &str,
        body: RequestBody,
        content_length: Option<u64>,
        opt: Option<&ObjectPutOptions>,
    ) -> Result<Response> {
        let mut opts = self
            .send_options(object_path(name), Method::PUT)?
            .with_payload(Payload::Stream {
                body,
                content_length,
            });
        opts.header = opt.map(|v| v as &dyn HeaderOptions);

        self.client.send(opts, ResultSink::Discard).await
    }

    /// Metadata of the object, the response carries no body.
    pub async fn head(&self, name: &str, opt: Option<&ObjectHeadOptions>) -> Result<Response> {
        let mut opts = self.send_options(object_path(name), Method::HEAD)?;
        opts.header = opt.map(|v| v as &dyn HeaderOptions);

        self.client.send(opts, ResultSink::Discard).await
    }

    pub async fn delete(&self, name: &str) -> Result<Response> {
        let opts = self.send_options(object_path(name), Method::DELETE)?;
        self.client.send(opts, ResultSink::Discard).await
    }

    /// Delete up to 1000 objects in one request.
    ///
    /// - [DELETE Multiple Objects](https://cloud.tencent.com/document/product/436/8289)
    pub async fn delete_multi(&self, opt: &DeleteMultiOptions) -> Result<(DeleteResult, Response)> {
        let mut res = DeleteResult::default();
        let opts = self
            .send_options("/?delete".to_string(), Method::POST)?
            .with_payload(Payload::Xml(opt));

        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }

    /// Send a cors preflight request for the object.
    pub async fn options(&self, name: &str, opt: &ObjectOptionsOptions) -> Result<Response> {
        let opts = self
            .send_options(object_path(name), Method::OPTIONS)?
            .with_header(opt);
        self.client.send(opts, ResultSink::Discard).await
    }

    /// Append `body` to an appendable object at `position`.
    ///
    /// The position of the next append is returned by
    /// [`Response::next_append_position`].
    ///
    /// - [APPEND Object](https://cloud.tencent.com/document/product/436/7741)
    pub async fn append(
        &self,
        name: &str,
        position: u64,
        body: RequestBody,
        content_length: Option<u64>,
        opt: Option<&ObjectPutOptions>,
    ) -> Result<Response> {
        let uri = format!("{}?append&position={position}", object_path(name));
        let mut opts = self
            .send_options(uri, Method::POST)?
            .with_payload(Payload::Stream {
                body,
                content_length,
            });
        opts.header = opt.map(|v| v as &dyn HeaderOptions);

        self.client.send(opts, ResultSink::Discard).await
    }

    /// Copy `source` into the object.
    ///
    /// `source` is `<bucket>-<appid>.cos.<region>.myqcloud.com/<key>`, with
    /// an optional `?versionId=` suffix.
    ///
    /// - [PUT Object - Copy](https://cloud.tencent.com/document/product/436/10881)
    pub async fn copy(
        &self,
        name: &str,
        source: &str,
        opt: Option<&ObjectCopyOptions>,
    ) -> Result<(CopyObjectResult, Response)> {
        let header = Pairs::new()
            .push(X_COS_COPY_SOURCE, Some(source))
            .extend(opt.map(|v| v.header_pairs()).unwrap_or_default())
            .build();

        let mut res = CopyObjectResult::default();
        let opts = self
            .send_options(object_path(name), Method::PUT)?
            .with_header(&header);

        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }

    pub async fn get_acl(&self, name: &str) -> Result<(AccessControlPolicy, Response)> {
        let mut res = AccessControlPolicy::default();
        let opts = self.send_options(format!("{}?acl", object_path(name)), Method::GET)?;

        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }

    /// Replace the acl of the object, see [`PutAclOptions`].
    pub async fn put_acl(&self, name: &str, opt: &PutAclOptions) -> Result<Response> {
        let mut opts = self.send_options(format!("{}?acl", object_path(name)), Method::PUT)?;
        opts.header = opt.effective_header();
        if let Some(body) = &opt.body {
            opts = opts.with_payload(Payload::Xml(body));
        }
        self.client.send(opts, ResultSink::Discard).await
    }

    /// Restore an archived object for `days`.
    ///
    /// - [POST Object restore](https://cloud.tencent.com/document/product/436/12633)
    pub async fn restore(&self, name: &str, opt: &RestoreRequest) -> Result<Response> {
        let opts = self
            .send_options(format!("{}?restore", object_path(name)), Method::POST)?
            .with_payload(Payload::Xml(opt));
        self.client.send(opts, ResultSink::Discard).await
    }

    /// Start a multipart upload, the returned upload id is used by the
    /// following part operations.
    pub async fn initiate_multipart_upload(
        &self,
        name: &str,
        opt: Option<&ObjectPutOptions>,
    ) -> Result<(InitiateMultipartUploadResult, Response)> {
        let mut res = InitiateMultipartUploadResult::default();
        let mut opts = self.send_options(format!("{}?uploads", object_path(name)), Method::POST)?;
        opts.header = opt.map(|v| v as &dyn HeaderOptions);

        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }

    /// Upload one part, its etag is returned by [`Response::etag`].
    ///
    /// `part_number` starts from 1.
    pub async fn upload_part(
        &self,
        name: &str,
        upload_id: &str,
        part_number: u32,
        body: RequestBody,
        content_length: Option<u64>,
        opt: Option<&UploadPartOptions>,
    ) -> Result<Response> {
        let query = vec![
            ("partNumber".to_string(), part_number.to_string()),
            ("uploadId".to_string(), upload_id.to_string()),
        ];
        let mut opts = self
            .send_options(object_path(name), Method::PUT)?
            .with_query(&query)
            .with_payload(Payload::Stream {
                body,
                content_length,
            });
        opts.header = opt.map(|v| v as &dyn HeaderOptions);

        self.client.send(opts, ResultSink::Discard).await
    }

    /// Complete a multipart upload, parts must be listed in ascending order.
    pub async fn complete_multipart_upload(
        &self,
        name: &str,
        upload_id: &str,
        opt: &CompleteMultipartUpload,
    ) -> Result<(CompleteMultipartUploadResult, Response)> {
        let mut res = CompleteMultipartUploadResult::default();
        let opts = self
            .send_options(upload_path(name, upload_id), Method::POST)?
            .with_payload(Payload::Xml(opt));

        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }

    pub async fn abort_multipart_upload(&self, name: &str, upload_id: &str) -> Result<Response> {
        let opts = self.send_options(upload_path(name, upload_id), Method::DELETE)?;
        self.client.send(opts, ResultSink::Discard).await
    }

    /// List uploaded parts of a multipart upload.
    pub async fn list_parts(
        &self,
        name: &str,
        upload_id: &str,
        opt: Option<&ListPartsOptions>,
    ) -> Result<(ListPartsResult, Response)> {
        let mut res = ListPartsResult::default();
        let mut opts = self.send_options(upload_path(name, upload_id), Method::GET)?;
        opts.query = opt.map(|v| v as &dyn QueryOptions);

        let resp = self.client.send(opts, ResultSink::Xml(&mut res)).await?;
        Ok((res, resp))
    }

    /// Presigned url of the object valid for `expires` from now on.
    pub async fn presigned_url(
        &self,
        method: Method,
        name: &str,
        expires: Duration,
        query: Option<&dyn QueryOptions>,
    ) -> Result<Uri> {
        self.client
            .presigned_url(method, name, AuthTime::new(expires), query)
            .await
    }
}

fn object_path(name: &str) -> String {
    format!("/{}", cos_encode(name))
}

fn upload_path(name: &str, upload_id: &str) -> String {
    format!("{}?uploadId={}", object_path(name), query_encode(upload_id))
}

#[derive(Debug, Clone, Default)]
pub struct ObjectGetOptions {
    pub response_content_type: Option<String>,
    pub response_content_language: Option<String>,
    pub response_expires: Option<String>,
    pub response_cache_control: Option<String>,
    pub response_content_disposition: Option<String>,
    pub response_content_encoding: Option<String>,
    /// `bytes=0-9`
    pub range: Option<String>,
    pub if_modified_since: Option<String>,
    /// Download through this presigned url instead of signing a new request.
    pub presigned_url: Option<String>,
}

impl QueryOptions for ObjectGetOptions {
    fn query_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push("response-content-type", self.response_content_type.as_ref())
            .push(
                "response-content-language",
                self.response_content_language.as_ref(),
            )
            .push("response-expires", self.response_expires.as_ref())
            .push(
                "response-cache-control",
                self.response_cache_control.as_ref(),
            )
            .push(
                "response-content-disposition",
                self.response_content_disposition.as_ref(),
            )
            .push(
                "response-content-encoding",
                self.response_content_encoding.as_ref(),
            )
            .build()
    }
}

impl HeaderOptions for ObjectGetOptions {
    fn header_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push("Range", self.range.as_ref())
            .push("If-Modified-Since", self.if_modified_since.as_ref())
            .build()
    }
}

/// Headers describing uploaded content.
#[derive(Debug, Clone, Default)]
pub struct ObjectPutHeaderOptions {
    pub cache_control: Option<String>,
    pub content_disposition: Option<String>,
    pub content_encoding: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub content_md5: Option<String>,
    pub expect: Option<String>,
    pub expires: Option<String>,
    pub x_cos_content_sha1: Option<String>,
    /// User metadata, names without the `x-cos-meta-` prefix.
    pub x_cos_meta: Vec<(String, String)>,
    /// `STANDARD`, `STANDARD_IA` or `ARCHIVE`.
    pub x_cos_storage_class: Option<String>,
}

impl HeaderOptions for ObjectPutHeaderOptions {
    fn header_pairs(&self) -> Vec<(String, String)> {
        let meta = self
            .x_cos_meta
            .iter()
            .map(|(k, v)| (format!("{X_COS_META_PREFIX}{k}"), v.clone()))
            .collect();

        Pairs::new()
            .push("Cache-Control", self.cache_control.as_ref())
            .push("Content-Disposition", self.content_disposition.as_ref())
            .push("Content-Encoding", self.content_encoding.as_ref())
            .push("Content-Type", self.content_type.as_ref())
            .push("Content-Length", self.content_length)
            .push("Content-MD5", self.content_md5.as_ref())
            .push("Expect", self.expect.as_ref())
            .push("Expires", self.expires.as_ref())
            .push("x-cos-content-sha1", self.x_cos_content_sha1.as_ref())
            .extend(meta)
            .push(X_COS_STORAGE_CLASS, self.x_cos_storage_class.as_ref())
            .build()
    }
}

/// Options of put, append and initiate multipart upload.
#[derive(Debug, Clone, Default)]
pub struct ObjectPutOptions {
    pub acl_header: Option<AclHeaderOptions>,
    pub header: Option<ObjectPutHeaderOptions>,
}

impl HeaderOptions for ObjectPutOptions {
    fn header_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.acl_header {
            pairs.extend(v.header_pairs());
        }
        if let Some(v) = &self.header {
            pairs.extend(v.header_pairs());
        }
        pairs
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectHeadOptions {
    pub if_modified_since: Option<String>,
}

impl HeaderOptions for ObjectHeadOptions {
    fn header_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push("If-Modified-Since", self.if_modified_since.as_ref())
            .build()
    }
}

/// Headers of a cors preflight request.
#[derive(Debug, Clone, Default)]
pub struct ObjectOptionsOptions {
    pub origin: String,
    pub access_control_request_method: String,
    pub access_control_request_headers: Option<String>,
}

impl HeaderOptions for ObjectOptionsOptions {
    fn header_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push("Origin", Some(&self.origin))
            .push(
                "Access-Control-Request-Method",
                Some(&self.access_control_request_method),
            )
            .push(
                "Access-Control-Request-Headers",
                self.access_control_request_headers.as_ref(),
            )
            .build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectCopyOptions {
    /// `Copy` keeps the metadata of the source, `Replaced` uses the headers
    /// of this request.
    pub x_cos_metadata_directive: Option<String>,
    pub x_cos_copy_source_if_modified_since: Option<String>,
    pub x_cos_copy_source_if_unmodified_since: Option<String>,
    pub x_cos_copy_source_if_match: Option<String>,
    pub x_cos_copy_source_if_none_match: Option<String>,
    pub x_cos_storage_class: Option<String>,
    pub acl_header: Option<AclHeaderOptions>,
}

impl HeaderOptions for ObjectCopyOptions {
    fn header_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push(
                "x-cos-metadata-directive",
                self.x_cos_metadata_directive.as_ref(),
            )
            .push(
                "x-cos-copy-source-If-Modified-Since",
                self.x_cos_copy_source_if_modified_since.as_ref(),
            )
            .push(
                "x-cos-copy-source-If-Unmodified-Since",
                self.x_cos_copy_source_if_unmodified_since.as_ref(),
            )
            .push(
                "x-cos-copy-source-If-Match",
                self.x_cos_copy_source_if_match.as_ref(),
            )
            .push(
                "x-cos-copy-source-If-None-Match",
                self.x_cos_copy_source_if_none_match.as_ref(),
            )
            .push(X_COS_STORAGE_CLASS, self.x_cos_storage_class.as_ref())
            .extend(
                self.acl_header
                    .as_ref()
                    .map(|v| v.header_pairs())
                    .unwrap_or_default(),
            )
            .build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadPartOptions {
    pub content_md5: Option<String>,
    pub expect: Option<String>,
    pub x_cos_content_sha1: Option<String>,
}

impl HeaderOptions for UploadPartOptions {
    fn header_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push("Content-MD5", self.content_md5.as_ref())
            .push("Expect", self.expect.as_ref())
            .push("x-cos-content-sha1", self.x_cos_content_sha1.as_ref())
            .build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListPartsOptions {
    pub encoding_type: Option<String>,
    pub max_parts: Option<u64>,
    pub part_number_marker: Option<u64>,
}

impl QueryOptions for ListPartsOptions {
    fn query_pairs(&self) -> Vec<(String, String)> {
        Pairs::new()
            .push("encoding-type", self.encoding_type.as_ref())
            .push("max-parts", self.max_parts)
            .push("part-number-marker", self.part_number_marker)
            .build()
    }
}

/// Body of `POST ?delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "Delete")]
pub struct DeleteMultiOptions {
    /// Only failed deletions are reported when set.
    #[serde(rename = "Quiet")]
    pub quiet: bool,
    #[serde(rename = "Object")]
    pub objects: Vec<ObjectIdentifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectIdentifier {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "VersionId", skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

impl ObjectIdentifier {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename = "DeleteResult")]
pub struct DeleteResult {
    #[serde(rename = "Deleted")]
    pub deleted: Vec<ObjectIdentifier>,
    #[serde(rename = "Error")]
    pub errors: Vec<DeleteError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeleteError {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename = "CopyObjectResult")]
pub struct CopyObjectResult {
    #[serde(rename = "ETag")]
    pub etag: String,
    #[serde(rename = "LastModified")]
    pub last_modified: String,
}

/// Body of `POST ?restore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "RestoreRequest")]
pub struct RestoreRequest {
    /// Days the restored copy is kept.
    #[serde(rename = "Days")]
    pub days: u64,
    #[serde(rename = "CASJobParameters")]
    pub cas_job_parameters: CasJobParameters,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CasJobParameters {
    /// `Expedited`, `Standard` or `Bulk`.
    #[serde(rename = "Tier")]
    pub tier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename = "InitiateMultipartUploadResult")]
pub struct InitiateMultipartUploadResult {
    #[serde(rename = "Bucket")]
    pub bucket: String,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "UploadId")]
    pub upload_id: String,
}

/// Body of the complete multipart upload request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "CompleteMultipartUpload")]
pub struct CompleteMultipartUpload {
    #[serde(rename = "Part")]
    pub parts: Vec<CompletedPart>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletedPart {
    #[serde(rename = "PartNumber")]
    pub part_number: u32,
    #[serde(rename = "ETag")]
    pub etag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename = "CompleteMultipartUploadResult")]
pub struct CompleteMultipartUploadResult {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Bucket")]
    pub bucket: String,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "ETag")]
    pub etag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename = "ListPartsResult")]
pub struct ListPartsResult {
    #[serde(rename = "Bucket")]
    pub bucket: String,
    #[serde(rename = "EncodingType", alias = "Encoding-Type")]
    pub encoding_type: String,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "UploadId")]
    pub upload_id: String,
    #[serde(rename = "Initiator")]
    pub initiator: Owner,
    #[serde(rename = "Owner")]
    pub owner: Owner,
    #[serde(rename = "StorageClass")]
    pub storage_class: String,
    #[serde(rename = "PartNumberMarker")]
    pub part_number_marker: u64,
    #[serde(rename = "NextPartNumberMarker")]
    pub next_part_number_marker: u64,
    #[serde(rename = "MaxParts")]
    pub max_parts: u64,
    #[serde(rename = "IsTruncated")]
    pub is_truncated: bool,
    #[serde(rename = "Part")]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Part {
    #[serde(rename = "PartNumber")]
    pub part_number: u32,
    #[serde(rename = "LastModified")]
    pub last_modified: String,
    #[serde(rename = "ETag")]
    pub etag: String,
    #[serde(rename = "Size")]
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::XmlBody;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_object_path() {
        assert_eq!(object_path("dir/a b+c.txt"), "/dir%2Fa%20b%2Bc.txt");
        assert_eq!(object_path("(1)!.txt"), "/(1)!.txt");
        assert_eq!(upload_path("a", "x/y"), "/a?uploadId=x%2Fy");
    }

    #[test]
    fn test_object_get_options() {
        let opts = ObjectGetOptions {
            response_content_type: Some("text/plain".to_string()),
            range: Some("bytes=0-9".to_string()),
            ..Default::default()
        };
        assert_eq!(
            opts.query_pairs(),
            vec![("response-content-type".to_string(), "text/plain".to_string())]
        );
        assert_eq!(
            opts.header_pairs(),
            vec![("Range".to_string(), "bytes=0-9".to_string())]
        );
    }

    #[test]
    fn test_object_put_options() {
        let opts = ObjectPutOptions {
            acl_header: Some(AclHeaderOptions {
                x_cos_acl: Some("public-read".to_string()),
                ..Default::default()
            }),
            header: Some(ObjectPutHeaderOptions {
                content_type: Some("text/html".to_string()),
                x_cos_meta: vec![("author".to_string(), "qcos".to_string())],
                x_cos_storage_class: Some("STANDARD_IA".to_string()),
                ..Default::default()
            }),
        };

        assert_eq!(
            opts.header_pairs(),
            vec![
                ("x-cos-acl".to_string(), "public-read".to_string()),
                ("Content-Type".to_string(), "text/html".to_string()),
                ("x-cos-meta-author".to_string(), "qcos".to_string()),
                ("x-cos-storage-class".to_string(), "STANDARD_IA".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_delete_multi() {
        let opts = DeleteMultiOptions {
            quiet: false,
            objects: vec![ObjectIdentifier::new("a.txt"), ObjectIdentifier::new("b.txt")],
        };
        assert_eq!(
            opts.to_xml().unwrap(),
            "<Delete><Quiet>false</Quiet><Object><Key>a.txt</Key></Object><Object><Key>b.txt</Key></Object></Delete>"
        );
    }

    #[test]
    fn test_encode_complete_multipart_upload() {
        let opts = CompleteMultipartUpload {
            parts: vec![CompletedPart {
                part_number: 1,
                etag: "etag1".to_string(),
            }],
        };
        assert_eq!(
            opts.to_xml().unwrap(),
            "<CompleteMultipartUpload><Part><PartNumber>1</PartNumber><ETag>etag1</ETag></Part></CompleteMultipartUpload>"
        );
    }

    #[test]
    fn test_decode_delete_result() {
        let xml = r#"<DeleteResult>
  <Deleted><Key>a.txt</Key></Deleted>
  <Error><Key>b.txt</Key><Code>AccessDenied</Code><Message>Access Denied</Message></Error>
</DeleteResult>"#;
        let res: DeleteResult = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(res.deleted, vec![ObjectIdentifier::new("a.txt")]);
        assert_eq!(res.errors[0].code, "AccessDenied");
    }

    #[test]
    fn test_decode_list_parts() {
        let xml = r#"<ListPartsResult>
  <Bucket>examplebucket-1250000000</Bucket>
  <Key>exampleobject</Key>
  <UploadId>1585130821cbb7df1d</UploadId>
  <Initiator><ID>100000000001</ID></Initiator>
  <Owner><ID>100000000001</ID></Owner>
  <StorageClass>STANDARD</StorageClass>
  <PartNumberMarker>0</PartNumberMarker>
  <NextPartNumberMarker>2</NextPartNumberMarker>
  <MaxParts>1000</MaxParts>
  <IsTruncated>false</IsTruncated>
  <Part>
    <PartNumber>1</PartNumber>
    <LastModified>2020-03-25T18:07:01.000Z</LastModified>
    <ETag>"e1"</ETag>
    <Size>1048576</Size>
  </Part>
  <Part>
    <PartNumber>2</PartNumber>
    <ETag>"e2"</ETag>
    <Size>10</Size>
  </Part>
</ListPartsResult>"#;
        let res: ListPartsResult = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(res.next_part_number_marker, 2);
        assert_eq!(res.parts.len(), 2);
        assert_eq!(res.parts[1].etag, "\"e2\"");
        assert_eq!(res.parts[0].size, 1048576);
    }
}
