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
use crate::options::{HeaderOptions, QueryOptions};
use crate::provide_credential::DefaultCredentialProvider;
use crate::{Bucket, Config, Credential, ErrorResponse, Object, RequestSigner, Response, Service};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST, USER_AGENT};
use http::request::Parts;
use http::{HeaderName, HeaderValue, Method, Uri};
use http_body_util::BodyExt;
use log::debug;
use qcos_core::body::{
    collect_body, drain_body, empty_request_body, full_request_body, RequestBody, ResponseBody,
};
use qcos_core::hash::base64_md5;
use qcos_core::time::AuthTime;
use qcos_core::utils::query_encode;
use qcos_core::{Context, Error, ProvideCredential, Result, Signer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

/// Signature validity used when none is configured.
pub const DEFAULT_EXPIRES_IN: Duration = Duration::from_secs(3600);

/// Base urls requests are resolved against.
#[derive(Debug, Clone)]
pub struct BaseUrl {
    /// Bucket url like `https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com`.
    ///
    /// Bucket and object operations fail without it.
    pub bucket_url: Option<Uri>,
    /// Service url used to list buckets.
    pub service_url: Uri,
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            bucket_url: None,
            service_url: Uri::from_static(DEFAULT_SERVICE_URL),
        }
    }
}

impl BaseUrl {
    /// Create base urls for the given bucket url and the default service url.
    pub fn new(bucket_url: &str) -> Result<Self> {
        Ok(Self {
            bucket_url: Some(parse_base_url(bucket_url)?),
            ..Default::default()
        })
    }

    /// Replace the service url.
    pub fn with_service_url(mut self, service_url: &str) -> Result<Self> {
        self.service_url = parse_base_url(service_url)?;
        Ok(self)
    }

    /// Format the url of a bucket: `{scheme}://{name}-{app_id}.cos.{region}.myqcloud.com`.
    pub fn bucket_url(name: &str, app_id: &str, region: &str, secure: bool) -> Result<Uri> {
        let scheme = if secure { "https" } else { "http" };
        let url = format!("{scheme}://{name}-{app_id}.cos.{region}.myqcloud.com");
        parse_base_url(&url)
    }
}

fn parse_base_url(s: &str) -> Result<Uri> {
    let uri = Uri::from_str(s)
        .map_err(|e| Error::config_invalid(format!("invalid base url: {s}")).with_source(e))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        let msg = format!("base url must have scheme and host: {s}");
        return Err(Error::config_invalid(msg));
    }
    Ok(uri)
}

/// Body of a request.
pub enum Payload<'a> {
    /// No body, the content type defaults to `application/xml`.
    Empty,
    /// Body sent as is. A known length becomes `Content-Length` unless the
    /// header options already carry one.
    Stream {
        /// Content to send.
        body: RequestBody,
        /// Length of the content, if known.
        content_length: Option<u64>,
    },
    /// Value encoded as xml, with `Content-MD5` and `Content-Length`.
    Xml(&'a dyn XmlBody),
}

/// Values that can be sent as xml request bodies.
pub trait XmlBody: Send + Sync {
    /// Encode self into xml.
    fn to_xml(&self) -> Result<String>;
}

impl<T: Serialize + Send + Sync> XmlBody for T {
    fn to_xml(&self) -> Result<String> {
        quick_xml::se::to_string(self)
            .map_err(|e| Error::request_invalid("failed to encode xml body").with_source(e))
    }
}

/// Values that can be decoded from xml response bodies.
pub trait DecodeXml: Send {
    /// Replace self with the value decoded from `body`.
    fn decode_xml(&mut self, body: &[u8]) -> Result<()>;
}

impl<T: DeserializeOwned + Send> DecodeXml for T {
    fn decode_xml(&mut self, body: &[u8]) -> Result<()> {
        *self = quick_xml::de::from_reader(body)
            .map_err(|e| Error::decode_failed("failed to decode xml body").with_source(e))?;
        Ok(())
    }
}

/// Where the body of a successful response goes.
pub enum ResultSink<'a> {
    /// Decode the body as xml. An empty body leaves the target untouched.
    Xml(&'a mut dyn DecodeXml),
    /// Stream the raw body into a writer.
    Writer(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// Read and drop the body.
    Discard,
}

/// Everything needed to send one request.
pub struct SendOptions<'a> {
    /// Base url, ignored when `uri` is absolute.
    pub base_url: &'a Uri,
    /// Path and query like `/?acl`, or an absolute url.
    pub uri: String,
    pub method: Method,
    /// Signing window. `None` sends the request anonymously.
    pub auth_time: Option<AuthTime>,
    pub payload: Payload<'a>,
    pub query: Option<&'a dyn QueryOptions>,
    pub header: Option<&'a dyn HeaderOptions>,
    /// Cancellation of this call, overrides the client's token.
    pub cancel: Option<CancellationToken>,
}

impl<'a> SendOptions<'a> {
    /// Create options for an anonymous request without body.
    pub fn new(base_url: &'a Uri, uri: impl Into<String>, method: Method) -> Self {
        Self {
            base_url,
            uri: uri.into(),
            method,
            auth_time: None,
            payload: Payload::Empty,
            query: None,
            header: None,
            cancel: None,
        }
    }

    pub fn with_auth_time(mut self, auth_time: Option<AuthTime>) -> Self {
        self.auth_time = auth_time;
        self
    }

    pub fn with_payload(mut self, payload: Payload<'a>) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_query(mut self, query: &'a dyn QueryOptions) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_header(mut self, header: &'a dyn HeaderOptions) -> Self {
        self.header = Some(header);
        self
    }

    /// Abort this call once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Client of the COS XML API.
///
/// Cloning is cheap and clones share the cached credential, a client can be
/// used from many tasks at once.
///
/// ```no_run
/// use qcos::{BaseUrl, Client, StaticCredentialProvider};
/// use qcos_core::{Context, OsEnv};
/// use qcos_http_send_reqwest::ReqwestHttpSend;
///
/// # async fn example() -> qcos_core::Result<()> {
/// let ctx = Context::new()
///     .with_http_send(ReqwestHttpSend::default())
///     .with_env(OsEnv);
/// let client = Client::new(
///     ctx,
///     BaseUrl::new("https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com")?,
///     StaticCredentialProvider::new("secret_id", "secret_key"),
/// );
///
/// let (list, _) = client.bucket().get(None).await?;
/// for object in list.contents {
///     println!("{}", object.key);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    base_url: BaseUrl,
    signer: Signer<Credential>,
    user_agent: String,
    expires_in: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl Client {
    /// Create a client loading credentials from `loader`.
    pub fn new(
        ctx: Context,
        base_url: BaseUrl,
        loader: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        let signer = Signer::new(ctx.clone(), loader, RequestSigner::new());

        Self {
            ctx,
            base_url,
            signer,
            user_agent: format!("qcos/{}", env!("CARGO_PKG_VERSION")),
            expires_in: Some(DEFAULT_EXPIRES_IN),
            cancel: None,
        }
    }

    /// Create a client from config, unset fields are loaded from env.
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.merge(Config::from_env(&ctx));

        let mut base_url = BaseUrl::default();
        if let Some(v) = &config.bucket_url {
            base_url.bucket_url = Some(parse_base_url(v)?);
        }
        if let Some(v) = &config.service_url {
            base_url.service_url = parse_base_url(v)?;
        }

        let loader = DefaultCredentialProvider::new(config.clone());
        let mut client = Self::new(ctx, base_url, loader);
        if let Some(v) = config.expires_in {
            client.expires_in = Some(v);
        }
        if let Some(v) = config.user_agent {
            client.user_agent = v;
        }
        Ok(client)
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set how long signatures stay valid, `None` sends anonymous requests.
    pub fn with_expires_in(mut self, expires_in: Option<Duration>) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// Abort in-flight requests once `token` is cancelled.
    ///
    /// [`SendOptions::cancel`] takes precedence for a single call.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Signing window for a request sent now, `None` for anonymous clients.
    pub fn auth_time(&self) -> Option<AuthTime> {
        self.expires_in.map(AuthTime::new)
    }

    /// Url of the configured bucket.
    pub fn bucket_url(&self) -> Result<&Uri> {
        self.base_url
            .bucket_url
            .as_ref()
            .ok_or_else(|| Error::config_invalid("bucket url is not configured"))
    }

    /// Operations on the service.
    pub fn service(&self) -> Service<'_> {
        Service::new(self)
    }

    /// Operations on the configured bucket.
    pub fn bucket(&self) -> Bucket<'_> {
        Bucket::new(self)
    }

    /// Operations on objects of the configured bucket.
    pub fn object(&self) -> Object<'_> {
        Object::new(self)
    }

    /// Build, sign, dispatch the request and decode its response.
    pub async fn send(&self, opts: SendOptions<'_>, sink: ResultSink<'_>) -> Result<Response> {
        let auth_time = opts.auth_time;
        let cancel = opts.cancel.clone().or_else(|| self.cancel.clone());
        let req = self.build_request(opts)?;

        let (mut parts, body) = req.into_parts();
        self.sign(&mut parts, auth_time.as_ref()).await?;
        let method = parts.method.clone();
        let url = parts.uri.clone();

        let req = http::Request::from_parts(parts, body);
        let resp = cancellable(cancel.as_ref(), self.ctx.http_send(req)).await?;
        debug!("{method} {url} responded with {}", resp.status());

        let decode = classify_and_decode(resp, method, url, sink);
        cancellable(cancel.as_ref(), decode).await
    }

    /// Build the http request described by `opts`.
    ///
    /// Nothing is sent, encoding failures are returned as
    /// [`ErrorKind::RequestInvalid`](qcos_core::ErrorKind::RequestInvalid).
    pub fn build_request(&self, opts: SendOptions<'_>) -> Result<http::Request<RequestBody>> {
        let mut parts = request_parts(&opts)?;

        if !self.user_agent.is_empty() {
            parts
                .headers
                .insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        }

        let body = match opts.payload {
            Payload::Empty => {
                set_default_content_type(&mut parts);
                empty_request_body()
            }
            Payload::Stream {
                body,
                content_length,
            } => {
                if let Some(len) = content_length {
                    if !parts.headers.contains_key(CONTENT_LENGTH) {
                        parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
                    }
                }
                body
            }
            Payload::Xml(value) => {
                let xml = value.to_xml()?;
                parts
                    .headers
                    .insert("content-md5", base64_md5(xml.as_bytes()).parse()?);
                parts
                    .headers
                    .insert(CONTENT_LENGTH, HeaderValue::from(xml.len()));
                set_default_content_type(&mut parts);
                full_request_body(xml)
            }
        };

        Ok(http::Request::from_parts(parts, body))
    }

    /// Sign the request with the `Authorization` header.
    ///
    /// Skipped without auth time, or when the url is already presigned.
    pub async fn sign(&self, parts: &mut Parts, auth_time: Option<&AuthTime>) -> Result<()> {
        let Some(auth_time) = auth_time else {
            return Ok(());
        };
        if is_presigned(&parts.uri) {
            debug!("{} is presigned, skip signing", parts.uri);
            return Ok(());
        }

        self.signer.sign(parts, auth_time).await
    }

    /// Send the request through the context's [`HttpSend`](qcos_core::HttpSend).
    ///
    /// Cancellation observed before or during the call wins over any
    /// network error.
    pub async fn dispatch(
        &self,
        req: http::Request<RequestBody>,
    ) -> Result<http::Response<ResponseBody>> {
        cancellable(self.cancel.as_ref(), self.ctx.http_send(req)).await
    }

    /// Build a presigned url for `opts`, carrying the signature in `sign`.
    ///
    /// Only `Host` and the header options are signed, so any http client can
    /// use the url without extra headers.
    pub async fn presign(&self, opts: SendOptions<'_>) -> Result<Uri> {
        let auth_time = opts
            .auth_time
            .ok_or_else(|| Error::request_invalid("auth time is required to presign a request"))?;

        let mut parts = request_parts(&opts)?;
        self.signer.presign(&mut parts, &auth_time).await?;
        Ok(parts.uri)
    }

    /// Presigned url of `name` under the bucket url.
    ///
    /// `name` is the object key, it's encoded before being placed in the path.
    pub async fn presigned_url(
        &self,
        method: Method,
        name: &str,
        auth_time: AuthTime,
        query: Option<&dyn QueryOptions>,
    ) -> Result<Uri> {
        let path = format!("/{}", crate::cos_encode(name));
        let mut opts = SendOptions::new(self.bucket_url()?, path, method);
        opts.auth_time = Some(auth_time);
        opts.query = query;

        self.presign(opts).await
    }
}

/// Run `fut` unless `token` is cancelled first.
///
/// A network error seen after cancellation is reported as canceled.
async fn cancellable<T>(
    token: Option<&CancellationToken>,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    let Some(token) = token else {
        return fut.await;
    };
    if token.is_cancelled() {
        return Err(Error::canceled("request canceled before dispatch"));
    }

    tokio::select! {
        biased;

        _ = token.cancelled() => Err(Error::canceled("request canceled")),
        res = fut => match res {
            Err(err) if err.is_network_error() && token.is_cancelled() => {
                Err(Error::canceled("request canceled").with_source(err))
            }
            res => res,
        },
    }
}

/// Url, method, header options and `Host` of the request.
fn request_parts(opts: &SendOptions<'_>) -> Result<Parts> {
    let url = resolve_url(opts.base_url, &opts.uri, opts.query)?;

    let (mut parts, _) = http::Request::new(()).into_parts();
    parts.method = opts.method.clone();

    if let Some(header) = opts.header {
        for (k, v) in header.header_pairs() {
            let (name, value) = header_pair(&k, &v)?;
            parts.headers.append(name, value);
        }
    }

    let host = url
        .authority()
        .ok_or_else(|| Error::request_invalid(format!("url without host: {url}")))?;
    let host = HeaderValue::from_str(host.as_str())?;
    parts.headers.insert(HOST, host);
    parts.uri = url;

    Ok(parts)
}

fn header_pair(k: &str, v: &str) -> Result<(HeaderName, HeaderValue)> {
    let invalid = || Error::request_invalid(format!("invalid header: {k}"));
    let name = HeaderName::from_bytes(k.as_bytes()).map_err(|e| invalid().with_source(e))?;
    let value = HeaderValue::from_str(v).map_err(|e| invalid().with_source(e))?;
    Ok((name, value))
}

fn resolve_url(base_url: &Uri, uri: &str, query: Option<&dyn QueryOptions>) -> Result<Uri> {
    let mut url = if uri.starts_with("http://") || uri.starts_with("https://") {
        uri.to_string()
    } else {
        let scheme = base_url.scheme_str().unwrap_or("https");
        let authority = base_url
            .authority()
            .ok_or_else(|| Error::request_invalid("base url has no host"))?;
        let path = if uri.starts_with('/') {
            uri.to_string()
        } else {
            format!("/{uri}")
        };
        format!("{scheme}://{authority}{path}")
    };

    let pairs = query.map(|q| q.query_pairs()).unwrap_or_default();
    if !pairs.is_empty() {
        let encoded = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", query_encode(k), query_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        // Query already in the uri goes first, it routes the request (`?acl`).
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&encoded);
    }

    Uri::from_str(&url)
        .map_err(|e| Error::request_invalid(format!("invalid request url: {url}")).with_source(e))
}

fn set_default_content_type(parts: &mut Parts) {
    if !parts.headers.contains_key(CONTENT_TYPE) {
        parts
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_XML));
    }
}

fn is_presigned(uri: &Uri) -> bool {
    uri.query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).any(|(k, _)| k == SIGN_QUERY))
        .unwrap_or_default()
}

/// Turn the response into a [`Response`] or an error.
///
/// The body is consumed on every path so that the connection can be reused.
async fn classify_and_decode(
    resp: http::Response<ResponseBody>,
    method: Method,
    url: Uri,
    sink: ResultSink<'_>,
) -> Result<Response> {
    let (parts, body) = resp.into_parts();

    if !parts.status.is_success() {
        let bs = collect_body(body).await?;
        let err = ErrorResponse::decode(parts.status, method, url, parts.headers, &bs);
        debug!("request failed: {err}");
        return Err(err.into());
    }

    match sink {
        ResultSink::Xml(target) => {
            let bs = collect_body(body).await?;
            if !bs.iter().all(u8::is_ascii_whitespace) {
                target.decode_xml(&bs)?;
            }
        }
        ResultSink::Writer(writer) => {
            write_body(body, writer).await?;
        }
        ResultSink::Discard => {
            drain_body(body).await?;
        }
    }

    Ok(Response::new(parts.status, parts.headers, method, url))
}

async fn write_body(
    mut body: ResponseBody,
    writer: &mut (dyn AsyncWrite + Unpin + Send),
) -> Result<u64> {
    let mut written = 0;
    while let Some(frame) = body.frame().await {
        let Ok(data) = frame?.into_data() else {
            continue;
        };

        if let Err(err) = writer.write_all(&data).await {
            drain_body(body).await?;
            let err = Error::unexpected("failed to write response body").with_source(err);
            return Err(err);
        }
        written += data.len() as u64;
    }
    writer.flush().await?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qcos_core::NoopHttpSend;

    const BUCKET: &str = "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com";

    fn client() -> Client {
        Client::new(
            Context::new().with_http_send(NoopHttpSend),
            BaseUrl::new(BUCKET).unwrap(),
            crate::StaticCredentialProvider::new("id", "key"),
        )
    }

    #[derive(Serialize)]
    #[serde(rename = "Tagging")]
    struct Tagging {
        #[serde(rename = "TagSet")]
        tag_set: TagSet,
    }

    #[derive(Serialize)]
    struct TagSet {
        #[serde(rename = "Tag")]
        tags: Vec<Tag>,
    }

    #[derive(Serialize)]
    struct Tag {
        #[serde(rename = "Key")]
        key: String,
        #[serde(rename = "Value")]
        value: String,
    }

    #[test]
    fn test_bucket_url() {
        let url = BaseUrl::bucket_url("examplebucket", "1250000000", "ap-beijing", true).unwrap();
        assert_eq!(url.to_string(), format!("{BUCKET}/"));

        let url = BaseUrl::bucket_url("examplebucket", "1250000000", "ap-beijing", false).unwrap();
        assert_eq!(
            url.to_string(),
            "http://examplebucket-1250000000.cos.ap-beijing.myqcloud.com/"
        );
    }

    #[test]
    fn test_base_url_requires_host() {
        let err = BaseUrl::new("/relative").unwrap_err();
        assert_eq!(err.kind(), qcos_core::ErrorKind::ConfigInvalid);
        assert_eq!(
            BaseUrl::default().service_url.to_string(),
            "https://service.cos.myqcloud.com/"
        );
    }

    #[test]
    fn test_build_request_keeps_existing_query_first() {
        let client = client();
        let query = vec![("max-uploads".to_string(), "10".to_string())];
        let opts = SendOptions::new(client.bucket_url().unwrap(), "/?uploads", Method::GET)
            .with_query(&query);

        let req = client.build_request(opts).unwrap();
        assert_eq!(req.uri().query(), Some("uploads&max-uploads=10"));
        assert_eq!(
            req.headers()[HOST],
            "examplebucket-1250000000.cos.ap-beijing.myqcloud.com"
        );
        let user_agent = req.headers()[USER_AGENT].to_str().unwrap();
        assert!(user_agent.starts_with("qcos/"));
        assert_eq!(req.headers()[CONTENT_TYPE], CONTENT_TYPE_XML);
    }

    #[test]
    fn test_build_request_with_xml_payload() {
        let client = client();
        let tagging = Tagging {
            tag_set: TagSet {
                tags: vec![Tag {
                    key: "k".to_string(),
                    value: "v".to_string(),
                }],
            },
        };
        let opts = SendOptions::new(client.bucket_url().unwrap(), "/?tagging", Method::PUT)
            .with_payload(Payload::Xml(&tagging));

        let req = client.build_request(opts).unwrap();
        let xml = "<Tagging><TagSet><Tag><Key>k</Key><Value>v</Value></Tag></TagSet></Tagging>";
        let len = xml.len().to_string();
        assert_eq!(req.headers()[CONTENT_LENGTH], len.as_str());
        assert_eq!(
            req.headers()["content-md5"],
            base64_md5(xml.as_bytes()).as_str()
        );
        assert_eq!(req.headers()[CONTENT_TYPE], CONTENT_TYPE_XML);
    }

    #[test]
    fn test_build_request_caller_content_length_wins() {
        let client = client();
        let header = vec![
            ("Content-Length".to_string(), "5".to_string()),
            ("Content-Type".to_string(), "text/plain".to_string()),
        ];
        let opts = SendOptions::new(client.bucket_url().unwrap(), "/a.txt", Method::PUT)
            .with_header(&header)
            .with_payload(Payload::Stream {
                body: full_request_body("hello"),
                content_length: Some(100),
            });

        let req = client.build_request(opts).unwrap();
        assert_eq!(req.headers()[CONTENT_LENGTH], "5");
        assert_eq!(req.headers()[CONTENT_TYPE], "text/plain");

        let opts = SendOptions::new(client.bucket_url().unwrap(), "/a.txt", Method::PUT)
            .with_payload(Payload::Stream {
                body: full_request_body("hello"),
                content_length: Some(5),
            });
        let req = client.build_request(opts).unwrap();
        assert_eq!(req.headers()[CONTENT_LENGTH], "5");
        assert!(req.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_build_request_rejects_invalid_header() {
        let client = client();
        let header = vec![("bad header".to_string(), "v".to_string())];
        let opts = SendOptions::new(client.bucket_url().unwrap(), "/a.txt", Method::PUT)
            .with_header(&header);

        let err = client.build_request(opts).unwrap_err();
        assert_eq!(err.kind(), qcos_core::ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_absolute_uri_ignores_base_url() {
        let client = client();
        let opts = SendOptions::new(
            &client.base_url().service_url,
            format!("{BUCKET}/a.txt?sign=abc"),
            Method::GET,
        );

        let req = client.build_request(opts).unwrap();
        assert_eq!(req.uri().to_string(), format!("{BUCKET}/a.txt?sign=abc"));
        assert!(is_presigned(req.uri()));
    }

    #[tokio::test]
    async fn test_presign() -> Result<()> {
        let client = client();
        let auth_time = AuthTime::new(Duration::from_secs(600));
        let opts = SendOptions::new(client.bucket_url()?, "/a%20b.txt", Method::GET)
            .with_auth_time(Some(auth_time));

        let url = client.presign(opts).await?;
        let query = url.query().unwrap_or_default();
        assert_eq!(url.path(), "/a%20b.txt");
        let prefix = "sign=q-sign-algorithm%3Dsha1%26q-ak%3Did%26";
        assert!(query.starts_with(prefix));
        assert!(query.contains("q-header-list%3Dhost%26"));

        let opts = SendOptions::new(client.bucket_url()?, "/a.txt", Method::GET);
        let err = client.presign(opts).await.unwrap_err();
        assert_eq!(err.kind(), qcos_core::ErrorKind::RequestInvalid);
        Ok(())
    }
}
