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
use crate::Credential;
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use percent_encoding::utf8_percent_encode;
use qcos_core::hash::{hex_hmac_sha1, hex_sha1};
use qcos_core::time::AuthTime;
use qcos_core::{Context, Error, Result, SignRequest, SigningMethod, SigningRequest};

/// RequestSigner that implements Tencent COS signing.
///
/// - [Tencent COS Signature](https://cloud.tencent.com/document/product/436/7778)
///
/// Requests are signed in place: [`SigningMethod::Header`] sets `Authorization`,
/// [`SigningMethod::Query`] appends `sign` to the query. Without a credential
/// the request is left untouched.
#[derive(Debug, Default)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a new builder for Tencent COS signer.
    pub fn new() -> Self {
        Self
    }

    /// Compute the authorization string of the request.
    ///
    /// The output is a pure function of its inputs, the same request and
    /// auth time always produce the same string.
    pub fn authorization(cred: &Credential, req: &SigningRequest, auth_time: &AuthTime) -> String {
        let sign_time = auth_time.sign.to_string();
        let key_time = auth_time.key.to_string();
        let sign_key = hex_hmac_sha1(cred.secret_key.as_bytes(), key_time.as_bytes());

        let params = canonical_params(req);
        let param_list = join_names(&params);
        debug!("param list: {param_list}");

        let headers = canonical_headers(req);
        let header_list = join_names(&headers);
        debug!("header list: {header_list}");

        let http_string = format!(
            "{}\n{}\n{}\n{}\n",
            req.method.as_str().to_ascii_lowercase(),
            req.path,
            join_pairs(&params),
            join_pairs(&headers),
        );
        debug!("http string: {http_string}");

        let http_hash = hex_sha1(http_string.as_bytes());
        let string_to_sign = format!("sha1\n{sign_time}\n{http_hash}\n");
        debug!("string_to_sign: {string_to_sign}");

        let signature = hex_hmac_sha1(sign_key.as_bytes(), string_to_sign.as_bytes());

        format!(
            "q-sign-algorithm=sha1&q-ak={}&q-sign-time={sign_time}&q-key-time={key_time}&q-header-list={header_list}&q-url-param-list={param_list}&q-signature={signature}",
            cred.secret_id
        )
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
        method: SigningMethod,
    ) -> Result<()> {
        let Some(cred) = credential else {
            debug!("no credential available, sending request anonymously");
            return Ok(());
        };
        if cred.is_expired() {
            return Err(Error::credential_expired("credential has expired"));
        }

        let mut signing_req = SigningRequest::build(req)?;

        match method {
            SigningMethod::Header(auth_time) => {
                // The token header takes part in the signature, insert it first.
                if let Some(token) = &cred.security_token {
                    signing_req
                        .headers
                        .insert(X_COS_SECURITY_TOKEN, sensitive(token)?);
                }

                let authorization = Self::authorization(cred, &signing_req, &auth_time);
                signing_req
                    .headers
                    .insert(AUTHORIZATION, sensitive(&authorization)?);
            }
            SigningMethod::Query(auth_time) => {
                let authorization = Self::authorization(cred, &signing_req, &auth_time);
                signing_req.query_push(SIGN_QUERY, authorization);

                if let Some(token) = &cred.security_token {
                    signing_req.query_push(X_COS_SECURITY_TOKEN, token.as_str());
                }
            }
        }

        signing_req.apply(req)
    }
}

/// Percent encode input with [`COS_URI_ENCODE_SET`].
pub fn cos_encode(input: &str) -> String {
    utf8_percent_encode(input, &COS_URI_ENCODE_SET).to_string()
}

fn is_signed_header(name: &str) -> bool {
    name.starts_with(X_COS_PREFIX) || SIGNED_HEADERS.contains(&name)
}

/// Lowercased and encoded query pairs, sorted by name.
///
/// The sort is stable so repeated names keep their order.
fn canonical_params(req: &SigningRequest) -> Vec<(String, String)> {
    let mut params = req
        .query
        .iter()
        .map(|(k, v)| (cos_encode(&k.to_lowercase()), cos_encode(v)))
        .collect::<Vec<_>>();
    params.sort_by(|a, b| a.0.cmp(&b.0));
    params
}

fn canonical_headers(req: &SigningRequest) -> Vec<(String, String)> {
    let mut headers = req
        .header_to_vec_with_filter(is_signed_header)
        .into_iter()
        .map(|(k, v)| (k, cos_encode(&v)))
        .collect::<Vec<_>>();
    headers.sort_by(|a, b| a.0.cmp(&b.0));
    headers
}

fn join_names(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";")
}

fn join_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn sensitive(value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value)?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use pretty_assertions::assert_eq;
    use qcos_core::time::{from_timestamp, now, TimeWindow};
    use qcos_core::ErrorKind;
    use std::time::Duration;
    use test_case::test_case;

    const HOST: &str = "examplebucket-1250000000.cos.ap-beijing.myqcloud.com";
    const SECRET_ID: &str = "QmFzZTY0IGlzIGEgZ2VuZXJp";
    const SECRET_KEY: &str = "AKIDZfbOA78asKUYBcXFrJD0a1ICvR98JM";

    fn fixture_credential() -> Credential {
        Credential::new(SECRET_ID, SECRET_KEY)
    }

    fn fixture_auth_time() -> AuthTime {
        let start = from_timestamp(1480932292).unwrap();
        AuthTime::starting_at(start, Duration::from_secs(80000))
    }

    fn field<'a>(auth: &'a str, name: &str) -> &'a str {
        auth.split('&')
            .find_map(|kv| kv.strip_prefix(name)?.strip_prefix('='))
            .unwrap_or_default()
    }

    fn request(method: Method, host: &str, path: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = http::Request::builder()
            .method(method)
            .uri(format!("https://{host}{path}"));
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn fixture_authorization(parts: &mut Parts) -> String {
        let req = SigningRequest::build(parts).unwrap();
        RequestSigner::authorization(&fixture_credential(), &req, &fixture_auth_time())
    }

    async fn sign(parts: &mut Parts, cred: Option<&Credential>, m: SigningMethod) -> Result<()> {
        let ctx = Context::new();
        RequestSigner.sign_request(&ctx, parts, cred, m).await
    }

    fn query_value(parts: &Parts, name: &str) -> Option<String> {
        let query = parts.uri.query().unwrap_or_default();
        form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_authorization_fixture() {
        let host = "testbucket-125000000.cos.ap-beijing-1.myqcloud.com";
        let sha1 = "db8ac1c259eb89d4a131b253bacfca5f319d54f2";
        let headers = [
            ("Host", host),
            ("x-cos-content-sha1", sha1),
            ("x-cos-stroage-class", "nearline"),
        ];
        let mut parts = request(Method::PUT, host, "/testfile2", &headers);

        let auth = fixture_authorization(&mut parts);
        assert_eq!(
            auth,
            "q-sign-algorithm=sha1&q-ak=QmFzZTY0IGlzIGEgZ2VuZXJp&q-sign-time=1480932292;1481012292&q-key-time=1480932292;1481012292&q-header-list=host;x-cos-content-sha1;x-cos-stroage-class&q-url-param-list=&q-signature=91f7814df035319aa08d47e5a7a66ea989d57301"
        );
    }

    #[test]
    fn test_authorization_with_query_and_split_windows() {
        let path = "/dir/a%20b.txt?response-content-type=text%2Fplain&Prefix=x%20y&acl";
        let headers = [
            ("Host", HOST),
            ("Range", "bytes=0-9"),
            ("X-Cos-Meta-Note", "hello world!(1)"),
            ("User-Agent", "qcos-test"),
        ];
        let mut parts = request(Method::GET, HOST, path, &headers);
        let req = SigningRequest::build(&mut parts).unwrap();

        let start = from_timestamp(1480932292).unwrap();
        let auth_time = AuthTime::from_windows(
            TimeWindow::new(start, Duration::from_secs(80000)),
            TimeWindow::new(start, Duration::from_secs(81000)),
        );

        let auth = RequestSigner::authorization(&fixture_credential(), &req, &auth_time);
        assert_eq!(
            auth,
            "q-sign-algorithm=sha1&q-ak=QmFzZTY0IGlzIGEgZ2VuZXJp&q-sign-time=1480932292;1481012292&q-key-time=1480932292;1481013292&q-header-list=host;range;x-cos-meta-note&q-url-param-list=acl;prefix;response-content-type&q-signature=b5ce19b656c3cf24f672e1ccd201a145a57365c7"
        );
    }

    #[test]
    fn test_authorization_is_deterministic() {
        let headers = [("Content-Type", "text/plain")];
        let mut a = request(Method::PUT, HOST, "/a?uploads", &headers);
        let mut b = request(Method::PUT, HOST, "/a?uploads", &headers);

        assert_eq!(fixture_authorization(&mut a), fixture_authorization(&mut b));
    }

    #[test]
    fn test_header_filter_ignores_case_and_unlisted() {
        let headers = [
            ("X-COS-META-Author", "a"),
            ("Content-Type", "text/plain"),
            ("CONTENT-MD5", "CY9rzUYh03PK3k6DJie09g=="),
            ("User-Agent", "qcos"),
            ("Date", "Sun, 06 Nov 1994 08:49:37 GMT"),
            ("x-custom", "1"),
        ];
        let mut parts = request(Method::PUT, HOST, "/a", &headers);

        let auth = fixture_authorization(&mut parts);
        assert_eq!(
            field(&auth, "q-header-list"),
            "content-md5;content-type;x-cos-meta-author"
        );
    }

    #[test]
    fn test_param_list_is_sorted_and_lowercased() {
        let path = "/a?uploadId=ABC&partNumber=1&Tagging";
        let mut parts = request(Method::PUT, HOST, path, &[]);

        let auth = fixture_authorization(&mut parts);
        assert_eq!(
            field(&auth, "q-url-param-list"),
            "partnumber;tagging;uploadid"
        );
        assert_eq!(field(&auth, "q-header-list"), "");
    }

    #[test_case("a b", "a%20b"; "space")]
    #[test_case("!'()*", "!'()*"; "reserved kept")]
    #[test_case("+#@,", "%2B%23%40%2C"; "reserved escaped")]
    #[test_case("a/b:c=d&e", "a%2Fb%3Ac%3Dd%26e"; "delimiters")]
    #[test_case("-_.~AZaz09", "-_.~AZaz09"; "unreserved")]
    #[test_case("中", "%E4%B8%AD"; "utf8")]
    fn test_cos_encode(input: &str, expected: &str) {
        assert_eq!(cos_encode(input), expected);
    }

    #[tokio::test]
    async fn test_header_and_query_signatures_match() -> Result<()> {
        let cred = fixture_credential();
        let auth_time = fixture_auth_time();
        let path = "/a.txt?versionId=1";
        let host = [("Host", HOST)];

        let mut header = request(Method::GET, HOST, path, &host);
        let method = SigningMethod::Header(auth_time);
        sign(&mut header, Some(&cred), method).await?;
        let authorization = header.headers[AUTHORIZATION].to_str()?.to_string();

        let mut query = request(Method::GET, HOST, path, &host);
        let method = SigningMethod::Query(auth_time);
        sign(&mut query, Some(&cred), method).await?;
        assert!(query.headers.get(AUTHORIZATION).is_none());

        let presigned = query_value(&query, SIGN_QUERY).unwrap_or_default();
        assert_eq!(presigned, authorization);
        Ok(())
    }

    #[tokio::test]
    async fn test_security_token() -> Result<()> {
        let cred = fixture_credential().with_security_token("session token");
        let auth_time = fixture_auth_time();
        let host = [("Host", HOST)];

        let mut header = request(Method::GET, HOST, "/a.txt", &host);
        let method = SigningMethod::Header(auth_time);
        sign(&mut header, Some(&cred), method).await?;
        assert_eq!(header.headers[X_COS_SECURITY_TOKEN], "session token");
        assert!(header.headers[X_COS_SECURITY_TOKEN].is_sensitive());
        let authorization = header.headers[AUTHORIZATION].to_str()?;
        let signed = field(authorization, "q-header-list");
        assert_eq!(signed, "host;x-cos-security-token");

        let mut query = request(Method::GET, HOST, "/a.txt", &host);
        let method = SigningMethod::Query(auth_time);
        sign(&mut query, Some(&cred), method).await?;
        assert!(query.headers.get(X_COS_SECURITY_TOKEN).is_none());

        let q = query.uri.query().unwrap_or_default();
        let prefix = "sign=q-sign-algorithm%3Dsha1%26q-ak%3DQmFzZTY0IGlzIGEgZ2VuZXJp";
        assert!(q.starts_with(prefix));
        assert!(q.ends_with("&x-cos-security-token=session%20token"));
        Ok(())
    }

    #[tokio::test]
    async fn test_presigned_token_is_left_unsigned() -> Result<()> {
        let auth_time = fixture_auth_time();
        let host = [("Host", HOST)];

        let session = fixture_credential().with_security_token("tok");
        let mut query = request(Method::GET, HOST, "/a.txt", &host);
        let method = SigningMethod::Query(auth_time);
        sign(&mut query, Some(&session), method).await?;

        let presigned = query_value(&query, SIGN_QUERY).unwrap_or_default();
        assert_eq!(field(&presigned, "q-header-list"), "host");
        let token = query_value(&query, X_COS_SECURITY_TOKEN);
        assert_eq!(token.as_deref(), Some("tok"));

        // Same request, header signed with the token-free credential.
        let cred = fixture_credential();
        let mut header = request(Method::GET, HOST, "/a.txt", &host);
        let method = SigningMethod::Header(auth_time);
        sign(&mut header, Some(&cred), method).await?;
        assert_eq!(presigned, header.headers[AUTHORIZATION].to_str()?);
        Ok(())
    }

    #[tokio::test]
    async fn test_expired_credential_is_rejected() {
        let mut cred = fixture_credential();
        cred.expires_in = Some(now() - chrono::TimeDelta::seconds(1));

        let mut parts = request(Method::GET, HOST, "/a.txt", &[]);
        let method = SigningMethod::Header(fixture_auth_time());
        let err = sign(&mut parts, Some(&cred), method).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialExpired);
        assert!(err.is_credential_error());
        assert!(parts.headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_anonymous_request_is_untouched() -> Result<()> {
        let path = "/a.txt?acl";
        let mut parts = request(Method::GET, HOST, path, &[("Host", HOST)]);
        let method = SigningMethod::Header(fixture_auth_time());
        sign(&mut parts, None, method).await?;

        assert_eq!(parts.uri.to_string(), format!("https://{HOST}{path}"));
        assert!(parts.headers.get(AUTHORIZATION).is_none());
        Ok(())
    }
}
