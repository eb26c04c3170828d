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

use std::env;
use std::time::Duration;

use http::{Method, StatusCode};
use log::{debug, warn};
use pretty_assertions::assert_eq;
use qcos::{Client, Config, ErrorResponse, ObjectPutHeaderOptions, ObjectPutOptions};
use qcos_core::body::full_request_body;
use qcos_core::{Context, OsEnv, Result};
use qcos_http_send_reqwest::ReqwestHttpSend;

/// Client built from `QCOS_BUCKET_URL` and the tencent cloud credential envs.
fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();
    if env::var("QCOS_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::from_config(ctx, Config::default()).expect("client must be configured");
    client.bucket_url().expect("env QCOS_BUCKET_URL must set");

    Some(client)
}

#[tokio::test]
async fn test_object_lifecycle() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("QCOS_TEST is not set, skipped");
        return Ok(());
    };

    let millis = qcos_core::time::now().timestamp_millis();
    let name = format!("qcos-test/{millis} with space.txt");
    let content = "Hello, COS!";
    let opt = ObjectPutOptions {
        header: Some(ObjectPutHeaderOptions {
            content_type: Some("text/plain".to_string()),
            x_cos_meta: vec![("author".to_string(), "qcos".to_string())],
            ..Default::default()
        }),
        ..Default::default()
    };

    let size = content.len() as u64;
    let resp = client
        .object()
        .put(&name, full_request_body(content), Some(size), Some(&opt))
        .await?;
    debug!("put object: {:?}", resp.request_id());

    let resp = client.object().head(&name, None).await?;
    assert_eq!(resp.content_length(), Some(size));
    let author = ("author".to_string(), "qcos".to_string());
    assert_eq!(resp.meta(), vec![author]);

    let mut buf = Vec::new();
    client.object().get(&name, &mut buf, None).await?;
    assert_eq!(buf, content.as_bytes());

    let url = client
        .object()
        .presigned_url(Method::GET, &name, Duration::from_secs(600), None)
        .await?;
    let body = reqwest::get(url.to_string())
        .await
        .expect("presigned url must be reachable")
        .text()
        .await
        .expect("presigned url must return text");
    assert_eq!(body, content);

    client.object().delete(&name).await?;
    Ok(())
}

#[tokio::test]
async fn test_get_not_exist_object() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("QCOS_TEST is not set, skipped");
        return Ok(());
    };

    let mut buf = Vec::new();
    let err = client
        .object()
        .get("qcos-test/not_exist_file", &mut buf, None)
        .await
        .unwrap_err();

    let resp = ErrorResponse::from_error(&err).expect("must be a service error");
    debug!("got error response: {resp}");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.code, "NoSuchKey");
    assert!(!resp.request_id.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_objects() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("QCOS_TEST is not set, skipped");
        return Ok(());
    };

    let (list, resp) = client.bucket().get(None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    debug!("bucket {} has {} objects", list.name, list.contents.len());
    Ok(())
}
