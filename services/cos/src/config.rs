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
use qcos_core::utils::Redact;
use qcos_core::Context;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// Config for the COS client.
#[derive(Clone, Default)]
pub struct Config {
    /// Secret ID
    pub secret_id: Option<String>,
    /// Secret Key
    pub secret_key: Option<String>,
    /// Security token for temporary credentials
    pub security_token: Option<String>,
    /// Bucket url like `https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com`
    pub bucket_url: Option<String>,
    /// Service url, defaults to `https://service.cos.myqcloud.com`
    pub service_url: Option<String>,
    /// Validity of request signatures, defaults to one hour.
    pub expires_in: Option<Duration>,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_id", &Redact::from(&self.secret_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("security_token", &Redact::from(&self.security_token))
            .field("bucket_url", &self.bucket_url)
            .field("service_url", &self.service_url)
            .field("expires_in", &self.expires_in)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            secret_id: ctx
                .env_var(TENCENTCLOUD_SECRET_ID)
                .or_else(|| ctx.env_var(TKE_SECRET_ID)),
            secret_key: ctx
                .env_var(TENCENTCLOUD_SECRET_KEY)
                .or_else(|| ctx.env_var(TKE_SECRET_KEY)),
            security_token: ctx
                .env_var(TENCENTCLOUD_TOKEN)
                .or_else(|| ctx.env_var(TENCENTCLOUD_SECURITY_TOKEN))
                .or_else(|| ctx.env_var(QCLOUD_SECRET_TOKEN)),
            bucket_url: ctx.env_var(QCOS_BUCKET_URL),
            service_url: ctx.env_var(QCOS_SERVICE_URL),
            expires_in: None,
            user_agent: None,
        }
    }

    /// Fill the unset fields of `self` from `other`.
    pub fn merge(self, other: Config) -> Self {
        Self {
            secret_id: self.secret_id.or(other.secret_id),
            secret_key: self.secret_key.or(other.secret_key),
            security_token: self.security_token.or(other.security_token),
            bucket_url: self.bucket_url.or(other.bucket_url),
            service_url: self.service_url.or(other.service_url),
            expires_in: self.expires_in.or(other.expires_in),
            user_agent: self.user_agent.or(other.user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qcos_core::StaticEnv;
    use std::collections::HashMap;

    const BUCKET_URL: &str = "https://examplebucket-1250000000.cos.ap-beijing.myqcloud.com";

    #[test]
    fn test_config_from_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (TKE_SECRET_ID.to_string(), "tke_id".to_string()),
                (TENCENTCLOUD_SECRET_KEY.to_string(), "cloud_key".to_string()),
                (QCLOUD_SECRET_TOKEN.to_string(), "token".to_string()),
                (QCOS_BUCKET_URL.to_string(), BUCKET_URL.to_string()),
            ]),
        });

        let cfg = Config::from_env(&ctx);
        assert_eq!(cfg.secret_id.as_deref(), Some("tke_id"));
        assert_eq!(cfg.secret_key.as_deref(), Some("cloud_key"));
        assert_eq!(cfg.security_token.as_deref(), Some("token"));
        assert_eq!(cfg.bucket_url.as_deref(), Some(BUCKET_URL));
        assert_eq!(cfg.service_url, None);
    }

    #[test]
    fn test_config_merge_prefers_self() {
        let explicit = Config {
            secret_id: Some("explicit".to_string()),
            ..Default::default()
        };
        let env = Config {
            secret_id: Some("env".to_string()),
            secret_key: Some("env_key".to_string()),
            ..Default::default()
        };

        let merged = explicit.merge(env);
        assert_eq!(merged.secret_id.as_deref(), Some("explicit"));
        assert_eq!(merged.secret_key.as_deref(), Some("env_key"));
    }

    #[test]
    fn test_config_debug_is_redacted() {
        let cfg = Config {
            secret_key: Some("AKIDZfbOA78asKUYBcXFrJD0a1ICvR98JM".to_string()),
            ..Default::default()
        };
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("AKIDZfbOA78asKUYBcXFrJD0a1ICvR98JM"));
    }
}
