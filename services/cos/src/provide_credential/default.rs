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

use crate::{Config, Credential};
use async_trait::async_trait;
use qcos_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use std::sync::Arc;

/// Default loader for Tencent COS.
///
/// This loader will try to load credentials in the following order:
/// 1. From static configuration
/// 2. From environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new(config: Config) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(super::ConfigCredentialProvider::new(Arc::new(config)))
            .push(super::EnvCredentialProvider::new());

        Self { chain }
    }
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use qcos_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_default_prefers_config_over_env() -> anyhow::Result<()> {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (TENCENTCLOUD_SECRET_ID.to_string(), "env_id".to_string()),
                (TENCENTCLOUD_SECRET_KEY.to_string(), "env_key".to_string()),
            ]),
        });

        let provider = DefaultCredentialProvider::new(Config {
            secret_id: Some("config_id".to_string()),
            secret_key: Some("config_key".to_string()),
            ..Default::default()
        });
        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.secret_id, "config_id");

        let cred = DefaultCredentialProvider::default()
            .provide_credential(&ctx)
            .await?
            .unwrap();
        assert_eq!(cred.secret_id, "env_id");

        Ok(())
    }

    #[tokio::test]
    async fn test_default_without_anything() -> anyhow::Result<()> {
        let cred = DefaultCredentialProvider::default()
            .provide_credential(&Context::new())
            .await?;
        assert!(cred.is_none());
        Ok(())
    }
}
