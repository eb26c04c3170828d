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
use log::debug;
use qcos_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// Static configuration based loader.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref();

        match (&config.secret_id, &config.secret_key) {
            (Some(secret_id), Some(secret_key)) => {
                debug!("loading credential from config");
                Ok(Some(Credential {
                    secret_id: secret_id.clone(),
                    secret_key: secret_key.clone(),
                    security_token: config.security_token.clone(),
                    expires_in: None,
                }))
            }
            _ => {
                debug!("incomplete config, skipping");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_credential_provider() -> anyhow::Result<()> {
        let provider = ConfigCredentialProvider::new(Arc::new(Config {
            secret_id: Some("id".to_string()),
            secret_key: Some("key".to_string()),
            security_token: Some("token".to_string()),
            ..Default::default()
        }));

        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("must exist");
        assert_eq!(cred.secret_id, "id");
        assert_eq!(cred.security_token.as_deref(), Some("token"));

        let provider = ConfigCredentialProvider::new(Arc::new(Config {
            secret_id: Some("id".to_string()),
            ..Default::default()
        }));
        let ctx = Context::new();
        assert!(provider.provide_credential(&ctx).await?.is_none());

        Ok(())
    }
}
