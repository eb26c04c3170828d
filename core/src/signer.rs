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

use crate::time::AuthTime;
use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential, SigningMethod};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// The credential is loaded lazily and cached until it turns invalid.
/// Clones share the same cache.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// The context this signer loads credentials with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Sign the request with the `Authorization` header.
    pub async fn sign(&self, req: &mut http::request::Parts, auth_time: &AuthTime) -> Result<()> {
        self.sign_with(req, SigningMethod::Header(*auth_time)).await
    }

    /// Sign the request with query parameters, producing a presigned url.
    pub async fn presign(
        &self,
        req: &mut http::request::Parts,
        auth_time: &AuthTime,
    ) -> Result<()> {
        self.sign_with(req, SigningMethod::Query(*auth_time)).await
    }

    async fn sign_with(&self, req: &mut http::request::Parts, method: SigningMethod) -> Result<()> {
        let credential = self.credential().await?;

        self.builder
            .sign_request(&self.ctx, req, credential.as_ref(), method)
            .await
    }

    async fn credential(&self) -> Result<Option<K>> {
        let cached = self.lock().clone();
        if cached.is_valid() {
            return Ok(cached);
        }

        let loaded = self.loader.provide_credential(&self.ctx).await?;
        *self.lock() = loaded.clone();
        Ok(loaded)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<K>> {
        // The guarded value is a plain cache, a poisoned lock still holds usable data.
        self.credential
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
