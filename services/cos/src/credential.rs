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

use qcos_core::time::{now, DateTime};
use qcos_core::utils::Redact;
use qcos_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential for Tencent COS.
#[derive(Default, Clone)]
pub struct Credential {
    /// Secret ID
    pub secret_id: String,
    /// Secret Key
    pub secret_key: String,
    /// Security token for temporary credentials, sent as `x-cos-security-token`.
    pub security_token: Option<String>,
    /// Expiration time for this credential
    pub expires_in: Option<DateTime>,
}

impl Credential {
    /// Create a long term credential.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    /// Attach a security token, turning this into a session credential.
    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// Returns true once the expiration time has passed.
    ///
    /// Unlike [`SigningCredential::is_valid`], no buffer is applied.
    pub fn is_expired(&self) -> bool {
        self.expires_in.is_some_and(|t| t <= now())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret_id", &Redact::from(&self.secret_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("security_token", &Redact::from(&self.security_token))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        if self.secret_id.is_empty() || self.secret_key.is_empty() {
            return false;
        }
        // Take 120s as buffer to avoid edge cases.
        match self.expires_in {
            Some(expires_in) => expires_in > now() + chrono::TimeDelta::seconds(120),
            None => true,
        }
    }
}
