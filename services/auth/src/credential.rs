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

use azblob_core::time::{now, DateTime};
use azblob_core::utils::Redact;
use azblob_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Bearer tokens this close to expiry are treated as expired already.
const BEARER_EXPIRY_BUFFER_SECS: i64 = 20;

/// Credential accepted by the blob service.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Shared Key authorization with account name and base64 account key.
    SharedKey {
        /// Azure storage account name.
        account_name: String,
        /// Azure storage account key, base64 encoded.
        account_key: String,
    },
    /// Shared Access Signature, appended to the query string as is.
    SasToken {
        /// SAS token without the leading `?`.
        token: String,
    },
    /// OAuth bearer token.
    BearerToken {
        /// Bearer token.
        token: String,
        /// Expiration time for this token.
        expires_in: Option<DateTime>,
    },
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::SharedKey {
                account_name,
                account_key,
            } => f
                .debug_struct("Credential::SharedKey")
                .field("account_name", &account_name)
                .field("account_key", &Redact::from(account_key))
                .finish(),
            Credential::SasToken { token } => f
                .debug_struct("Credential::SasToken")
                .field("token", &Redact::from(token))
                .finish(),
            Credential::BearerToken { token, expires_in } => f
                .debug_struct("Credential::BearerToken")
                .field("token", &Redact::from(token))
                .field("expires_in", expires_in)
                .finish(),
        }
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        match self {
            Credential::SharedKey {
                account_name,
                account_key,
            } => !account_name.is_empty() && !account_key.is_empty(),
            Credential::SasToken { token } => !token.is_empty(),
            Credential::BearerToken { token, expires_in } => {
                if token.is_empty() {
                    return false;
                }
                match expires_in {
                    Some(expires) => {
                        *expires > now() + chrono::TimeDelta::seconds(BEARER_EXPIRY_BUFFER_SECS)
                    }
                    None => true,
                }
            }
        }
    }
}

impl Credential {
    /// Create a shared key credential.
    pub fn with_shared_key(account_name: &str, account_key: &str) -> Self {
        Self::SharedKey {
            account_name: account_name.to_string(),
            account_key: account_key.to_string(),
        }
    }

    /// Create a SAS token credential. A leading `?` is stripped.
    pub fn with_sas_token(sas_token: &str) -> Self {
        Self::SasToken {
            token: sas_token.trim_start_matches('?').to_string(),
        }
    }

    /// Create a bearer token credential.
    pub fn with_bearer_token(bearer_token: &str, expires_in: Option<DateTime>) -> Self {
        Self::BearerToken {
            token: bearer_token.to_string(),
            expires_in,
        }
    }

    /// Account name, only known for shared key credentials.
    pub fn account_name(&self) -> Option<&str> {
        match self {
            Credential::SharedKey { account_name, .. } => Some(account_name),
            _ => None,
        }
    }
}
