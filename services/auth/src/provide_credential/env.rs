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

use async_trait::async_trait;
use azblob_core::{Context, ProvideCredential, Result};
use log::debug;

use crate::{Config, Credential};

/// EnvCredentialProvider loads a credential from environment variables.
///
/// Reads the same variables as [`Config::from_env`], including
/// `AZURE_STORAGE_CONNECTION_STRING`.
#[derive(Clone, Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new provider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let cred = Config::default().from_env(ctx)?.credential();
        if cred.is_none() {
            debug!("no credential found in environment");
        }
        Ok(cred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use azblob_core::StaticEnv;

    #[tokio::test]
    async fn test_env_credential_provider_shared_key() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (AZBLOB_ACCOUNT_NAME, "myaccount"),
            (AZURE_STORAGE_ACCOUNT_KEY, "bXlrZXk="),
        ]));

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .unwrap();
        assert_eq!(cred, Some(Credential::with_shared_key("myaccount", "bXlrZXk=")));
    }

    #[tokio::test]
    async fn test_env_credential_provider_connection_string() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(
            AZURE_STORAGE_CONNECTION_STRING,
            "UseDevelopmentStorage=true",
        )]));

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .unwrap();
        assert_eq!(
            cred,
            Some(Credential::with_shared_key(
                AZURITE_ACCOUNT_NAME,
                AZURITE_ACCOUNT_KEY
            ))
        );
    }

    #[tokio::test]
    async fn test_env_credential_provider_none() {
        let cred = EnvCredentialProvider::new()
            .provide_credential(&Context::new())
            .await
            .unwrap();
        assert!(cred.is_none());
    }

    #[tokio::test]
    async fn test_env_credential_provider_bad_connection_string() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(
            AZURE_STORAGE_CONNECTION_STRING,
            "AccountName",
        )]));

        let err = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), azblob_core::ErrorKind::ConfigInvalid);
    }
}
