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
use azblob_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use super::{ConfigCredentialProvider, EnvCredentialProvider};
use crate::{Config, Credential};

/// DefaultCredentialProvider tries, in order:
///
/// - the credential in the given [`Config`]
/// - environment variables, see [`EnvCredentialProvider`]
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl DefaultCredentialProvider {
    /// Create a new default provider, `config` takes precedence over the environment.
    pub fn new(config: Config) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(ConfigCredentialProvider::new(config))
            .push(EnvCredentialProvider::new());

        Self { chain }
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
    use azblob_core::StaticEnv;

    #[tokio::test]
    async fn test_default_prefers_config() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(
            AZURE_STORAGE_SAS_TOKEN,
            "sv=env",
        )]));

        let provider = DefaultCredentialProvider::new(Config {
            bearer_token: Some("token".to_string()),
            ..Default::default()
        });
        let cred = provider.provide_credential(&ctx).await.unwrap();
        assert_eq!(cred, Some(Credential::with_bearer_token("token", None)));

        let cred = DefaultCredentialProvider::default()
            .provide_credential(&ctx)
            .await
            .unwrap();
        assert_eq!(cred, Some(Credential::with_sas_token("sv=env")));
    }
}
