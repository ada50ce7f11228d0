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

use crate::Credential;

/// StaticCredentialProvider always returns the credential it was built with.
#[derive(Clone, Debug)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Provide a shared key credential.
    pub fn new_shared_key(account_name: &str, account_key: &str) -> Self {
        Self {
            credential: Credential::with_shared_key(account_name, account_key),
        }
    }

    /// Provide a SAS token credential.
    pub fn new_sas_token(sas_token: &str) -> Self {
        Self {
            credential: Credential::with_sas_token(sas_token),
        }
    }

    /// Provide a bearer token credential that never expires.
    pub fn new_bearer_token(bearer_token: &str) -> Self {
        Self {
            credential: Credential::with_bearer_token(bearer_token, None),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_credential_provider() {
        let ctx = Context::new();

        let cred = StaticCredentialProvider::new_shared_key("myaccount", "bXlrZXk=")
            .provide_credential(&ctx)
            .await
            .unwrap();
        assert_eq!(cred, Some(Credential::with_shared_key("myaccount", "bXlrZXk=")));

        let cred = StaticCredentialProvider::new_sas_token("sv=2019-02-02&sig=abc")
            .provide_credential(&ctx)
            .await
            .unwrap();
        assert!(matches!(
            cred,
            Some(Credential::SasToken { token }) if token == "sv=2019-02-02&sig=abc"
        ));

        let cred = StaticCredentialProvider::new_bearer_token("mybearertoken")
            .provide_credential(&ctx)
            .await
            .unwrap();
        assert!(matches!(cred, Some(Credential::BearerToken { expires_in: None, .. })));
    }
}
