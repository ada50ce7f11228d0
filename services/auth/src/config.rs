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

use azblob_core::utils::Redact;
use azblob_core::{Context, Result};
use std::fmt::{Debug, Formatter};

use crate::constants::*;
use crate::{connection_string, Credential};

/// Config carries everything needed to reach a storage account.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZBLOB_ACCOUNT_NAME`] or [`AZURE_STORAGE_ACCOUNT_NAME`]
    /// - connection string: `AccountName`
    pub account_name: Option<String>,
    /// `account_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZBLOB_ACCOUNT_KEY`] or [`AZURE_STORAGE_ACCOUNT_KEY`]
    /// - connection string: `AccountKey`
    pub account_key: Option<String>,
    /// `sas_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_SAS_TOKEN`]
    /// - connection string: `SharedAccessSignature`
    pub sas_token: Option<String>,
    /// `bearer_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_BEARER_TOKEN`]
    pub bearer_token: Option<String>,
    /// Blob service endpoint like `https://account.blob.core.windows.net`.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZBLOB_ENDPOINT`]
    /// - connection string: `BlobEndpoint`, or built from
    ///   `DefaultEndpointsProtocol`, `AccountName` and `EndpointSuffix`
    pub endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("sas_token", &Redact::from(&self.sas_token))
            .field("bearer_token", &Redact::from(&self.bearer_token))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Fill unset fields from the environment of `ctx`.
    ///
    /// Fields already set on `self` are kept. Individual variables come next,
    /// and [`AZURE_STORAGE_CONNECTION_STRING`] fills whatever is still missing.
    pub fn from_env(self, ctx: &Context) -> Result<Self> {
        let env_config = Config {
            account_name: ctx
                .env_var(AZBLOB_ACCOUNT_NAME)
                .or_else(|| ctx.env_var(AZURE_STORAGE_ACCOUNT_NAME)),
            account_key: ctx
                .env_var(AZBLOB_ACCOUNT_KEY)
                .or_else(|| ctx.env_var(AZURE_STORAGE_ACCOUNT_KEY)),
            sas_token: ctx.env_var(AZURE_STORAGE_SAS_TOKEN),
            bearer_token: ctx.env_var(AZURE_STORAGE_BEARER_TOKEN),
            endpoint: ctx.env_var(AZBLOB_ENDPOINT),
        };
        let mut config = self.or(env_config);

        if let Some(conn_str) = ctx.env_var(AZURE_STORAGE_CONNECTION_STRING) {
            config = config.or(Self::try_from_connection_string(&conn_str)?);
        }

        Ok(config)
    }

    /// Parses an [Azure connection string][1] into a configuration object.
    ///
    /// The connection string doesn't have to specify all parameters, callers
    /// can still set them on the returned value.
    ///
    /// An example of a connection string looks like:
    ///
    /// ```txt
    /// AccountName=mystorageaccount;
    /// AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;
    /// BlobEndpoint=https://mystorageaccount.blob.core.windows.net
    /// ```
    ///
    /// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
    pub fn try_from_connection_string(conn_str: &str) -> Result<Self> {
        connection_string::parse(conn_str)
    }

    /// Blob service endpoint without trailing slash.
    ///
    /// Falls back to `https://{account_name}.blob.core.windows.net`.
    pub fn blob_endpoint(&self) -> Option<String> {
        match (&self.endpoint, &self.account_name) {
            (Some(endpoint), _) => Some(endpoint.trim_end_matches('/').to_string()),
            (None, Some(account_name)) => {
                Some(format!("https://{account_name}.blob.core.windows.net"))
            }
            (None, None) => None,
        }
    }

    /// Pick a credential out of this config.
    ///
    /// Shared key wins over SAS token, SAS token over bearer token.
    pub fn credential(&self) -> Option<Credential> {
        if let (Some(name), Some(key)) = (&self.account_name, &self.account_key) {
            return Some(Credential::with_shared_key(name, key));
        }
        if let Some(token) = &self.sas_token {
            return Some(Credential::with_sas_token(token));
        }
        self.bearer_token
            .as_ref()
            .map(|token| Credential::with_bearer_token(token, None))
    }

    /// Take each field from `self`, or from `other` when `self` has none.
    fn or(self, other: Config) -> Config {
        Config {
            account_name: self.account_name.or(other.account_name),
            account_key: self.account_key.or(other.account_key),
            sas_token: self.sas_token.or(other.sas_token),
            bearer_token: self.bearer_token.or(other.bearer_token),
            endpoint: self.endpoint.or(other.endpoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azblob_core::StaticEnv;

    #[test]
    fn test_from_env() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (AZURE_STORAGE_ACCOUNT_NAME, "fromenv"),
            (AZBLOB_ACCOUNT_KEY, "a2V5"),
        ]));

        let config = Config::default().from_env(&ctx).unwrap();
        assert_eq!(config.account_name.as_deref(), Some("fromenv"));
        assert_eq!(config.account_key.as_deref(), Some("a2V5"));
        assert_eq!(
            config.blob_endpoint().as_deref(),
            Some("https://fromenv.blob.core.windows.net")
        );
        assert_eq!(
            config.credential(),
            Some(Credential::with_shared_key("fromenv", "a2V5"))
        );
    }

    #[test]
    fn test_from_env_overrides_connection_string() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (
                AZURE_STORAGE_CONNECTION_STRING,
                "AccountName=conn;AccountKey=Y29ubg==;BlobEndpoint=http://127.0.0.1:10000/conn/",
            ),
            (AZBLOB_ACCOUNT_NAME, "override"),
        ]));

        let config = Config::default().from_env(&ctx).unwrap();
        assert_eq!(config.account_name.as_deref(), Some("override"));
        assert_eq!(config.account_key.as_deref(), Some("Y29ubg=="));
        assert_eq!(
            config.blob_endpoint().as_deref(),
            Some("http://127.0.0.1:10000/conn")
        );
    }

    #[test]
    fn test_explicit_fields_win_over_env() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(
            AZURE_STORAGE_SAS_TOKEN,
            "sv=env",
        )]));

        let config = Config {
            sas_token: Some("sv=explicit".to_string()),
            ..Default::default()
        }
        .from_env(&ctx)
        .unwrap();

        assert_eq!(config.sas_token.as_deref(), Some("sv=explicit"));
    }

    #[test]
    fn test_credential_precedence() {
        let config = Config {
            sas_token: Some("sv=1".to_string()),
            bearer_token: Some("token".to_string()),
            ..Default::default()
        };
        assert_eq!(config.credential(), Some(Credential::with_sas_token("sv=1")));
        assert_eq!(Config::default().credential(), None);
    }
}
