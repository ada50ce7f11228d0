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

use azblob_auth::{Config, DefaultCredentialProvider, RequestSigner};
use azblob_core::{Context, Error, Result, Signer};
use azblob_rest::{BlobServiceClient, Pipeline};
use log::debug;

/// Load [`Config`] from the environment of `ctx` and build a pipeline that
/// signs with it.
///
/// Returns the pipeline together with the blob service endpoint.
pub fn pipeline_from_context(ctx: Context) -> Result<(Pipeline, String)> {
    let config = Config::default().from_env(&ctx)?;
    let endpoint = config.blob_endpoint().ok_or_else(|| {
        Error::config_invalid("blob endpoint is unknown, set AZBLOB_ENDPOINT or an account name")
    })?;
    debug!("blob endpoint resolved to {endpoint}");

    let signer = Signer::new(
        ctx.clone(),
        DefaultCredentialProvider::new(config),
        RequestSigner::new(),
    );
    Ok((Pipeline::new(ctx).with_authorizer(signer), endpoint))
}

/// Same as [`pipeline_from_context`], wrapped in a [`BlobServiceClient`].
pub fn client_from_context(ctx: Context) -> Result<BlobServiceClient> {
    let (pipeline, endpoint) = pipeline_from_context(ctx)?;
    Ok(BlobServiceClient::new(pipeline, &endpoint))
}

/// Context with a reqwest transport and the OS environment.
#[cfg(feature = "default-context")]
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(azblob_http_send_reqwest::ReqwestHttpSend::default())
        .with_env(azblob_core::OsEnv)
}

/// Signed pipeline over [`default_context`].
#[cfg(feature = "default-context")]
pub fn default_pipeline() -> Result<(Pipeline, String)> {
    pipeline_from_context(default_context())
}

/// Client over [`default_pipeline`].
///
/// # Customization
///
/// Build the [`Context`] yourself and pass it to [`client_from_context`] to
/// use another transport or environment source.
#[cfg(feature = "default-context")]
pub fn default_client() -> Result<BlobServiceClient> {
    client_from_context(default_context())
}

#[cfg(test)]
mod tests {
    use super::*;
    use azblob_core::{ErrorKind, StaticEnv};

    #[test]
    fn test_client_from_connection_string() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(
            "AZURE_STORAGE_CONNECTION_STRING",
            "UseDevelopmentStorage=true",
        )]));

        let client = client_from_context(ctx).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:10000/devstoreaccount1");
        assert_eq!(
            client.blob("c", "a b").url(),
            "http://127.0.0.1:10000/devstoreaccount1/c/a%20b"
        );
    }

    #[test]
    fn test_endpoint_from_account_name() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            ("AZBLOB_ACCOUNT_NAME", "acct"),
            ("AZBLOB_ACCOUNT_KEY", "a2V5"),
        ]));

        let (_, endpoint) = pipeline_from_context(ctx).unwrap();
        assert_eq!(endpoint, "https://acct.blob.core.windows.net");
    }

    #[test]
    fn test_missing_endpoint() {
        let ctx = Context::new().with_env(StaticEnv::default());

        let err = client_from_context(ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
