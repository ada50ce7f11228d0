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

use std::env;
use std::time::Duration;

use anyhow::Result;
use azblob_auth::{Config, Credential, DefaultCredentialProvider, RequestSigner};
use azblob_core::{Context, OsEnv, Signer};
use azblob_http_send_reqwest::ReqwestHttpSend;
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use log::{debug, warn};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Live tests run against a real account or Azurite, e.g. with
/// `AZURE_STORAGE_CONNECTION_STRING=UseDevelopmentStorage=true`.
fn init_signer() -> Option<(Context, Signer<Credential>, String)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("AZBLOB_AUTH_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default()
        .from_env(&ctx)
        .expect("config must be loaded from env");
    let endpoint = config
        .blob_endpoint()
        .expect("env AZBLOB_ENDPOINT or account name must set");

    let signer = Signer::new(
        ctx.clone(),
        DefaultCredentialProvider::new(config),
        RequestSigner::new(),
    );
    Some((ctx, signer, endpoint))
}

async fn send(
    ctx: &Context,
    signer: &Signer<Credential>,
    req: Request<Bytes>,
    expires_in: Option<Duration>,
) -> Result<StatusCode> {
    let (mut parts, body) = req.into_parts();
    signer.sign(&mut parts, expires_in).await?;
    let req = Request::from_parts(parts, body);
    debug!("signed request: {:?}", req);

    let resp = ctx.http_send(req).await?;
    debug!("got response: {:?}", resp);
    Ok(resp.status())
}

#[tokio::test]
async fn test_head_missing_blob() -> Result<()> {
    let Some((ctx, signer, endpoint)) = init_signer() else {
        warn!("AZBLOB_AUTH_TEST is not set, skipped");
        return Ok(());
    };

    let req = Request::builder()
        .method(Method::HEAD)
        .uri(format!("{endpoint}/azblob-auth-missing/not_exist_file"))
        .header("x-ms-version", "2019-02-02")
        .body(Bytes::new())?;

    assert_eq!(send(&ctx, &signer, req, None).await?, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_head_blob_with_encoded_characters() -> Result<()> {
    let Some((ctx, signer, endpoint)) = init_signer() else {
        warn!("AZBLOB_AUTH_TEST is not set, skipped");
        return Ok(());
    };

    let req = Request::builder()
        .method(Method::HEAD)
        .uri(format!(
            "{endpoint}/azblob-auth-missing/{}",
            utf8_percent_encode("!@#$%^&*()_+-=;:'><,/?.txt", NON_ALPHANUMERIC)
        ))
        .header("x-ms-version", "2019-02-02")
        .body(Bytes::new())?;

    assert_eq!(send(&ctx, &signer, req, None).await?, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_get_account_info() -> Result<()> {
    let Some((ctx, signer, endpoint)) = init_signer() else {
        warn!("AZBLOB_AUTH_TEST is not set, skipped");
        return Ok(());
    };

    for expires_in in [None, Some(Duration::from_secs(600))] {
        let req = Request::builder()
            .method(Method::GET)
            .uri(format!("{endpoint}/?restype=account&comp=properties"))
            .header("x-ms-version", "2019-02-02")
            .body(Bytes::new())?;

        assert_eq!(send(&ctx, &signer, req, expires_in).await?, StatusCode::OK);
    }
    Ok(())
}
