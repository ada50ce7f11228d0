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

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use azblob_core::utils::redact_url;
use azblob_core::{Context, Result, Signer, SigningCredential};
use bytes::Bytes;
use http::request::Parts;
use http::{Request, Response};
use log::debug;

/// Authorize mutates an outgoing request so the service accepts it.
#[async_trait]
pub trait Authorize: Debug + Send + Sync + 'static {
    /// Authorize the request in place.
    async fn authorize(&self, req: &mut Parts) -> Result<()>;
}

#[async_trait]
impl<K: SigningCredential> Authorize for Signer<K> {
    async fn authorize(&self, req: &mut Parts) -> Result<()> {
        self.sign(req, None).await
    }
}

/// Pipeline sends requests built by the operations types.
///
/// Transport comes from the [`Context`], authorization is optional so that
/// anonymous access to public containers and pre-signed URLs keep working.
#[derive(Clone, Debug)]
pub struct Pipeline {
    ctx: Context,
    authorizer: Option<Arc<dyn Authorize>>,
}

impl Pipeline {
    /// Create a pipeline without authorization.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            authorizer: None,
        }
    }

    /// Authorize every request with `authorizer` before sending.
    pub fn with_authorizer(mut self, authorizer: impl Authorize) -> Self {
        self.authorizer = Some(Arc::new(authorizer));
        self
    }

    /// The context requests are sent through.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Authorize and send the request.
    pub async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        let (mut parts, body) = req.into_parts();
        if let Some(authorizer) = &self.authorizer {
            authorizer.authorize(&mut parts).await?;
        }

        debug!(
            "sending request: {} {}",
            parts.method,
            redact_url(&parts.uri.to_string())
        );
        let resp = self.ctx.http_send(Request::from_parts(parts, body)).await?;
        debug!("got response: {}", resp.status());

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{header, query_pairs, MockHttpSend};
    use crate::{ContainerListBlobsOptions, ContainerOperations};
    use azblob_auth::{ConfigCredentialProvider, RequestSigner, StaticCredentialProvider};
    use azblob_core::ErrorKind;
    use http::StatusCode;
    use pretty_assertions::assert_eq;

    const URL: &str = "https://account.blob.core.windows.net/photos";

    #[tokio::test]
    async fn test_send_signed_with_shared_key() {
        let mock = MockHttpSend::default();
        mock.respond(
            StatusCode::OK,
            &[],
            r#"<EnumerationResults
  ServiceEndpoint="https://account.blob.core.windows.net/"
  ContainerName="photos">
  <Blobs />
  <NextMarker />
</EnumerationResults>"#,
        );
        let ctx = Context::new().with_http_send(mock.clone());
        let signer = Signer::new(
            ctx.clone(),
            StaticCredentialProvider::new_shared_key("account", "a2V5"),
            RequestSigner::new(),
        );
        let pipeline = Pipeline::new(ctx).with_authorizer(signer);

        ContainerOperations::new(pipeline, URL)
            .list_blob_flat_segment(ContainerListBlobsOptions {
                prefix: Some("a b+c&d=é".to_string()),
                marker: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();

        let req = mock.request();
        assert!(header(&req, "authorization")
            .unwrap()
            .starts_with("SharedKey account:"));
        assert!(header(&req, "x-ms-date").is_some());
        let expected: Vec<(String, String)> = [
            ("restype", "container"),
            ("comp", "list"),
            ("prefix", "a b+c&d=é"),
            ("marker", ""),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(query_pairs(&req), expected);
    }

    #[tokio::test]
    async fn test_send_stops_on_authorize_error() {
        let mock = MockHttpSend::default();
        let ctx = Context::new().with_http_send(mock.clone());
        let signer = Signer::new(
            ctx.clone(),
            ConfigCredentialProvider::default(),
            RequestSigner::new(),
        );
        let pipeline = Pipeline::new(ctx).with_authorizer(signer);

        let err = ContainerOperations::new(pipeline, URL)
            .list_blob_flat_segment(ContainerListBlobsOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(mock.is_untouched());
    }
}
