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

//! Authorization for the Azure Blob Storage REST API.
//!
//! This crate loads storage credentials and signs [`http`] requests with them:
//!
//! - Shared Key, signed per request or presigned as an account SAS
//! - SAS token, appended to the query string
//! - Bearer token, sent in the `Authorization` header
//!
//! ## Example
//!
//! ```no_run
//! use azblob_auth::{Config, DefaultCredentialProvider, RequestSigner};
//! use azblob_core::{Context, OsEnv, Result, Signer};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new().with_env(OsEnv);
//!
//!     // Explicit settings win, the environment fills in the rest.
//!     let config = Config::default().from_env(&ctx)?;
//!     let signer = Signer::new(
//!         ctx,
//!         DefaultCredentialProvider::new(config),
//!         RequestSigner::new(),
//!     );
//!
//!     let req = http::Request::get("https://account.blob.core.windows.net/container/blob")
//!         .header("x-ms-version", "2019-02-02")
//!         .body(())
//!         .map_err(azblob_core::Error::from)?;
//!     let (mut parts, _) = req.into_parts();
//!     signer.sign(&mut parts, None).await?;
//!
//!     println!("{:?}", parts.headers.get("authorization"));
//!     Ok(())
//! }
//! ```

mod account_sas;
pub mod constants;

mod config;
pub use config::Config;

mod connection_string;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::RequestSigner;
