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

//! REST bindings for Azure Blob Storage, service version `2019-02-02`.
//!
//! Each resource type gets an operations type with one method per REST
//! action: [`ContainerOperations`], [`BlobOperations`],
//! [`BlockBlobOperations`] and [`PageBlobOperations`]. A method builds the
//! request, sends it through the [`Pipeline`] and returns a
//! [`ServiceResponse`] carrying typed headers and the decoded body. Any
//! status the action doesn't expect becomes an
//! [`ErrorKind::RequestFailed`](azblob_core::ErrorKind::RequestFailed) error
//! with the HTTP status and the service error code.
//!
//! ## Example
//!
//! ```no_run
//! use azblob_auth::{Config, DefaultCredentialProvider, RequestSigner};
//! use azblob_core::{Context, OsEnv, Result, Signer};
//! use azblob_rest::{BlobDownloadOptions, BlobServiceClient, HttpRange, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new().with_env(OsEnv);
//!     let config = Config::default().from_env(&ctx)?;
//!     let endpoint = config.blob_endpoint().unwrap_or_default();
//!
//!     let signer = Signer::new(
//!         ctx.clone(),
//!         DefaultCredentialProvider::new(config),
//!         RequestSigner::new(),
//!     );
//!     let client = BlobServiceClient::new(Pipeline::new(ctx).with_authorizer(signer), &endpoint);
//!
//!     let resp = client
//!         .blob("photos", "2022/cover.jpg")
//!         .download(BlobDownloadOptions {
//!             range: Some(HttpRange::new(0, 1024)),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{:?} {} bytes", resp.headers().etag(), resp.value().len());
//!     Ok(())
//! }
//! ```

pub mod constants;

mod pipeline;
pub use pipeline::{Authorize, Pipeline};

mod request;

mod response;
pub use response::ServiceResponse;

mod error;
pub use error::StorageError;

mod headers;
pub use headers::FromHeaderValue;

mod models;
pub use models::*;

mod xml;
pub use xml::*;

mod client;
pub use client::BlobServiceClient;

mod container;
pub use container::*;

mod blob;
pub use blob::*;

mod block_blob;
pub use block_blob::*;

mod page_blob;
pub use page_blob::*;

#[cfg(test)]
mod mock;
