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

//! Azure Blob Storage REST bindings for service version `2019-02-02`.
//!
//! This crate bundles the azblob crates:
//!
//! - [`azblob_core`]: context, error type and signing traits
//! - [`auth`]: configuration, credentials and the request signer
//! - the operations types of `azblob-rest`, re-exported at the root
//!
//! With the default `default-context` feature, [`default_client`] builds a
//! client from the environment in one call:
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> azblob::Result<()> {
//! use azblob::{BlockBlobUploadOptions, ContainerCreateOptions};
//!
//! let client = azblob::default_client()?;
//! client
//!     .container("photos")
//!     .create(ContainerCreateOptions::default())
//!     .await?;
//! client
//!     .block_blob("photos", "hello.txt")
//!     .upload("hello".into(), BlockBlobUploadOptions::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub use azblob_core;
pub use azblob_core::{Context, Error, ErrorKind, OsEnv, Result, StaticEnv};

pub mod auth {
    pub use azblob_auth::*;
}

pub use azblob_rest::*;

mod context;
pub use context::client_from_context;
pub use context::pipeline_from_context;
#[cfg(feature = "default-context")]
pub use context::{default_client, default_context, default_pipeline};
