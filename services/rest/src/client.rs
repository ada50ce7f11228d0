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

use percent_encoding::utf8_percent_encode;

use crate::constants::AZURE_ENCODE_SET;
use crate::{
    BlobOperations, BlockBlobOperations, ContainerOperations, PageBlobOperations, Pipeline,
};

/// Entry point handing out operations for containers and blobs of one account.
///
/// ```no_run
/// use azblob_core::Context;
/// use azblob_rest::{BlobServiceClient, Pipeline};
///
/// let client = BlobServiceClient::new(
///     Pipeline::new(Context::new()),
///     "https://account.blob.core.windows.net",
/// );
/// let blob = client.block_blob("photos", "2022/cover.jpg");
/// assert_eq!(blob.url(), "https://account.blob.core.windows.net/photos/2022/cover.jpg");
/// ```
#[derive(Debug, Clone)]
pub struct BlobServiceClient {
    pipeline: Pipeline,
    endpoint: String,
}

impl BlobServiceClient {
    /// `endpoint` is the blob service root, a trailing slash is ignored.
    pub fn new(pipeline: Pipeline, endpoint: &str) -> Self {
        Self {
            pipeline,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    fn container_url(&self, container: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint,
            utf8_percent_encode(container, &AZURE_ENCODE_SET)
        )
    }

    fn blob_url(&self, container: &str, blob: &str) -> String {
        format!(
            "{}/{}",
            self.container_url(container),
            utf8_percent_encode(blob.trim_start_matches('/'), &AZURE_ENCODE_SET)
        )
    }

    pub fn container(&self, container: &str) -> ContainerOperations {
        ContainerOperations::new(self.pipeline.clone(), self.container_url(container))
    }

    /// Blob names are percent encoded, `/` is kept as a virtual directory separator.
    pub fn blob(&self, container: &str, blob: &str) -> BlobOperations {
        BlobOperations::new(self.pipeline.clone(), self.blob_url(container, blob))
    }

    pub fn block_blob(&self, container: &str, blob: &str) -> BlockBlobOperations {
        BlockBlobOperations::new(self.pipeline.clone(), self.blob_url(container, blob))
    }

    pub fn page_blob(&self, container: &str, blob: &str) -> PageBlobOperations {
        PageBlobOperations::new(self.pipeline.clone(), self.blob_url(container, blob))
    }
}
