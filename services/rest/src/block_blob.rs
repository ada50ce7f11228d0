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

use azblob_core::time::DateTime;
use azblob_core::{Error, Result};
use bytes::Bytes;
use http::{Method, StatusCode};

use crate::constants::*;
use crate::headers::response_headers;
use crate::models::{
    AccessTier, BlobHttpHeaders, BlobType, BlockListType, CpkInfo, HttpRange,
    LeaseAccessConditions, Metadata, ModifiedAccessConditions, SourceModifiedAccessConditions,
};
use crate::request::RequestBuilder;
use crate::response::ServiceResponse;
use crate::xml::{to_xml, BlockList, BlockLookupList};
use crate::Pipeline;

response_headers! {
    BlockBlobUploadHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        content_md5: Vec<u8> = "content-md5",
        is_server_encrypted: bool = "x-ms-request-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
    }
}

response_headers! {
    BlockBlobStageBlockHeaders {
        content_md5: Vec<u8> = "content-md5",
        content_crc64: Vec<u8> = "x-ms-content-crc64",
        is_server_encrypted: bool = "x-ms-request-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
    }
}

response_headers! {
    BlockBlobStageBlockFromUrlHeaders {
        content_md5: Vec<u8> = "content-md5",
        content_crc64: Vec<u8> = "x-ms-content-crc64",
        is_server_encrypted: bool = "x-ms-request-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
    }
}

response_headers! {
    BlockBlobCommitBlockListHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        content_md5: Vec<u8> = "content-md5",
        content_crc64: Vec<u8> = "x-ms-content-crc64",
        is_server_encrypted: bool = "x-ms-request-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
    }
}

response_headers! {
    BlockBlobGetBlockListHeaders {
        /// Absent until a block list has been committed.
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        content_type: String = "content-type",
        blob_content_length: u64 = "x-ms-blob-content-length",
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockBlobUploadOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// MD5 of the body, checked by the service on arrival.
    pub transactional_content_md5: Option<Vec<u8>>,
    pub blob_http_headers: BlobHttpHeaders,
    pub metadata: Metadata,
    pub tier: Option<AccessTier>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct BlockBlobStageBlockOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub transactional_content_md5: Option<Vec<u8>>,
    pub transactional_content_crc64: Option<Vec<u8>>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct BlockBlobStageBlockFromUrlOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// Part of the source to read, the whole source when `None`.
    pub source_range: Option<HttpRange>,
    pub source_content_md5: Option<Vec<u8>>,
    pub source_content_crc64: Option<Vec<u8>>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub source_modified_access_conditions: SourceModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct BlockBlobCommitBlockListOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// MD5 of the block list document itself.
    pub transactional_content_md5: Option<Vec<u8>>,
    pub transactional_content_crc64: Option<Vec<u8>>,
    pub blob_http_headers: BlobHttpHeaders,
    pub metadata: Metadata,
    pub tier: Option<AccessTier>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct BlockBlobGetBlockListOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub snapshot: Option<String>,
    pub lease_access_conditions: LeaseAccessConditions,
}

fn check_digests(md5: Option<&[u8]>, crc64: Option<&[u8]>) -> Result<()> {
    if md5.is_some() && crc64.is_some() {
        return Err(Error::request_invalid(
            "MD5 and CRC64 can't be set on the same request",
        ));
    }
    Ok(())
}

fn check_block_id(block_id: &str) -> Result<()> {
    if block_id.is_empty() {
        return Err(Error::request_invalid("block id must not be empty"));
    }
    Ok(())
}

/// Operations on a block blob.
#[derive(Debug, Clone)]
pub struct BlockBlobOperations {
    pipeline: Pipeline,
    url: String,
}

impl BlockBlobOperations {
    pub fn new(pipeline: Pipeline, url: impl Into<String>) -> Self {
        Self {
            pipeline,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(
        &self,
        method: Method,
        timeout: Option<u32>,
        request_id: Option<&str>,
    ) -> RequestBuilder {
        RequestBuilder::new(method, &self.url)
            .timeout(timeout)
            .client_request_id(request_id)
    }

    /// Create or overwrite the blob with `body` in a single request.
    pub async fn upload(
        &self,
        body: Bytes,
        opts: BlockBlobUploadOptions,
    ) -> Result<ServiceResponse<(), BlockBlobUploadHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .header(X_MS_BLOB_TYPE, BlobType::BlockBlob)
            .base64_opt(CONTENT_MD5, opts.transactional_content_md5.as_deref())
            .http_headers(&opts.blob_http_headers)
            .metadata(&opts.metadata)
            .header_opt(X_MS_ACCESS_TIER, opts.tier)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .body(body)?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    /// Upload `body` as an uncommitted block.
    ///
    /// `block_id` is the base64 encoded id, ids of one blob must all have the
    /// same length.
    pub async fn stage_block(
        &self,
        block_id: &str,
        body: Bytes,
        opts: BlockBlobStageBlockOptions,
    ) -> Result<ServiceResponse<(), BlockBlobStageBlockHeaders>> {
        check_block_id(block_id)?;
        check_digests(
            opts.transactional_content_md5.as_deref(),
            opts.transactional_content_crc64.as_deref(),
        )?;

        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "block")
            .query("blockid", block_id)
            .base64_opt(CONTENT_MD5, opts.transactional_content_md5.as_deref())
            .base64_opt(X_MS_CONTENT_CRC64, opts.transactional_content_crc64.as_deref())
            .lease(&opts.lease_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .body(body)?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    /// Stage a block whose content is read by the service from `source_url`.
    pub async fn stage_block_from_url(
        &self,
        block_id: &str,
        source_url: &str,
        opts: BlockBlobStageBlockFromUrlOptions,
    ) -> Result<ServiceResponse<(), BlockBlobStageBlockFromUrlHeaders>> {
        check_block_id(block_id)?;
        check_digests(
            opts.source_content_md5.as_deref(),
            opts.source_content_crc64.as_deref(),
        )?;
        if let Some(range) = &opts.source_range {
            range.end()?;
        }

        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "block")
            .query("blockid", block_id)
            .header(X_MS_COPY_SOURCE, source_url)
            .header_opt(X_MS_SOURCE_RANGE, opts.source_range)
            .base64_opt(X_MS_SOURCE_CONTENT_MD5, opts.source_content_md5.as_deref())
            .base64_opt(X_MS_SOURCE_CONTENT_CRC64, opts.source_content_crc64.as_deref())
            .lease(&opts.lease_access_conditions)
            .source_modified(&opts.source_modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    /// Write the blob from staged or committed blocks, in list order.
    pub async fn commit_block_list(
        &self,
        blocks: &BlockLookupList,
        opts: BlockBlobCommitBlockListOptions,
    ) -> Result<ServiceResponse<(), BlockBlobCommitBlockListHeaders>> {
        for block in &blocks.blocks {
            check_block_id(block.id())?;
        }
        check_digests(
            opts.transactional_content_md5.as_deref(),
            opts.transactional_content_crc64.as_deref(),
        )?;

        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "blocklist")
            .base64_opt(CONTENT_MD5, opts.transactional_content_md5.as_deref())
            .base64_opt(X_MS_CONTENT_CRC64, opts.transactional_content_crc64.as_deref())
            .http_headers(&opts.blob_http_headers)
            .metadata(&opts.metadata)
            .header_opt(X_MS_ACCESS_TIER, opts.tier)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .xml(to_xml(blocks)?)?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    pub async fn get_block_list(
        &self,
        list_type: BlockListType,
        opts: BlockBlobGetBlockListOptions,
    ) -> Result<ServiceResponse<BlockList, BlockBlobGetBlockListHeaders>> {
        let req = self
            .request(Method::GET, opts.timeout, opts.request_id.as_deref())
            .query("comp", "blocklist")
            .query("blocklisttype", list_type)
            .query_opt("snapshot", opts.snapshot.as_deref())
            .lease(&opts.lease_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_xml(resp, &[StatusCode::OK])
    }
}
