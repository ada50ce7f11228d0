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
    check_break_period, check_lease_duration, AccessTier, AccountKind, ArchiveStatus,
    BlobHttpHeaders, BlobType, CopyStatusType, CpkInfo, DeleteSnapshotsOption, HttpRange,
    LeaseAccessConditions, LeaseDurationType, LeaseStateType, LeaseStatusType, Metadata,
    ModifiedAccessConditions, RehydratePriority, SkuName, SourceModifiedAccessConditions,
};
use crate::request::RequestBuilder;
use crate::response::ServiceResponse;
use crate::Pipeline;

response_headers! {
    BlobDownloadHeaders {
        last_modified: DateTime = "last-modified",
        content_length: u64 = "content-length",
        content_type: String = "content-type",
        /// Range actually returned, set on `206 Partial Content`.
        content_range: String = "content-range",
        etag: String = "etag",
        /// MD5 of the returned range when it was requested.
        content_md5: Vec<u8> = "content-md5",
        content_encoding: String = "content-encoding",
        cache_control: String = "cache-control",
        content_disposition: String = "content-disposition",
        content_language: String = "content-language",
        blob_sequence_number: i64 = "x-ms-blob-sequence-number",
        blob_type: BlobType = "x-ms-blob-type",
        copy_completion_time: DateTime = "x-ms-copy-completion-time",
        copy_status_description: String = "x-ms-copy-status-description",
        copy_id: String = "x-ms-copy-id",
        copy_progress: String = "x-ms-copy-progress",
        copy_source: String = "x-ms-copy-source",
        copy_status: CopyStatusType = "x-ms-copy-status",
        lease_duration: LeaseDurationType = "x-ms-lease-duration",
        lease_state: LeaseStateType = "x-ms-lease-state",
        lease_status: LeaseStatusType = "x-ms-lease-status",
        accept_ranges: String = "accept-ranges",
        blob_committed_block_count: i32 = "x-ms-blob-committed-block-count",
        is_server_encrypted: bool = "x-ms-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
        /// MD5 of the whole blob, present on range reads of blobs that have one.
        blob_content_md5: Vec<u8> = "x-ms-blob-content-md5",
        content_crc64: Vec<u8> = "x-ms-content-crc64",
    }
}

impl BlobDownloadHeaders {
    pub fn metadata(&self) -> Metadata {
        self.collect_metadata()
    }
}

response_headers! {
    BlobGetPropertiesHeaders {
        last_modified: DateTime = "last-modified",
        creation_time: DateTime = "x-ms-creation-time",
        blob_type: BlobType = "x-ms-blob-type",
        copy_completion_time: DateTime = "x-ms-copy-completion-time",
        copy_status_description: String = "x-ms-copy-status-description",
        copy_id: String = "x-ms-copy-id",
        copy_progress: String = "x-ms-copy-progress",
        copy_source: String = "x-ms-copy-source",
        copy_status: CopyStatusType = "x-ms-copy-status",
        is_incremental_copy: bool = "x-ms-incremental-copy",
        destination_snapshot: String = "x-ms-copy-destination-snapshot",
        lease_duration: LeaseDurationType = "x-ms-lease-duration",
        lease_state: LeaseStateType = "x-ms-lease-state",
        lease_status: LeaseStatusType = "x-ms-lease-status",
        content_length: u64 = "content-length",
        content_type: String = "content-type",
        etag: String = "etag",
        content_md5: Vec<u8> = "content-md5",
        content_encoding: String = "content-encoding",
        content_disposition: String = "content-disposition",
        content_language: String = "content-language",
        cache_control: String = "cache-control",
        blob_sequence_number: i64 = "x-ms-blob-sequence-number",
        accept_ranges: String = "accept-ranges",
        blob_committed_block_count: i32 = "x-ms-blob-committed-block-count",
        is_server_encrypted: bool = "x-ms-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
        access_tier: AccessTier = "x-ms-access-tier",
        access_tier_inferred: bool = "x-ms-access-tier-inferred",
        archive_status: ArchiveStatus = "x-ms-archive-status",
        access_tier_change_time: DateTime = "x-ms-access-tier-change-time",
    }
}

impl BlobGetPropertiesHeaders {
    pub fn metadata(&self) -> Metadata {
        self.collect_metadata()
    }
}

response_headers! {
    BlobDeleteHeaders {}
}

response_headers! {
    BlobUndeleteHeaders {}
}

response_headers! {
    BlobSetHttpHeadersHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        blob_sequence_number: i64 = "x-ms-blob-sequence-number",
    }
}

response_headers! {
    BlobSetMetadataHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        is_server_encrypted: bool = "x-ms-request-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
    }
}

response_headers! {
    BlobAcquireLeaseHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        lease_id: String = "x-ms-lease-id",
    }
}

response_headers! {
    BlobReleaseLeaseHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
    }
}

response_headers! {
    BlobRenewLeaseHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        lease_id: String = "x-ms-lease-id",
    }
}

response_headers! {
    BlobChangeLeaseHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        lease_id: String = "x-ms-lease-id",
    }
}

response_headers! {
    BlobBreakLeaseHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        lease_time: i32 = "x-ms-lease-time",
    }
}

response_headers! {
    BlobCreateSnapshotHeaders {
        /// Opaque snapshot id, pass it as `snapshot` to address the snapshot.
        snapshot: String = "x-ms-snapshot",
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
    }
}

response_headers! {
    BlobStartCopyFromUrlHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        copy_id: String = "x-ms-copy-id",
        copy_status: CopyStatusType = "x-ms-copy-status",
    }
}

response_headers! {
    BlobCopyFromUrlHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        copy_id: String = "x-ms-copy-id",
        /// Always `success` for a synchronous copy.
        copy_status: CopyStatusType = "x-ms-copy-status",
        content_md5: Vec<u8> = "content-md5",
    }
}

response_headers! {
    BlobAbortCopyFromUrlHeaders {}
}

response_headers! {
    BlobSetTierHeaders {}
}

response_headers! {
    BlobGetAccountInfoHeaders {
        sku_name: SkuName = "x-ms-sku-name",
        account_kind: AccountKind = "x-ms-account-kind",
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlobDownloadOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// Read this snapshot instead of the base blob.
    pub snapshot: Option<String>,
    pub range: Option<HttpRange>,
    /// Ask for the MD5 of the range, needs a bounded range of at most 4 MiB.
    pub range_get_content_md5: bool,
    /// Ask for the CRC64 of the range, needs a bounded range of at most 4 MiB.
    pub range_get_content_crc64: bool,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct BlobGetPropertiesOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub snapshot: Option<String>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct BlobDeleteOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// Delete only this snapshot.
    pub snapshot: Option<String>,
    /// Required when the base blob has snapshots.
    pub delete_snapshots: Option<DeleteSnapshotsOption>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct BlobUndeleteOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BlobSetHttpHeadersOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// Properties left `None` are cleared on the blob.
    pub blob_http_headers: BlobHttpHeaders,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct BlobSetMetadataOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub metadata: Metadata,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct BlobAcquireLeaseOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub proposed_lease_id: Option<String>,
    pub modified_access_conditions: ModifiedAccessConditions,
}

/// Options shared by release, renew and change.
#[derive(Debug, Clone, Default)]
pub struct BlobLeaseOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct BlobBreakLeaseOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub break_period: Option<i32>,
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct BlobCreateSnapshotOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// Metadata of the snapshot, copied from the base blob when empty.
    pub metadata: Metadata,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct BlobStartCopyFromUrlOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub metadata: Metadata,
    pub tier: Option<AccessTier>,
    /// Priority for rehydrating an archived source.
    pub rehydrate_priority: Option<RehydratePriority>,
    pub source_modified_access_conditions: SourceModifiedAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub lease_access_conditions: LeaseAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct BlobCopyFromUrlOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub metadata: Metadata,
    pub tier: Option<AccessTier>,
    /// Expected MD5 of the source, the copy fails on mismatch.
    pub source_content_md5: Option<Vec<u8>>,
    pub source_modified_access_conditions: SourceModifiedAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub lease_access_conditions: LeaseAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct BlobAbortCopyFromUrlOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub lease_access_conditions: LeaseAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct BlobSetTierOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub rehydrate_priority: Option<RehydratePriority>,
    pub lease_access_conditions: LeaseAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct BlobGetAccountInfoOptions {
    pub request_id: Option<String>,
}

/// Operations valid on every blob type.
#[derive(Debug, Clone)]
pub struct BlobOperations {
    pipeline: Pipeline,
    url: String,
}

impl BlobOperations {
    /// Operate on the blob at `url`, the blob name must be percent encoded.
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

    /// Read the blob content, or part of it when a range is given.
    pub async fn download(
        &self,
        opts: BlobDownloadOptions,
    ) -> Result<ServiceResponse<Bytes, BlobDownloadHeaders>> {
        if opts.range_get_content_md5 && opts.range_get_content_crc64 {
            return Err(Error::request_invalid(
                "range MD5 and range CRC64 can't be requested together",
            ));
        }
        if let Some(range) = &opts.range {
            range.end()?;
        }
        if opts.range_get_content_md5 || opts.range_get_content_crc64 {
            match opts.range.and_then(|r| r.count) {
                Some(count) if count <= MAX_RANGE_DIGEST_SIZE => {}
                Some(count) => {
                    return Err(Error::request_invalid(format!(
                        "range digest is limited to {MAX_RANGE_DIGEST_SIZE} bytes, got {count}"
                    )))
                }
                None => {
                    return Err(Error::request_invalid(
                        "a bounded range is required to get the content digest of a range",
                    ))
                }
            }
        }

        let req = self
            .request(Method::GET, opts.timeout, opts.request_id.as_deref())
            .query_opt("snapshot", opts.snapshot.as_deref())
            .header_opt(X_MS_RANGE, opts.range)
            .header_opt(
                X_MS_RANGE_GET_CONTENT_MD5,
                opts.range_get_content_md5.then_some(true),
            )
            .header_opt(
                X_MS_RANGE_GET_CONTENT_CRC64,
                opts.range_get_content_crc64.then_some(true),
            )
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_bytes(resp, &[StatusCode::OK, StatusCode::PARTIAL_CONTENT])
    }

    /// Read properties and metadata without the content.
    pub async fn get_properties(
        &self,
        opts: BlobGetPropertiesOptions,
    ) -> Result<ServiceResponse<(), BlobGetPropertiesHeaders>> {
        let req = self
            .request(Method::HEAD, opts.timeout, opts.request_id.as_deref())
            .query_opt("snapshot", opts.snapshot.as_deref())
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    /// Delete the blob or one of its snapshots.
    pub async fn delete(
        &self,
        opts: BlobDeleteOptions,
    ) -> Result<ServiceResponse<(), BlobDeleteHeaders>> {
        if opts.snapshot.is_some() && opts.delete_snapshots.is_some() {
            return Err(Error::request_invalid(
                "delete snapshots can't be set when deleting a single snapshot",
            ));
        }

        let req = self
            .request(Method::DELETE, opts.timeout, opts.request_id.as_deref())
            .query_opt("snapshot", opts.snapshot.as_deref())
            .header_opt(X_MS_DELETE_SNAPSHOTS, opts.delete_snapshots)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::ACCEPTED])
    }

    /// Restore a soft deleted blob and its snapshots.
    pub async fn undelete(
        &self,
        opts: BlobUndeleteOptions,
    ) -> Result<ServiceResponse<(), BlobUndeleteHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "undelete")
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    pub async fn set_http_headers(
        &self,
        opts: BlobSetHttpHeadersOptions,
    ) -> Result<ServiceResponse<(), BlobSetHttpHeadersHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "properties")
            .http_headers(&opts.blob_http_headers)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    /// Replace all metadata of the blob.
    pub async fn set_metadata(
        &self,
        opts: BlobSetMetadataOptions,
    ) -> Result<ServiceResponse<(), BlobSetMetadataHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "metadata")
            .metadata(&opts.metadata)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    fn lease_request(
        &self,
        action: &str,
        timeout: Option<u32>,
        request_id: Option<&str>,
        conditions: &ModifiedAccessConditions,
    ) -> RequestBuilder {
        self.request(Method::PUT, timeout, request_id)
            .query("comp", "lease")
            .header(X_MS_LEASE_ACTION, action)
            .modified(conditions)
    }

    /// Acquire a lease for `duration` seconds, -1 for a lease that never expires.
    pub async fn acquire_lease(
        &self,
        duration: i32,
        opts: BlobAcquireLeaseOptions,
    ) -> Result<ServiceResponse<(), BlobAcquireLeaseHeaders>> {
        check_lease_duration(duration)?;
        let req = self
            .lease_request(
                "acquire",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )
            .header(X_MS_LEASE_DURATION, duration)
            .header_opt(X_MS_PROPOSED_LEASE_ID, opts.proposed_lease_id.as_deref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    pub async fn release_lease(
        &self,
        lease_id: &str,
        opts: BlobLeaseOptions,
    ) -> Result<ServiceResponse<(), BlobReleaseLeaseHeaders>> {
        let req = self
            .lease_request(
                "release",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )
            .header(X_MS_LEASE_ID, lease_id)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    pub async fn renew_lease(
        &self,
        lease_id: &str,
        opts: BlobLeaseOptions,
    ) -> Result<ServiceResponse<(), BlobRenewLeaseHeaders>> {
        let req = self
            .lease_request(
                "renew",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )
            .header(X_MS_LEASE_ID, lease_id)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    pub async fn change_lease(
        &self,
        lease_id: &str,
        proposed_lease_id: &str,
        opts: BlobLeaseOptions,
    ) -> Result<ServiceResponse<(), BlobChangeLeaseHeaders>> {
        let req = self
            .lease_request(
                "change",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )
            .header(X_MS_LEASE_ID, lease_id)
            .header(X_MS_PROPOSED_LEASE_ID, proposed_lease_id)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    pub async fn break_lease(
        &self,
        opts: BlobBreakLeaseOptions,
    ) -> Result<ServiceResponse<(), BlobBreakLeaseHeaders>> {
        if let Some(period) = opts.break_period {
            check_break_period(period)?;
        }
        let req = self
            .lease_request(
                "break",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )
            .header_opt(X_MS_LEASE_BREAK_PERIOD, opts.break_period)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::ACCEPTED])
    }

    /// Create a read-only snapshot of the blob.
    pub async fn create_snapshot(
        &self,
        opts: BlobCreateSnapshotOptions,
    ) -> Result<ServiceResponse<(), BlobCreateSnapshotHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "snapshot")
            .metadata(&opts.metadata)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    /// Start an asynchronous copy from `copy_source`, a URL readable by the service.
    ///
    /// Poll `get_properties` for the copy status.
    pub async fn start_copy_from_url(
        &self,
        copy_source: &str,
        opts: BlobStartCopyFromUrlOptions,
    ) -> Result<ServiceResponse<(), BlobStartCopyFromUrlHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .header(X_MS_COPY_SOURCE, copy_source)
            .metadata(&opts.metadata)
            .header_opt(X_MS_ACCESS_TIER, opts.tier)
            .header_opt(X_MS_REHYDRATE_PRIORITY, opts.rehydrate_priority)
            .source_modified(&opts.source_modified_access_conditions)
            .modified(&opts.modified_access_conditions)
            .lease(&opts.lease_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::ACCEPTED])
    }

    /// Copy a block blob of up to 256 MiB synchronously.
    pub async fn copy_from_url(
        &self,
        copy_source: &str,
        opts: BlobCopyFromUrlOptions,
    ) -> Result<ServiceResponse<(), BlobCopyFromUrlHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .header(X_MS_REQUIRES_SYNC, true)
            .header(X_MS_COPY_SOURCE, copy_source)
            .metadata(&opts.metadata)
            .header_opt(X_MS_ACCESS_TIER, opts.tier)
            .base64_opt(X_MS_SOURCE_CONTENT_MD5, opts.source_content_md5.as_deref())
            .source_modified(&opts.source_modified_access_conditions)
            .modified(&opts.modified_access_conditions)
            .lease(&opts.lease_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::ACCEPTED])
    }

    /// Abort a pending copy, leaving a zero length blob behind.
    pub async fn abort_copy_from_url(
        &self,
        copy_id: &str,
        opts: BlobAbortCopyFromUrlOptions,
    ) -> Result<ServiceResponse<(), BlobAbortCopyFromUrlHeaders>> {
        if copy_id.is_empty() {
            return Err(Error::request_invalid("copy id must not be empty"));
        }

        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "copy")
            .query("copyid", copy_id)
            .header(X_MS_COPY_ACTION, "abort")
            .lease(&opts.lease_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::NO_CONTENT])
    }

    /// Change the access tier. Leaving the archive tier answers `202 Accepted`
    /// while the blob rehydrates.
    pub async fn set_tier(
        &self,
        tier: AccessTier,
        opts: BlobSetTierOptions,
    ) -> Result<ServiceResponse<(), BlobSetTierHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "tier")
            .header(X_MS_ACCESS_TIER, tier)
            .header_opt(X_MS_REHYDRATE_PRIORITY, opts.rehydrate_priority)
            .lease(&opts.lease_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK, StatusCode::ACCEPTED])
    }

    pub async fn get_account_info(
        &self,
        opts: BlobGetAccountInfoOptions,
    ) -> Result<ServiceResponse<(), BlobGetAccountInfoHeaders>> {
        let req = RequestBuilder::new(Method::GET, &self.url)
            .query("restype", "account")
            .query("comp", "properties")
            .client_request_id(opts.request_id.as_deref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }
}
