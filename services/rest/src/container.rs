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

use azblob_core::{Error, Result};
use http::{Method, StatusCode};

use crate::constants::*;
use crate::headers::response_headers;
use crate::models::{
    check_break_period, check_lease_duration, AccountKind, LeaseAccessConditions,
    LeaseDurationType, LeaseStateType, LeaseStatusType, ListBlobsIncludeItem, Metadata,
    ModifiedAccessConditions, PublicAccessType, SkuName,
};
use crate::request::RequestBuilder;
use crate::response::ServiceResponse;
use crate::xml::{
    to_xml, ListBlobsFlatSegmentResponse, ListBlobsHierarchySegmentResponse, SignedIdentifiers,
};
use crate::Pipeline;

response_headers! {
    ContainerCreateHeaders {
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
    }
}

response_headers! {
    ContainerGetPropertiesHeaders {
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
        lease_duration: LeaseDurationType = "x-ms-lease-duration",
        lease_state: LeaseStateType = "x-ms-lease-state",
        lease_status: LeaseStatusType = "x-ms-lease-status",
        /// `None` when the container is private.
        blob_public_access: PublicAccessType = "x-ms-blob-public-access",
        has_immutability_policy: bool = "x-ms-has-immutability-policy",
        has_legal_hold: bool = "x-ms-has-legal-hold",
    }
}

impl ContainerGetPropertiesHeaders {
    /// User defined metadata, keys without the `x-ms-meta-` prefix.
    pub fn metadata(&self) -> Metadata {
        self.collect_metadata()
    }
}

response_headers! {
    ContainerDeleteHeaders {}
}

response_headers! {
    ContainerSetMetadataHeaders {
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
    }
}

response_headers! {
    ContainerGetAccessPolicyHeaders {
        blob_public_access: PublicAccessType = "x-ms-blob-public-access",
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
    }
}

response_headers! {
    ContainerSetAccessPolicyHeaders {
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
    }
}

response_headers! {
    ContainerAcquireLeaseHeaders {
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
        lease_id: String = "x-ms-lease-id",
    }
}

response_headers! {
    ContainerReleaseLeaseHeaders {
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
    }
}

response_headers! {
    ContainerRenewLeaseHeaders {
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
        lease_id: String = "x-ms-lease-id",
    }
}

response_headers! {
    ContainerBreakLeaseHeaders {
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
        /// Seconds until the broken lease can be acquired again.
        lease_time: i32 = "x-ms-lease-time",
    }
}

response_headers! {
    ContainerChangeLeaseHeaders {
        etag: String = "etag",
        last_modified: azblob_core::time::DateTime = "last-modified",
        lease_id: String = "x-ms-lease-id",
    }
}

response_headers! {
    ContainerListBlobFlatSegmentHeaders {
        content_type: String = "content-type",
    }
}

response_headers! {
    ContainerListBlobHierarchySegmentHeaders {
        content_type: String = "content-type",
    }
}

response_headers! {
    ContainerGetAccountInfoHeaders {
        sku_name: SkuName = "x-ms-sku-name",
        account_kind: AccountKind = "x-ms-account-kind",
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContainerCreateOptions {
    /// Server side timeout in seconds.
    pub timeout: Option<u32>,
    /// Sent as `x-ms-client-request-id`.
    pub request_id: Option<String>,
    pub metadata: Metadata,
    /// Anonymous access level, private when `None`.
    pub access: Option<PublicAccessType>,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerGetPropertiesOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub lease_access_conditions: LeaseAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerDeleteOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub lease_access_conditions: LeaseAccessConditions,
    /// Only the time based conditions are supported.
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerSetMetadataOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub metadata: Metadata,
    pub lease_access_conditions: LeaseAccessConditions,
    /// Only `if_modified_since` is supported.
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerGetAccessPolicyOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub lease_access_conditions: LeaseAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerSetAccessPolicyOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub access: Option<PublicAccessType>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerAcquireLeaseOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// Lease id to use, the service generates one when `None`.
    pub proposed_lease_id: Option<String>,
    pub modified_access_conditions: ModifiedAccessConditions,
}

/// Options shared by release, renew and change.
#[derive(Debug, Clone, Default)]
pub struct ContainerLeaseOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerBreakLeaseOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// Seconds the lease keeps running before it's broken, 0 to 60.
    pub break_period: Option<i32>,
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerListBlobsOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub prefix: Option<String>,
    /// Continuation token from a previous `next_marker`.
    pub marker: Option<String>,
    pub max_results: Option<u32>,
    pub include: Vec<ListBlobsIncludeItem>,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerGetAccountInfoOptions {
    pub request_id: Option<String>,
}

/// Operations on a single container.
#[derive(Debug, Clone)]
pub struct ContainerOperations {
    pipeline: Pipeline,
    url: String,
}

impl ContainerOperations {
    /// Operate on the container at `url`, for example
    /// `https://account.blob.core.windows.net/container`.
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
            .query("restype", "container")
            .timeout(timeout)
            .client_request_id(request_id)
    }

    /// Create the container. Fails with `ContainerAlreadyExists` if it exists.
    pub async fn create(
        &self,
        opts: ContainerCreateOptions,
    ) -> Result<ServiceResponse<(), ContainerCreateHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .metadata(&opts.metadata)
            .header_opt(X_MS_BLOB_PUBLIC_ACCESS, opts.access)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    pub async fn get_properties(
        &self,
        opts: ContainerGetPropertiesOptions,
    ) -> Result<ServiceResponse<(), ContainerGetPropertiesHeaders>> {
        let req = self
            .request(Method::GET, opts.timeout, opts.request_id.as_deref())
            .lease(&opts.lease_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    /// Mark the container for deletion, it's removed later by the service.
    pub async fn delete(
        &self,
        opts: ContainerDeleteOptions,
    ) -> Result<ServiceResponse<(), ContainerDeleteHeaders>> {
        opts.modified_access_conditions.check_since_only("delete")?;
        let req = self
            .request(Method::DELETE, opts.timeout, opts.request_id.as_deref())
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::ACCEPTED])
    }

    /// Replace all metadata of the container.
    pub async fn set_metadata(
        &self,
        opts: ContainerSetMetadataOptions,
    ) -> Result<ServiceResponse<(), ContainerSetMetadataHeaders>> {
        let conditions = &opts.modified_access_conditions;
        if conditions.if_unmodified_since.is_some()
            || conditions.if_match.is_some()
            || conditions.if_none_match.is_some()
        {
            return Err(Error::request_invalid(
                "set metadata on a container only supports If-Modified-Since",
            ));
        }

        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "metadata")
            .metadata(&opts.metadata)
            .lease(&opts.lease_access_conditions)
            .modified(conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    /// Get the stored access policies and the public access level.
    pub async fn get_access_policy(
        &self,
        opts: ContainerGetAccessPolicyOptions,
    ) -> Result<ServiceResponse<SignedIdentifiers, ContainerGetAccessPolicyHeaders>> {
        let req = self
            .request(Method::GET, opts.timeout, opts.request_id.as_deref())
            .query("comp", "acl")
            .lease(&opts.lease_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_xml(resp, &[StatusCode::OK])
    }

    /// Replace the stored access policies, at most five are allowed by the service.
    pub async fn set_access_policy(
        &self,
        acl: &SignedIdentifiers,
        opts: ContainerSetAccessPolicyOptions,
    ) -> Result<ServiceResponse<(), ContainerSetAccessPolicyHeaders>> {
        opts.modified_access_conditions
            .check_since_only("set access policy")?;
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "acl")
            .header_opt(X_MS_BLOB_PUBLIC_ACCESS, opts.access)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .xml(to_xml(acl)?)?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    fn lease_request(
        &self,
        action: &str,
        timeout: Option<u32>,
        request_id: Option<&str>,
        conditions: &ModifiedAccessConditions,
    ) -> Result<RequestBuilder> {
        conditions.check_since_only(&format!("{action} lease"))?;
        Ok(self
            .request(Method::PUT, timeout, request_id)
            .query("comp", "lease")
            .header(X_MS_LEASE_ACTION, action)
            .modified(conditions))
    }

    /// Acquire a lease for `duration` seconds, -1 for a lease that never expires.
    pub async fn acquire_lease(
        &self,
        duration: i32,
        opts: ContainerAcquireLeaseOptions,
    ) -> Result<ServiceResponse<(), ContainerAcquireLeaseHeaders>> {
        check_lease_duration(duration)?;
        let req = self
            .lease_request(
                "acquire",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )?
            .header(X_MS_LEASE_DURATION, duration)
            .header_opt(X_MS_PROPOSED_LEASE_ID, opts.proposed_lease_id.as_deref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    pub async fn release_lease(
        &self,
        lease_id: &str,
        opts: ContainerLeaseOptions,
    ) -> Result<ServiceResponse<(), ContainerReleaseLeaseHeaders>> {
        let req = self
            .lease_request(
                "release",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )?
            .header(X_MS_LEASE_ID, lease_id)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    pub async fn renew_lease(
        &self,
        lease_id: &str,
        opts: ContainerLeaseOptions,
    ) -> Result<ServiceResponse<(), ContainerRenewLeaseHeaders>> {
        let req = self
            .lease_request(
                "renew",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )?
            .header(X_MS_LEASE_ID, lease_id)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    /// Break the current lease, whatever its id.
    pub async fn break_lease(
        &self,
        opts: ContainerBreakLeaseOptions,
    ) -> Result<ServiceResponse<(), ContainerBreakLeaseHeaders>> {
        if let Some(period) = opts.break_period {
            check_break_period(period)?;
        }
        let req = self
            .lease_request(
                "break",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )?
            .header_opt(X_MS_LEASE_BREAK_PERIOD, opts.break_period)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::ACCEPTED])
    }

    pub async fn change_lease(
        &self,
        lease_id: &str,
        proposed_lease_id: &str,
        opts: ContainerLeaseOptions,
    ) -> Result<ServiceResponse<(), ContainerChangeLeaseHeaders>> {
        let req = self
            .lease_request(
                "change",
                opts.timeout,
                opts.request_id.as_deref(),
                &opts.modified_access_conditions,
            )?
            .header(X_MS_LEASE_ID, lease_id)
            .header(X_MS_PROPOSED_LEASE_ID, proposed_lease_id)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    fn list_request(&self, opts: &ContainerListBlobsOptions) -> RequestBuilder {
        let include = (!opts.include.is_empty()).then(|| {
            opts.include
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(",")
        });

        self.request(Method::GET, opts.timeout, opts.request_id.as_deref())
            .query("comp", "list")
            .query_opt("prefix", opts.prefix.as_deref())
            .query_opt("marker", opts.marker.as_deref())
            .query_opt("maxresults", opts.max_results)
            .query_opt("include", include)
    }

    /// List one page of blobs.
    pub async fn list_blob_flat_segment(
        &self,
        opts: ContainerListBlobsOptions,
    ) -> Result<ServiceResponse<ListBlobsFlatSegmentResponse, ContainerListBlobFlatSegmentHeaders>>
    {
        let req = self.list_request(&opts).empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_xml(resp, &[StatusCode::OK])
    }

    /// List one page of blobs, folding names that share a prefix up to
    /// `delimiter` into blob prefixes.
    pub async fn list_blob_hierarchy_segment(
        &self,
        delimiter: &str,
        opts: ContainerListBlobsOptions,
    ) -> Result<
        ServiceResponse<ListBlobsHierarchySegmentResponse, ContainerListBlobHierarchySegmentHeaders>,
    > {
        if delimiter.is_empty() {
            return Err(Error::request_invalid(
                "delimiter of a hierarchy listing must not be empty",
            ));
        }
        let req = self
            .list_request(&opts)
            .query("delimiter", delimiter)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_xml(resp, &[StatusCode::OK])
    }

    /// Sku and kind of the storage account owning this container.
    pub async fn get_account_info(
        &self,
        opts: ContainerGetAccountInfoOptions,
    ) -> Result<ServiceResponse<(), ContainerGetAccountInfoHeaders>> {
        let req = RequestBuilder::new(Method::GET, &self.url)
            .query("restype", "account")
            .query("comp", "properties")
            .client_request_id(opts.request_id.as_deref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }
}
