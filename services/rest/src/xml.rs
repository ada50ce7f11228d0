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

//! XML documents exchanged with the blob service.

use std::fmt::Display;
use std::str::FromStr;

use azblob_core::time::{format_rfc3339, parse_http_date, parse_rfc3339, DateTime};
use azblob_core::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::{
    AccessTier, ArchiveStatus, BlobType, CopyStatusType, LeaseDurationType, LeaseStateType,
    LeaseStatusType, Metadata,
};

/// Treat missing and empty elements as `None`, parse the rest with `FromStr`.
fn empty_as_none<'de, D, T>(d: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(d)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(D::Error::custom),
    }
}

fn http_date<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<DateTime>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_http_date(v).map(Some).map_err(D::Error::custom),
    }
}

fn rfc3339<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<DateTime>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_rfc3339(v).map(Some).map_err(D::Error::custom),
    }
}

fn serialize_rfc3339<S: Serializer>(
    value: &Option<DateTime>,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(v) => s.serialize_str(&format_rfc3339(*v)),
        None => s.serialize_none(),
    }
}

/// Serialize a document without the XML declaration.
pub(crate) fn to_xml<T: Serialize>(value: &T) -> Result<String> {
    quick_xml::se::to_string(value)
        .map_err(|e| Error::request_invalid("failed to serialize request body").with_source(e))
}

/// Stored access policies of a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "SignedIdentifiers")]
pub struct SignedIdentifiers {
    #[serde(rename = "SignedIdentifier", default)]
    pub items: Vec<SignedIdentifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SignedIdentifier {
    /// Unique id of the policy, at most 64 characters.
    pub id: String,
    pub access_policy: AccessPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccessPolicy {
    #[serde(
        deserialize_with = "rfc3339",
        serialize_with = "serialize_rfc3339",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<DateTime>,
    #[serde(
        deserialize_with = "rfc3339",
        serialize_with = "serialize_rfc3339",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry: Option<DateTime>,
    /// Permission letters such as `rwdl`.
    #[serde(
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub permission: Option<String>,
}

/// One page of a flat blob listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListBlobsFlatSegmentResponse {
    #[serde(rename = "@ServiceEndpoint")]
    pub service_endpoint: String,
    #[serde(rename = "@ContainerName")]
    pub container_name: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub prefix: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub marker: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub max_results: Option<u32>,
    #[serde(rename = "Blobs")]
    pub segment: BlobFlatListSegment,
    /// Continuation marker, `None` on the last page.
    #[serde(deserialize_with = "empty_as_none")]
    pub next_marker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlobFlatListSegment {
    #[serde(rename = "Blob")]
    pub blob_items: Vec<BlobItem>,
}

/// One page of a blob listing grouped by delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListBlobsHierarchySegmentResponse {
    #[serde(rename = "@ServiceEndpoint")]
    pub service_endpoint: String,
    #[serde(rename = "@ContainerName")]
    pub container_name: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub prefix: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub marker: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub max_results: Option<u32>,
    #[serde(deserialize_with = "empty_as_none")]
    pub delimiter: Option<String>,
    #[serde(rename = "Blobs")]
    pub segment: BlobHierarchyListSegment,
    #[serde(deserialize_with = "empty_as_none")]
    pub next_marker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlobHierarchyListSegment {
    #[serde(rename = "BlobPrefix")]
    pub blob_prefixes: Vec<BlobPrefix>,
    #[serde(rename = "Blob")]
    pub blob_items: Vec<BlobItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BlobPrefix {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BlobItem {
    pub name: String,
    pub deleted: bool,
    #[serde(deserialize_with = "empty_as_none")]
    pub snapshot: Option<String>,
    pub properties: BlobProperties,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlobProperties {
    #[serde(rename = "Creation-Time", deserialize_with = "http_date")]
    pub creation_time: Option<DateTime>,
    #[serde(rename = "Last-Modified", deserialize_with = "http_date")]
    pub last_modified: Option<DateTime>,
    #[serde(rename = "Etag")]
    pub etag: String,
    #[serde(rename = "Content-Length", deserialize_with = "empty_as_none")]
    pub content_length: Option<u64>,
    #[serde(rename = "Content-Type", deserialize_with = "empty_as_none")]
    pub content_type: Option<String>,
    #[serde(rename = "Content-Encoding", deserialize_with = "empty_as_none")]
    pub content_encoding: Option<String>,
    #[serde(rename = "Content-Language", deserialize_with = "empty_as_none")]
    pub content_language: Option<String>,
    /// Base64 encoded MD5 of the whole blob.
    #[serde(rename = "Content-MD5", deserialize_with = "empty_as_none")]
    pub content_md5: Option<String>,
    #[serde(rename = "Content-Disposition", deserialize_with = "empty_as_none")]
    pub content_disposition: Option<String>,
    #[serde(rename = "Cache-Control", deserialize_with = "empty_as_none")]
    pub cache_control: Option<String>,
    #[serde(rename = "x-ms-blob-sequence-number", deserialize_with = "empty_as_none")]
    pub blob_sequence_number: Option<i64>,
    #[serde(rename = "BlobType", deserialize_with = "empty_as_none")]
    pub blob_type: Option<BlobType>,
    #[serde(rename = "LeaseStatus", deserialize_with = "empty_as_none")]
    pub lease_status: Option<LeaseStatusType>,
    #[serde(rename = "LeaseState", deserialize_with = "empty_as_none")]
    pub lease_state: Option<LeaseStateType>,
    #[serde(rename = "LeaseDuration", deserialize_with = "empty_as_none")]
    pub lease_duration: Option<LeaseDurationType>,
    #[serde(rename = "CopyId", deserialize_with = "empty_as_none")]
    pub copy_id: Option<String>,
    #[serde(rename = "CopyStatus", deserialize_with = "empty_as_none")]
    pub copy_status: Option<CopyStatusType>,
    #[serde(rename = "CopySource", deserialize_with = "empty_as_none")]
    pub copy_source: Option<String>,
    #[serde(rename = "CopyProgress", deserialize_with = "empty_as_none")]
    pub copy_progress: Option<String>,
    #[serde(rename = "CopyCompletionTime", deserialize_with = "http_date")]
    pub copy_completion_time: Option<DateTime>,
    #[serde(rename = "CopyStatusDescription", deserialize_with = "empty_as_none")]
    pub copy_status_description: Option<String>,
    #[serde(rename = "ServerEncrypted", deserialize_with = "empty_as_none")]
    pub server_encrypted: Option<bool>,
    #[serde(rename = "IncrementalCopy", deserialize_with = "empty_as_none")]
    pub incremental_copy: Option<bool>,
    #[serde(rename = "DestinationSnapshot", deserialize_with = "empty_as_none")]
    pub destination_snapshot: Option<String>,
    #[serde(rename = "DeletedTime", deserialize_with = "http_date")]
    pub deleted_time: Option<DateTime>,
    #[serde(rename = "RemainingRetentionDays", deserialize_with = "empty_as_none")]
    pub remaining_retention_days: Option<u32>,
    #[serde(rename = "AccessTier", deserialize_with = "empty_as_none")]
    pub access_tier: Option<AccessTier>,
    #[serde(rename = "AccessTierInferred", deserialize_with = "empty_as_none")]
    pub access_tier_inferred: Option<bool>,
    #[serde(rename = "ArchiveStatus", deserialize_with = "empty_as_none")]
    pub archive_status: Option<ArchiveStatus>,
    #[serde(rename = "CustomerProvidedKeySha256", deserialize_with = "empty_as_none")]
    pub customer_provided_key_sha256: Option<String>,
    #[serde(rename = "AccessTierChangeTime", deserialize_with = "http_date")]
    pub access_tier_change_time: Option<DateTime>,
}

/// A block to keep when committing a block list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockLookup {
    /// Look the id up in the committed list only.
    Committed(String),
    /// Look the id up in the uncommitted list only.
    Uncommitted(String),
    /// Prefer the uncommitted block, fall back to the committed one.
    Latest(String),
}

impl BlockLookup {
    pub(crate) fn id(&self) -> &str {
        match self {
            BlockLookup::Committed(id) | BlockLookup::Uncommitted(id) | BlockLookup::Latest(id) => {
                id
            }
        }
    }
}

/// Block ids to commit, in blob order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "BlockList")]
pub struct BlockLookupList {
    #[serde(rename = "$value")]
    pub blocks: Vec<BlockLookup>,
}

impl BlockLookupList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block, order is kept on the wire.
    pub fn push(mut self, block: BlockLookup) -> Self {
        self.blocks.push(block);
        self
    }
}

/// Committed and uncommitted blocks of a block blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BlockList {
    pub committed_blocks: Blocks,
    pub uncommitted_blocks: Blocks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Blocks {
    #[serde(rename = "Block")]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Block {
    /// Base64 encoded block id.
    pub name: String,
    pub size: u64,
}

/// Valid and cleared ranges of a page blob, offsets are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PageList {
    pub page_range: Vec<PageRange>,
    pub clear_range: Vec<PageRange>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageRange {
    pub start: u64,
    pub end: u64,
}
