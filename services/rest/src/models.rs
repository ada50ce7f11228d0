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

//! Wire enums and request parameter groups.

use std::collections::BTreeMap;
use std::fmt;

use azblob_core::hash::{base64_encode, base64_sha256};
use azblob_core::time::DateTime;
use azblob_core::{Error, Result};

use crate::constants::PAGE_SIZE;

/// User defined `x-ms-meta-*` pairs, keyed without the prefix.
pub type Metadata = BTreeMap<String, String>;

/// Declare an enum whose variants map to fixed wire strings.
///
/// Parsing ignores ASCII case, rendering always uses the wire string.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The value as sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = azblob_core::Error;

            fn from_str(s: &str) -> azblob_core::Result<Self> {
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(azblob_core::Error::unexpected(format!(
                    "unknown {} value: {s}",
                    stringify!($name)
                )))
            }
        }

        impl $crate::headers::FromHeaderValue for $name {
            fn from_header_value(value: &str) -> Option<Self> {
                value.parse().ok()
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                d: D,
            ) -> std::result::Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(d)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Level of anonymous read access on a container.
    PublicAccessType {
        Container => "container",
        Blob => "blob",
    }
}

wire_enum! {
    LeaseDurationType {
        Infinite => "infinite",
        Fixed => "fixed",
    }
}

wire_enum! {
    LeaseStateType {
        Available => "available",
        Leased => "leased",
        Expired => "expired",
        Breaking => "breaking",
        Broken => "broken",
    }
}

wire_enum! {
    LeaseStatusType {
        Locked => "locked",
        Unlocked => "unlocked",
    }
}

wire_enum! {
    BlobType {
        BlockBlob => "BlockBlob",
        PageBlob => "PageBlob",
        AppendBlob => "AppendBlob",
    }
}

wire_enum! {
    /// Storage tier. `P*` tiers only apply to premium page blobs.
    AccessTier {
        P4 => "P4",
        P6 => "P6",
        P10 => "P10",
        P15 => "P15",
        P20 => "P20",
        P30 => "P30",
        P40 => "P40",
        P50 => "P50",
        P60 => "P60",
        P70 => "P70",
        P80 => "P80",
        Hot => "Hot",
        Cool => "Cool",
        Archive => "Archive",
    }
}

wire_enum! {
    ArchiveStatus {
        RehydratePendingToHot => "rehydrate-pending-to-hot",
        RehydratePendingToCool => "rehydrate-pending-to-cool",
    }
}

wire_enum! {
    CopyStatusType {
        Pending => "pending",
        Success => "success",
        Aborted => "aborted",
        Failed => "failed",
    }
}

wire_enum! {
    /// What to delete along with a base blob.
    DeleteSnapshotsOption {
        Include => "include",
        Only => "only",
    }
}

wire_enum! {
    /// Extra datasets a blob listing can return.
    ListBlobsIncludeItem {
        Copy => "copy",
        Deleted => "deleted",
        Metadata => "metadata",
        Snapshots => "snapshots",
        UncommittedBlobs => "uncommittedblobs",
    }
}

wire_enum! {
    BlockListType {
        Committed => "committed",
        Uncommitted => "uncommitted",
        All => "all",
    }
}

wire_enum! {
    SequenceNumberAction {
        Max => "max",
        Update => "update",
        Increment => "increment",
    }
}

wire_enum! {
    RehydratePriority {
        High => "High",
        Standard => "Standard",
    }
}

wire_enum! {
    SkuName {
        StandardLrs => "Standard_LRS",
        StandardGrs => "Standard_GRS",
        StandardRagrs => "Standard_RAGRS",
        StandardZrs => "Standard_ZRS",
        PremiumLrs => "Premium_LRS",
    }
}

wire_enum! {
    AccountKind {
        Storage => "Storage",
        BlobStorage => "BlobStorage",
        StorageV2 => "StorageV2",
    }
}

wire_enum! {
    EncryptionAlgorithm {
        Aes256 => "AES256",
    }
}

/// Only act while the given lease is held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaseAccessConditions {
    pub lease_id: Option<String>,
}

impl LeaseAccessConditions {
    /// Conditions for the lease `lease_id`.
    pub fn new(lease_id: impl Into<String>) -> Self {
        Self {
            lease_id: Some(lease_id.into()),
        }
    }
}

/// Conditional headers evaluated against the target resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifiedAccessConditions {
    pub if_modified_since: Option<DateTime>,
    pub if_unmodified_since: Option<DateTime>,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
}

impl ModifiedAccessConditions {
    /// Containers only honor the time based conditions.
    pub(crate) fn check_since_only(&self, action: &str) -> Result<()> {
        if self.if_match.is_some() || self.if_none_match.is_some() {
            return Err(Error::request_invalid(format!(
                "{action} on a container doesn't support If-Match or If-None-Match"
            )));
        }
        Ok(())
    }
}

/// Conditional headers evaluated against the copy source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceModifiedAccessConditions {
    pub source_if_modified_since: Option<DateTime>,
    pub source_if_unmodified_since: Option<DateTime>,
    pub source_if_match: Option<String>,
    pub source_if_none_match: Option<String>,
}

/// Page blob writes only succeed when the sequence number matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceNumberAccessConditions {
    pub if_sequence_number_less_than_or_equal_to: Option<i64>,
    pub if_sequence_number_less_than: Option<i64>,
    pub if_sequence_number_equal_to: Option<i64>,
}

/// Standard HTTP properties stored with a blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobHttpHeaders {
    pub cache_control: Option<String>,
    pub content_type: Option<String>,
    /// Raw MD5 digest, sent base64 encoded.
    pub content_md5: Option<Vec<u8>>,
    pub content_encoding: Option<String>,
    pub content_language: Option<String>,
    pub content_disposition: Option<String>,
}

/// Customer provided encryption key.
#[derive(Clone, PartialEq, Eq)]
pub struct CpkInfo {
    pub encryption_key: String,
    pub encryption_key_sha256: String,
    pub encryption_algorithm: EncryptionAlgorithm,
}

impl CpkInfo {
    /// Build from a raw AES-256 key.
    pub fn from_key(key: &[u8]) -> Result<Self> {
        if key.len() != 32 {
            return Err(Error::request_invalid(format!(
                "encryption key must be 32 bytes, got {}",
                key.len()
            )));
        }

        Ok(Self {
            encryption_key: base64_encode(key),
            encryption_key_sha256: base64_sha256(key),
            encryption_algorithm: EncryptionAlgorithm::Aes256,
        })
    }
}

impl fmt::Debug for CpkInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpkInfo")
            .field(
                "encryption_key",
                &azblob_core::utils::Redact::from(&self.encryption_key),
            )
            .field("encryption_key_sha256", &self.encryption_key_sha256)
            .field("encryption_algorithm", &self.encryption_algorithm)
            .finish()
    }
}

/// A byte range, `count` of `None` means until the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpRange {
    pub offset: u64,
    pub count: Option<u64>,
}

impl HttpRange {
    /// Range of `count` bytes starting at `offset`.
    pub fn new(offset: u64, count: u64) -> Self {
        Self {
            offset,
            count: Some(count),
        }
    }

    /// Range from `offset` to the end.
    pub fn from_offset(offset: u64) -> Self {
        Self {
            offset,
            count: None,
        }
    }

    /// Offset of the last byte in the range, `None` when it's open ended.
    ///
    /// Empty ranges and ranges ending past `u64::MAX` are rejected, the
    /// service would read them as open ended or wrapped.
    pub fn end(&self) -> Result<Option<u64>> {
        let Some(count) = self.count else {
            return Ok(None);
        };
        if count == 0 {
            return Err(Error::request_invalid(format!(
                "range at offset {} must not be empty",
                self.offset
            )));
        }
        match self.last_byte() {
            Some(end) => Ok(Some(end)),
            None => Err(Error::request_invalid(format!(
                "range of {count} bytes at offset {} ends past the largest offset",
                self.offset
            ))),
        }
    }

    fn last_byte(&self) -> Option<u64> {
        self.count?
            .checked_sub(1)
            .and_then(|n| self.offset.checked_add(n))
    }

    /// Page ranges must start on a page boundary and cover whole pages.
    pub(crate) fn check_page_aligned(&self) -> Result<u64> {
        let count = match self.count {
            Some(count) if count > 0 => count,
            _ => {
                return Err(Error::request_invalid(format!(
                    "page range {self} must have a positive length"
                )))
            }
        };
        self.end()?;
        if self.offset % PAGE_SIZE != 0 || count % PAGE_SIZE != 0 {
            return Err(Error::request_invalid(format!(
                "page range {self} is not aligned to {PAGE_SIZE} bytes"
            )));
        }
        Ok(count)
    }
}

impl fmt::Display for HttpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.count, self.last_byte()) {
            (None, _) => write!(f, "bytes={}-", self.offset),
            (Some(_), Some(end)) => write!(f, "bytes={}-{end}", self.offset),
            // Never sent, operations check `end` first.
            (Some(count), None) => write!(f, "{count} bytes at {}", self.offset),
        }
    }
}

/// Lease duration in seconds: -1 for infinite, otherwise 15 to 60.
pub(crate) fn check_lease_duration(duration: i32) -> Result<()> {
    if duration == -1 || (15..=60).contains(&duration) {
        return Ok(());
    }
    Err(Error::request_invalid(format!(
        "lease duration must be -1 or between 15 and 60 seconds, got {duration}"
    )))
}

/// Lease break period in seconds, 0 to 60.
pub(crate) fn check_break_period(period: i32) -> Result<()> {
    if (0..=60).contains(&period) {
        return Ok(());
    }
    Err(Error::request_invalid(format!(
        "lease break period must be between 0 and 60 seconds, got {period}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Hot", AccessTier::Hot ; "canonical")]
    #[test_case("hot", AccessTier::Hot ; "lower case")]
    #[test_case("ARCHIVE", AccessTier::Archive ; "upper case")]
    #[test_case("p10", AccessTier::P10 ; "premium")]
    fn test_parse_access_tier(input: &str, expected: AccessTier) {
        assert_eq!(input.parse::<AccessTier>().unwrap(), expected);
        assert_eq!(expected.to_string(), expected.as_str());
    }

    #[test]
    fn test_parse_unknown_value() {
        assert!("Premium".parse::<AccessTier>().is_err());
        assert_eq!(
            "standard_ragrs".parse::<SkuName>().unwrap().as_str(),
            "Standard_RAGRS"
        );
    }

    #[test_case(HttpRange::new(0, 512), "bytes=0-511")]
    #[test_case(HttpRange::new(1024, 1), "bytes=1024-1024")]
    #[test_case(HttpRange::from_offset(255), "bytes=255-")]
    #[test_case(HttpRange::new(1, u64::MAX), "bytes=1-18446744073709551615" ; "up to the largest offset")]
    #[test_case(HttpRange::new(7, 0), "0 bytes at 7" ; "empty")]
    #[test_case(HttpRange::new(u64::MAX - 511, 1024), "1024 bytes at 18446744073709551104" ; "overflowing")]
    fn test_range_display(range: HttpRange, expected: &str) {
        assert_eq!(range.to_string(), expected);
    }

    #[test_case(HttpRange::new(0, 512), Some(Some(511)))]
    #[test_case(HttpRange::from_offset(4096), Some(None) ; "open ended")]
    #[test_case(HttpRange::new(1, u64::MAX), Some(Some(u64::MAX)) ; "up to the largest offset")]
    #[test_case(HttpRange::new(7, 0), None ; "empty")]
    #[test_case(HttpRange::new(u64::MAX - 511, 1024), None ; "overflowing")]
    fn test_range_end(range: HttpRange, expected: Option<Option<u64>>) {
        match expected {
            Some(end) => assert_eq!(range.end().unwrap(), end),
            None => assert_eq!(
                range.end().unwrap_err().kind(),
                azblob_core::ErrorKind::RequestInvalid
            ),
        }
    }

    #[test_case(HttpRange::new(0, 512), true)]
    #[test_case(HttpRange::new(1024, 4096), true)]
    #[test_case(HttpRange::new(1, 512), false ; "unaligned offset")]
    #[test_case(HttpRange::new(0, 511), false ; "unaligned length")]
    #[test_case(HttpRange::new(0, 0), false ; "empty")]
    #[test_case(HttpRange::from_offset(0), false ; "open ended")]
    #[test_case(HttpRange::new(u64::MAX - 511, 1024), false ; "overflowing")]
    fn test_page_aligned(range: HttpRange, ok: bool) {
        assert_eq!(range.check_page_aligned().is_ok(), ok);
    }

    #[test_case(-1, true)]
    #[test_case(15, true)]
    #[test_case(60, true)]
    #[test_case(0, false)]
    #[test_case(14, false)]
    #[test_case(61, false)]
    fn test_lease_duration(duration: i32, ok: bool) {
        assert_eq!(check_lease_duration(duration).is_ok(), ok);
    }

    #[test]
    fn test_cpk_from_key() {
        let cpk = CpkInfo::from_key(&[7u8; 32]).unwrap();
        assert_eq!(cpk.encryption_key, base64_encode(&[7u8; 32]));
        assert_eq!(cpk.encryption_key_sha256, base64_sha256(&[7u8; 32]));
        assert_eq!(cpk.encryption_algorithm.as_str(), "AES256");
        assert!(!format!("{cpk:?}").contains(&cpk.encryption_key));

        assert!(CpkInfo::from_key(b"short").is_err());
    }
}
