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

//! Wire constants of the blob service.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Service version every request is sent with.
pub const SERVICE_VERSION: &str = "2019-02-02";

// Request and response headers.
pub const X_MS_VERSION: &str = "x-ms-version";
pub const X_MS_CLIENT_REQUEST_ID: &str = "x-ms-client-request-id";
pub const X_MS_REQUEST_ID: &str = "x-ms-request-id";
pub const X_MS_ERROR_CODE: &str = "x-ms-error-code";
pub const X_MS_META_PREFIX: &str = "x-ms-meta-";

pub const X_MS_LEASE_ID: &str = "x-ms-lease-id";
pub const X_MS_LEASE_ACTION: &str = "x-ms-lease-action";
pub const X_MS_LEASE_DURATION: &str = "x-ms-lease-duration";
pub const X_MS_LEASE_BREAK_PERIOD: &str = "x-ms-lease-break-period";
pub const X_MS_PROPOSED_LEASE_ID: &str = "x-ms-proposed-lease-id";

pub const X_MS_BLOB_PUBLIC_ACCESS: &str = "x-ms-blob-public-access";
pub const X_MS_BLOB_TYPE: &str = "x-ms-blob-type";
pub const X_MS_BLOB_CONTENT_LENGTH: &str = "x-ms-blob-content-length";
pub const X_MS_BLOB_SEQUENCE_NUMBER: &str = "x-ms-blob-sequence-number";
pub const X_MS_BLOB_CACHE_CONTROL: &str = "x-ms-blob-cache-control";
pub const X_MS_BLOB_CONTENT_TYPE: &str = "x-ms-blob-content-type";
pub const X_MS_BLOB_CONTENT_MD5: &str = "x-ms-blob-content-md5";
pub const X_MS_BLOB_CONTENT_ENCODING: &str = "x-ms-blob-content-encoding";
pub const X_MS_BLOB_CONTENT_LANGUAGE: &str = "x-ms-blob-content-language";
pub const X_MS_BLOB_CONTENT_DISPOSITION: &str = "x-ms-blob-content-disposition";

pub const X_MS_RANGE: &str = "x-ms-range";
pub const X_MS_RANGE_GET_CONTENT_MD5: &str = "x-ms-range-get-content-md5";
pub const X_MS_RANGE_GET_CONTENT_CRC64: &str = "x-ms-range-get-content-crc64";
/// Transactional MD5, `http` has no constant for it.
pub const CONTENT_MD5: &str = "content-md5";
pub const X_MS_CONTENT_CRC64: &str = "x-ms-content-crc64";
pub const X_MS_DELETE_SNAPSHOTS: &str = "x-ms-delete-snapshots";
pub const X_MS_ACCESS_TIER: &str = "x-ms-access-tier";
pub const X_MS_REHYDRATE_PRIORITY: &str = "x-ms-rehydrate-priority";

pub const X_MS_COPY_SOURCE: &str = "x-ms-copy-source";
pub const X_MS_COPY_ACTION: &str = "x-ms-copy-action";
pub const X_MS_REQUIRES_SYNC: &str = "x-ms-requires-sync";
pub const X_MS_SOURCE_RANGE: &str = "x-ms-source-range";
pub const X_MS_SOURCE_CONTENT_MD5: &str = "x-ms-source-content-md5";
pub const X_MS_SOURCE_CONTENT_CRC64: &str = "x-ms-source-content-crc64";
pub const X_MS_SOURCE_IF_MODIFIED_SINCE: &str = "x-ms-source-if-modified-since";
pub const X_MS_SOURCE_IF_UNMODIFIED_SINCE: &str = "x-ms-source-if-unmodified-since";
pub const X_MS_SOURCE_IF_MATCH: &str = "x-ms-source-if-match";
pub const X_MS_SOURCE_IF_NONE_MATCH: &str = "x-ms-source-if-none-match";

pub const X_MS_PAGE_WRITE: &str = "x-ms-page-write";
pub const X_MS_SEQUENCE_NUMBER_ACTION: &str = "x-ms-sequence-number-action";
pub const X_MS_IF_SEQUENCE_NUMBER_LE: &str = "x-ms-if-sequence-number-le";
pub const X_MS_IF_SEQUENCE_NUMBER_LT: &str = "x-ms-if-sequence-number-lt";
pub const X_MS_IF_SEQUENCE_NUMBER_EQ: &str = "x-ms-if-sequence-number-eq";

// Server-side encryption with customer-provided keys.
pub const X_MS_ENCRYPTION_KEY: &str = "x-ms-encryption-key";
pub const X_MS_ENCRYPTION_KEY_SHA256: &str = "x-ms-encryption-key-sha256";
pub const X_MS_ENCRYPTION_ALGORITHM: &str = "x-ms-encryption-algorithm";

/// Page blob writes are aligned to this many bytes.
pub const PAGE_SIZE: u64 = 512;

/// Largest range the service computes a range MD5 or CRC64 for.
pub const MAX_RANGE_DIGEST_SIZE: u64 = 4 * 1024 * 1024;

/// Characters kept as is in blob paths and query values.
pub static AZURE_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'/')
    .remove(b'~');
