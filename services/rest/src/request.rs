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

use std::fmt::Display;

use azblob_core::hash::base64_encode;
use azblob_core::time::{format_http_date, DateTime};
use azblob_core::Result;
use bytes::Bytes;
use http::header::{
    CONTENT_LENGTH, CONTENT_TYPE, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE,
};
use http::{HeaderName, Method, Request};
use percent_encoding::utf8_percent_encode;

use crate::constants::*;
use crate::models::{
    BlobHttpHeaders, CpkInfo, LeaseAccessConditions, Metadata, ModifiedAccessConditions,
    SequenceNumberAccessConditions, SourceModifiedAccessConditions,
};

/// Builds the request of one operation.
///
/// Optional values are written only when set. Header errors are kept by the
/// inner builder and reported by [`RequestBuilder::body`].
#[derive(Debug)]
pub(crate) struct RequestBuilder {
    method: Method,
    url: String,
    query: Vec<(&'static str, String)>,
    builder: http::request::Builder,
}

impl RequestBuilder {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            builder: Request::builder()
                .method(method.clone())
                .header(X_MS_VERSION, SERVICE_VERSION),
            method,
            url: url.to_string(),
            query: Vec::new(),
        }
    }

    /// Push a query pair, the value is percent encoded.
    pub fn query(mut self, key: &'static str, value: impl Display) -> Self {
        let value = value.to_string();
        self.query
            .push((key, utf8_percent_encode(&value, &AZURE_ENCODE_SET).to_string()));
        self
    }

    pub fn query_opt(self, key: &'static str, value: Option<impl Display>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn header<K>(mut self, key: K, value: impl Display) -> Self
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
    {
        self.builder = self.builder.header(key, value.to_string());
        self
    }

    pub fn header_opt<K>(self, key: K, value: Option<impl Display>) -> Self
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
    {
        match value {
            Some(v) => self.header(key, v),
            None => self,
        }
    }

    fn date_opt(self, key: HeaderName, value: Option<DateTime>) -> Self {
        self.header_opt(key, value.map(format_http_date))
    }

    /// Binary values such as digests are sent base64 encoded.
    pub fn base64_opt(self, key: &'static str, value: Option<&[u8]>) -> Self {
        self.header_opt(key, value.map(base64_encode))
    }

    /// Server side timeout in seconds.
    pub fn timeout(self, timeout: Option<u32>) -> Self {
        self.query_opt("timeout", timeout)
    }

    pub fn client_request_id(self, id: Option<&str>) -> Self {
        self.header_opt(X_MS_CLIENT_REQUEST_ID, id)
    }

    pub fn metadata(mut self, metadata: &Metadata) -> Self {
        for (k, v) in metadata {
            self = self.header(format!("{X_MS_META_PREFIX}{k}"), v);
        }
        self
    }

    pub fn lease(self, conditions: &LeaseAccessConditions) -> Self {
        self.header_opt(X_MS_LEASE_ID, conditions.lease_id.as_deref())
    }

    pub fn modified(self, conditions: &ModifiedAccessConditions) -> Self {
        self.date_opt(IF_MODIFIED_SINCE, conditions.if_modified_since)
            .date_opt(IF_UNMODIFIED_SINCE, conditions.if_unmodified_since)
            .header_opt(IF_MATCH, conditions.if_match.as_deref())
            .header_opt(IF_NONE_MATCH, conditions.if_none_match.as_deref())
    }

    pub fn source_modified(self, conditions: &SourceModifiedAccessConditions) -> Self {
        self.date_opt(
            HeaderName::from_static(X_MS_SOURCE_IF_MODIFIED_SINCE),
            conditions.source_if_modified_since,
        )
        .date_opt(
            HeaderName::from_static(X_MS_SOURCE_IF_UNMODIFIED_SINCE),
            conditions.source_if_unmodified_since,
        )
        .header_opt(X_MS_SOURCE_IF_MATCH, conditions.source_if_match.as_deref())
        .header_opt(
            X_MS_SOURCE_IF_NONE_MATCH,
            conditions.source_if_none_match.as_deref(),
        )
    }

    pub fn sequence_number(self, conditions: &SequenceNumberAccessConditions) -> Self {
        self.header_opt(
            X_MS_IF_SEQUENCE_NUMBER_LE,
            conditions.if_sequence_number_less_than_or_equal_to,
        )
        .header_opt(
            X_MS_IF_SEQUENCE_NUMBER_LT,
            conditions.if_sequence_number_less_than,
        )
        .header_opt(
            X_MS_IF_SEQUENCE_NUMBER_EQ,
            conditions.if_sequence_number_equal_to,
        )
    }

    /// Blob properties are sent as `x-ms-blob-*` headers.
    pub fn http_headers(self, headers: &BlobHttpHeaders) -> Self {
        self.header_opt(X_MS_BLOB_CACHE_CONTROL, headers.cache_control.as_deref())
            .header_opt(X_MS_BLOB_CONTENT_TYPE, headers.content_type.as_deref())
            .base64_opt(X_MS_BLOB_CONTENT_MD5, headers.content_md5.as_deref())
            .header_opt(
                X_MS_BLOB_CONTENT_ENCODING,
                headers.content_encoding.as_deref(),
            )
            .header_opt(
                X_MS_BLOB_CONTENT_LANGUAGE,
                headers.content_language.as_deref(),
            )
            .header_opt(
                X_MS_BLOB_CONTENT_DISPOSITION,
                headers.content_disposition.as_deref(),
            )
    }

    pub fn cpk(self, cpk: Option<&CpkInfo>) -> Self {
        match cpk {
            Some(cpk) => self
                .header(X_MS_ENCRYPTION_KEY, &cpk.encryption_key)
                .header(X_MS_ENCRYPTION_KEY_SHA256, &cpk.encryption_key_sha256)
                .header(X_MS_ENCRYPTION_ALGORITHM, cpk.encryption_algorithm),
            None => self,
        }
    }

    /// Finish the request with `body`.
    ///
    /// Writes always carry `Content-Length`, the service rejects a `PUT`
    /// without it.
    pub fn body(self, body: Bytes) -> Result<Request<Bytes>> {
        let mut uri = self.url;
        for (i, (k, v)) in self.query.iter().enumerate() {
            uri.push(if i == 0 { '?' } else { '&' });
            uri.push_str(k);
            uri.push('=');
            uri.push_str(v);
        }

        let mut builder = self.builder.uri(uri);
        if self.method == Method::PUT || !body.is_empty() {
            builder = builder.header(CONTENT_LENGTH, body.len());
        }
        Ok(builder.body(body)?)
    }

    /// Finish the request with an XML document.
    pub fn xml(self, xml: String) -> Result<Request<Bytes>> {
        self.header(CONTENT_TYPE, "application/xml; charset=utf-8")
            .body(Bytes::from(xml))
    }

    pub fn empty(self) -> Result<Request<Bytes>> {
        self.body(Bytes::new())
    }
}
