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

//! Typed, lazy access to response headers.

use azblob_core::hash::base64_decode;
use azblob_core::time::{parse_http_date, DateTime};
use http::HeaderMap;

use crate::constants::X_MS_META_PREFIX;
use crate::models::Metadata;

/// Parse a header value into a typed value.
///
/// Returns `None` for malformed values, callers can still read the raw
/// header through the `raw()` accessor of each headers type.
pub trait FromHeaderValue: Sized {
    /// Parse the value, `None` if it's malformed.
    fn from_header_value(value: &str) -> Option<Self>;
}

impl FromHeaderValue for String {
    fn from_header_value(value: &str) -> Option<Self> {
        Some(value.to_string())
    }
}

macro_rules! from_str_header_value {
    ($($ty:ty),+) => {
        $(
            impl FromHeaderValue for $ty {
                fn from_header_value(value: &str) -> Option<Self> {
                    value.trim().parse().ok()
                }
            }
        )+
    };
}

from_str_header_value!(i32, i64, u32, u64);

impl FromHeaderValue for bool {
    fn from_header_value(value: &str) -> Option<Self> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("true") => Some(true),
            v if v.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl FromHeaderValue for DateTime {
    fn from_header_value(value: &str) -> Option<Self> {
        parse_http_date(value.trim()).ok()
    }
}

/// Digests such as `Content-MD5` arrive base64 encoded.
impl FromHeaderValue for Vec<u8> {
    fn from_header_value(value: &str) -> Option<Self> {
        base64_decode(value.trim()).ok()
    }
}

pub(crate) fn parse_header<T: FromHeaderValue>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(T::from_header_value)
}

/// Collect `x-ms-meta-*` headers with the prefix stripped.
pub(crate) fn collect_metadata(headers: &HeaderMap) -> Metadata {
    headers
        .iter()
        .filter_map(|(k, v)| {
            let key = k.as_str().strip_prefix(X_MS_META_PREFIX)?;
            Some((key.to_string(), v.to_str().ok()?.to_string()))
        })
        .collect()
}

/// Declare a headers type for an operation response.
///
/// Every type gets the accessors shared by all responses, the listed fields
/// become typed accessors reading the named header on demand.
macro_rules! response_headers {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident: $ty:ty = $header:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            headers: http::HeaderMap,
        }

        impl From<http::HeaderMap> for $name {
            fn from(headers: http::HeaderMap) -> Self {
                Self { headers }
            }
        }

        #[allow(dead_code)]
        impl $name {
            /// The raw response headers.
            pub fn raw(&self) -> &http::HeaderMap {
                &self.headers
            }

            /// Value of `x-ms-client-request-id` echoed back by the service.
            pub fn client_request_id(&self) -> Option<String> {
                self.get($crate::constants::X_MS_CLIENT_REQUEST_ID)
            }

            /// Unique id of this request on the service side.
            pub fn request_id(&self) -> Option<String> {
                self.get($crate::constants::X_MS_REQUEST_ID)
            }

            /// Service version used to handle the request.
            pub fn version(&self) -> Option<String> {
                self.get($crate::constants::X_MS_VERSION)
            }

            /// Time the response was generated.
            pub fn date(&self) -> Option<azblob_core::time::DateTime> {
                self.get("date")
            }

            pub fn error_code(&self) -> Option<String> {
                self.get($crate::constants::X_MS_ERROR_CODE)
            }

            $(
                $(#[$fmeta])*
                pub fn $field(&self) -> Option<$ty> {
                    self.get($header)
                }
            )*

            fn get<T: $crate::headers::FromHeaderValue>(&self, name: &str) -> Option<T> {
                $crate::headers::parse_header(&self.headers, name)
            }

            fn collect_metadata(&self) -> $crate::models::Metadata {
                $crate::headers::collect_metadata(&self.headers)
            }
        }
    };
}

pub(crate) use response_headers;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaseStateType, LeaseStatusType};
    use http::HeaderValue;
    use pretty_assertions::assert_eq;

    response_headers! {
        SampleHeaders {
            etag: String = "etag",
            content_length: u64 = "content-length",
            content_md5: Vec<u8> = "content-md5",
            last_modified: DateTime = "last-modified",
            lease_state: LeaseStateType = "x-ms-lease-state",
            lease_status: LeaseStatusType = "x-ms-lease-status",
            is_server_encrypted: bool = "x-ms-server-encrypted",
        }
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.append(*k, HeaderValue::from_static(*v));
        }
        map
    }

    #[test]
    fn test_typed_accessors() {
        let h = SampleHeaders::from(headers(&[
            ("etag", "\"0x8D6B8B1C2D3E4F5\""),
            ("content-length", "1024"),
            ("content-md5", "sQqNsWTgdUEFt6mb5y4/5Q=="),
            ("last-modified", "Sun, 20 Mar 2022 11:29:03 GMT"),
            ("x-ms-lease-state", "Available"),
            ("x-ms-lease-status", "unlocked"),
            ("x-ms-server-encrypted", "true"),
            ("x-ms-request-id", "a3b2c1"),
            ("x-ms-version", "2019-02-02"),
            ("date", "Tue, 01 Mar 2022 08:12:34 GMT"),
        ]));

        assert_eq!(h.etag().as_deref(), Some("\"0x8D6B8B1C2D3E4F5\""));
        assert_eq!(h.content_length(), Some(1024));
        assert_eq!(h.content_md5().map(|v| v.len()), Some(16));
        assert_eq!(
            h.last_modified().map(azblob_core::time::format_http_date),
            Some("Sun, 20 Mar 2022 11:29:03 GMT".to_string())
        );
        assert_eq!(h.lease_state(), Some(LeaseStateType::Available));
        assert_eq!(h.lease_status(), Some(LeaseStatusType::Unlocked));
        assert_eq!(h.is_server_encrypted(), Some(true));
        assert_eq!(h.request_id().as_deref(), Some("a3b2c1"));
        assert_eq!(h.version().as_deref(), Some("2019-02-02"));
        assert!(h.date().is_some());
        assert_eq!(h.client_request_id(), None);
    }

    #[test]
    fn test_malformed_values_are_none() {
        let h = SampleHeaders::from(headers(&[
            ("content-length", "a lot"),
            ("content-md5", "not base64!"),
            ("last-modified", "yesterday"),
            ("x-ms-lease-state", "stolen"),
            ("x-ms-server-encrypted", "maybe"),
        ]));

        assert_eq!(h.content_length(), None);
        assert_eq!(h.content_md5(), None);
        assert_eq!(h.last_modified(), None);
        assert_eq!(h.lease_state(), None);
        assert_eq!(h.is_server_encrypted(), None);
        assert_eq!(h.raw()["content-length"], "a lot");
    }

    #[test]
    fn test_collect_metadata() {
        let map = headers(&[
            ("x-ms-meta-owner", "alice"),
            ("x-ms-meta-project", "blob"),
            ("x-ms-version", "2019-02-02"),
        ]);

        let metadata = collect_metadata(&map);
        assert_eq!(
            metadata,
            Metadata::from([
                ("owner".to_string(), "alice".to_string()),
                ("project".to_string(), "blob".to_string()),
            ])
        );
    }
}
