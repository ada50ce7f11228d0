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
use bytes::{Buf, Bytes};
use http::{HeaderMap, Response, StatusCode};
use log::debug;
use serde::de::DeserializeOwned;

use crate::error::parse_error;

/// A successful operation response: status, typed headers and decoded body.
#[derive(Debug, Clone)]
pub struct ServiceResponse<T, H> {
    status: StatusCode,
    headers: H,
    value: T,
}

impl<T, H> ServiceResponse<T, H> {
    /// Status code returned by the service, one of the operation's success codes.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Typed response headers.
    pub fn headers(&self) -> &H {
        &self.headers
    }

    /// Decoded response body.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume the response, returning the body.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Consume the response, returning headers and body.
    pub fn into_parts(self) -> (H, T) {
        (self.headers, self.value)
    }
}

/// Split the response, failing unless the status is one of `expected`.
fn check_status(
    resp: Response<Bytes>,
    expected: &[StatusCode],
) -> Result<(StatusCode, HeaderMap, Bytes)> {
    let (parts, body) = resp.into_parts();
    if !expected.contains(&parts.status) {
        let err = parse_error(&parts, &body);
        debug!("request failed: {err}");
        return Err(err);
    }
    Ok((parts.status, parts.headers, body))
}

impl<H: From<HeaderMap>> ServiceResponse<(), H> {
    pub(crate) fn from_empty(resp: Response<Bytes>, expected: &[StatusCode]) -> Result<Self> {
        let (status, headers, _) = check_status(resp, expected)?;
        Ok(Self {
            status,
            headers: H::from(headers),
            value: (),
        })
    }
}

impl<H: From<HeaderMap>> ServiceResponse<Bytes, H> {
    pub(crate) fn from_bytes(resp: Response<Bytes>, expected: &[StatusCode]) -> Result<Self> {
        let (status, headers, body) = check_status(resp, expected)?;
        Ok(Self {
            status,
            headers: H::from(headers),
            value: body,
        })
    }
}

impl<T: DeserializeOwned, H: From<HeaderMap>> ServiceResponse<T, H> {
    pub(crate) fn from_xml(resp: Response<Bytes>, expected: &[StatusCode]) -> Result<Self> {
        let (status, headers, body) = check_status(resp, expected)?;
        let value = quick_xml::de::from_reader(body.reader()).map_err(|e| {
            Error::unexpected(format!(
                "failed to parse {} from response body",
                std::any::type_name::<T>()
            ))
            .with_source(e)
        })?;

        Ok(Self {
            status,
            headers: H::from(headers),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azblob_core::ErrorKind;

    #[derive(Debug, Default)]
    struct RawHeaders(HeaderMap);

    impl From<HeaderMap> for RawHeaders {
        fn from(headers: HeaderMap) -> Self {
            Self(headers)
        }
    }

    #[test]
    fn test_unexpected_status() {
        let resp = Response::builder()
            .status(StatusCode::PRECONDITION_FAILED)
            .header("x-ms-error-code", "ConditionNotMet")
            .body(Bytes::new())
            .unwrap();

        let err =
            ServiceResponse::<(), RawHeaders>::from_empty(resp, &[StatusCode::OK]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.status(), Some(StatusCode::PRECONDITION_FAILED));
        assert_eq!(err.code(), Some("ConditionNotMet"));
    }

    #[test]
    fn test_success_status_keeps_headers() {
        let resp = Response::builder()
            .status(StatusCode::PARTIAL_CONTENT)
            .header("content-range", "bytes 0-3/10")
            .body(Bytes::from("abcd"))
            .unwrap();

        let resp = ServiceResponse::<Bytes, RawHeaders>::from_bytes(
            resp,
            &[StatusCode::OK, StatusCode::PARTIAL_CONTENT],
        )
        .unwrap();
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers().0["content-range"], "bytes 0-3/10");
        assert_eq!(resp.into_value(), Bytes::from("abcd"));
    }

    #[test]
    fn test_malformed_xml_body() {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Bytes::from("<PageList><PageRange><Start>zero"))
            .unwrap();

        let err =
            ServiceResponse::<crate::xml::PageList, RawHeaders>::from_xml(resp, &[StatusCode::OK])
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}
