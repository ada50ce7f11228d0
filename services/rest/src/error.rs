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

use std::fmt::{self, Debug};

use azblob_core::Error;
use bytes::{Buf, Bytes};
use http::response::Parts;
use quick_xml::de;
use serde::Deserialize;

use crate::constants::X_MS_ERROR_CODE;

/// Error body returned by the blob service.
#[derive(Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StorageError {
    pub code: String,
    pub message: String,
    pub query_parameter_name: String,
    pub query_parameter_value: String,
    pub reason: String,
}

impl Debug for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut de = f.debug_struct("StorageError");
        de.field("code", &self.code);
        // Messages span lines, keep logs on one.
        de.field("message", &self.message.replace('\n', " "));

        if !self.query_parameter_name.is_empty() {
            de.field("query_parameter_name", &self.query_parameter_name);
        }
        if !self.query_parameter_value.is_empty() {
            de.field("query_parameter_value", &self.query_parameter_value);
        }
        if !self.reason.is_empty() {
            de.field("reason", &self.reason);
        }

        de.finish()
    }
}

/// Turn an unexpected response into a request failed error.
///
/// The service error code comes from `x-ms-error-code`, or from the XML body
/// when the header is missing.
pub(crate) fn parse_error(parts: &Parts, body: &Bytes) -> Error {
    let header_code = parts
        .headers
        .get(X_MS_ERROR_CODE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let (message, code) = match de::from_reader::<_, StorageError>(body.clone().reader()) {
        Ok(storage_err) if !storage_err.code.is_empty() || !storage_err.message.is_empty() => {
            let code = header_code.or_else(|| Some(storage_err.code.clone()));
            (format!("{storage_err:?}"), code)
        }
        _ => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            let message = match (&header_code, text.is_empty()) {
                (_, false) => text,
                (Some(code), true) => format!(
                    "{:?}",
                    StorageError {
                        code: code.clone(),
                        ..Default::default()
                    }
                ),
                (None, true) => parts
                    .status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            };
            (message, header_code)
        }
    };

    let err = Error::request_failed(parts.status, message);
    match code.filter(|c| !c.is_empty()) {
        Some(code) => err.with_code(code),
        None => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azblob_core::ErrorKind;
    use http::{Response, StatusCode};

    fn parts(status: StatusCode, code: Option<&str>) -> Parts {
        let mut builder = Response::builder().status(status);
        if let Some(code) = code {
            builder = builder.header(X_MS_ERROR_CODE, code);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_parse_error_body() {
        let body = Bytes::from(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Error>
  <Code>InvalidQueryParameterValue</Code>
  <Message>Value for one of the query parameters specified in the request URI is invalid.
RequestId:fd1d5f76-301e-0007-1b6c-16d9a2000000
Time:2022-03-01T08:12:34.0000000Z</Message>
  <QueryParameterName>comp</QueryParameterName>
  <QueryParameterValue>oops</QueryParameterValue>
  <Reason />
</Error>"#,
        );

        let err = parse_error(&parts(StatusCode::BAD_REQUEST, None), &body);
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.code(), Some("InvalidQueryParameterValue"));
        assert!(err.message().contains("query_parameter_name: \"comp\""));
        assert!(!err.message().contains('\n'));
    }

    #[test]
    fn test_parse_error_header_only() {
        let err = parse_error(
            &parts(StatusCode::NOT_FOUND, Some("BlobNotFound")),
            &Bytes::new(),
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.code(), Some("BlobNotFound"));
        assert!(err.message().contains("BlobNotFound"));
    }

    #[test]
    fn test_parse_error_plain_text() {
        let err = parse_error(
            &parts(StatusCode::BAD_GATEWAY, None),
            &Bytes::from("upstream is down"),
        );
        assert_eq!(err.code(), None);
        assert_eq!(err.message(), "upstream is down");

        let err = parse_error(&parts(StatusCode::CONFLICT, None), &Bytes::new());
        assert_eq!(err.message(), "Conflict");
    }
}
