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

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type for azblob operations.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    code: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A credential was found but can't be used, like an account key that isn't base64.
    CredentialInvalid,

    /// The credential is past its expiry.
    CredentialExpired,

    /// Caller input was rejected before anything was sent.
    RequestInvalid,

    /// Endpoint or credential configuration is missing or malformed.
    ConfigInvalid,

    /// The service answered with a status code the operation does not expect.
    RequestFailed,

    /// Transport failures and responses that can't be decoded.
    Unexpected,
}

impl Error {
    /// Build an error of `kind`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            code: None,
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the service error code, usually taken from `x-ms-error-code`.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// What went wrong, roughly.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status returned by the service, only set for [`ErrorKind::RequestFailed`].
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Service error code such as `ContainerNotFound` or `LeaseIdMismatchWithBlobOperation`.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// `true` for [`ErrorKind::CredentialInvalid`] and [`ErrorKind::CredentialExpired`].
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::CredentialInvalid | ErrorKind::CredentialExpired
        )
    }
}

impl Error {
    /// Shorthand for [`ErrorKind::CredentialInvalid`].
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Shorthand for [`ErrorKind::CredentialExpired`].
    pub fn credential_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialExpired, message)
    }

    /// Shorthand for [`ErrorKind::RequestInvalid`].
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Shorthand for [`ErrorKind::ConfigInvalid`].
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request failed error for the given status.
    pub fn request_failed(status: StatusCode, message: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorKind::RequestFailed, message);
        err.status = Some(status);
        err
    }

    /// Shorthand for [`ErrorKind::Unexpected`].
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::CredentialExpired => write!(f, "expired credentials"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestFailed => write!(f, "request failed"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Result alias used across the azblob crates.
pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $ctor:ident),* $(,)?) => {
        $(
            impl From<$ty> for Error {
                fn from(err: $ty) -> Self {
                    Self::$ctor(err.to_string()).with_source(anyhow::Error::from(err))
                }
            }
        )*
    };
}

impl_from! {
    std::fmt::Error => unexpected,
    std::io::Error => unexpected,
    std::string::FromUtf8Error => unexpected,
    http::Error => request_invalid,
    http::header::InvalidHeaderValue => request_invalid,
    http::header::InvalidHeaderName => request_invalid,
    http::header::ToStrError => request_invalid,
    http::uri::InvalidUri => request_invalid,
    http::uri::InvalidUriParts => request_invalid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_carries_status_and_code() {
        let err = Error::request_failed(StatusCode::NOT_FOUND, "The specified blob does not exist.")
            .with_code("BlobNotFound");

        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.code(), Some("BlobNotFound"));
        assert_eq!(
            err.to_string(),
            "request failed: The specified blob does not exist."
        );
    }

    #[test]
    fn test_from_invalid_header_value() {
        let err: Error = http::HeaderValue::from_str("bad\nvalue").unwrap_err().into();

        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(err.status().is_none());
        assert!(!err.is_credential_error());
    }
}
