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

use std::mem;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};
use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;

/// A request taken apart for signing.
///
/// Headers are moved out of the original parts and handed back by [`SigningRequest::apply`].
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// HTTP query parameters, decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Take `parts` apart, leaving its uri and headers empty until [`SigningRequest::apply`].
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Put the (possibly modified) request back into `parts`.
    ///
    /// Query values are written as they are, callers must encode them first.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let mut s = self.path;
                if !self.query.is_empty() {
                    s.push('?');
                    for (i, (k, v)) in self.query.iter().enumerate() {
                        if i > 0 {
                            s.push('&');
                        }

                        s.push_str(k);
                        if !v.is_empty() {
                            s.push('=');
                            s.push_str(v);
                        }
                    }
                }

                Some(PathAndQuery::from_str(&s)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Add `key=value` to the query.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Add a raw, already encoded query fragment such as a SAS token.
    #[inline]
    pub fn query_append(&mut self, query: &str) {
        self.query.push((query.to_string(), "".to_string()));
    }

    /// Header value as str, empty when the header is absent.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }

    /// Lower-cased `(name, value)` pairs of every header starting with `prefix`.
    pub fn header_to_vec_with_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        self.headers
            .iter()
            .filter(|(k, _)| k.as_str().starts_with(prefix))
            .map(|(k, v)| Ok((k.as_str().to_lowercase(), v.to_str()?.to_string())))
            .collect()
    }

    /// Sort `headers` and render them as `name{sep}value` joined by `join`.
    pub fn header_to_string(mut headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        headers.sort();

        headers
            .into_iter()
            .map(|(k, v)| format!("{k}{sep}{v}"))
            .collect::<Vec<_>>()
            .join(join)
    }
}

/// Where the signature ends up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SigningMethod {
    /// `Authorization` header.
    Header,
    /// Query string, valid for the given duration.
    Query(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_apply() {
        let (mut parts, _) = http::Request::put(
            "https://acct.blob.core.windows.net/c/b?comp=block&blockid=YmxvY2s%3D",
        )
        .header("x-ms-version", "2019-02-02")
        .body(())
        .unwrap()
        .into_parts();

        let mut req = SigningRequest::build(&mut parts).unwrap();
        assert_eq!(req.path, "/c/b");
        assert_eq!(
            req.query,
            vec![
                ("comp".to_string(), "block".to_string()),
                ("blockid".to_string(), "YmxvY2s=".to_string())
            ]
        );
        assert!(parts.headers.is_empty());

        req.query[1].1 = "YmxvY2s%3D".to_string();
        req.apply(&mut parts).unwrap();
        assert_eq!(
            parts.uri,
            "https://acct.blob.core.windows.net/c/b?comp=block&blockid=YmxvY2s%3D"
        );
        assert_eq!(parts.headers["x-ms-version"], "2019-02-02");
    }

    #[test]
    fn test_build_without_authority() {
        let (mut parts, _) = http::Request::get("/c/b").body(()).unwrap().into_parts();
        let err = SigningRequest::build(&mut parts).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }
}
