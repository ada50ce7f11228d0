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

//! Utility functions and types.

use std::borrow::Cow;
use std::fmt::Debug;

/// Redacts a secret for `Debug` output.
///
/// - Empty input renders as `EMPTY`.
/// - Input shorter than 12 characters is fully hidden.
/// - Longer input keeps the first and last three characters so that different
///   secrets can still be told apart in logs.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref().unwrap_or_default())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        match length {
            0 => f.write_str("EMPTY"),
            1..=11 => f.write_str("***"),
            _ => match (self.0.get(..3), self.0.get(length - 3..)) {
                (Some(head), Some(tail)) => write!(f, "{head}***{tail}"),
                _ => f.write_str("***"),
            },
        }
    }
}

/// Query parameters that carry SAS secrets and must never reach the logs.
const SENSITIVE_QUERY_KEYS: &[&str] = &["sig"];

/// Hide secret query parameters in a URL before logging it.
///
/// ```
/// use azblob_core::utils::redact_url;
///
/// assert_eq!(
///     redact_url("https://a.blob.core.windows.net/c?sv=2018-11-09&sig=abc"),
///     "https://a.blob.core.windows.net/c?sv=2018-11-09&sig=***"
/// );
/// ```
pub fn redact_url(url: &str) -> Cow<'_, str> {
    let Some((base, query)) = url.split_once('?') else {
        return Cow::Borrowed(url);
    };

    let mut changed = false;
    let pairs = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((k, _)) if SENSITIVE_QUERY_KEYS.contains(&k) => {
                changed = true;
                format!("{k}=***")
            }
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>();

    if !changed {
        return Cow::Borrowed(url);
    }
    Cow::Owned(format!("{base}?{}", pairs.join("&")))
}
