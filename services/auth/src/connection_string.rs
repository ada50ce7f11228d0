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

use std::collections::HashMap;

use azblob_core::{Error, Result};

use crate::constants::{AZURITE_ACCOUNT_KEY, AZURITE_ACCOUNT_NAME, AZURITE_BLOB_URI};
use crate::Config;

/// Parses an [Azure connection string][1] for the blob service.
///
/// Only the keys relevant to blob storage are read, others are ignored.
///
/// [1]: https://learn.microsoft.com/en-us/azure/storage/common/storage-configure-connection-string
pub(crate) fn parse(conn_str: &str) -> Result<Config> {
    let kvs = parse_into_key_values(conn_str)?;

    if kvs.get("UseDevelopmentStorage").map(String::as_str) == Some("true") {
        return Ok(development_config(&kvs));
    }

    let mut config = Config {
        account_name: kvs.get("AccountName").cloned(),
        endpoint: collect_endpoint(&kvs)?,
        ..Default::default()
    };

    // A SAS token makes the account key irrelevant.
    if let Some(token) = kvs.get("SharedAccessSignature") {
        config.sas_token = Some(token.clone());
    } else if config.account_name.is_some() {
        config.account_key = kvs.get("AccountKey").cloned();
    }

    Ok(config)
}

fn parse_into_key_values(conn_str: &str) -> Result<HashMap<String, String>> {
    conn_str
        .split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            let (key, value) = field.split_once('=').ok_or_else(|| {
                Error::config_invalid(format!(
                    "invalid connection string, expected '=' in field: {field}"
                ))
            })?;
            Ok((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Azurite settings, with the well known account as fallback.
fn development_config(kvs: &HashMap<String, String>) -> Config {
    let account_name = kvs
        .get("AccountName")
        .cloned()
        .unwrap_or_else(|| AZURITE_ACCOUNT_NAME.to_string());
    let account_key = kvs
        .get("AccountKey")
        .cloned()
        .unwrap_or_else(|| AZURITE_ACCOUNT_KEY.to_string());
    let proxy_uri = kvs
        .get("DevelopmentStorageProxyUri")
        .map(String::as_str)
        .unwrap_or(AZURITE_BLOB_URI);

    Config {
        endpoint: Some(format!(
            "{}/{account_name}",
            proxy_uri.trim_end_matches('/')
        )),
        account_name: Some(account_name),
        account_key: Some(account_key),
        ..Default::default()
    }
}

fn collect_endpoint(kvs: &HashMap<String, String>) -> Result<Option<String>> {
    if let Some(endpoint) = kvs.get("BlobEndpoint") {
        return Ok(Some(endpoint.clone()));
    }

    let (Some(account_name), Some(suffix)) = (kvs.get("AccountName"), kvs.get("EndpointSuffix"))
    else {
        return Ok(None);
    };

    let protocol = kvs
        .get("DefaultEndpointsProtocol")
        .map(String::as_str)
        .unwrap_or("https");
    if protocol != "http" && protocol != "https" {
        return Err(Error::config_invalid(format!(
            "invalid DefaultEndpointsProtocol: {protocol}"
        )));
    }

    Ok(Some(format!("{protocol}://{account_name}.blob.{suffix}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        let cases = vec![
            (
                "blob endpoint only",
                "BlobEndpoint=https://testaccount.blob.core.windows.net/",
                Some(Config {
                    endpoint: Some("https://testaccount.blob.core.windows.net/".to_string()),
                    ..Default::default()
                }),
            ),
            (
                "shared key with blob endpoint",
                "AccountName=testaccount;AccountKey=testkey;BlobEndpoint=https://testaccount.blob.core.windows.net/",
                Some(Config {
                    account_name: Some("testaccount".to_string()),
                    account_key: Some("testkey".to_string()),
                    endpoint: Some("https://testaccount.blob.core.windows.net/".to_string()),
                    ..Default::default()
                }),
            ),
            (
                "sas token wins over key",
                "AccountName=testaccount;AccountKey=testkey;SharedAccessSignature=sv=2019-02-02&sig=x",
                Some(Config {
                    account_name: Some("testaccount".to_string()),
                    sas_token: Some("sv=2019-02-02&sig=x".to_string()),
                    ..Default::default()
                }),
            ),
            (
                "endpoint from parts",
                "DefaultEndpointsProtocol=http;AccountName=testaccount;EndpointSuffix=core.chinacloudapi.cn",
                Some(Config {
                    account_name: Some("testaccount".to_string()),
                    endpoint: Some("http://testaccount.blob.core.chinacloudapi.cn".to_string()),
                    ..Default::default()
                }),
            ),
            (
                "endpoint from parts defaults to https",
                "AccountName=testaccount;EndpointSuffix=core.windows.net",
                Some(Config {
                    account_name: Some("testaccount".to_string()),
                    endpoint: Some("https://testaccount.blob.core.windows.net".to_string()),
                    ..Default::default()
                }),
            ),
            (
                "development storage",
                "UseDevelopmentStorage=true",
                Some(Config {
                    account_name: Some(AZURITE_ACCOUNT_NAME.to_string()),
                    account_key: Some(AZURITE_ACCOUNT_KEY.to_string()),
                    endpoint: Some("http://127.0.0.1:10000/devstoreaccount1".to_string()),
                    ..Default::default()
                }),
            ),
            (
                "development storage with proxy",
                "UseDevelopmentStorage=true;DevelopmentStorageProxyUri=http://azurite:10000/;AccountName=dev",
                Some(Config {
                    account_name: Some("dev".to_string()),
                    account_key: Some(AZURITE_ACCOUNT_KEY.to_string()),
                    endpoint: Some("http://azurite:10000/dev".to_string()),
                    ..Default::default()
                }),
            ),
            (
                "line breaks and stray separators",
                ";\n    AccountName=testaccount;\n    AccountKey=testkey;\n",
                Some(Config {
                    account_name: Some("testaccount".to_string()),
                    account_key: Some("testkey".to_string()),
                    ..Default::default()
                }),
            ),
            ("missing equals", "AccountNametestaccount;AccountKey=testkey", None),
            (
                "invalid protocol",
                "DefaultEndpointsProtocol=ftp;AccountName=testaccount;EndpointSuffix=core.windows.net",
                None,
            ),
        ];

        for (name, conn_str, expected) in cases {
            let actual = parse(conn_str);
            match expected {
                Some(expected) => assert_eq!(actual.ok(), Some(expected), "case: {name}"),
                None => assert!(actual.is_err(), "expected error for case: {name}"),
            }
        }
    }
}
