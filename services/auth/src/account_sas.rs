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

use azblob_core::hash;
use azblob_core::time::{self, DateTime};
use azblob_core::Result;

// Account SAS parameters used for presigning, see
// https://learn.microsoft.com/en-us/rest/api/storageservices/create-account-sas#specify-the-account-sas-parameters
const ACCOUNT_SAS_VERSION: &str = "2018-11-09";
const ACCOUNT_SAS_SERVICES: &str = "bqtf";
const ACCOUNT_SAS_RESOURCE_TYPES: &str = "sco";
const ACCOUNT_SAS_PERMISSIONS: &str = "rwdlacu";

/// Account shared access signature derived from a shared key.
pub(crate) struct AccountSharedAccessSignature {
    account: String,
    key: String,
    expiry: DateTime,
}

impl AccountSharedAccessSignature {
    pub fn new(account: String, key: String, expiry: DateTime) -> Self {
        Self {
            account,
            key,
            expiry,
        }
    }

    // https://learn.microsoft.com/en-us/rest/api/storageservices/create-account-sas#construct-the-signature-string
    //
    // Start time, IP range and protocol are left empty.
    fn signature(&self) -> Result<String> {
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}\n\n{}\n\n\n{}\n",
            self.account,
            ACCOUNT_SAS_PERMISSIONS,
            ACCOUNT_SAS_SERVICES,
            ACCOUNT_SAS_RESOURCE_TYPES,
            time::format_rfc3339(self.expiry),
            ACCOUNT_SAS_VERSION,
        );

        let key = hash::base64_decode(&self.key)?;
        Ok(hash::base64_hmac_sha256(&key, string_to_sign.as_bytes()))
    }

    /// Query pairs of the token, values not yet percent encoded.
    pub fn token(&self) -> Result<Vec<(String, String)>> {
        Ok(vec![
            ("sv".to_string(), ACCOUNT_SAS_VERSION.to_string()),
            ("ss".to_string(), ACCOUNT_SAS_SERVICES.to_string()),
            ("srt".to_string(), ACCOUNT_SAS_RESOURCE_TYPES.to_string()),
            ("se".to_string(), time::format_rfc3339(self.expiry)),
            ("sp".to_string(), ACCOUNT_SAS_PERMISSIONS.to_string()),
            ("sig".to_string(), self.signature()?),
        ])
    }
}
