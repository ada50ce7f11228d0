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

//! Recording transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use azblob_core::{Context, Error, HttpSend, Result};
use bytes::Bytes;
use http::{Request, Response, StatusCode};

use crate::Pipeline;

/// Replays queued responses and records every request it receives.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockHttpSend {
    requests: Arc<Mutex<Vec<Request<Bytes>>>>,
    responses: Arc<Mutex<VecDeque<Response<Bytes>>>>,
}

impl MockHttpSend {
    pub fn respond(&self, status: StatusCode, headers: &[(&str, &str)], body: &str) -> &Self {
        let mut builder = Response::builder().status(status);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        let resp = builder.body(Bytes::from(body.to_string())).unwrap();
        self.responses.lock().unwrap().push_back(resp);
        self
    }

    /// Take the only request sent so far.
    pub fn request(&self) -> Request<Bytes> {
        let mut requests = self.requests.lock().unwrap();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }

    pub fn is_untouched(&self) -> bool {
        self.requests.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::unexpected("no response queued"))
    }
}

pub(crate) fn mock_pipeline() -> (Pipeline, MockHttpSend) {
    let mock = MockHttpSend::default();
    let ctx = Context::new().with_http_send(mock.clone());
    (Pipeline::new(ctx), mock)
}

/// Decoded query pairs of a request, in wire order.
pub(crate) fn query_pairs(req: &Request<Bytes>) -> Vec<(String, String)> {
    form_urlencoded::parse(req.uri().query().unwrap_or_default().as_bytes())
        .into_owned()
        .collect()
}

pub(crate) fn header<'a>(req: &'a Request<Bytes>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}
