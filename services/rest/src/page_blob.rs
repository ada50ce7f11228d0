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

use azblob_core::time::DateTime;
use azblob_core::{Error, Result};
use bytes::Bytes;
use http::{Method, StatusCode};

use crate::constants::*;
use crate::headers::response_headers;
use crate::models::{
    AccessTier, BlobHttpHeaders, BlobType, CopyStatusType, CpkInfo, HttpRange,
    LeaseAccessConditions, Metadata, ModifiedAccessConditions, SequenceNumberAccessConditions,
    SequenceNumberAction, SourceModifiedAccessConditions,
};
use crate::request::RequestBuilder;
use crate::response::ServiceResponse;
use crate::xml::PageList;
use crate::Pipeline;

response_headers! {
    PageBlobCreateHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        content_md5: Vec<u8> = "content-md5",
        is_server_encrypted: bool = "x-ms-request-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
    }
}

response_headers! {
    PageBlobUploadPagesHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        content_md5: Vec<u8> = "content-md5",
        content_crc64: Vec<u8> = "x-ms-content-crc64",
        blob_sequence_number: i64 = "x-ms-blob-sequence-number",
        is_server_encrypted: bool = "x-ms-request-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
    }
}

response_headers! {
    PageBlobClearPagesHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        content_md5: Vec<u8> = "content-md5",
        content_crc64: Vec<u8> = "x-ms-content-crc64",
        blob_sequence_number: i64 = "x-ms-blob-sequence-number",
    }
}

response_headers! {
    PageBlobUploadPagesFromUrlHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        content_md5: Vec<u8> = "content-md5",
        content_crc64: Vec<u8> = "x-ms-content-crc64",
        blob_sequence_number: i64 = "x-ms-blob-sequence-number",
        is_server_encrypted: bool = "x-ms-request-server-encrypted",
        encryption_key_sha256: String = "x-ms-encryption-key-sha256",
    }
}

response_headers! {
    PageBlobGetPageRangesHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        blob_content_length: u64 = "x-ms-blob-content-length",
    }
}

response_headers! {
    PageBlobGetPageRangesDiffHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        blob_content_length: u64 = "x-ms-blob-content-length",
    }
}

response_headers! {
    PageBlobResizeHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        blob_sequence_number: i64 = "x-ms-blob-sequence-number",
    }
}

response_headers! {
    PageBlobUpdateSequenceNumberHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        blob_sequence_number: i64 = "x-ms-blob-sequence-number",
    }
}

response_headers! {
    PageBlobCopyIncrementalHeaders {
        etag: String = "etag",
        last_modified: DateTime = "last-modified",
        copy_id: String = "x-ms-copy-id",
        copy_status: CopyStatusType = "x-ms-copy-status",
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageBlobCreateOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    /// Premium tiers only.
    pub tier: Option<AccessTier>,
    pub blob_http_headers: BlobHttpHeaders,
    pub metadata: Metadata,
    /// Initial sequence number, 0 when `None`.
    pub blob_sequence_number: Option<i64>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct PageBlobUploadPagesOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub transactional_content_md5: Option<Vec<u8>>,
    pub transactional_content_crc64: Option<Vec<u8>>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub sequence_number_access_conditions: SequenceNumberAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct PageBlobClearPagesOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub sequence_number_access_conditions: SequenceNumberAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct PageBlobUploadPagesFromUrlOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub source_content_md5: Option<Vec<u8>>,
    pub source_content_crc64: Option<Vec<u8>>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub sequence_number_access_conditions: SequenceNumberAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub source_modified_access_conditions: SourceModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct PageBlobGetPageRangesOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub snapshot: Option<String>,
    /// Only report pages in this range.
    pub range: Option<HttpRange>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct PageBlobResizeOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
    pub cpk_info: Option<CpkInfo>,
}

#[derive(Debug, Clone, Default)]
pub struct PageBlobUpdateSequenceNumberOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub lease_access_conditions: LeaseAccessConditions,
    pub modified_access_conditions: ModifiedAccessConditions,
}

#[derive(Debug, Clone, Default)]
pub struct PageBlobCopyIncrementalOptions {
    pub timeout: Option<u32>,
    pub request_id: Option<String>,
    pub modified_access_conditions: ModifiedAccessConditions,
}

fn check_blob_length(length: u64) -> Result<()> {
    if length % PAGE_SIZE != 0 {
        return Err(Error::request_invalid(format!(
            "page blob length {length} is not a multiple of {PAGE_SIZE}"
        )));
    }
    Ok(())
}

/// Operations on a page blob.
#[derive(Debug, Clone)]
pub struct PageBlobOperations {
    pipeline: Pipeline,
    url: String,
}

impl PageBlobOperations {
    pub fn new(pipeline: Pipeline, url: impl Into<String>) -> Self {
        Self {
            pipeline,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(
        &self,
        method: Method,
        timeout: Option<u32>,
        request_id: Option<&str>,
    ) -> RequestBuilder {
        RequestBuilder::new(method, &self.url)
            .timeout(timeout)
            .client_request_id(request_id)
    }

    /// Create an empty page blob of `content_length` bytes.
    pub async fn create(
        &self,
        content_length: u64,
        opts: PageBlobCreateOptions,
    ) -> Result<ServiceResponse<(), PageBlobCreateHeaders>> {
        check_blob_length(content_length)?;
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .header(X_MS_BLOB_TYPE, BlobType::PageBlob)
            .header(X_MS_BLOB_CONTENT_LENGTH, content_length)
            .header_opt(X_MS_BLOB_SEQUENCE_NUMBER, opts.blob_sequence_number)
            .header_opt(X_MS_ACCESS_TIER, opts.tier)
            .http_headers(&opts.blob_http_headers)
            .metadata(&opts.metadata)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    /// Write `body` to the pages covered by `range`.
    pub async fn upload_pages(
        &self,
        range: HttpRange,
        body: Bytes,
        opts: PageBlobUploadPagesOptions,
    ) -> Result<ServiceResponse<(), PageBlobUploadPagesHeaders>> {
        let count = range.check_page_aligned()?;
        if body.len() as u64 != count {
            return Err(Error::request_invalid(format!(
                "body of {} bytes doesn't match page range {range}",
                body.len()
            )));
        }
        if opts.transactional_content_md5.is_some() && opts.transactional_content_crc64.is_some() {
            return Err(Error::request_invalid(
                "MD5 and CRC64 can't be set on the same request",
            ));
        }

        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "page")
            .header(X_MS_PAGE_WRITE, "update")
            .header(X_MS_RANGE, range)
            .base64_opt(CONTENT_MD5, opts.transactional_content_md5.as_deref())
            .base64_opt(X_MS_CONTENT_CRC64, opts.transactional_content_crc64.as_deref())
            .lease(&opts.lease_access_conditions)
            .sequence_number(&opts.sequence_number_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .body(body)?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    /// Release the pages covered by `range`, they read back as zeros.
    pub async fn clear_pages(
        &self,
        range: HttpRange,
        opts: PageBlobClearPagesOptions,
    ) -> Result<ServiceResponse<(), PageBlobClearPagesHeaders>> {
        range.check_page_aligned()?;
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "page")
            .header(X_MS_PAGE_WRITE, "clear")
            .header(X_MS_RANGE, range)
            .lease(&opts.lease_access_conditions)
            .sequence_number(&opts.sequence_number_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    /// Write pages with content read by the service from `source_url`.
    pub async fn upload_pages_from_url(
        &self,
        source_url: &str,
        source_range: HttpRange,
        range: HttpRange,
        opts: PageBlobUploadPagesFromUrlOptions,
    ) -> Result<ServiceResponse<(), PageBlobUploadPagesFromUrlHeaders>> {
        let count = range.check_page_aligned()?;
        source_range.end()?;
        if source_range.count != Some(count) {
            return Err(Error::request_invalid(format!(
                "source range {source_range} doesn't match page range {range}"
            )));
        }
        if opts.source_content_md5.is_some() && opts.source_content_crc64.is_some() {
            return Err(Error::request_invalid(
                "MD5 and CRC64 can't be set on the same request",
            ));
        }

        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "page")
            .header(X_MS_PAGE_WRITE, "update")
            .header(X_MS_COPY_SOURCE, source_url)
            .header(X_MS_SOURCE_RANGE, source_range)
            .header(X_MS_RANGE, range)
            .base64_opt(X_MS_SOURCE_CONTENT_MD5, opts.source_content_md5.as_deref())
            .base64_opt(X_MS_SOURCE_CONTENT_CRC64, opts.source_content_crc64.as_deref())
            .lease(&opts.lease_access_conditions)
            .sequence_number(&opts.sequence_number_access_conditions)
            .modified(&opts.modified_access_conditions)
            .source_modified(&opts.source_modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::CREATED])
    }

    fn page_ranges_request(&self, opts: &PageBlobGetPageRangesOptions) -> Result<RequestBuilder> {
        if let Some(range) = &opts.range {
            range.check_page_aligned()?;
        }
        Ok(self
            .request(Method::GET, opts.timeout, opts.request_id.as_deref())
            .query("comp", "pagelist")
            .query_opt("snapshot", opts.snapshot.as_deref())
            .header_opt(X_MS_RANGE, opts.range)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions))
    }

    /// List valid page ranges of the blob or a snapshot.
    pub async fn get_page_ranges(
        &self,
        opts: PageBlobGetPageRangesOptions,
    ) -> Result<ServiceResponse<PageList, PageBlobGetPageRangesHeaders>> {
        let req = self.page_ranges_request(&opts)?.empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_xml(resp, &[StatusCode::OK])
    }

    /// List pages changed since `prev_snapshot`, cleared pages come back as
    /// clear ranges.
    pub async fn get_page_ranges_diff(
        &self,
        prev_snapshot: &str,
        opts: PageBlobGetPageRangesOptions,
    ) -> Result<ServiceResponse<PageList, PageBlobGetPageRangesDiffHeaders>> {
        if prev_snapshot.is_empty() {
            return Err(Error::request_invalid("previous snapshot must not be empty"));
        }
        let req = self
            .page_ranges_request(&opts)?
            .query("prevsnapshot", prev_snapshot)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_xml(resp, &[StatusCode::OK])
    }

    /// Grow or shrink the blob to `content_length` bytes.
    pub async fn resize(
        &self,
        content_length: u64,
        opts: PageBlobResizeOptions,
    ) -> Result<ServiceResponse<(), PageBlobResizeHeaders>> {
        check_blob_length(content_length)?;
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "properties")
            .header(X_MS_BLOB_CONTENT_LENGTH, content_length)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .cpk(opts.cpk_info.as_ref())
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    /// Change the sequence number. `sequence_number` is required for `max`
    /// and `update`, and must be `None` for `increment`.
    pub async fn update_sequence_number(
        &self,
        action: SequenceNumberAction,
        sequence_number: Option<i64>,
        opts: PageBlobUpdateSequenceNumberOptions,
    ) -> Result<ServiceResponse<(), PageBlobUpdateSequenceNumberHeaders>> {
        match (action, sequence_number) {
            (SequenceNumberAction::Increment, Some(_)) => {
                return Err(Error::request_invalid(
                    "sequence number must not be set when incrementing",
                ))
            }
            (SequenceNumberAction::Max | SequenceNumberAction::Update, None) => {
                return Err(Error::request_invalid(format!(
                    "sequence number is required for action {action}"
                )))
            }
            (_, Some(n)) if n < 0 => {
                return Err(Error::request_invalid(format!(
                    "sequence number must not be negative, got {n}"
                )))
            }
            _ => {}
        }

        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "properties")
            .header(X_MS_SEQUENCE_NUMBER_ACTION, action)
            .header_opt(X_MS_BLOB_SEQUENCE_NUMBER, sequence_number)
            .lease(&opts.lease_access_conditions)
            .modified(&opts.modified_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::OK])
    }

    /// Start an incremental copy from a snapshot URL of another page blob.
    pub async fn copy_incremental(
        &self,
        copy_source: &str,
        opts: PageBlobCopyIncrementalOptions,
    ) -> Result<ServiceResponse<(), PageBlobCopyIncrementalHeaders>> {
        let req = self
            .request(Method::PUT, opts.timeout, opts.request_id.as_deref())
            .query("comp", "incrementalcopy")
            .header(X_MS_COPY_SOURCE, copy_source)
            .modified(&opts.modified_access_conditions)
            .empty()?;

        let resp = self.pipeline.send(req).await?;
        ServiceResponse::from_empty(resp, &[StatusCode::ACCEPTED])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{header, mock_pipeline};
    use crate::xml::PageRange;
    use azblob_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const URL: &str = "https://account.blob.core.windows.net/disks/os.vhd";

    #[tokio::test]
    async fn test_create() {
        let (pipeline, mock) = mock_pipeline();
        mock.respond(StatusCode::CREATED, &[("etag", "\"0x1\"")], "");

        PageBlobOperations::new(pipeline, URL)
            .create(
                4096,
                PageBlobCreateOptions {
                    blob_sequence_number: Some(3),
                    tier: Some(AccessTier::P10),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let req = mock.request();
        assert_eq!(req.method(), Method::PUT);
        assert_eq!(header(&req, "x-ms-blob-type"), Some("PageBlob"));
        assert_eq!(header(&req, "x-ms-blob-content-length"), Some("4096"));
        assert_eq!(header(&req, "x-ms-blob-sequence-number"), Some("3"));
        assert_eq!(header(&req, "x-ms-access-tier"), Some("P10"));
        assert_eq!(header(&req, "content-length"), Some("0"));
    }

    #[test_case(1 ; "one byte")]
    #[test_case(511 ; "short of a page")]
    #[test_case(1000 ; "between pages")]
    #[tokio::test]
    async fn test_unaligned_length(length: u64) {
        let (pipeline, mock) = mock_pipeline();
        let ops = PageBlobOperations::new(pipeline, URL);

        let err = ops
            .create(length, PageBlobCreateOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        let err = ops
            .resize(length, PageBlobResizeOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(mock.is_untouched());
    }

    #[test_case(HttpRange::new(1, 512) ; "unaligned offset")]
    #[test_case(HttpRange::new(0, 100) ; "unaligned count")]
    #[test_case(HttpRange::new(0, 0) ; "empty")]
    #[test_case(HttpRange::from_offset(512) ; "open ended")]
    #[test_case(HttpRange::new(u64::MAX - 511, 1024) ; "overflowing")]
    #[tokio::test]
    async fn test_unaligned_range(range: HttpRange) {
        let (pipeline, mock) = mock_pipeline();
        let ops = PageBlobOperations::new(pipeline, URL);

        let err = ops
            .clear_pages(range, PageBlobClearPagesOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        let err = ops
            .upload_pages(range, Bytes::new(), PageBlobUploadPagesOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(mock.is_untouched());
    }

    #[tokio::test]
    async fn test_upload_pages() {
        let (pipeline, mock) = mock_pipeline();
        let ops = PageBlobOperations::new(pipeline, URL);

        let err = ops
            .upload_pages(
                HttpRange::new(512, 1024),
                Bytes::from(vec![0u8; 512]),
                PageBlobUploadPagesOptions::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(mock.is_untouched());

        mock.respond(
            StatusCode::CREATED,
            &[("x-ms-blob-sequence-number", "4")],
            "",
        );
        let resp = ops
            .upload_pages(
                HttpRange::new(512, 1024),
                Bytes::from(vec![1u8; 1024]),
                PageBlobUploadPagesOptions {
                    sequence_number_access_conditions: SequenceNumberAccessConditions {
                        if_sequence_number_less_than: Some(5),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(resp.headers().blob_sequence_number(), Some(4));

        let req = mock.request();
        assert_eq!(req.uri().query(), Some("comp=page"));
        assert_eq!(header(&req, "x-ms-page-write"), Some("update"));
        assert_eq!(header(&req, "x-ms-range"), Some("bytes=512-1535"));
        assert_eq!(header(&req, "x-ms-if-sequence-number-lt"), Some("5"));
        assert_eq!(header(&req, "content-length"), Some("1024"));
    }

    #[tokio::test]
    async fn test_clear_pages() {
        let (pipeline, mock) = mock_pipeline();
        mock.respond(StatusCode::CREATED, &[], "");

        PageBlobOperations::new(pipeline, URL)
            .clear_pages(HttpRange::new(0, 512), PageBlobClearPagesOptions::default())
            .await
            .unwrap();

        let req = mock.request();
        assert_eq!(req.uri().query(), Some("comp=page"));
        assert_eq!(header(&req, "x-ms-page-write"), Some("clear"));
        assert_eq!(header(&req, "x-ms-range"), Some("bytes=0-511"));
        assert_eq!(header(&req, "content-length"), Some("0"));
    }

    #[tokio::test]
    async fn test_upload_pages_from_url() {
        let (pipeline, mock) = mock_pipeline();
        let ops = PageBlobOperations::new(pipeline, URL);
        let source = "https://other.blob.core.windows.net/disks/base.vhd";

        let err = ops
            .upload_pages_from_url(
                source,
                HttpRange::new(0, 512),
                HttpRange::new(0, 1024),
                PageBlobUploadPagesFromUrlOptions::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        let err = ops
            .upload_pages_from_url(
                source,
                HttpRange::new(u64::MAX - 511, 1024),
                HttpRange::new(0, 1024),
                PageBlobUploadPagesFromUrlOptions::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(mock.is_untouched());

        mock.respond(StatusCode::CREATED, &[], "");
        ops.upload_pages_from_url(
            source,
            HttpRange::new(2048, 1024),
            HttpRange::new(0, 1024),
            PageBlobUploadPagesFromUrlOptions::default(),
        )
        .await
        .unwrap();

        let req = mock.request();
        assert_eq!(header(&req, "x-ms-page-write"), Some("update"));
        assert_eq!(header(&req, "x-ms-copy-source"), Some(source));
        assert_eq!(header(&req, "x-ms-source-range"), Some("bytes=2048-3071"));
        assert_eq!(header(&req, "x-ms-range"), Some("bytes=0-1023"));
    }

    const PAGE_LIST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<PageList>
  <PageRange><Start>0</Start><End>511</End></PageRange>
  <ClearRange><Start>512</Start><End>1023</End></ClearRange>
  <PageRange><Start>1024</Start><End>2047</End></PageRange>
</PageList>"#;

    #[tokio::test]
    async fn test_get_page_ranges() {
        let (pipeline, mock) = mock_pipeline();
        mock.respond(
            StatusCode::OK,
            &[("x-ms-blob-content-length", "4096")],
            PAGE_LIST,
        );

        let resp = PageBlobOperations::new(pipeline, URL)
            .get_page_ranges(PageBlobGetPageRangesOptions {
                range: Some(HttpRange::new(0, 4096)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(resp.headers().blob_content_length(), Some(4096));
        assert_eq!(
            resp.value().page_range,
            vec![
                PageRange { start: 0, end: 511 },
                PageRange {
                    start: 1024,
                    end: 2047
                },
            ]
        );

        let req = mock.request();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.uri().query(), Some("comp=pagelist"));
        assert_eq!(header(&req, "x-ms-range"), Some("bytes=0-4095"));
    }

    #[tokio::test]
    async fn test_get_page_ranges_diff() {
        let (pipeline, mock) = mock_pipeline();
        let ops = PageBlobOperations::new(pipeline, URL);

        let err = ops
            .get_page_ranges_diff("", PageBlobGetPageRangesOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        mock.respond(StatusCode::OK, &[], PAGE_LIST);
        let resp = ops
            .get_page_ranges_diff(
                "2022-03-01T08:12:34.1234567Z",
                PageBlobGetPageRangesOptions {
                    snapshot: Some("2022-03-02T08:12:34.1234567Z".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            resp.value().clear_range,
            vec![PageRange {
                start: 512,
                end: 1023
            }]
        );

        let req = mock.request();
        assert_eq!(
            req.uri().query(),
            Some("comp=pagelist&snapshot=2022-03-02T08%3A12%3A34.1234567Z&prevsnapshot=2022-03-01T08%3A12%3A34.1234567Z")
        );
    }

    #[tokio::test]
    async fn test_resize() {
        let (pipeline, mock) = mock_pipeline();
        mock.respond(StatusCode::OK, &[("x-ms-blob-sequence-number", "0")], "");

        PageBlobOperations::new(pipeline, URL)
            .resize(8192, PageBlobResizeOptions::default())
            .await
            .unwrap();

        let req = mock.request();
        assert_eq!(req.uri().query(), Some("comp=properties"));
        assert_eq!(header(&req, "x-ms-blob-content-length"), Some("8192"));
    }

    #[test_case(SequenceNumberAction::Increment, Some(1) ; "increment with value")]
    #[test_case(SequenceNumberAction::Update, None ; "update without value")]
    #[test_case(SequenceNumberAction::Max, None ; "max without value")]
    #[test_case(SequenceNumberAction::Update, Some(-1) ; "negative")]
    #[tokio::test]
    async fn test_update_sequence_number_invalid(action: SequenceNumberAction, value: Option<i64>) {
        let (pipeline, mock) = mock_pipeline();

        let err = PageBlobOperations::new(pipeline, URL)
            .update_sequence_number(action, value, PageBlobUpdateSequenceNumberOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(mock.is_untouched());
    }

    #[tokio::test]
    async fn test_update_sequence_number() {
        let (pipeline, mock) = mock_pipeline();
        let ops = PageBlobOperations::new(pipeline, URL);

        mock.respond(StatusCode::OK, &[("x-ms-blob-sequence-number", "1")], "");
        let resp = ops
            .update_sequence_number(
                SequenceNumberAction::Increment,
                None,
                PageBlobUpdateSequenceNumberOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers().blob_sequence_number(), Some(1));
        let req = mock.request();
        assert_eq!(header(&req, "x-ms-sequence-number-action"), Some("increment"));
        assert_eq!(header(&req, "x-ms-blob-sequence-number"), None);

        mock.respond(StatusCode::OK, &[("x-ms-blob-sequence-number", "9")], "");
        ops.update_sequence_number(
            SequenceNumberAction::Max,
            Some(9),
            PageBlobUpdateSequenceNumberOptions::default(),
        )
        .await
        .unwrap();
        let req = mock.request();
        assert_eq!(header(&req, "x-ms-sequence-number-action"), Some("max"));
        assert_eq!(header(&req, "x-ms-blob-sequence-number"), Some("9"));
    }

    #[tokio::test]
    async fn test_copy_incremental() {
        let (pipeline, mock) = mock_pipeline();
        mock.respond(
            StatusCode::ACCEPTED,
            &[("x-ms-copy-id", "copy-1"), ("x-ms-copy-status", "pending")],
            "",
        );
        let source = "https://account.blob.core.windows.net/disks/base.vhd?snapshot=2022-03-01T08%3A12%3A34.1234567Z";

        let resp = PageBlobOperations::new(pipeline, URL)
            .copy_incremental(source, PageBlobCopyIncrementalOptions::default())
            .await
            .unwrap();
        assert_eq!(resp.headers().copy_status(), Some(CopyStatusType::Pending));

        let req = mock.request();
        assert_eq!(req.uri().query(), Some("comp=incrementalcopy"));
        assert_eq!(header(&req, "x-ms-copy-source"), Some(source));
    }
}
