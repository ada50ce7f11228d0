use azblob_core::{Context, Result};
use azblob_http_send_reqwest::ReqwestHttpSend;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("azblob-example/0.1")
        .build()
        .map_err(|e| azblob_core::Error::config_invalid("invalid reqwest client").with_source(e))?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    // Azurite answers anonymous account info requests with an error document,
    // which is enough to prove the transport works.
    let req = http::Request::get("http://127.0.0.1:10000/devstoreaccount1?restype=account&comp=properties")
        .header("x-ms-version", "2019-02-02")
        .body(Bytes::new())?;

    let resp = ctx.http_send(req).await?;
    println!("status: {}", resp.status());
    println!("body: {}", String::from_utf8_lossy(resp.body()));

    Ok(())
}
