// src/core/net.rs

// Blocking HTTP GET. One request per run, so no client reuse and no retries.

use std::time::Duration;

use crate::config::consts::USER_AGENT;
use crate::error::{Error, Result};

pub fn http_get(url: &str, timeout: Duration) -> Result<String> {
    let net_err = |source| Error::Net { url: s!(url), source };

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(net_err)?;

    let resp = client.get(url).send().map_err(net_err)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status { status: status.as_u16(), url: s!(url) });
    }
    resp.text().map_err(net_err)
}
