//! Streaming image download with a size limit

use futures::StreamExt;
use reqwest::Client;

use crate::error::{MigrateError, MigrateResult};

/// Images larger than this are rejected
pub const MAX_IMAGE_BYTES: usize = 25 * 1024 * 1024;

/// Download an image body, failing on non-2xx and on oversized bodies
pub async fn download_image(client: &Client, url: &str) -> MigrateResult<Vec<u8>> {
    log::debug!("Downloading image: {url}");
    let response = client
        .get(url)
        .header("Accept", "image/avif,image/webp,image/apng,image/*,*/*;q=0.8")
        .send()
        .await
        .map_err(|e| MigrateError::from_request(url, &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MigrateError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // Enforce the limit before downloading when the server announces a length
    let expected_size = response.content_length().unwrap_or(0);
    if expected_size > MAX_IMAGE_BYTES as u64 {
        return Err(MigrateError::Asset {
            url: url.to_string(),
            reason: format!("{expected_size} bytes exceeds limit of {MAX_IMAGE_BYTES} bytes"),
        });
    }

    let mut buffer = Vec::with_capacity(usize::try_from(expected_size).unwrap_or(0));
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| MigrateError::from_request(url, &e))?;
        if buffer.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(MigrateError::Asset {
                url: url.to_string(),
                reason: format!("download exceeded size limit of {MAX_IMAGE_BYTES} bytes"),
            });
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer)
}
