use log::{debug, warn};
use reqwest::blocking::Client;
use std::time::Duration;

pub const COMMONS_BASE: &str = "https://commons.wikimedia.org";
pub const THUMB_WIDTH: u32 = 1024;

/// Retrieves raw image bytes for a media file name.
pub trait MediaSource {
    /// `None` once every retrieval strategy has failed.
    fn download(&self, filename: &str) -> Option<Vec<u8>>;
}

/// Downloads logo files from Wikimedia Commons.
pub struct CommonsClient<'a> {
    http: &'a Client,
    base_url: String,
    thumb_width: u32,
    timeout: Duration,
}

impl<'a> CommonsClient<'a> {
    pub fn new(http: &'a Client, base_url: &str, thumb_width: u32, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            thumb_width,
            timeout,
        }
    }

    /// URLs tried for a file, in order: the rendered thumbnail, then the
    /// original file.
    pub fn candidate_urls(&self, filename: &str) -> Vec<String> {
        let quoted = urlencoding::encode(filename);
        vec![
            format!(
                "{}/w/thumb.php?f={}&w={}",
                self.base_url, quoted, self.thumb_width
            ),
            format!("{}/wiki/Special:FilePath/{}", self.base_url, quoted),
        ]
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, reqwest::Error> {
        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()?
            .error_for_status()?;

        Ok(response.bytes()?.to_vec())
    }
}

impl MediaSource for CommonsClient<'_> {
    fn download(&self, filename: &str) -> Option<Vec<u8>> {
        for url in self.candidate_urls(filename) {
            match self.fetch(&url) {
                Ok(bytes) => {
                    debug!("Downloaded {} bytes from {}", bytes.len(), url);
                    return Some(bytes);
                }
                Err(e) => warn!("Download from {} failed: {}", url, e),
            }
        }

        None
    }
}
