//! Downloads one yearly archive from the portal into a local directory.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::NaiveDateTime;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{
    header::{HeaderMap, CONTENT_LENGTH, LAST_MODIFIED},
    Client,
};
use tracing::{debug, info, warn};

use crate::{
    error::FetchError,
    resolve::{build_local_filename, build_url_with_base, parse_last_modified, DEFAULT_BASE_URL},
};

pub const DEFAULT_BLOCKSIZE: usize = 2048;

/// Metadata reported by the portal for a yearly archive.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResource {
    pub url: String,
    pub last_modified: NaiveDateTime,
    /// Zero when the server does not report a length.
    pub content_length: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    /// The archive was streamed to `path`.
    Downloaded { path: PathBuf, bytes: u64 },
    /// A file with the expected name was already on disk; nothing was fetched.
    AlreadyPresent(PathBuf),
}

impl DownloadOutcome {
    pub fn path(&self) -> &Path {
        match self {
            DownloadOutcome::Downloaded { path, .. } => path,
            DownloadOutcome::AlreadyPresent(path) => path,
        }
    }
}

pub struct Fetcher {
    client: Client,
    base_url: String,
    blocksize: usize,
    show_progress: bool,
}

impl Default for Fetcher {
    fn default() -> Self {
        Fetcher::new(DEFAULT_BASE_URL)
    }
}

impl Fetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Fetcher {
            client: Client::new(),
            base_url: base_url.into(),
            blocksize: DEFAULT_BLOCKSIZE,
            show_progress: true,
        }
    }

    /// Sets the largest number of bytes handed to a single file write.
    pub fn with_blocksize(mut self, blocksize: usize) -> Self {
        self.blocksize = blocksize.max(1);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Issues a HEAD request for the archive of `year` and reads its metadata.
    pub async fn fetch_metadata(&self, year: i32) -> Result<RemoteResource, FetchError> {
        let url = build_url_with_base(&self.base_url, year);
        let response = self.client.head(&url).send().await?.error_for_status()?;
        let headers = response.headers();

        let last_modified = last_modified(headers)?;
        let content_length = content_length(headers)?;
        debug!(%url, %last_modified, content_length, "fetched archive metadata");

        Ok(RemoteResource {
            url,
            last_modified,
            content_length,
        })
    }

    /// Downloads the archive for `year` into `destdir` unless it is already there.
    ///
    /// The HEAD request is always issued since the local file name depends on
    /// the reported modification date. A GET follows only when no file with
    /// that name exists. Errors are returned as-is; an interrupted transfer
    /// leaves a truncated file behind.
    pub async fn download_year(&self, year: i32, destdir: &Path) -> Result<DownloadOutcome, FetchError> {
        if !destdir.exists() {
            fs::create_dir_all(destdir)?;
        }

        let resource = self.fetch_metadata(year).await?;
        let file_path = destdir.join(build_local_filename(year, &resource.last_modified));

        if file_path.exists() {
            info!(year, path = %file_path.display(), "archive already downloaded");
            return Ok(DownloadOutcome::AlreadyPresent(file_path));
        }

        let bar = if self.show_progress {
            create_download_bar(year, resource.content_length)?
        } else {
            ProgressBar::hidden()
        };

        let bytes = self.stream_to_file(&resource.url, &file_path, &bar).await?;

        if resource.content_length > 0 && bytes != resource.content_length {
            warn!(
                year,
                expected = resource.content_length,
                written = bytes,
                "archive size differs from Content-Length"
            );
        }
        info!(year, bytes, path = %file_path.display(), "archive downloaded");

        Ok(DownloadOutcome::Downloaded {
            path: file_path,
            bytes,
        })
    }

    /// Streams `url` into `file_path`, leaving `bar` finished on success and
    /// abandoned on failure.
    async fn stream_to_file(&self, url: &str, file_path: &Path, bar: &ProgressBar) -> Result<u64, FetchError> {
        let result = self.write_body(url, file_path, bar).await;
        match result {
            Ok(_) => bar.finish(),
            Err(_) => bar.abandon(),
        }

        result
    }

    async fn write_body(&self, url: &str, file_path: &Path, bar: &ProgressBar) -> Result<u64, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let mut file = File::create(file_path)?;
        let mut written = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            for block in chunk.chunks(self.blocksize) {
                file.write_all(block)?;
                written += block.len() as u64;
                bar.set_position(written);
            }
        }
        file.flush()?;

        Ok(written)
    }
}

/// Creates a byte progress bar for one year's archive.
///
/// A `total` of zero means the server did not report a size, in which case a
/// spinner counting bytes is shown instead.
pub fn create_download_bar(year: i32, total: u64) -> Result<ProgressBar, FetchError> {
    let bar = if total > 0 {
        ProgressBar::new(total).with_style(
            ProgressStyle::with_template(
                "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}",
            )?
            .progress_chars("=> "),
        )
    } else {
        let spinner = ProgressBar::new_spinner()
            .with_style(ProgressStyle::with_template("{spinner} {msg} {bytes} ({bytes_per_sec})")?);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    Ok(bar.with_message(year.to_string()))
}

fn last_modified(headers: &HeaderMap) -> Result<NaiveDateTime, FetchError> {
    let value = headers
        .get(LAST_MODIFIED)
        .ok_or(FetchError::MissingHeader("Last-Modified"))?;

    parse_last_modified(&String::from_utf8_lossy(value.as_bytes()))
}

fn content_length(headers: &HeaderMap) -> Result<u64, FetchError> {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return Ok(0);
    };
    let text = String::from_utf8_lossy(value.as_bytes());

    text.trim()
        .parse()
        .map_err(|_| FetchError::InvalidContentLength(text.to_string()))
}

// -- Tests -------------------------------------------------------------------
