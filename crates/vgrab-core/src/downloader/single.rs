//! Single-attempt streaming HTTP GET.
//!
//! Writes the response body in chunks through a `.part` temp file and renames
//! it into place only on success. Runs on the current thread; call from
//! `spawn_blocking` when used from async code.

use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

use crate::storage::{temp_path, StorageWriter};

use super::{FetchError, FetchOptions};

/// Referer presented to media CDNs; some refuse bare requests.
const REFERER: &str = "https://www.threads.net/";

/// User agent for direct media fetches (same family as the browser session).
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/122 Safari/537.36";

/// Downloads `url` into `final_path` with one GET attempt.
///
/// On success returns the number of bytes written and the file exists at
/// `final_path`. On any transport error, non-2xx status, or timeout the temp
/// file is removed and no file is left at `final_path`.
pub fn fetch_to_file(url: &str, final_path: &Path, opts: FetchOptions) -> Result<u64, FetchError> {
    let tp = temp_path(final_path);
    let mut storage = StorageWriter::create(&tp).map_err(|e| {
        FetchError::Storage(std::io::Error::other(format!("{e:#}")))
    })?;

    match perform_get(url, &mut storage, opts) {
        Ok(()) => {
            let bytes = storage
                .finalize(final_path)
                .map_err(|e| FetchError::Storage(std::io::Error::other(format!("{e:#}"))))?;
            Ok(bytes)
        }
        Err(err) => {
            storage.discard();
            Err(err)
        }
    }
}

/// Runs the GET, streaming chunks into `storage`. Does not finalize.
fn perform_get(
    url: &str,
    storage: &mut StorageWriter,
    opts: FetchOptions,
) -> Result<(), FetchError> {
    let write_error: RefCell<Option<std::io::Error>> = RefCell::new(None);

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::Curl)?;
    easy.follow_location(true).map_err(FetchError::Curl)?;
    easy.max_redirections(10).map_err(FetchError::Curl)?;
    easy.useragent(USER_AGENT).map_err(FetchError::Curl)?;
    easy.referer(REFERER).map_err(FetchError::Curl)?;
    easy.buffer_size(opts.buffer_size).map_err(FetchError::Curl)?;
    easy.connect_timeout(Duration::from_secs(30))
        .map_err(FetchError::Curl)?;
    // Abort if throughput drops below 1 KiB/s for 30s, plus the hard
    // wall-clock timeout from the caller.
    easy.low_speed_limit(1024).map_err(FetchError::Curl)?;
    easy.low_speed_time(Duration::from_secs(30))
        .map_err(FetchError::Curl)?;
    easy.timeout(opts.timeout).map_err(FetchError::Curl)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match storage.write_chunk(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    *write_error.borrow_mut() = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(FetchError::Curl)?;
        transfer.perform().map_err(|e| {
            match write_error.borrow_mut().take() {
                Some(io_err) => FetchError::Storage(io_err),
                None => FetchError::Curl(e),
            }
        })?;
    }

    let code = easy.response_code().map_err(FetchError::Curl)?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(())
}
