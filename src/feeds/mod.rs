use std::io::{Cursor, Read};

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use zip::ZipArchive;

pub mod fetch;
pub mod stations;
pub mod trips;

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Unwraps a zip or gzip container around a dataset, passing plain bytes
/// through untouched. Zip archives are expected to carry the dataset as a
/// `.csv` entry.
pub fn unwrap_container(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if bytes.starts_with(&ZIP_MAGIC) {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.name().to_ascii_lowercase().ends_with(".csv") {
                let mut out = Vec::new();
                file.read_to_end(&mut out)?;
                return Ok(out);
            }
        }
        bail!("zip archive contains no .csv entry");
    }

    if bytes.starts_with(&GZIP_MAGIC) {
        let mut out = Vec::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_end(&mut out)
            .context("decoding gzip stream")?;
        return Ok(out);
    }

    Ok(bytes)
}
