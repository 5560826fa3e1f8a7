use std::io::Read;
use flate2::read::{GzDecoder, ZlibDecoder};
use crate::m3u_channels_error::str_to_io_error;

pub(crate) const ENCODING_GZIP: &str = "gzip";
pub(crate) const ENCODING_DEFLATE: &str = "deflate";

pub(crate) fn is_gzip(bytes: &[u8]) -> bool {
    // Gzip files start with the bytes 0x1F 0x8B
    bytes.len() >= 2 && bytes[0] == 0x1F && bytes[1] == 0x8B
}

pub(crate) fn is_deflate(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x78 && (bytes[1] == 0x01 || bytes[1] == 0x9C || bytes[1] == 0xDA)
}

/// Inflates gzip or zlib content detected by magic bytes, the result is always read as utf-8.
pub(crate) fn decode_text_content(bytes: &[u8]) -> Result<String, std::io::Error> {
    let mut decode_buffer = Vec::new();
    let encoding = if is_gzip(bytes) {
        GzDecoder::new(bytes).read_to_end(&mut decode_buffer)
            .map_err(|err| str_to_io_error(&format!("failed to decode gzip content {err}")))?;
        Some(ENCODING_GZIP)
    } else if is_deflate(bytes) {
        ZlibDecoder::new(bytes).read_to_end(&mut decode_buffer)
            .map_err(|err| str_to_io_error(&format!("failed to decode zlib content {err}")))?;
        Some(ENCODING_DEFLATE)
    } else {
        None
    };
    let content = if encoding.is_some() { &decode_buffer[..] } else { bytes };
    Ok(String::from_utf8_lossy(content).into_owned())
}
