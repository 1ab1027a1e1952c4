use std::io::Read;

use flate2::read::GzDecoder;

use crate::errors::BrightError;

pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, BrightError> {
    if !is_gzip(bytes) {
        return Err(BrightError::CorruptArchive(format!(
            "The file fetched is not a valid GZIP archive ({} bytes, bad magic)",
            bytes.len()
        )));
    }

    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| BrightError::CorruptArchive(format!("Failed to decompress archive: {}", e)))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decompress() {
        let compressed = gzip(b"line one\nline two\n");
        assert!(is_gzip(&compressed));
        assert_eq!(decompress(&compressed).unwrap(), b"line one\nline two\n");
    }

    #[test]
    fn test_plain_text_is_corrupt() {
        let result = decompress(b"{\"error\":\"not found\"}");
        assert!(matches!(result, Err(BrightError::CorruptArchive(_))));
    }

    #[test]
    fn test_empty_input_is_corrupt() {
        assert!(matches!(decompress(&[]), Err(BrightError::CorruptArchive(_))));
    }

    #[test]
    fn test_truncated_stream_is_corrupt() {
        let compressed = gzip(&b"x".repeat(4096));
        let truncated = &compressed[..compressed.len() / 2];
        assert!(matches!(decompress(truncated), Err(BrightError::CorruptArchive(_))));
    }
}
