//! Text decoding for rip logs and reports.
//!
//! Rip logs are often written as UTF-16 (EAC) or in a legacy codepage such as
//! Windows-1251, while everything else is UTF-8. Decoding never fails.

use std::path::Path;

use tracing::debug;

/// Decode raw bytes to a String.
///
/// 1. BOM: UTF-8 (EF BB BF), UTF-16 LE (FF FE), UTF-16 BE (FE FF)
/// 2. Looks like BOM-less UTF-16 (even length with NUL bytes): UTF-16 LE or BE
/// 3. Strict UTF-8
/// 4. Not valid UTF-8: chardetng detection, decode via encoding_rs
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let (decoded, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(rest);
        return decoded.into_owned();
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let (decoded, _) = encoding_rs::UTF_16BE.decode_without_bom_handling(rest);
        return decoded.into_owned();
    }

    if bytes.len() % 2 == 0 && bytes.contains(&0) {
        // ASCII text in UTF-16 LE has its NULs on odd offsets
        let encoding = if bytes.first() == Some(&0) {
            encoding_rs::UTF_16BE
        } else {
            encoding_rs::UTF_16LE
        };
        debug!("Decoding BOM-less text as {}", encoding.name());
        let (decoded, _) = encoding.decode_without_bom_handling(bytes);
        return decoded.into_owned();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    debug!("Text is not valid UTF-8, decoding as {}", encoding.name());
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Read a file and decode its contents.
pub fn read_text_file(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(&bytes))
}
