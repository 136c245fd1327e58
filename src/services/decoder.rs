//! Spreadsheet text decoding
//!
//! Excel exports from Korean Windows arrive as EUC-KR/CP949 more often than
//! UTF-8, so the caller declares the encoding up front. Malformed bytes are a
//! hard error — substituting replacement characters would corrupt names and
//! phone numbers silently.

use encoding_rs::{Encoding, EUC_KR, UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared source encoding for an uploaded file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SourceEncoding {
    #[default]
    Utf8,
    EucKr,
    Cp949,
    Iso88591,
    /// Windows "ANSI" alias — CP949 on Korean systems
    Ansi,
}

impl SourceEncoding {
    fn encoding(self) -> &'static Encoding {
        match self {
            SourceEncoding::Utf8 => UTF_8,
            // encoding_rs's EUC-KR is the windows-949 superset, which covers
            // both declared labels
            SourceEncoding::EucKr | SourceEncoding::Cp949 | SourceEncoding::Ansi => EUC_KR,
            SourceEncoding::Iso88591 => WINDOWS_1252,
        }
    }

    pub fn label(self) -> &'static str {
        self.encoding().name()
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed byte sequence for declared encoding {encoding}")]
    Malformed { encoding: &'static str },
}

/// Decode `bytes` under the declared encoding, stripping a leading BOM.
pub fn decode(bytes: &[u8], encoding: SourceEncoding) -> Result<String, DecodeError> {
    let decoded = encoding
        .encoding()
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(DecodeError::Malformed {
            encoding: encoding.label(),
        })?;

    // BOM survives decoding as U+FEFF; drop it from the front only
    let text = match decoded.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => decoded.into_owned(),
    };
    Ok(text)
}

/// Drop the first line when it is the template's notice line (contains 주의).
/// Returns the remainder starting at the next line.
pub fn strip_notice_line(text: &str) -> &str {
    let first_line = text.lines().next().unwrap_or("");
    if !first_line.contains("주의") {
        return text;
    }
    match text.find('\n') {
        Some(pos) => &text[pos + 1..],
        None => "",
    }
}

/// Decode an uploaded tabular file; template uploads additionally skip the
/// notice line the downloadable template ships with.
pub fn decode_tabular(
    bytes: &[u8],
    encoding: SourceEncoding,
    skip_notice: bool,
) -> Result<String, DecodeError> {
    let text = decode(bytes, encoding)?;
    if skip_notice {
        Ok(strip_notice_line(&text).to_string())
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_bom_is_stripped() {
        let bytes = [0xEF, 0xBB, 0xBF, b'a', b'b'];
        let text = decode(&bytes, SourceEncoding::Utf8).unwrap();
        assert_eq!(text, "ab");
        assert!(!text.starts_with('\u{feff}'));
    }

    #[test]
    fn utf8_without_bom_is_unchanged() {
        let text = decode("고객명".as_bytes(), SourceEncoding::Utf8).unwrap();
        assert_eq!(text, "고객명");
    }

    #[test]
    fn malformed_utf8_is_a_hard_error() {
        let bytes = [0xFF, 0xFE, 0x80];
        let err = decode(&bytes, SourceEncoding::Utf8).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }

    #[test]
    fn euc_kr_decodes_hangul() {
        // "고객" in EUC-KR
        let bytes = [0xB0, 0xED, 0xB0, 0xB4];
        let text = decode(&bytes, SourceEncoding::EucKr).unwrap();
        assert_eq!(text, "고객");
    }

    #[test]
    fn ansi_alias_decodes_as_cp949() {
        let bytes = [0xB0, 0xED, 0xB0, 0xB4];
        assert_eq!(decode(&bytes, SourceEncoding::Ansi).unwrap(), "고객");
        assert_eq!(decode(&bytes, SourceEncoding::Cp949).unwrap(), "고객");
    }

    #[test]
    fn notice_line_is_dropped() {
        let text = "※ 주의: 이 줄은 삭제하지 마세요\n고객명,전화번호\n홍길동,010";
        assert_eq!(strip_notice_line(text), "고객명,전화번호\n홍길동,010");
    }

    #[test]
    fn first_line_without_marker_is_kept() {
        let text = "고객명,전화번호\n홍길동,010";
        assert_eq!(strip_notice_line(text), text);
    }

    #[test]
    fn notice_only_file_becomes_empty() {
        assert_eq!(strip_notice_line("주의사항만 있는 파일"), "");
    }

    #[test]
    fn decode_tabular_combines_bom_and_notice_handling() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("주의: 양식\n고객명\n홍길동".as_bytes());
        let text = decode_tabular(&bytes, SourceEncoding::Utf8, true).unwrap();
        assert_eq!(text, "고객명\n홍길동");
    }
}
