use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("body is not valid {encoding}")]
    DecodeFailure { encoding: String },
}

/// Decode a fetched body to UTF-8. Precedence: BOM, then the charset
/// parameter of the Content-Type header, then chardetng sniffing.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(header_charset) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, encoding);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn header_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim_matches(['"', '\'', ' ']).to_string())
        } else {
            None
        }
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins_over_sniffing() {
        let decoded = decode_html(b"caf\xe9", Some("text/html; charset=windows-1252"))
            .expect("decodes");
        assert_eq!(decoded.html, "caf\u{e9}");
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn bom_wins_over_header_charset() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice("caf\u{e9}".as_bytes());
        let decoded =
            decode_html(&bytes, Some("text/html; charset=windows-1252")).expect("decodes");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn plain_ascii_decodes_without_any_hint() {
        let decoded = decode_html(b"<html>ok</html>", None).expect("decodes");
        assert_eq!(decoded.html, "<html>ok</html>");
    }

    #[test]
    fn quoted_charset_parameter_is_accepted() {
        assert_eq!(
            header_charset("text/html; charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
    }
}
