use crate::error::{Error, Result};

fn is_unreserved(byte: u8) -> bool {
    matches!(byte, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~')
}

/// Form-style escaping: spaces become `+`, everything outside the
/// unreserved set is percent-encoded.
pub(crate) fn query_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b' ' => out.push('+'),
            b if is_unreserved(b) => out.push(b as char),
            b => push_percent(&mut out, b),
        }
    }
    out
}

/// Reverses [`query_escape`]. Fails on truncated or non-hex escapes and on
/// results that are not UTF-8.
pub(crate) fn query_unescape(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_value);
                let lo = bytes.get(i + 2).copied().and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.push(hi << 4 | lo),
                    _ => {
                        return Err(Error::unexpected_response(format!(
                            "invalid escape in {input:?}"
                        )));
                    }
                }
                i += 2;
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8(out)
        .map_err(|_| Error::unexpected_response(format!("escaped value {input:?} is not UTF-8")))
}

/// Builds the `x-amz-copy-source` value for a same-account copy.
pub(crate) fn copy_source(bucket: &str, key: &str) -> String {
    let mut out = String::with_capacity(bucket.len() + key.len() + 1);
    out.push_str(bucket);
    out.push('/');
    for &b in key.as_bytes() {
        if is_unreserved(b) || b == b'/' {
            out.push(b as char);
        } else {
            push_percent(&mut out, b);
        }
    }
    out
}

fn push_percent(out: &mut String, b: u8) {
    out.push('%');
    out.push(hex_upper(b >> 4));
    out.push(hex_upper(b & 0x0F));
}

fn hex_upper(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        10..=15 => (b'A' + (nibble - 10)) as char,
        _ => '0',
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_escape_uses_plus_for_space() {
        assert_eq!(query_escape("a b"), "a+b");
        assert_eq!(query_escape("a+b"), "a%2Bb");
        assert_eq!(query_escape("x/y?z=1&w"), "x%2Fy%3Fz%3D1%26w");
        assert_eq!(query_escape("-_.~"), "-_.~");
    }

    #[test]
    fn query_unescape_reverses_escape() {
        for s in ["Backup before migration", "Backup: v1.0.0 (final)", "备份", ""] {
            assert_eq!(query_unescape(&query_escape(s)).unwrap(), s);
        }
        assert_eq!(query_unescape("a%2bb").unwrap(), "a+b");
    }

    #[test]
    fn query_unescape_rejects_bad_escapes() {
        assert!(query_unescape("%").is_err());
        assert!(query_unescape("%4").is_err());
        assert!(query_unescape("%zz").is_err());
        assert!(query_unescape("%FF").is_err());
    }

    #[test]
    fn copy_source_keeps_slashes_in_key() {
        assert_eq!(copy_source("b", "dir/a b.txt"), "b/dir/a%20b.txt");
        assert_eq!(copy_source("b", "100%"), "b/100%25");
    }
}
