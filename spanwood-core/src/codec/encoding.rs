//! Decoding raw file bytes into document text.
//!
//! Files starting with a UTF-16 byte order mark are decoded as UTF-16 in
//! the marked byte order. Everything else must be UTF-8.

const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Text encoding detected from the leading bytes of a file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TextEncoding {
    Utf8,
    Utf16Be,
    Utf16Le,
}

impl TextEncoding {
    /// Human readable name used in error messages.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
        }
    }

    fn detect(bytes: &[u8]) -> (Self, &[u8]) {
        match bytes {
            [a, b, rest @ ..] if [*a, *b] == UTF16_BE_BOM => (Self::Utf16Be, rest),
            [a, b, rest @ ..] if [*a, *b] == UTF16_LE_BOM => (Self::Utf16Le, rest),
            _ => (Self::Utf8, bytes),
        }
    }
}

/// Decodes `bytes` into a string.
///
/// A UTF-8 byte order mark is kept in the output; the parser skips it.
///
/// # Errors
/// Returns the detected [`TextEncoding`] when the payload is not valid in
/// that encoding, including UTF-16 payloads with an odd byte count.
pub(crate) fn decode_document(bytes: &[u8]) -> Result<String, TextEncoding> {
    let (encoding, payload) = TextEncoding::detect(bytes);
    let decoded = match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(payload).ok().map(str::to_owned),
        TextEncoding::Utf16Be => decode_utf16(payload, u16::from_be_bytes),
        TextEncoding::Utf16Le => decode_utf16(payload, u16::from_le_bytes),
    };
    decoded.ok_or(encoding)
}

fn decode_utf16(payload: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    let (pairs, remainder) = payload.as_chunks::<2>();
    if !remainder.is_empty() {
        return None;
    }
    let units: Vec<u16> = pairs.iter().copied().map(unit).collect();
    String::from_utf16(&units).ok()
}
