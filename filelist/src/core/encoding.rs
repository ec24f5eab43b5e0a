//! Text encodings for manifest output.
//!
//! Labels resolve through the WHATWG label table provided by `encoding_rs`,
//! with a few extra spellings (`utf_8`, `utf-8-sig`, `utf-16-le`) that users
//! commonly pass on the command line. UTF-16 is encoded here because the
//! `encoding_rs` encoders only produce UTF-8 for the UTF-16 family. ASCII and
//! ISO-8859-1 are also encoded here: WHATWG maps both labels to windows-1252,
//! which would write bytes a strict decoder reads back differently.

use anyhow::{Result, anyhow};
use encoding_rs::Encoding;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Utf8,
    Utf16Le,
    Utf16Be,
    Ascii,
    Latin1,
    Legacy(&'static Encoding),
}

/// Resolved output encoding for a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputEncoding {
    scheme: Scheme,
    bom: bool,
}

impl Default for OutputEncoding {
    fn default() -> Self {
        Self {
            scheme: Scheme::Utf8,
            bom: false,
        }
    }
}

impl OutputEncoding {
    /// Resolve an encoding label such as `utf-8`, `latin1` or `shift_jis`.
    pub fn for_label(label: &str) -> Result<Self> {
        let normalized = normalize_label(label);
        let resolved = match normalized.as_str() {
            "utf-8-sig" | "utf8-sig" => Self {
                scheme: Scheme::Utf8,
                bom: true,
            },
            "utf-16" | "utf16" => Self {
                scheme: Scheme::Utf16Le,
                bom: true,
            },
            "utf-16-le" | "utf-16le" | "utf16le" => Self::plain(Scheme::Utf16Le),
            "utf-16-be" | "utf-16be" | "utf16be" => Self::plain(Scheme::Utf16Be),
            "ascii" | "us-ascii" | "ansi-x3.4-1968" => Self::plain(Scheme::Ascii),
            "latin1" | "latin-1" | "l1" | "iso-8859-1" | "iso8859-1" | "iso88591"
            | "iso-8859-1:1987" | "iso-ir-100" | "csisolatin1" | "cp819" | "ibm819" => {
                Self::plain(Scheme::Latin1)
            }
            other => {
                let encoding = Encoding::for_label(label.trim().as_bytes())
                    .or_else(|| Encoding::for_label(other.as_bytes()))
                    .filter(|encoding| *encoding != encoding_rs::REPLACEMENT)
                    .ok_or_else(|| anyhow!("unsupported encoding: {}", label.trim()))?;
                Self::plain(scheme_for(encoding))
            }
        };
        Ok(resolved)
    }

    fn plain(scheme: Scheme) -> Self {
        Self { scheme, bom: false }
    }

    /// Canonical name of the encoding (e.g. `UTF-8`, `windows-1252`).
    pub fn name(&self) -> &'static str {
        match self.scheme {
            Scheme::Utf8 => encoding_rs::UTF_8.name(),
            Scheme::Utf16Le => encoding_rs::UTF_16LE.name(),
            Scheme::Utf16Be => encoding_rs::UTF_16BE.name(),
            Scheme::Ascii => "US-ASCII",
            Scheme::Latin1 => "ISO-8859-1",
            Scheme::Legacy(encoding) => encoding.name(),
        }
    }

    /// Byte order mark written once at the start of the manifest, if any.
    pub fn bom(&self) -> &'static [u8] {
        match (self.bom, self.scheme) {
            (true, Scheme::Utf8) => UTF8_BOM,
            (true, Scheme::Utf16Le) => UTF16LE_BOM,
            _ => &[],
        }
    }

    /// Encode `text`, failing on characters the encoding cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self.scheme {
            Scheme::Utf8 => Ok(text.as_bytes().to_vec()),
            Scheme::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Scheme::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Scheme::Ascii => encode_single_byte(text, 0x7F, self.name()),
            Scheme::Latin1 => encode_single_byte(text, 0xFF, self.name()),
            Scheme::Legacy(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(text);
                if had_errors {
                    return Err(anyhow!(
                        "cannot encode {:?} as {}",
                        text.trim_end(),
                        encoding.name()
                    ));
                }
                Ok(bytes.into_owned())
            }
        }
    }
}

/// One byte per code point, for charsets that are a prefix of Unicode.
fn encode_single_byte(text: &str, max: u32, name: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code = u32::from(ch);
        if code > max {
            return Err(anyhow!("cannot encode {:?} as {}", text.trim_end(), name));
        }
        bytes.push(code as u8);
    }
    Ok(bytes)
}

fn scheme_for(encoding: &'static Encoding) -> Scheme {
    if encoding == encoding_rs::UTF_8 {
        Scheme::Utf8
    } else if encoding == encoding_rs::UTF_16LE {
        Scheme::Utf16Le
    } else if encoding == encoding_rs::UTF_16BE {
        Scheme::Utf16Be
    } else {
        Scheme::Legacy(encoding)
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_ascii_lowercase().replace('_', "-")
}
