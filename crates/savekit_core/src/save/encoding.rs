use serde::{Deserialize, Serialize};

use crate::save::{Result, SaveError};

/// Character encoding for binary tokens and text documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
	/// UTF-8.
	#[default]
	#[serde(rename = "utf-8")]
	Utf8,
	/// UTF-16, little-endian code units.
	#[serde(rename = "utf-16le")]
	Utf16Le,
	/// UTF-16, big-endian code units.
	#[serde(rename = "utf-16be")]
	Utf16Be,
}

const BOM: char = '\u{feff}';

impl TextEncoding {
	/// IANA-style label, also written into XML declarations.
	pub fn label(self) -> &'static str {
		match self {
			Self::Utf8 => "utf-8",
			Self::Utf16Le => "utf-16le",
			Self::Utf16Be => "utf-16be",
		}
	}

	/// Encode text without a byte-order mark.
	pub fn encode(self, text: &str) -> Vec<u8> {
		match self {
			Self::Utf8 => text.as_bytes().to_vec(),
			Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
			Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
		}
	}

	/// Decode bytes exactly; errors carry the offset of the first bad sequence.
	pub fn decode(self, bytes: &[u8]) -> Result<String> {
		match self {
			Self::Utf8 => std::str::from_utf8(bytes).map(str::to_owned).map_err(|err| SaveError::InvalidText {
				encoding: self.label(),
				at: err.valid_up_to(),
			}),
			Self::Utf16Le => self.decode_utf16(bytes, u16::from_le_bytes),
			Self::Utf16Be => self.decode_utf16(bytes, u16::from_be_bytes),
		}
	}

	/// Re-encode a UTF-8 document produced by a text writer.
	pub fn encode_document(self, utf8: Vec<u8>) -> Result<Vec<u8>> {
		if self == Self::Utf8 {
			return Ok(utf8);
		}
		let text = String::from_utf8(utf8).map_err(|err| SaveError::InvalidText {
			encoding: Self::Utf8.label(),
			at: err.utf8_error().valid_up_to(),
		})?;
		Ok(self.encode(&text))
	}

	/// Decode a whole document, dropping one leading byte-order mark.
	pub fn decode_document(self, bytes: &[u8]) -> Result<String> {
		let mut text = self.decode(bytes)?;
		if text.starts_with(BOM) {
			text.drain(..BOM.len_utf8());
		}
		Ok(text)
	}

	fn decode_utf16(self, bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
		if bytes.len() % 2 != 0 {
			return Err(SaveError::InvalidText {
				encoding: self.label(),
				at: bytes.len() - 1,
			});
		}

		let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
		let mut out = String::with_capacity(bytes.len() / 2);
		let mut at = 0;
		for decoded in char::decode_utf16(units) {
			match decoded {
				Ok(ch) => {
					out.push(ch);
					at += ch.len_utf16() * 2;
				}
				Err(_) => {
					return Err(SaveError::InvalidText {
						encoding: self.label(),
						at,
					});
				}
			}
		}
		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use super::TextEncoding;

	#[test]
	fn utf16_round_trips_non_ascii() {
		let text = "héllo \u{1f600}";
		for encoding in [TextEncoding::Utf8, TextEncoding::Utf16Le, TextEncoding::Utf16Be] {
			let bytes = encoding.encode(text);
			assert_eq!(encoding.decode(&bytes).expect("decodes"), text, "{}", encoding.label());
		}
		assert_eq!(TextEncoding::Utf16Le.encode("A"), vec![0x41, 0x00]);
		assert_eq!(TextEncoding::Utf16Be.encode("A"), vec![0x00, 0x41]);
	}

	#[test]
	fn invalid_sequences_report_offset() {
		let err = TextEncoding::Utf8.decode(b"ok\xff").expect_err("invalid utf-8");
		assert!(matches!(err, crate::save::SaveError::InvalidText { at: 2, .. }));

		let err = TextEncoding::Utf16Le.decode(&[0x41, 0x00, 0x00]).expect_err("odd length");
		assert!(matches!(err, crate::save::SaveError::InvalidText { at: 2, .. }));

		let lone_surrogate = [0x41, 0x00, 0x00, 0xd8];
		let err = TextEncoding::Utf16Le.decode(&lone_surrogate).expect_err("lone surrogate");
		assert!(matches!(err, crate::save::SaveError::InvalidText { at: 2, .. }));
	}

	#[test]
	fn document_decode_strips_bom() {
		let mut bytes = TextEncoding::Utf16Le.encode("\u{feff}<root/>");
		assert_eq!(TextEncoding::Utf16Le.decode_document(&bytes).expect("decodes"), "<root/>");
		bytes.truncate(0);
		assert_eq!(TextEncoding::Utf8.decode_document(&bytes).expect("empty decodes"), "");
	}
}
