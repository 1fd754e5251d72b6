use crate::save::{Result, SaveError, TextEncoding};

/// Longest 7-bit length prefix accepted for a `u32` byte count.
const MAX_LEN_BYTES: usize = 5;

/// Simple bounded cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(SaveError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a 7-bit variable-length unsigned integer (low groups first).
	pub fn read_7bit_len(&mut self) -> Result<usize> {
		let at = self.pos;
		let mut value: u32 = 0;
		for index in 0..MAX_LEN_BYTES {
			let byte = self.read_u8()?;
			let bits = u32::from(byte & 0x7f);
			if index == MAX_LEN_BYTES - 1 && bits > 0x0f {
				break;
			}
			value |= bits << (7 * index);
			if byte & 0x80 == 0 {
				return Ok(value as usize);
			}
		}
		Err(SaveError::MalformedBinary {
			at,
			reason: "length prefix overflows u32".to_owned(),
		})
	}

	/// Read one length-prefixed string token.
	pub fn read_token(&mut self, encoding: TextEncoding) -> Result<String> {
		let len = self.read_7bit_len()?;
		let start = self.pos;
		let raw = self.read_exact(len)?;
		encoding.decode(raw).map_err(|err| match err {
			SaveError::InvalidText { encoding, at } => SaveError::InvalidText { encoding, at: start + at },
			other => other,
		})
	}
}

/// Append-only writer of length-prefixed string tokens.
pub struct TokenWriter {
	buf: Vec<u8>,
	encoding: TextEncoding,
}

impl TokenWriter {
	/// Empty writer encoding tokens with `encoding`.
	pub fn new(encoding: TextEncoding) -> Self {
		Self { buf: Vec::new(), encoding }
	}

	/// Write a 7-bit variable-length unsigned integer.
	pub fn write_7bit_len(&mut self, len: usize) {
		let mut value = len as u32;
		while value >= 0x80 {
			self.buf.push((value as u8) | 0x80);
			value >>= 7;
		}
		self.buf.push(value as u8);
	}

	/// Write one token: byte length in the configured encoding, then the bytes.
	pub fn write_token(&mut self, token: &str) {
		let bytes = self.encoding.encode(token);
		self.write_7bit_len(bytes.len());
		self.buf.extend_from_slice(&bytes);
	}

	/// Finish and return the written bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.buf
	}
}

#[cfg(test)]
mod tests {
	use super::{Cursor, TokenWriter};
	use crate::save::{SaveError, TextEncoding};

	#[test]
	fn length_prefix_uses_seven_bit_groups() {
		let mut writer = TokenWriter::new(TextEncoding::Utf8);
		writer.write_7bit_len(0x7f);
		writer.write_7bit_len(0x80);
		writer.write_7bit_len(300);
		let bytes = writer.into_bytes();
		assert_eq!(bytes, vec![0x7f, 0x80, 0x01, 0xac, 0x02]);

		let mut cursor = Cursor::new(&bytes);
		assert_eq!(cursor.read_7bit_len().expect("len"), 0x7f);
		assert_eq!(cursor.read_7bit_len().expect("len"), 0x80);
		assert_eq!(cursor.read_7bit_len().expect("len"), 300);
		assert_eq!(cursor.remaining(), 0);
	}

	#[test]
	fn tokens_round_trip_in_each_encoding() {
		for encoding in [TextEncoding::Utf8, TextEncoding::Utf16Le, TextEncoding::Utf16Be] {
			let mut writer = TokenWriter::new(encoding);
			writer.write_token("[end object]");
			writer.write_token("");
			writer.write_token("größe");
			let bytes = writer.into_bytes();

			let mut cursor = Cursor::new(&bytes);
			assert_eq!(cursor.read_token(encoding).expect("token"), "[end object]");
			assert_eq!(cursor.read_token(encoding).expect("token"), "");
			assert_eq!(cursor.read_token(encoding).expect("token"), "größe");
		}
	}

	#[test]
	fn truncated_token_reports_eof() {
		let bytes = [0x05, b'a', b'b'];
		let err = Cursor::new(&bytes).read_token(TextEncoding::Utf8).expect_err("short token");
		assert!(matches!(err, SaveError::UnexpectedEof { at: 1, need: 5, rem: 2 }));
	}

	#[test]
	fn overlong_length_prefix_is_rejected() {
		let bytes = [0xff, 0xff, 0xff, 0xff, 0x7f];
		let err = Cursor::new(&bytes).read_7bit_len().expect_err("overflow");
		assert!(matches!(err, SaveError::MalformedBinary { at: 0, .. }));
	}
}
