use std::fmt;
use std::str::FromStr;

/// Largest number of fractional digits a [`Decimal`] keeps.
pub const MAX_SCALE: u32 = 28;

/// Base-10 fixed-point number: `mantissa * 10^-scale`.
///
/// Text form keeps trailing zeros, so `"1.50"` survives a round trip with scale 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Decimal {
	mantissa: i128,
	scale: u32,
}

/// Error returned when decimal text is malformed or out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid decimal literal")]
pub struct ParseDecimalError;

impl Decimal {
	/// Build from raw parts; `None` when `scale` exceeds [`MAX_SCALE`].
	pub fn new(mantissa: i128, scale: u32) -> Option<Self> {
		(scale <= MAX_SCALE).then_some(Self { mantissa, scale })
	}

	/// Unscaled integer value.
	pub fn mantissa(&self) -> i128 {
		self.mantissa
	}

	/// Number of fractional digits.
	pub fn scale(&self) -> u32 {
		self.scale
	}

	/// Drop trailing fractional zeros.
	pub fn normalize(self) -> Self {
		let mut out = self;
		while out.scale > 0 && out.mantissa % 10 == 0 {
			out.mantissa /= 10;
			out.scale -= 1;
		}
		out
	}
}

impl From<i64> for Decimal {
	fn from(value: i64) -> Self {
		Self {
			mantissa: i128::from(value),
			scale: 0,
		}
	}
}

impl fmt::Display for Decimal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let digits = self.mantissa.unsigned_abs().to_string();
		let sign = if self.mantissa < 0 { "-" } else { "" };
		let scale = self.scale as usize;
		if scale == 0 {
			return write!(f, "{sign}{digits}");
		}
		let padded = format!("{digits:0>width$}", width = scale + 1);
		let (int_part, frac_part) = padded.split_at(padded.len() - scale);
		write!(f, "{sign}{int_part}.{frac_part}")
	}
}

impl FromStr for Decimal {
	type Err = ParseDecimalError;

	fn from_str(text: &str) -> Result<Self, Self::Err> {
		let (negative, body) = match text.as_bytes().first() {
			Some(b'-') => (true, &text[1..]),
			Some(b'+') => (false, &text[1..]),
			_ => (false, text),
		};
		let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
		if int_part.is_empty() && frac_part.is_empty() {
			return Err(ParseDecimalError);
		}
		if frac_part.len() > MAX_SCALE as usize {
			return Err(ParseDecimalError);
		}

		let mut mantissa: i128 = 0;
		for byte in int_part.bytes().chain(frac_part.bytes()) {
			if !byte.is_ascii_digit() {
				return Err(ParseDecimalError);
			}
			let digit = i128::from(byte - b'0');
			// Negative values accumulate downwards so i128::MIN parses.
			mantissa = mantissa
				.checked_mul(10)
				.and_then(|value| if negative { value.checked_sub(digit) } else { value.checked_add(digit) })
				.ok_or(ParseDecimalError)?;
		}

		Ok(Self {
			mantissa,
			scale: frac_part.len() as u32,
		})
	}
}
