//! Browser-compatible number parsing.
//!
//! Widget inputs follow the number rules of the page scripts they replace:
//! [`parse_int_prefix`] behaves like `parseInt(s, 10)` and [`parse_number`]
//! like `Number(s)` for non-empty input. Non-finite results are rejected.

/// Parses the leading integer of `s`, ignoring leading whitespace.
///
/// `"42"`, `" 42px"` and `"42.9"` all yield `42`; `"-7"` yields `-7`.
/// Returns `None` when no digit follows the optional sign or the value
/// overflows `i64`.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
	let s = s.trim_start();
	let (negative, rest) = match s.as_bytes().first() {
		Some(b'-') => (true, &s[1..]),
		Some(b'+') => (false, &s[1..]),
		_ => (false, s),
	};
	let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
	if digits_len == 0 {
		return None;
	}
	let magnitude: i64 = rest[..digits_len].parse().ok()?;
	Some(if negative { -magnitude } else { magnitude })
}

/// Parses the whole of `s` (trimmed) as a number.
///
/// Accepts decimal and exponent notation and the `0x`, `0o`, `0b` integer
/// prefixes. Empty input, trailing garbage and non-finite values yield `None`.
pub fn parse_number(s: &str) -> Option<f64> {
	let s = s.trim();
	if s.is_empty() {
		return None;
	}

	let radix_prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
		.iter()
		.find_map(|(prefix, radix)| s.strip_prefix(prefix).map(|digits| (digits, *radix)));
	if let Some((digits, radix)) = radix_prefixed {
		return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
	}

	// Rust accepts "inf" and "nan" spellings that browsers do not.
	if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
		return None;
	}

	s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Converts a parsed number into JSON, keeping integral values integral.
///
/// `10.0` serializes as `10`, matching how the browser serializes numbers.
pub fn number_to_json(n: f64) -> serde_json::Value {
	const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

	if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
		serde_json::Value::from(n as i64)
	} else {
		serde_json::Number::from_f64(n)
			.map(serde_json::Value::Number)
			.unwrap_or(serde_json::Value::Null)
	}
}
