// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Lowercase hex, prefixed with `0x`.
pub fn encode(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(2 + bytes.len() * 2);
	out.push_str("0x");
	for b in bytes {
		out.push(DIGITS[(b >> 4) as usize] as char);
		out.push(DIGITS[(b & 0x0f) as usize] as char);
	}
	out
}

/// Inverse of [`encode`]. The `0x` prefix is optional.
pub fn decode(text: &str) -> Option<Vec<u8>> {
	let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
	if digits.len() % 2 != 0 {
		return None;
	}

	let nibble = |c: u8| -> Option<u8> {
		match c {
			b'0'..=b'9' => Some(c - b'0'),
			b'a'..=b'f' => Some(c - b'a' + 10),
			b'A'..=b'F' => Some(c - b'A' + 10),
			_ => None,
		}
	};

	digits.as_bytes().chunks(2).map(|pair| Some(nibble(pair[0])? << 4 | nibble(pair[1])?)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_encode() {
		assert_eq!(encode(&[]), "0x");
		assert_eq!(encode(&[0x00, 0xab, 0x7f]), "0x00ab7f");
	}

	#[test]
	fn test_decode() {
		assert_eq!(decode("0x00ab7f"), Some(vec![0x00, 0xab, 0x7f]));
		assert_eq!(decode("DEAD"), Some(vec![0xde, 0xad]));
		assert_eq!(decode("0xabc"), None);
		assert_eq!(decode("0xzz"), None);
	}
}
