use crate::error::StatusParseError;

use super::four_cc::FourCC;
use super::OSStatus;

/// Parse a status as typed by a person: `-10830`, `0x6E6F4572` or `'noEr'`.
pub fn parse_status(input: &str) -> Result<OSStatus, StatusParseError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(StatusParseError::Empty);
    }

    if let Some(inner) = text.strip_prefix('\'') {
        let inner = inner
            .strip_suffix('\'')
            .ok_or_else(|| StatusParseError::MalformedFourCharCode {
                input: input.to_string(),
            })?;
        let bytes: [u8; 4] = inner.as_bytes().try_into().map_err(|_| {
            StatusParseError::MalformedFourCharCode {
                input: input.to_string(),
            }
        })?;
        return FourCC::new(bytes)
            .map(FourCC::to_status)
            .ok_or_else(|| StatusParseError::MalformedFourCharCode {
                input: input.to_string(),
            });
    }

    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        // Hex is read as the raw 32-bit pattern, so 0xFFFFD5B2 is -10830.
        return u32::from_str_radix(hex, 16)
            .map(|value| value as OSStatus)
            .map_err(|_| StatusParseError::MalformedNumber {
                input: input.to_string(),
            });
    }

    text.parse::<OSStatus>()
        .map_err(|_| StatusParseError::MalformedNumber {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::fourcc_status;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_status("-10830"), Ok(-10830));
        assert_eq!(parse_status(" 123456789 "), Ok(123_456_789));
        assert_eq!(parse_status("0"), Ok(0));
    }

    #[test]
    fn test_parse_hex_bit_pattern() {
        assert_eq!(parse_status("0xFFFFD5B2"), Ok(-10830));
        assert_eq!(parse_status("0X6e6f4572"), Ok(fourcc_status(b"noEr")));
    }

    #[test]
    fn test_parse_four_char_code() {
        assert_eq!(parse_status("'noEr'"), Ok(fourcc_status(b"noEr")));
        assert_eq!(parse_status("'ab c'"), Ok(fourcc_status(b"ab c")));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_status("  "), Err(StatusParseError::Empty));
        assert!(matches!(
            parse_status("'abc'"),
            Err(StatusParseError::MalformedFourCharCode { .. })
        ));
        assert!(matches!(
            parse_status("'abcd"),
            Err(StatusParseError::MalformedFourCharCode { .. })
        ));
        assert!(matches!(
            parse_status("'ab\u{e9}'"),
            Err(StatusParseError::MalformedFourCharCode { .. })
        ));
        assert!(matches!(
            parse_status("99999999999"),
            Err(StatusParseError::MalformedNumber { .. })
        ));
        assert!(matches!(
            parse_status("0xZZ"),
            Err(StatusParseError::MalformedNumber { .. })
        ));
    }
}
