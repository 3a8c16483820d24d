//! Binary-coded decimal codec
//!
//! RTC time registers store each decimal digit in its own nibble: the tens
//! digit in bits 4-7 and the units digit in bits 0-3. So 59 is stored as
//! `0x59`.

/// Largest value representable in one packed BCD byte
pub const BCD_MAX: u8 = 99;

/// BCD conversion errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BcdError {
    /// Value above 99 cannot be encoded in two digits
    InvalidArgument(u8),
    /// Byte has a nibble above 9
    Malformed(u8),
}

/// Encode a decimal value (0-99) as packed BCD
///
/// ```
/// use segclock_core::bcd::decimal_to_bcd;
/// assert_eq!(decimal_to_bcd(59), Ok(0x59));
/// ```
pub const fn decimal_to_bcd(value: u8) -> Result<u8, BcdError> {
    if value > BCD_MAX {
        return Err(BcdError::InvalidArgument(value));
    }
    Ok((value / 10) * 16 + (value % 10))
}

/// Decode a packed BCD byte into its decimal value (0-99)
///
/// Bytes with either nibble above 9 are rejected rather than folded into
/// a value that looks plausible.
pub const fn bcd_to_decimal(byte: u8) -> Result<u8, BcdError> {
    if !is_valid_bcd(byte) {
        return Err(BcdError::Malformed(byte));
    }
    Ok(bcd_to_decimal_unchecked(byte))
}

/// Decode without nibble validation
///
/// Only meant for logging what a corrupted register would have read as.
/// Can return values up to 165.
pub const fn bcd_to_decimal_unchecked(byte: u8) -> u8 {
    (byte / 16) * 10 + (byte % 16)
}

/// Check that both nibbles hold a decimal digit
pub const fn is_valid_bcd(byte: u8) -> bool {
    (byte >> 4) <= 9 && (byte & 0x0F) <= 9
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_boundaries() {
        assert_eq!(decimal_to_bcd(0), Ok(0x00));
        assert_eq!(decimal_to_bcd(9), Ok(0x09));
        assert_eq!(decimal_to_bcd(10), Ok(0x10));
        assert_eq!(decimal_to_bcd(23), Ok(0x23));
        assert_eq!(decimal_to_bcd(59), Ok(0x59));
        assert_eq!(decimal_to_bcd(99), Ok(0x99));
    }

    #[test]
    fn test_encode_rejects_three_digits() {
        assert_eq!(decimal_to_bcd(100), Err(BcdError::InvalidArgument(100)));
        assert_eq!(decimal_to_bcd(255), Err(BcdError::InvalidArgument(255)));
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(bcd_to_decimal(0x00), Ok(0));
        assert_eq!(bcd_to_decimal(0x30), Ok(30));
        assert_eq!(bcd_to_decimal(0x42), Ok(42));
        assert_eq!(bcd_to_decimal(0x99), Ok(99));
    }

    #[test]
    fn test_decode_flags_malformed_nibbles() {
        // 0x6A would naively decode as 70
        assert_eq!(bcd_to_decimal_unchecked(0x6A), 70);
        assert_eq!(bcd_to_decimal(0x6A), Err(BcdError::Malformed(0x6A)));

        // Invalid tens nibble
        assert_eq!(bcd_to_decimal(0xA0), Err(BcdError::Malformed(0xA0)));
        assert_eq!(bcd_to_decimal(0xFF), Err(BcdError::Malformed(0xFF)));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(v in 0u8..=99) {
            let encoded = decimal_to_bcd(v).unwrap();
            prop_assert_eq!(bcd_to_decimal(encoded), Ok(v));
        }

        #[test]
        fn prop_decode_never_exceeds_two_digits(byte in any::<u8>()) {
            match bcd_to_decimal(byte) {
                Ok(v) => prop_assert!(v <= BCD_MAX),
                Err(e) => prop_assert_eq!(e, BcdError::Malformed(byte)),
            }
        }
    }
}
