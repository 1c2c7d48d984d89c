//! CPF (Brazilian taxpayer registry number) validation.
//!
//! A CPF is an 11-digit identifier whose last two digits are checksums
//! over the preceding ones (modulo-11, descending weights). The functions
//! here are pure: no shared state, no lookup tables, punctuation in the
//! input is ignored.

/// Strips everything but ASCII digits from the input.
///
/// `"111.444.777-35"` → `"11144477735"`. This is the same normalization
/// the verify flow applies to form-field values before the length check.
pub fn normalize(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a CPF.
///
/// Accepts any punctuation/spacing in the input. Rejects inputs whose
/// digit count is not exactly 11, the well-known all-same-digit
/// sequences (`00000000000` … `99999999999`), and anything whose two
/// check digits do not match the modulo-11 algorithm.
pub fn is_valid(input: &str) -> bool {
    let digits = normalize(input);
    if digits.len() != 11 {
        return false;
    }

    // `to_digit` cannot fail here; `normalize` kept only ASCII digits.
    let d: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

    // All-same-digit sequences pass the checksum but are not valid CPFs.
    if d.iter().all(|&x| x == d[0]) {
        return false;
    }

    check_digit(&d[..9], 10) == d[9] && check_digit(&d[..10], 11) == d[10]
}

/// Computes one modulo-11 check digit.
///
/// Digits are weighted `first_weight` down to 2, summed, and the digit is
/// `11 - (sum % 11)`, with 10 and 11 collapsing to 0.
fn check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=first_weight).rev())
        .map(|(d, w)| d * w)
        .sum();
    let rev = 11 - (sum % 11);
    if rev >= 10 {
        0
    } else {
        rev
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("111.444.777-35"), "11144477735");
        assert_eq!(normalize("  111 444 777 35  "), "11144477735");
        assert_eq!(normalize("abc"), "");
    }

    #[test]
    fn test_accepts_known_valid_cpf() {
        assert!(is_valid("11144477735"));
    }

    #[test]
    fn test_accepts_punctuated_valid_cpf() {
        assert!(is_valid("111.444.777-35"));
    }

    #[test]
    fn test_rejects_wrong_check_digits() {
        // Same base digits, last checksum off by one.
        assert!(!is_valid("11144477736"));
        assert!(!is_valid("11144477745"));
    }

    #[test]
    fn test_rejects_all_same_digit_sequences() {
        for digit in 0..=9 {
            let cpf: String = std::iter::repeat(char::from(b'0' + digit)).take(11).collect();
            assert!(!is_valid(&cpf), "{cpf} must be rejected");
        }
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(!is_valid(""));
        assert!(!is_valid("1114447773"));
        assert!(!is_valid("111444777355"));
        assert!(!is_valid("not a cpf"));
    }

    #[test]
    fn test_second_check_digit_is_verified_independently() {
        // First check digit correct (3), second corrupted.
        assert!(!is_valid("11144477734"));
    }
}
