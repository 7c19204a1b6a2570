use std::sync::LazyLock;

use regex::Regex;

/// メールアドレスの構文（local@domain.tld）
///
/// 構文チェックのみ。DNS/MXの確認は行わない。
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern must compile")
});

/// 純粋関数：ISBNを正規化する（ハイフンと空白を除去）
pub fn canonicalize_isbn(raw: &str) -> String {
    raw.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

/// 純粋関数：ISBNの構文を検証する
///
/// 正規化後に次のいずれかを満たせば有効：
/// - 10桁または13桁の数字
/// - 10文字で、先頭9文字が数字、末尾が数字または"X"（大文字小文字を問わない）
///
/// チェックディジットの検算は行わない。
pub fn validate_isbn(raw: &str) -> bool {
    let cleaned = canonicalize_isbn(raw);
    let bytes = cleaned.as_bytes();

    let all_digits = !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit);
    if all_digits && (bytes.len() == 10 || bytes.len() == 13) {
        return true;
    }

    match bytes.split_last() {
        Some((last, body)) if bytes.len() == 10 => {
            body.iter().all(u8::is_ascii_digit) && last.eq_ignore_ascii_case(&b'x')
        }
        _ => false,
    }
}

/// 純粋関数：メールアドレスの構文を検証する
pub fn validate_email(raw: &str) -> bool {
    EMAIL_PATTERN.is_match(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    // validate_isbn のテスト
    #[test]
    fn test_validate_isbn_accepts_isbn13() {
        assert!(validate_isbn("9780140449143"));
        assert!(validate_isbn("978-0-14-044914-3"));
    }

    #[test]
    fn test_validate_isbn_accepts_isbn10() {
        assert!(validate_isbn("0306406152"));
        assert!(validate_isbn("0 306 40615 2"));
    }

    #[test]
    fn test_validate_isbn_accepts_check_letter_x() {
        assert!(validate_isbn("080442957X"));
        assert!(validate_isbn("0-8044-2957-x"));
    }

    #[test]
    fn test_validate_isbn_rejects_x_outside_last_position() {
        assert!(!validate_isbn("08044295X7"));
        // ISBN-13にはチェック文字Xは存在しない
        assert!(!validate_isbn("978014044914X"));
    }

    #[test]
    fn test_validate_isbn_rejects_wrong_length() {
        assert!(!validate_isbn(""));
        assert!(!validate_isbn("123456789"));
        assert!(!validate_isbn("12345678901"));
        assert!(!validate_isbn("12345678901234"));
    }

    #[test]
    fn test_validate_isbn_rejects_non_digits() {
        assert!(!validate_isbn("97801404491a3"));
        assert!(!validate_isbn("abcdefghij"));
        // 全角数字は数字として扱わない
        assert!(!validate_isbn("０３０６４０６１５２"));
    }

    #[test]
    fn test_validate_isbn_does_not_verify_checksum() {
        // チェックディジットが誤っていても構文上は有効
        assert!(validate_isbn("1234567890"));
    }

    #[test]
    fn test_validate_isbn_is_formatting_insensitive() {
        let inputs = [
            "978-0-14-044914-3",
            "0-306-40615-2",
            "080-442-957-X",
            "12-34",
            "978 0 14 04491 4",
        ];
        for raw in inputs {
            assert_eq!(
                validate_isbn(raw),
                validate_isbn(&canonicalize_isbn(raw)),
                "mismatch for {raw}"
            );
        }
    }

    // validate_email のテスト
    #[test]
    fn test_validate_email_accepts_common_addresses() {
        assert!(validate_email("ana@x.com"));
        assert!(validate_email("john.doe+lib@example.co.uk"));
        assert!(validate_email("a_b%c-d@sub.domain.org"));
    }

    #[test]
    fn test_validate_email_rejects_malformed_addresses() {
        assert!(!validate_email(""));
        assert!(!validate_email("ana"));
        assert!(!validate_email("ana@x"));
        assert!(!validate_email("ana@x.c"));
        assert!(!validate_email("@x.com"));
        assert!(!validate_email("ana@@x.com"));
        assert!(!validate_email("ana x@x.com"));
    }
}
