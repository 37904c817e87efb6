/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Normalize a user-entered display name: trim, collapse internal
/// whitespace, title-case each word.
///
/// Applied on save, not per keystroke, so intermediate typing is
/// never rewritten under the user. Idempotent.
///
/// # Examples
///
/// ```
/// use shared::util::normalize_display_name;
///
/// assert_eq!(normalize_display_name("  hex   BOLTS "), "Hex Bolts");
/// assert_eq!(normalize_display_name("m8"), "M8");
/// ```
pub fn normalize_display_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses() {
        assert_eq!(normalize_display_name("  spare   parts  "), "Spare Parts");
        assert_eq!(normalize_display_name("\tbolts\n"), "Bolts");
        assert_eq!(normalize_display_name(""), "");
        assert_eq!(normalize_display_name("   "), "");
    }

    #[test]
    fn test_normalize_title_cases_words() {
        assert_eq!(normalize_display_name("hex bolts"), "Hex Bolts");
        assert_eq!(normalize_display_name("HEX BOLTS"), "Hex Bolts");
        assert_eq!(normalize_display_name("hEx BoLtS"), "Hex Bolts");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for s in ["  hex   BOLTS ", "Pumps", "a b c", "ölfilter GROß"] {
            let once = normalize_display_name(s);
            assert_eq!(normalize_display_name(&once), once, "not idempotent for {:?}", s);
        }
    }
}
