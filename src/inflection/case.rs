//! Identifier case conversion.
//!
//! All four converters work on ASCII character classes. Anything outside
//! `[A-Za-z0-9_:-]` is copied through untouched, so non-ASCII keys survive
//! a conversion byte-for-byte.
//!
//! Word boundaries are found by scanning, not by regex. A delimiter goes in
//! front of an uppercase letter when either:
//!
//! - it closes an acronym: the previous char is uppercase and the next one is
//!   lowercase (`HTTPServer` → `HTTP_Server`), or
//! - it starts a camel hump: the previous char is a lowercase letter or a
//!   digit (`fooBar` → `foo_Bar`, `v2Api` → `v2_Api`).
//!
//! ```rust
//! use keycase::inflection::case;
//!
//! assert_eq!(case::to_snake_case("HTTPServerName"), "http_server_name");
//! assert_eq!(case::to_camel_case("post_author_name"), "postAuthorName");
//! assert_eq!(case::to_pascal_case("author_name"), "AuthorName");
//! assert_eq!(case::to_dash_case("authorName"), "author-name");
//! ```

/// `fooBar`, `foo-bar`, `FooBar` → `foo_bar`. `A::B` → `a/b`.
pub fn to_snake_case(input: &str) -> String {
    delimit(input, '_', '-')
}

/// `fooBar`, `foo_bar`, `FooBar` → `foo-bar`. `A::B` → `a/b`.
pub fn to_dash_case(input: &str) -> String {
    delimit(input, '-', '_')
}

/// `foo_bar`, `foo-bar`, `FooBar` → `fooBar`.
pub fn to_camel_case(input: &str) -> String {
    camelize(input, false)
}

/// `foo_bar`, `foo-bar`, `fooBar` → `FooBar`.
pub fn to_pascal_case(input: &str) -> String {
    camelize(input, true)
}

// ── Internals ─────────────────────────────────────────────────────────────────

/// Splits words with `delimiter`, rewrites `other` to `delimiter`, then
/// lowercases. Namespace separators (`::`) become `/` first.
fn delimit(input: &str, delimiter: char, other: char) -> String {
    let input = input.replace("::", "/");
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();

            let acronym_end =
                prev.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase());
            let camel_hump = prev.is_ascii_lowercase() || prev.is_ascii_digit();

            if acronym_end || camel_hump {
                out.push(delimiter);
            }
        }

        let c = if c == other { delimiter } else { c };
        out.push(c.to_ascii_lowercase());
    }

    out
}

/// Snake-cases the input, then folds every `_x` / `-x` pair into `X`.
///
/// A trailing delimiter, or one followed by a newline, has nothing to fold
/// into and is kept.
fn camelize(input: &str, upper_first: bool) -> String {
    let snake = to_snake_case(input);
    let mut out = String::with_capacity(snake.len());
    let mut chars = snake.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(c, '_' | '-') {
            if let Some(&next) = chars.peek().filter(|&&n| n != '\n') {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(c);
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) if upper_first => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        Some(first) => format!("{}{}", first.to_ascii_lowercase(), chars.as_str()),
        None => out,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_splits_acronyms_before_the_last_capital() {
        assert_eq!(to_snake_case("HTTPServerName"), "http_server_name");
        assert_eq!(to_snake_case("ABCdEFg"), "ab_cd_e_fg");
        assert_eq!(to_snake_case("parseXMLDocument"), "parse_xml_document");
    }

    #[test]
    fn snake_case_handles_humps_digits_and_dashes() {
        assert_eq!(to_snake_case("authorName"), "author_name");
        assert_eq!(to_snake_case("AuthorName"), "author_name");
        assert_eq!(to_snake_case("author-hobby"), "author_hobby");
        assert_eq!(to_snake_case("v2Api"), "v2_api");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn trailing_acronym_without_lowercase_stays_one_word() {
        assert_eq!(to_snake_case("userID"), "user_id");
        assert_eq!(to_snake_case("HTTP"), "http");
        assert_eq!(to_snake_case("ABCDef"), "abc_def");
    }

    #[test]
    fn namespace_separator_becomes_slash() {
        assert_eq!(to_snake_case("Admin::UserName"), "admin/user_name");
        assert_eq!(to_dash_case("Admin::UserName"), "admin/user-name");
    }

    #[test]
    fn characters_outside_the_domain_pass_through() {
        assert_eq!(to_snake_case("naïveKey"), "naïve_key");
        assert_eq!(to_snake_case("a.bC"), "a.b_c");
        assert_eq!(to_camel_case("résumé_date"), "résuméDate");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn camel_case_folds_delimiters() {
        assert_eq!(to_camel_case("post_author_name"), "postAuthorName");
        assert_eq!(to_camel_case("author-hobby"), "authorHobby");
        assert_eq!(to_camel_case("AuthorName"), "authorName");
        assert_eq!(to_camel_case("post"), "post");
    }

    #[test]
    fn camel_case_keeps_dangling_delimiters() {
        assert_eq!(to_camel_case("trailing_"), "trailing_");
        assert_eq!(to_camel_case("a__b"), "a_b");
        assert_eq!(to_camel_case("_private"), "private");
    }

    #[test]
    fn pascal_case_capitalises_first_letter() {
        assert_eq!(to_pascal_case("author_name"), "AuthorName");
        assert_eq!(to_pascal_case("post"), "Post");
        assert_eq!(to_pascal_case("authorHobby"), "AuthorHobby");
    }

    #[test]
    fn dash_case_mirrors_snake_case() {
        assert_eq!(to_dash_case("authorName"), "author-name");
        assert_eq!(to_dash_case("author_name"), "author-name");
        assert_eq!(to_dash_case("HTTPServerName"), "http-server-name");
    }

    #[test]
    fn numeric_keys_are_unchanged() {
        for convert in [to_snake_case, to_camel_case, to_dash_case, to_pascal_case] {
            assert_eq!(convert("123"), "123");
        }
    }
}
