//! Kotlin identifier derivation from Smithy names

/// Kotlin hard keywords; these need backticks when used as identifiers.
const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Variant / type name: `memberA` -> `MemberA`, `data_event` -> `DataEvent`
pub fn pascal_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Property name: `CityId` -> `cityId`, `URLValue` -> `urlValue`, `ID` -> `id`
pub fn camel_case(name: &str) -> String {
    let pascal = pascal_case(name);
    let chars: Vec<char> = pascal.chars().collect();
    let upper_run = chars.iter().take_while(|c| c.is_uppercase()).count();

    let lower_count = match upper_run {
        0 => 0,
        n if n == chars.len() => n,
        1 => 1,
        // Keep the last capital of an acronym when it starts the next word
        n => n - 1,
    };

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i < lower_count {
                c.to_lowercase().next().unwrap_or(*c)
            } else {
                *c
            }
        })
        .collect()
}

/// Escapes Kotlin hard keywords with backticks
pub fn escape_identifier(name: &str) -> String {
    if HARD_KEYWORDS.contains(&name) {
        format!("`{}`", name)
    } else {
        name.to_string()
    }
}

/// Property identifier for a structure member
pub fn property_name(member_name: &str) -> String {
    escape_identifier(&camel_case(member_name))
}

/// `asMemberA`: asserts the variant
pub fn assert_accessor_name(variant: &str) -> String {
    format!("as{}", variant)
}

/// `asMemberAOrNull`: returns null for other variants
pub fn optional_accessor_name(variant: &str) -> String {
    format!("as{}OrNull", variant)
}

/// Escapes text for a Kotlin string literal
pub fn kotlin_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("memberA"), "MemberA");
        assert_eq!(pascal_case("data_event"), "DataEvent");
        assert_eq!(pascal_case("DataEvent"), "DataEvent");
        assert_eq!(pascal_case("stream-error"), "StreamError");
        assert_eq!(pascal_case("__x"), "X");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("CityId"), "cityId");
        assert_eq!(camel_case("cityId"), "cityId");
        assert_eq!(camel_case("URLValue"), "urlValue");
        assert_eq!(camel_case("ID"), "id");
        assert_eq!(camel_case("max_items"), "maxItems");
    }

    #[test]
    fn test_keywords_are_escaped() {
        assert_eq!(property_name("in"), "`in`");
        assert_eq!(property_name("Object"), "`object`");
        assert_eq!(property_name("value"), "value");
    }

    #[test]
    fn test_accessor_names() {
        assert_eq!(assert_accessor_name("MemberA"), "asMemberA");
        assert_eq!(optional_accessor_name("MemberA"), "asMemberAOrNull");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(kotlin_string_literal("a \"b\" $c"), "\"a \\\"b\\\" \\$c\"");
    }
}
