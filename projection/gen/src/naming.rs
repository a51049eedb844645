//! Name projection from declared schema names.
//!
//! Declared names are split into words and reassembled in the casing each
//! output needs:
//!
//! | Output | Casing | `QueryClusterGraph` / `GraphName` |
//! |---|---|---|
//! | Type tag, wire name | lowerCamel | `queryClusterGraph` / `graphName` |
//! | Rust type name | UpperCamel | `QueryClusterGraph` |
//! | Module, member name | snake_case | `query_cluster_graph` / `graph_name` |
//! | Constants | SCREAMING_SNAKE | `QUERY_CLUSTER_GRAPH` / `GRAPH_NAME` |
//!
//! Every projection is idempotent: projecting an already projected name
//! returns it unchanged.
//!
//! ## Examples
//!
//! ```
//! use projection_gen::naming::{lower_camel, snake_case, upper_camel};
//!
//! assert_eq!(lower_camel("AlertStatus"), "alertStatus");
//! assert_eq!(lower_camel("ProjectID"), "projectId");
//! assert_eq!(upper_camel("HTTPClient"), "HttpClient");
//! assert_eq!(snake_case("GraphName"), "graph_name");
//! ```

use proc_macro2::{Ident, Span};
use quote::format_ident;

/// Keywords that cannot be used as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Strict and reserved keywords of the 2024 edition.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Splits a declared name into words.
///
/// Non-alphanumeric characters separate words; the loader rejects
/// non-ASCII names before they get here. Inside a run of letters and
/// digits a new word starts:
/// - at an uppercase letter following a lowercase letter or digit:
///   "alertState" -> ["alert", "State"], "l3Out" -> ["l3", "Out"]
/// - at the last capital of an acronym followed by a lowercase letter:
///   "HTTPClient" -> ["HTTP", "Client"]
pub fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();

    for token in name.split(|c: char| !c.is_ascii_alphanumeric()) {
        if token.is_empty() {
            continue;
        }

        let chars: Vec<char> = token.chars().collect();
        let mut word_start = 0;

        for i in 1..chars.len() {
            let current = chars[i];
            let prev = chars[i - 1];

            let is_new_word = current.is_ascii_uppercase()
                && (prev.is_ascii_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_ascii_uppercase()
                        && i + 1 < chars.len()
                        && chars[i + 1].is_ascii_lowercase()));

            if is_new_word {
                words.push(chars[word_start..i].iter().collect());
                word_start = i;
            }
        }

        words.push(chars[word_start..].iter().collect());
    }

    words
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Glues every single-character word onto the word after it.
///
/// A capitalized one-letter word next to another capital would not split
/// back the same way ("ip_a_v4" would become "ipAV4", which reads as
/// ["ip", "AV4"]). Joined, the pair is capitalized once ("ipAv4").
fn join_single_char_words(words: Vec<String>) -> Vec<String> {
    let mut joined = Vec::with_capacity(words.len());
    let mut pending: Option<String> = None;

    for word in words {
        match pending.take() {
            Some(mut single) => {
                single.push_str(&word);
                joined.push(single);
            }
            None if word.len() == 1 => pending = Some(word),
            None => joined.push(word),
        }
    }

    joined.extend(pending);
    joined
}

/// Projects a declared name to lowerCamelCase (the wire naming convention).
pub fn lower_camel(name: &str) -> String {
    let mut words = split_words(name).into_iter();
    let Some(first) = words.next() else {
        return String::new();
    };

    let rest: String = join_single_char_words(words.collect())
        .iter()
        .map(|word| capitalize(word))
        .collect();

    first.to_ascii_lowercase() + &rest
}

/// Projects a declared name to UpperCamelCase (Rust type names).
pub fn upper_camel(name: &str) -> String {
    join_single_char_words(split_words(name))
        .iter()
        .map(|word| capitalize(word))
        .collect()
}

/// Projects a declared name to snake_case (modules and members).
pub fn snake_case(name: &str) -> String {
    split_words(name)
        .iter()
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Projects a declared name to SCREAMING_SNAKE_CASE (constants).
pub fn screaming_snake(name: &str) -> String {
    snake_case(name).to_ascii_uppercase()
}

/// Name of the type-tag constant of a resource (`ALERT_STATUS_TYPE`).
pub fn type_constant(type_name: &str) -> String {
    format!("{}_TYPE", screaming_snake(type_name))
}

/// Name of a field-name constant (`ALERT_STATUS_FIELD_ALERT_STATE`).
pub fn field_constant(type_name: &str, local_name: &str) -> String {
    format!(
        "{}_FIELD_{}",
        screaming_snake(type_name),
        screaming_snake(local_name)
    )
}

/// Returns `true` if `name` is a Rust keyword.
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Makes a projected name usable as a path segment or file stem.
///
/// Keywords that cannot be raw identifiers get a trailing underscore; other
/// keywords are kept and escaped later by [`rust_ident`].
pub fn escape_path_keyword(name: String) -> String {
    if NON_RAW_KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Builds an identifier, escaping keywords (`type` -> `r#type`).
pub fn rust_ident(name: &str) -> Ident {
    if NON_RAW_KEYWORDS.contains(&name) {
        format_ident!("{}_", name)
    } else if is_rust_keyword(name) {
        Ident::new_raw(name, Span::call_site())
    } else {
        format_ident!("{}", name)
    }
}

/// Returns `true` if a projected name can start a Rust identifier.
pub fn starts_like_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn split_camel_and_separators() {
        assert_eq!(split_words("alertState"), vec!["alert", "State"]);
        assert_eq!(split_words("QueryClusterGraph"), vec!["Query", "Cluster", "Graph"]);
        assert_eq!(split_words("HTTPClient"), vec!["HTTP", "Client"]);
        assert_eq!(split_words("alert_state-name"), vec!["alert", "state", "name"]);
        assert_eq!(split_words("L3Out"), vec!["L3", "Out"]);
        assert_eq!(split_words("UUID"), vec!["UUID"]);
        assert!(split_words("__").is_empty());
    }

    #[test]
    fn unusual_characters_act_as_separators() {
        assert_eq!(split_words("alert status!"), vec!["alert", "status"]);
        assert_eq!(split_words("alert.state/v2"), vec!["alert", "state", "v2"]);
    }

    #[test]
    fn lower_camel_projection() {
        assert_eq!(lower_camel("AlertStatus"), "alertStatus");
        assert_eq!(lower_camel("alertState"), "alertState");
        assert_eq!(lower_camel("GraphName"), "graphName");
        assert_eq!(lower_camel("ProjectID"), "projectId");
        assert_eq!(lower_camel("UUID"), "uuid");
        assert_eq!(lower_camel("ExternalURL"), "externalUrl");
        assert_eq!(lower_camel("pod_security_policy"), "podSecurityPolicy");
        assert_eq!(lower_camel("a_b_c"), "aBc");
        assert_eq!(lower_camel(""), "");
    }

    #[test]
    fn single_letter_words_project_stably() {
        assert_eq!(lower_camel("ip_a_v4"), "ipAv4");
        assert_eq!(lower_camel("ipAv4"), "ipAv4");
        assert_eq!(lower_camel("aA_a0"), "aAa0");
        assert_eq!(lower_camel("aAa0"), "aAa0");
        assert_eq!(upper_camel("a0A_a0"), "A0Aa0");
        assert_eq!(upper_camel("A0Aa0"), "A0Aa0");
        assert_eq!(upper_camel("a_b_c"), "AbC");
        assert_eq!(upper_camel("AbC"), "AbC");
    }

    #[test]
    fn upper_camel_projection() {
        assert_eq!(upper_camel("alertStatus"), "AlertStatus");
        assert_eq!(upper_camel("QueryClusterGraph"), "QueryClusterGraph");
        assert_eq!(upper_camel("UUID"), "Uuid");
        assert_eq!(upper_camel("cluster_alert_rule"), "ClusterAlertRule");
    }

    #[test]
    fn snake_and_screaming_projection() {
        assert_eq!(snake_case("GraphName"), "graph_name");
        assert_eq!(snake_case("ProjectID"), "project_id");
        assert_eq!(snake_case("HTTPClient"), "http_client");
        assert_eq!(screaming_snake("AlertStatus"), "ALERT_STATUS");
        assert_eq!(screaming_snake("alert_state"), "ALERT_STATE");
    }

    #[test]
    fn constant_names() {
        assert_eq!(type_constant("AlertStatus"), "ALERT_STATUS_TYPE");
        assert_eq!(
            field_constant("QueryClusterGraph", "graph_name"),
            "QUERY_CLUSTER_GRAPH_FIELD_GRAPH_NAME"
        );
        assert_eq!(field_constant("Node", "type"), "NODE_FIELD_TYPE");
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(rust_ident("type").to_string(), "r#type");
        assert_eq!(rust_ident("gen").to_string(), "r#gen");
        assert_eq!(rust_ident("self").to_string(), "self_");
        assert_eq!(rust_ident("alert_state").to_string(), "alert_state");
    }

    #[test]
    fn path_keywords_are_suffixed() {
        assert_eq!(escape_path_keyword("crate".to_string()), "crate_");
        assert_eq!(escape_path_keyword("type".to_string()), "type");
    }

    #[test]
    fn identifier_start() {
        assert!(starts_like_identifier("alertState"));
        assert!(!starts_like_identifier("3d"));
        assert!(!starts_like_identifier(""));
    }

    proptest! {
        #[test]
        fn lower_camel_is_idempotent(name in "[A-Za-z][A-Za-z0-9_]{0,15}") {
            let once = lower_camel(&name);
            prop_assert_eq!(lower_camel(&once), once);
        }

        #[test]
        fn upper_camel_is_idempotent(name in "[A-Za-z][A-Za-z0-9_]{0,15}") {
            let once = upper_camel(&name);
            prop_assert_eq!(upper_camel(&once), once);
        }

        #[test]
        fn snake_case_is_idempotent(name in "[A-Za-z][A-Za-z0-9_]{0,15}") {
            let once = snake_case(&name);
            prop_assert_eq!(snake_case(&once), once);
        }
    }
}
