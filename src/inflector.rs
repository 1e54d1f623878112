//! English inflection rules for Rails naming conventions.
//!
//! Pure, stateless string transforms used to derive wire names from local
//! type and field names: [`pluralize`], [`singularize`], [`camelize`],
//! [`underscore`], and [`dasherize`].
//!
//! Pluralization follows the Rails rule style: an ordered list of
//! suffix-rewrite rules, most specific first, matched case-insensitively so
//! that the unmatched prefix keeps its original case (`"Axis"` → `"Axes"`,
//! `"AXIS"` → `"AXes"`). Irregular forms (`person`/`people`, `ox`/`oxen`,
//! `cow`/`kine`) and uncountables (`rice`, `moose`, ...) are handled ahead of
//! the general rules.
//!
//! None of these functions fail: unmatched input passes through unchanged,
//! and the empty string maps to the empty string.
//!
//! # Example
//!
//! ```rust
//! use active_resource::inflector::{dasherize, pluralize, underscore};
//!
//! assert_eq!(pluralize("person"), "people");
//! assert_eq!(underscore("AssetType"), "asset_type");
//! assert_eq!(dasherize("created_at"), "created-at");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// An ordered suffix-rewrite table. Rules are tried in order; the first
/// match wins.
struct RuleSet {
    rules: Vec<(Regex, &'static str)>,
}

impl RuleSet {
    fn new(table: &[(&str, &'static str)]) -> Self {
        let rules = table
            .iter()
            .map(|(pattern, replacement)| {
                // The tables below are static and known-good.
                (Regex::new(pattern).expect("invalid inflection rule"), *replacement)
            })
            .collect();
        Self { rules }
    }

    fn apply(&self, word: &str) -> String {
        for (pattern, replacement) in &self.rules {
            if pattern.is_match(word) {
                return pattern.replace(word, *replacement).into_owned();
            }
        }
        word.to_string()
    }
}

/// Words with identical singular and plural forms.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "moose",
    "deer",
];

static PLURAL_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(&[
        // Irregular forms. Capture groups keep the original case of the
        // leading letter; cow/kine change their first letter, so those get
        // one case-sensitive rule per casing.
        ("(?i)(p)eople$", "${1}eople"),
        ("(?i)(p)erson$", "${1}eople"),
        ("(?i)(c)hildren$", "${1}hildren"),
        ("(?i)(c)hild$", "${1}hildren"),
        ("^Cow$", "Kine"),
        ("^cow$", "kine"),
        ("(?i)^(k)ine$", "${1}ine"),
        ("(?i)^(ox)en$", "${1}en"),
        ("(?i)^(ox)$", "${1}en"),
        // Suffix rules, most specific first.
        ("(?i)(quiz)$", "${1}zes"),
        ("(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        ("(?i)(ax|test)is$", "${1}es"),
        ("(?i)(alias|status)$", "${1}es"),
        ("(?i)(octop|vir)us$", "${1}i"),
        ("(?i)(buffal|tomat)o$", "${1}oes"),
        ("(?i)([ti])um$", "${1}a"),
        ("(?i)sis$", "ses"),
        ("(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        ("(?i)(hive)$", "${1}s"),
        ("(?i)([^aeiouy]|qu)y$", "${1}ies"),
        ("(?i)(x|ch|ss|sh)$", "${1}es"),
        ("(?i)(bu)s$", "${1}ses"),
        ("(?i)s$", "s"),
        ("$", "s"),
    ])
});

static SINGULAR_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(&[
        ("(?i)(p)eople$", "${1}erson"),
        ("(?i)(c)hildren$", "${1}hild"),
        ("^Kine$", "Cow"),
        ("^kine$", "cow"),
        ("(?i)^(ox)en$", "${1}"),
        ("(?i)(quiz)zes$", "${1}"),
        ("(?i)(matr)ices$", "${1}ix"),
        ("(?i)(vert|ind)ices$", "${1}ex"),
        ("(?i)(alias|status)es$", "${1}"),
        ("(?i)(octop|vir)i$", "${1}us"),
        ("(?i)(cris|ax|test)es$", "${1}is"),
        (
            "(?i)((?:analy|ba|diagno|parenthe|progno|synop|the))ses$",
            "${1}sis",
        ),
        ("(?i)(shoe)s$", "${1}"),
        ("(?i)(bus)es$", "${1}"),
        ("(?i)([ml])ice$", "${1}ouse"),
        ("(?i)(x|ch|ss|sh)es$", "${1}"),
        ("(?i)(m)ovies$", "${1}ovie"),
        ("(?i)(s)eries$", "${1}eries"),
        ("(?i)([^aeiouy]|qu)ies$", "${1}y"),
        ("(?i)([lr])ves$", "${1}f"),
        ("(?i)(tive)s$", "${1}"),
        ("(?i)(hive)s$", "${1}"),
        ("(?i)([^f])ves$", "${1}fe"),
        ("(?i)([ti])a$", "${1}um"),
        ("(?i)(n)ews$", "${1}ews"),
        ("(?i)(o)es$", "${1}"),
        ("(?i)s$", ""),
    ])
});

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("invalid pattern"));
static CASE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("invalid pattern"));

/// Returns the plural form of an English word.
///
/// # Example
///
/// ```rust
/// use active_resource::inflector::pluralize;
///
/// assert_eq!(pluralize("person"), "people");
/// assert_eq!(pluralize("Axis"), "Axes");
/// assert_eq!(pluralize("rice"), "rice");
/// ```
#[must_use]
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word.to_lowercase().as_str()) {
        return word.to_string();
    }
    PLURAL_RULES.apply(word)
}

/// Returns the singular form of an English word.
///
/// # Example
///
/// ```rust
/// use active_resource::inflector::singularize;
///
/// assert_eq!(singularize("people"), "person");
/// assert_eq!(singularize("halves"), "half");
/// ```
#[must_use]
pub fn singularize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word.to_lowercase().as_str()) {
        return word.to_string();
    }
    SINGULAR_RULES.apply(word)
}

/// Converts an underscored path to CamelCase, turning `/` into `::`
/// namespace separators.
///
/// When `first_upper` is false the leading word keeps a lowercase first
/// letter (`"active_record"` → `"activeRecord"`).
///
/// # Example
///
/// ```rust
/// use active_resource::inflector::camelize;
///
/// assert_eq!(camelize("active_record", true), "ActiveRecord");
/// assert_eq!(camelize("active_record/errors", true), "ActiveRecord::Errors");
/// assert_eq!(camelize("active_record/errors", false), "activeRecord::Errors");
/// ```
#[must_use]
pub fn camelize(word: &str, first_upper: bool) -> String {
    let mut namespaces = Vec::new();
    for (ni, namespace) in word.split('/').enumerate() {
        let mut out = String::with_capacity(namespace.len());
        for (wi, segment) in namespace.split('_').enumerate() {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                if ni == 0 && wi == 0 && !first_upper {
                    out.extend(first.to_lowercase());
                } else {
                    out.extend(first.to_uppercase());
                }
                out.push_str(chars.as_str());
            }
        }
        namespaces.push(out);
    }
    namespaces.join("::")
}

/// Converts a CamelCase word to lower-case underscored form, turning `::`
/// namespace separators into `/`.
///
/// Acronym runs stay together: `"HTTPResponse"` → `"http_response"`.
///
/// # Example
///
/// ```rust
/// use active_resource::inflector::underscore;
///
/// assert_eq!(underscore("AssetType"), "asset_type");
/// assert_eq!(underscore("ActiveRecord::Errors"), "active_record/errors");
/// ```
#[must_use]
pub fn underscore(word: &str) -> String {
    let word = word.replace("::", "/");
    let word = ACRONYM_BOUNDARY.replace_all(&word, "${1}_${2}");
    let word = CASE_BOUNDARY.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// Replaces underscores with dashes.
///
/// # Example
///
/// ```rust
/// use active_resource::inflector::dasherize;
///
/// assert_eq!(dasherize("created_at"), "created-at");
/// ```
#[must_use]
pub fn dasherize(word: &str) -> String {
    word.replace('_', "-")
}
