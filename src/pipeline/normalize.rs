/// Maps an arbitrary title to a filesystem-safe file stem.
///
/// Keeps alphanumerics, spaces, `-` and `_`, drops everything else without
/// substitution and trims trailing whitespace. Inner runs of spaces are left
/// alone. An empty result is possible and must be replaced by the caller.
///
/// "Alphanumeric" is Unicode's `Alphabetic` or `Numeric` property, so vowel
/// signs such as U+0947 are kept while the virama U+094D is dropped.
pub fn normalize(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    kept.trim_end().to_string()
}
