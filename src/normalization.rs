/// Normalizes user-supplied text by stripping surrounding whitespace
/// and composing it into Unicode Normalization Form C, so that names
/// typed with combining marks compare equal to precomposed ones.
///
/// ```
/// use moviedb::normalization::normalize_text;
/// assert_eq!(normalize_text("\tKeanu Reeves "), "Keanu Reeves");
/// assert_eq!(normalize_text("Zoe\u{301}"), "Zo\u{e9}");
/// ```
pub fn normalize_text(text: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    text.as_ref().trim().nfc().collect()
}
