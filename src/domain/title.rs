/// A title is usable as a page key when it is non-empty and made only of
/// ASCII letters and digits. That keeps it safe to embed in a file name and
/// in a URL path segment.
pub fn validate_title(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}
