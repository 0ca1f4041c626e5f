//! Output file naming.

/// Appended to every sanitized recipient name.
pub const CERTIFICATE_SUFFIX: &str = "_certificate.png";

/// Keep only alphanumerics, spaces, hyphens, and underscores, then trim.
///
/// ```
/// use laurel_batch::sanitize_name;
///
/// assert_eq!(sanitize_name("O'Brien, Jr."), "OBrien Jr");
/// ```
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim().to_string()
}

/// File name for the certificate of `name` on data row `row`.
///
/// Names that sanitize to nothing fall back to `recipient-<row>`.
#[must_use]
pub fn certificate_filename(name: &str, row: usize) -> String {
    let stem = sanitize_name(name);
    if stem.is_empty() {
        format!("recipient-{row}{CERTIFICATE_SUFFIX}")
    } else {
        format!("{stem}{CERTIFICATE_SUFFIX}")
    }
}
