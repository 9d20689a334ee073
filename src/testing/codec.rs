//! Suite-name to artifact-name mapping
//!
//! The build system names test executables in hyphen-delimited lowercase:
//! the suite `MyCool` builds `my-cool-test`. This derivation is the sole
//! mechanism for locating a test executable from a user-typed identifier,
//! so it must match the build system's convention exactly.

/// File-name suffix marking a compiled test artifact
pub const TEST_SUFFIX: &str = "-test";

/// Convert a human-facing suite identifier to the artifact naming convention
///
/// The first character is lowercased unconditionally; every subsequent ASCII
/// uppercase letter is replaced by a hyphen plus its lowercase form; all
/// other characters pass through unchanged.
pub fn artifact_base_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            out.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Reconstruct the display form of a suite from its artifact base name
///
/// Inverse of `artifact_base_name` for well-formed artifact names:
/// `my-cool` becomes `MyCool`.
pub fn suite_display_name(artifact_base: &str) -> String {
    let mut out = String::with_capacity(artifact_base.len());
    let mut upper_next = true;
    for ch in artifact_base.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_base_name_compound() {
        assert_eq!(artifact_base_name("MyCoolTest"), "my-cool-test");
        assert_eq!(artifact_base_name("Math"), "math");
        assert_eq!(artifact_base_name("HttpServer"), "http-server");
    }

    #[test]
    fn test_artifact_base_name_no_interior_uppercase() {
        assert_eq!(artifact_base_name("Simple"), "simple");
        assert_eq!(artifact_base_name("already"), "already");
    }

    #[test]
    fn test_artifact_base_name_idempotent_on_lowercase() {
        let once = artifact_base_name("MyCoolTest");
        assert_eq!(artifact_base_name(&once), once);
    }

    #[test]
    fn test_artifact_base_name_passes_through_digits() {
        assert_eq!(artifact_base_name("Sha256Hash"), "sha256-hash");
    }

    #[test]
    fn test_suite_display_name_round_trip() {
        assert_eq!(suite_display_name("my-cool"), "MyCool");
        assert_eq!(suite_display_name("math"), "Math");
        assert_eq!(suite_display_name(&artifact_base_name("HttpServer")), "HttpServer");
    }
}
