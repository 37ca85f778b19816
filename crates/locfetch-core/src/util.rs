//! Parameter normalization helpers shared by the CLI surfaces.

/// Version assigned to modules with no explicit version.
pub const DEFAULT_VERSION: &str = "draft";

/// Normalize a project or module name for use in distribution URLs.
///
/// The distribution service stores bundles under underscore-separated names.
///
/// # Examples
///
/// ```
/// use locfetch_core::util::sanitize_project_name;
///
/// assert_eq!(sanitize_project_name("My Shop"), "My_Shop");
/// assert_eq!(sanitize_project_name("Checkout"), "Checkout");
/// ```
pub fn sanitize_project_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Resolve the version list for `module_count` modules.
///
/// A single version broadcasts to every module; a shorter list is padded
/// with [`DEFAULT_VERSION`]; extra versions are ignored.
pub fn resolve_versions(module_count: usize, versions: &[String]) -> Vec<String> {
    if versions.len() == 1 {
        return vec![versions[0].clone(); module_count];
    }

    let mut resolved: Vec<String> = versions.iter().take(module_count).cloned().collect();
    while resolved.len() < module_count {
        resolved.push(DEFAULT_VERSION.to_string());
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_single_version_broadcasts() {
        // modules=["A","B"], versions="1.0" -> both "1.0"
        assert_eq!(
            resolve_versions(2, &versions(&["1.0"])),
            versions(&["1.0", "1.0"])
        );
    }

    #[test]
    fn test_short_list_padded_with_draft() {
        // modules=["A","B","C"], versions="1.0,2.0" -> A 1.0, B 2.0, C draft
        assert_eq!(
            resolve_versions(3, &versions(&["1.0", "2.0"])),
            versions(&["1.0", "2.0", "draft"])
        );
    }

    #[test]
    fn test_exact_list_kept() {
        assert_eq!(
            resolve_versions(2, &versions(&["1.0", "2.0"])),
            versions(&["1.0", "2.0"])
        );
    }

    #[test]
    fn test_extra_versions_ignored() {
        assert_eq!(
            resolve_versions(1, &versions(&["1.0", "2.0"])),
            versions(&["1.0"])
        );
    }

    #[test]
    fn test_empty_versions_all_draft() {
        assert_eq!(
            resolve_versions(2, &versions(&[])),
            versions(&["draft", "draft"])
        );
    }

    #[test]
    fn test_sanitize_project_name() {
        assert_eq!(sanitize_project_name("a b c"), "a_b_c");
        assert_eq!(sanitize_project_name("plain"), "plain");
        assert_eq!(sanitize_project_name(""), "");
    }
}
