use strsim::levenshtein;

/// Closest registered flag within a small edit-distance budget, for
/// "did you mean" hints on mistyped arguments.
pub fn closest_flag(needle: &str, flags: &[&str]) -> Option<String> {
    let needle = needle.trim();
    if needle.is_empty() {
        return None;
    }
    let budget = match needle.len() {
        0..=4 => 1,
        5..=8 => 2,
        _ => 3,
    };
    flags
        .iter()
        .map(|f| (levenshtein(needle, f), *f))
        .filter(|(d, _)| *d <= budget)
        .min_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(b.1)))
        .map(|(_, f)| f.to_string())
}

#[cfg(test)]
mod tests {
    use super::closest_flag;

    const FLAGS: &[&str] = &["--help", "--quiet", "--venv_folder", "-h", "-o", "-q"];

    #[test]
    fn near_misses_are_suggested() {
        assert_eq!(
            closest_flag("--venv-folder", FLAGS).as_deref(),
            Some("--venv_folder")
        );
        assert_eq!(closest_flag("--quite", FLAGS).as_deref(), Some("--quiet"));
    }

    #[test]
    fn distant_input_gets_no_suggestion() {
        assert_eq!(closest_flag("--frobnicate", FLAGS), None);
        assert_eq!(closest_flag("", FLAGS), None);
    }
}
