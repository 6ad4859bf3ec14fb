use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub fn scan_imports_in_text(src: &str) -> HashSet<String> {
    let re = Regex::new(r"(?m)^[ \t]*(import|from)[ \t]+([^\r\n#;]+)").unwrap();
    let mut names = HashSet::new();
    for cap in re.captures_iter(src) {
        let clause = cap[2].trim();
        if &cap[1] == "from" {
            // `from a.b import x` names exactly one source module.
            let target = clause.split_whitespace().next().unwrap_or("");
            if let Some(name) = top_level_name(target) {
                names.insert(name);
            }
        } else {
            // `import a, b.c as d` names one module per comma-separated piece.
            for piece in clause.split(',') {
                let target = piece.trim().split_whitespace().next().unwrap_or("");
                if let Some(name) = top_level_name(target) {
                    names.insert(name);
                }
            }
        }
    }
    names
}

pub fn scan_imports_in_file(p: &Path) -> anyhow::Result<HashSet<String>> {
    let s = fs::read_to_string(p)?;
    Ok(scan_imports_in_text(&s))
}

/// First path segment of an import target. Relative targets (`.mod`, `..pkg`)
/// can only name project-local modules and yield nothing.
fn top_level_name(target: &str) -> Option<String> {
    if target.starts_with('.') {
        return None;
    }
    let head = target.split('.').next().unwrap_or("");
    let mut chars = head.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    valid.then(|| head.to_string())
}

#[cfg(test)]
mod tests {
    use super::scan_imports_in_text;

    fn names(src: &str) -> Vec<String> {
        let mut v: Vec<String> = scan_imports_in_text(src).into_iter().collect();
        v.sort();
        v
    }

    #[test]
    fn direct_and_from_forms_collapse_to_one_name() {
        assert_eq!(names("import requests\nfrom requests import get\n"), ["requests"]);
    }

    #[test]
    fn dotted_targets_keep_only_the_top_level() {
        assert_eq!(
            names("import os.path\nfrom xml.etree import ElementTree\n"),
            ["os", "xml"]
        );
    }

    #[test]
    fn comma_lists_and_aliases() {
        assert_eq!(
            names("import os, sys\nimport numpy as np\n"),
            ["numpy", "os", "sys"]
        );
    }

    #[test]
    fn relative_imports_yield_nothing() {
        assert!(names("from . import utils\nfrom ..core import thing\n").is_empty());
    }

    #[test]
    fn indented_imports_count() {
        assert_eq!(names("def f():\n    import json\n    return json\n"), ["json"]);
    }

    #[test]
    fn lookalike_lines_are_ignored() {
        let src = "# import commented\nimportlib.reload(m)\nfrom_config()\nx = 'import nothing'\n";
        assert!(names(src).is_empty());
    }

    #[test]
    fn dunder_future_is_a_name() {
        assert_eq!(names("from __future__ import annotations\n"), ["__future__"]);
    }
}
