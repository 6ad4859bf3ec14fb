// Purpose: Enumerate installed distributions inside a local virtual environment.
// Inputs/Outputs: Reads site-packages metadata; produces name/version maps and importable-name sets.
// Invariants: The environment is read-only input and is never modified.
// Gotchas: Unix and Windows venv layouts place site-packages differently.

use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::req::mapping::normalize;

/// Locate the site-packages directory of a venv. Unix layouts nest it under
/// `lib/pythonX.Y/`, Windows layouts under `Lib/`.
pub fn site_packages_dir(venv: &Path) -> Option<PathBuf> {
    let windows = venv.join("Lib").join("site-packages");
    if windows.is_dir() {
        return Some(windows);
    }
    for ent in fs::read_dir(venv.join("lib")).ok()?.flatten() {
        let p = ent.path();
        if p.is_dir()
            && p.file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|n| n.starts_with("python"))
        {
            let sp = p.join("site-packages");
            if sp.is_dir() {
                return Some(sp);
            }
        }
    }
    None
}

/// Installed distributions as a normalized-name -> version map, read from the
/// `*.dist-info` directories. `METADATA` headers win over the directory-name
/// split when present.
pub fn installed_distributions(venv: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let sp = site_packages_dir(venv)
        .with_context(|| format!("no site-packages under {}", venv.display()))?;
    let mut dists = BTreeMap::new();
    for ent in fs::read_dir(&sp).with_context(|| format!("read_dir {}", sp.display()))? {
        let ent = ent?;
        let p = ent.path();
        if !p.is_dir() {
            continue;
        }
        let Some(stem) = p
            .file_name()
            .and_then(|s| s.to_str())
            .and_then(|n| n.strip_suffix(".dist-info"))
        else {
            continue;
        };
        let (mut name, mut version) = match stem.rsplit_once('-') {
            Some((n, v)) => (n.to_string(), v.to_string()),
            None => (stem.to_string(), String::new()),
        };
        if let Some((n, v)) = read_metadata(&p.join("METADATA")) {
            name = n;
            version = v;
        }
        dists.insert(normalize(&name), version);
    }
    Ok(dists)
}

/// Everything importable from the venv: normalized distribution names, the
/// top-level names each distribution declares in `top_level.txt`, and the
/// module files/packages physically present at the top of site-packages.
/// This is the subtraction set applied against a project's imports.
pub fn importable_names(venv: &Path) -> anyhow::Result<BTreeSet<String>> {
    let sp = site_packages_dir(venv)
        .with_context(|| format!("no site-packages under {}", venv.display()))?;
    let mut names = BTreeSet::new();
    for ent in fs::read_dir(&sp).with_context(|| format!("read_dir {}", sp.display()))? {
        let ent = ent?;
        let p = ent.path();
        let Some(entry_name) = p.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if p.is_dir() {
            if let Some(stem) = entry_name.strip_suffix(".dist-info") {
                let name = match stem.rsplit_once('-') {
                    Some((n, _)) => n,
                    None => stem,
                };
                names.insert(normalize(name));
                if let Ok(top) = fs::read_to_string(p.join("top_level.txt")) {
                    for line in top.lines() {
                        let line = line.trim();
                        if !line.is_empty() {
                            names.insert(normalize(line));
                        }
                    }
                }
            } else if entry_name != "__pycache__"
                && !entry_name.ends_with(".data")
                && !entry_name.ends_with(".egg-info")
            {
                names.insert(normalize(entry_name));
            }
        } else if let Some(stem) = entry_name.strip_suffix(".py") {
            names.insert(normalize(stem));
        }
    }
    Ok(names)
}

fn read_metadata(path: &Path) -> Option<(String, String)> {
    let text = fs::read_to_string(path).ok()?;
    let mut name = None;
    let mut version = None;
    for line in text.lines() {
        if line.is_empty() {
            break; // headers end at the first blank line
        }
        if let Some(v) = line.strip_prefix("Name: ") {
            name = Some(v.trim().to_string());
        } else if let Some(v) = line.strip_prefix("Version: ") {
            version = Some(v.trim().to_string());
        }
    }
    Some((name?, version?))
}

#[cfg(test)]
mod tests {
    use super::{importable_names, installed_distributions, site_packages_dir};
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time drift")
            .as_nanos();
        std::env::temp_dir().join(format!("genreq-{}-{}-{}", prefix, std::process::id(), nonce))
    }

    fn fake_venv(root: &Path) -> PathBuf {
        let venv = root.join(".venv");
        let sp = venv.join("lib").join("python3.12").join("site-packages");
        fs::create_dir_all(&sp).expect("mkdir site-packages");

        let di = sp.join("requests-2.31.0.dist-info");
        fs::create_dir_all(&di).expect("mkdir dist-info");
        fs::write(
            di.join("METADATA"),
            "Metadata-Version: 2.1\nName: requests\nVersion: 2.31.0\n\nbody\n",
        )
        .expect("metadata");
        fs::create_dir_all(sp.join("requests")).expect("mkdir requests");

        let di = sp.join("typing_extensions-4.8.0.dist-info");
        fs::create_dir_all(&di).expect("mkdir dist-info");
        fs::write(di.join("top_level.txt"), "typing_extensions\n").expect("top_level");
        fs::write(sp.join("typing_extensions.py"), "").expect("module file");

        fs::write(sp.join("six.py"), "").expect("six");
        fs::create_dir_all(sp.join("__pycache__")).expect("pycache");
        venv
    }

    #[test]
    fn distributions_come_from_dist_info() {
        let root = temp_dir("dists");
        let venv = fake_venv(&root);
        let dists = installed_distributions(&venv).expect("enumerate");
        assert_eq!(dists.get("requests").map(String::as_str), Some("2.31.0"));
        assert_eq!(
            dists.get("typing-extensions").map(String::as_str),
            Some("4.8.0")
        );
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn importable_names_cover_dists_modules_and_loose_files() {
        let root = temp_dir("names");
        let venv = fake_venv(&root);
        let names = importable_names(&venv).expect("enumerate");
        for n in ["requests", "typing-extensions", "six"] {
            assert!(names.contains(n), "missing {}", n);
        }
        assert!(!names.contains("-pycache-"));
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn windows_layout_is_found() {
        let root = temp_dir("winlayout");
        let sp = root.join("env").join("Lib").join("site-packages");
        fs::create_dir_all(&sp).expect("mkdir");
        assert_eq!(site_packages_dir(&root.join("env")), Some(sp));
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_site_packages_is_an_error() {
        let root = temp_dir("nosp");
        fs::create_dir_all(root.join("env")).expect("mkdir");
        assert!(installed_distributions(&root.join("env")).is_err());
        let _ = fs::remove_dir_all(root);
    }
}
