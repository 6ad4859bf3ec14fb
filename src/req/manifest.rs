use anyhow::Context;
use std::fs;
use std::path::Path;

pub const FILE_NAME: &str = "requirements.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementEntry {
    pub name: String,
    /// Exact version to pin (`name==version`); bare name when absent.
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub entries: Vec<RequirementEntry>,
}

impl Manifest {
    pub fn sort_deterministic(&mut self) {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));
        self.entries.dedup_by(|a, b| a.name == b.name);
    }

    /// Plain UTF-8 text, one entry per line, no comments.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            match &e.version {
                Some(v) => out.push_str(&format!("{}=={}\n", e.name, v)),
                None => {
                    out.push_str(&e.name);
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Overwrites any existing file at `path`. A failure here is fatal to the
    /// run, unlike per-source read errors.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        fs::write(path, self.render()).with_context(|| format!("write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Manifest, RequirementEntry};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn entry(name: &str, version: Option<&str>) -> RequirementEntry {
        RequirementEntry {
            name: name.to_string(),
            version: version.map(str::to_string),
        }
    }

    fn temp_dir(prefix: &str) -> PathBuf {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time drift")
            .as_nanos();
        std::env::temp_dir().join(format!("genreq-{}-{}-{}", prefix, std::process::id(), nonce))
    }

    #[test]
    fn renders_bare_and_pinned_entries() {
        let m = Manifest {
            entries: vec![entry("flask", None), entry("requests", Some("2.31.0"))],
        };
        assert_eq!(m.render(), "flask\nrequests==2.31.0\n");
    }

    #[test]
    fn sort_is_alphabetical_and_dedupes() {
        let mut m = Manifest {
            entries: vec![
                entry("requests", None),
                entry("flask", None),
                entry("requests", None),
            ],
        };
        m.sort_deterministic();
        assert_eq!(m.render(), "flask\nrequests\n");
    }

    #[test]
    fn empty_manifest_renders_empty_text() {
        assert_eq!(Manifest::default().render(), "");
    }

    #[test]
    fn write_overwrites_existing_file() {
        let root = temp_dir("manifest");
        fs::create_dir_all(&root).expect("mkdir");
        let path = root.join("requirements.txt");
        fs::write(&path, "stale contents\n").expect("seed");
        let m = Manifest {
            entries: vec![entry("flask", None)],
        };
        m.write_to(&path).expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "flask\n");
        let _ = fs::remove_dir_all(root);
    }
}
