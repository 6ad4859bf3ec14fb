// Purpose: Resolve a Python project's external dependencies from its import statements.
// Inputs/Outputs: Walks .py sources under a root; emits a requirements.txt manifest.
// Invariants: Names satisfied by the stdlib, the venv, or the project itself are never emitted.
// Gotchas: The venv subtree must stay out of the walk or its internals get scanned as project code.

use anyhow::{Context, bail};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::req::config::ReqConfig;
use crate::req::import_scan;
use crate::req::manifest::{self, Manifest, RequirementEntry};
use crate::req::mapping;
use crate::req::stdlib;
use crate::req::venv;

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub venv_folder: Option<String>,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

fn is_skip_dir(name: &str) -> bool {
    matches!(
        name,
        ".git" | "__pycache__" | ".idea" | ".vscode" | "node_modules" | ".venv" | ".tox" | ".mypy_cache"
    )
}

fn collect_py_files_recursive(root: &Path, skip: &BTreeSet<String>) -> anyhow::Result<Vec<PathBuf>> {
    fn walk(dir: &Path, skip: &BTreeSet<String>, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                eprintln!("warning: skipping {}: {}", dir.display(), err);
                return Ok(());
            }
        };
        for ent in entries {
            let ent = ent?;
            let p = ent.path();
            if p.is_dir() {
                if let Some(name) = p.file_name().and_then(|s| s.to_str())
                    && (is_skip_dir(name) || skip.contains(name))
                {
                    continue;
                }
                walk(&p, skip, out)?;
            } else if p.extension().and_then(|s| s.to_str()) == Some("py") {
                out.push(p);
            }
        }
        Ok(())
    }

    let mut out = vec![];
    walk(root, skip, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect_imports(files: &[PathBuf]) -> HashSet<String> {
    let mut all = HashSet::new();
    for f in files {
        match import_scan::scan_imports_in_file(f) {
            Ok(found) => all.extend(found),
            Err(err) => eprintln!("warning: skipping {}: {}", f.display(), err),
        }
    }
    all
}

/// Top-level modules the project itself defines: `foo.py` files and package
/// directories (with `__init__.py`) directly under the root. An import of one
/// of these resolves locally, so it never names an installable dependency.
fn local_module_names(root: &Path) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let Ok(entries) = fs::read_dir(root) else {
        return names;
    };
    for ent in entries.flatten() {
        let p = ent.path();
        let Some(name) = p.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if p.is_dir() {
            if p.join("__init__.py").exists() {
                names.insert(name.to_string());
            }
        } else if let Some(stem) = name.strip_suffix(".py") {
            names.insert(stem.to_string());
        }
    }
    names
}

pub fn resolve(root: &Path, cfg: &ReqConfig, opts: &ResolveOptions) -> anyhow::Result<Manifest> {
    if !root.is_dir() {
        bail!("project root not found: {}", root.display());
    }

    let venv_folder = opts.venv_folder.clone().or_else(|| cfg.venv_folder.clone());
    let venv_names: BTreeSet<String> = match &venv_folder {
        Some(folder) => {
            let venv_dir = root.join(folder);
            if !venv_dir.is_dir() {
                bail!("venv folder not found: {}", venv_dir.display());
            }
            if !opts.quiet {
                let dists = venv::installed_distributions(&venv_dir)
                    .with_context(|| format!("enumerate venv {}", venv_dir.display()))?;
                eprintln!("excluding {} distributions installed in {}", dists.len(), folder);
            }
            venv::importable_names(&venv_dir)
                .with_context(|| format!("enumerate venv {}", venv_dir.display()))?
        }
        None => BTreeSet::new(),
    };

    let mut skip: BTreeSet<String> = cfg.ignore.iter().cloned().collect();
    if let Some(folder) = &venv_folder {
        skip.insert(folder.clone());
    }

    let files = collect_py_files_recursive(root, &skip)?;
    let imports = collect_imports(&files);
    let locals = local_module_names(root);

    let pins: BTreeMap<String, String> = cfg
        .pins
        .iter()
        .map(|(k, v)| (mapping::normalize(k), v.clone()))
        .collect();

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut manifest = Manifest::default();
    for ident in &imports {
        if stdlib::contains(ident) || locals.contains(ident) {
            continue;
        }
        let dist = mapping::dist_name(ident, &cfg.mapping);
        if venv_names.contains(&dist) || venv_names.contains(&mapping::normalize(ident)) {
            continue;
        }
        if !seen.insert(dist.clone()) {
            continue;
        }
        let version = pins.get(&dist).cloned();
        manifest.entries.push(RequirementEntry { name: dist, version });
    }
    manifest.sort_deterministic();
    Ok(manifest)
}

/// Resolve and write the manifest to the project root (or `-o` override).
/// An empty result still writes an empty file.
pub fn cmd_generate(root: &Path, cfg: &ReqConfig, opts: &ResolveOptions) -> anyhow::Result<()> {
    let manifest = resolve(root, cfg, opts)?;
    let out_path = opts
        .output
        .clone()
        .unwrap_or_else(|| root.join(manifest::FILE_NAME));
    manifest.write_to(&out_path)?;
    if !opts.quiet {
        eprintln!(
            "wrote {} ({} packages)",
            out_path.display(),
            manifest.entries.len()
        );
    }
    Ok(())
}
