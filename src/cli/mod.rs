use std::path::PathBuf;

use crate::req::config::ReqConfig;
use crate::req::resolve::{self, ResolveOptions};

pub mod suggest;

const KNOWN_FLAGS: &[&str] = &["--help", "--quiet", "--venv_folder", "-h", "-o", "-q"];

pub fn run_cli<I>(args: I) -> i32
where
    I: IntoIterator<Item = String>,
{
    let mut root: Option<PathBuf> = None;
    let mut opts = ResolveOptions::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return 0;
            }
            "-q" | "--quiet" => opts.quiet = true,
            "--venv_folder" => match args.next() {
                Some(name) => opts.venv_folder = Some(name),
                None => {
                    eprintln!("expected folder name after --venv_folder");
                    return 1;
                }
            },
            "-o" => match args.next() {
                Some(path) => opts.output = Some(PathBuf::from(path)),
                None => {
                    eprintln!("expected output path after -o");
                    return 1;
                }
            },
            _ if arg.starts_with('-') => {
                eprintln!("unknown argument: {}", arg);
                if let Some(flag) = suggest::closest_flag(&arg, KNOWN_FLAGS) {
                    eprintln!("did you mean `{}`?", flag);
                }
                return 1;
            }
            _ => {
                if root.is_some() {
                    eprintln!("unexpected extra argument: {}", arg);
                    return 1;
                }
                root = Some(PathBuf::from(arg));
            }
        }
    }
    let Some(root) = root else {
        print_usage();
        return 1;
    };
    let cfg = match ReqConfig::load(&root) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{:#}", err);
            return 1;
        }
    };
    if let Err(err) = resolve::cmd_generate(&root, &cfg, &opts) {
        eprintln!("{:#}", err);
        return 1;
    }
    0
}

fn print_usage() {
    eprintln!("usage: genreq <project-path> [--venv_folder <name>] [-o <file>] [-q|--quiet]");
    eprintln!();
    eprintln!("Scans the project's .py files and writes requirements.txt with the");
    eprintln!("external packages it imports. Packages already satisfied by the");
    eprintln!("standard library or by the given venv folder are left out.");
}
