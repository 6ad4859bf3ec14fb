// Purpose: Provide the binary entry for requirements-manifest generation.
// Inputs/Outputs: Reads process args and returns process exit code from CLI dispatcher.
// Invariants: Main must not bypass centralized CLI argument/diagnostic handling.
// Gotchas: Flag or behavior changes belong in cli/mod.rs, not this shim.

fn main() {
    let code = genreq::cli::run_cli(std::env::args().skip(1));
    std::process::exit(code);
}
