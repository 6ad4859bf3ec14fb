// Purpose: Define crate-level module surface for the requirements generator.
// Inputs/Outputs: Re-exports internal modules for the binary and integration entry points.
// Invariants: Public module boundaries should remain stable for internal callers.
// Gotchas: Keep module wiring consistent with the src/main.rs entry path.

pub mod cli;
pub mod req;
