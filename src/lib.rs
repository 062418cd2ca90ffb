//! Workspace tooling package.
//!
//! This crate has no code of its own. It exists so `rusty-hook` can install
//! the pre-commit hook configured in the root `Cargo.toml`; the engine, CLI
//! and HTTP service live under `crates/`.
