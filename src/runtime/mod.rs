//! Runtime abstraction for system operations.
//!
//! Everything that touches the host (environment variables, files, child
//! processes) goes through the [`Runtime`] trait so resolution logic can be
//! exercised against a mock.
//!
//! # Structure
//!
//! - `env` - Environment variables
//! - `fs` - File reads and existence checks
//! - `process` - Capturing the output of helper programs

mod env;
mod fs;
mod process;

use anyhow::Result;
use std::env as std_env;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn exists(&self, path: &Path) -> bool;

    // Processes
    /// Run `program` with `args` and return its standard output.
    /// A non-zero exit status is an error.
    fn command_output(&self, program: &str, args: &[String]) -> Result<String>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn command_output(&self, program: &str, args: &[String]) -> Result<String> {
        self.command_output_impl(program, args)
    }
}
