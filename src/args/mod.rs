pub mod types;
pub mod validation;

use clap::Parser;

pub use types::{Args, Cmd};

#[must_use]
pub fn args_checks() -> Args {
    Args::parse()
}
