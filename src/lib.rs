pub mod checker;
pub mod classifier;
pub mod cli;
pub mod extensions;
pub mod formatters;
pub mod types;
pub mod vcs;

pub use classifier::looks_binary;
