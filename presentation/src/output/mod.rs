//! Console output for direct tool invocation

pub mod console;
