//! Progress indicators (stderr only)

pub mod reporter;
