//! Application-level configuration.
//!
//! These types control how use cases behave and are built from the loaded
//! file configuration by the binary:
//!
//! - [`CallerIdentity`]: who the CI/CD backend attributes cache entries to
//! - [`AdapterOptions`]: argument defaults and rich-UI output

pub mod adapter_options;
pub mod caller_identity;

pub use adapter_options::AdapterOptions;
pub use caller_identity::CallerIdentity;
