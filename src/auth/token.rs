//! Access token results and the redacted secret wrapper they carry.

pub mod result;
pub mod secret;
