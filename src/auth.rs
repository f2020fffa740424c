//! Auth-domain accounts, scope lists, and token results.

pub mod account;
pub mod scope;
pub mod token;

pub use account::*;
pub use scope::*;
pub use token::{result::*, secret::*};
