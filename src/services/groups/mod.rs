//! Groups service.
//!
//! Group listing, group-member listing and membership changes.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;
