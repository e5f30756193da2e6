//! Admin roles service.
//!
//! The upstream only replaces a member's whole role set; there is no
//! endpoint that lists roles on their own, so roles are discovered from the
//! member listing.

mod requests;
mod service;

pub use requests::*;
pub use service::*;
