//! Team members service.
//!
//! Listing, provisioning, deprovisioning and suspension of team members.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::*;
