//! Platform plumbing shared by the views.

pub mod platform;
pub mod timing;
