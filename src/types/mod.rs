//! Type definitions for the LINE Notify client

pub mod identifiers;
pub mod profile;

pub use identifiers::{AccessToken, AuthorizationCode};
pub use profile::UserProfile;
