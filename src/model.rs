//! Typed request and response records for the Authflow API.

pub mod account;
pub mod api_key;
pub mod mfa;
pub mod oauth2;
pub mod secret;
pub mod session;
pub mod timestamp;
pub mod user;

pub use account::*;
pub use api_key::*;
pub use mfa::*;
pub use oauth2::*;
pub use secret::*;
pub use session::*;
pub use user::*;
