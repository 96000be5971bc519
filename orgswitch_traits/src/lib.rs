//! Contracts for OAuth2 grant handlers and the policies they enforce.

#![warn(
    missing_docs,
    unused_import_braces,
    unused_imports,
    unused_qualifications
)]
#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_must_use
)]
#![forbid(unsafe_code)]

mod grant;
mod policy;

pub use grant::GrantHandler;
pub use policy::Policy;
