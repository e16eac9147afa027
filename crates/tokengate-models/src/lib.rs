#![deny(missing_docs)]

//! # TokenGate Models
//!
//! Wire-level data types shared by the TokenGate auth server and the
//! client SDK.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`principal`] | The authenticated identity ([`Principal`]) |
//! | [`wire`] | Request / response bodies ([`LoginRequest`], [`SessionResponse`]) |

pub mod principal;
pub mod wire;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `tokengate_models::Principal` directly.
pub use principal::*;
pub use wire::*;
