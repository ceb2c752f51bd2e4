//! # Builders
//!
//! ## Modules
//!
//! - [`session_builder`] - Fluent construction of a [`VerifySession`](crate::VerifySession)

pub mod session_builder;
