// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication for the Passkeep credential vault.
//!
//! Registers identities, verifies credentials against Argon2id hashes, and
//! issues/validates compact HMAC-SHA256 signed access tokens. The password
//! hash never leaves this crate.

pub mod password;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::{TokenClaims, TokenSigner};
