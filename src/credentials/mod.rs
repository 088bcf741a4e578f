//! Credential encryption and at-rest storage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       CredentialStore                    │
//! │  - one encrypted row per connector       │
//! │  - key persisted alongside the data      │
//! └─────────────────────────────────────────┘
//!          ↓                    ↑
//!    (encrypt)            (decrypt)
//!          ↓                    ↑
//! ┌─────────────────────────────────────────┐
//! │       CryptoBox                          │
//! │  - AES-256-GCM, fresh nonce per call     │
//! │  - base64(nonce || ciphertext+tag)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Credentials themselves are a plain map (see [`crate::types::Credentials`]);
//! only this module is allowed to put them on disk, and only sealed.

mod encryption;
mod storage;

pub use encryption::{CryptoBox, CryptoError, KEY_SIZE};
pub use storage::CredentialStore;
