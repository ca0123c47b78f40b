//! Stowaway - a client for end-to-end encrypted team secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Initialize a workspace
//! │   ├── secrets       # List, get, set, delete, example env
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .stowaway.toml management
//!     ├── keystore      # ~/.stowaway identity
//!     ├── cipher/       # Sealing
//!     │   ├── mod       # Cipher trait, seal/open/hash
//!     │   ├── aes       # AES-256-GCM field cipher
//!     │   ├── sealed_box # x25519 + XChaCha20-Poly1305 box
//!     │   └── envelope  # Project key recovery
//!     ├── reconcile     # Desired vs remote diff
//!     ├── template      # Tag-grouped .env.example
//!     ├── remote/       # Remote collaborators
//!     │   ├── mod       # Source/transport traits, apply
//!     │   └── fs        # File-backed store
//!     └── secrets       # Command workflows
//! ```
//!
//! # Features
//!
//! - Project key shared through per-member sealed envelopes
//! - Keys and values sealed client-side; the store never sees plaintext
//! - Minimal create and modify batches computed from one remote snapshot
//! - All-or-nothing deletion by name
//! - `.env.example` generation grouped by tags

pub mod cli;
pub mod core;
pub mod error;
