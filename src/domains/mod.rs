//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently has a single domain: tools. The registry, argument
//! binder and dispatcher live there along with the built-in tools.

pub mod tools;
