//! Inbound adapters: protocol-specific entry points into the domain.

pub mod http;
