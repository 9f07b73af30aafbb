//! Restaurant-review backend library.
//!
//! Hexagonal layout: `domain` holds entities, validation, and use-case
//! services over port traits; `inbound` adapts HTTP onto the driving ports;
//! `outbound` implements the driven ports (PostgreSQL via Diesel, Google
//! token verification); `server` wires everything together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
