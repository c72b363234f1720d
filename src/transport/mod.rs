//! The `transport` module owns the HTTP surface of the relay.
//!
//! It translates verbs and path segments into broker operations and broker
//! results into status codes; all delivery semantics live in `broker`.

pub mod http;
