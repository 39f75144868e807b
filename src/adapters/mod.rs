//! Adapters - concrete implementations of ports and the HTTP surface.

pub mod http;
pub mod reasoner;
