//! Fraudcheck API server
//!
//! Exposed as a library so integration tests can build the router with fake
//! collaborator clients injected in place of the OpenAI and SMTP ones.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod utils;
