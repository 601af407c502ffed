//! Common utilities for request handling

pub mod upload;
