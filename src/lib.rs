//! # PollSub
//!
//! `pollsub` is a minimalist, in-memory publish/subscribe server built with Rust.
//! Clients subscribe a username to a named topic over HTTP, publish opaque
//! message bodies to topics, and poll for their messages: each subscriber
//! receives every message posted since it subscribed, in FIFO order, at most
//! once. Nothing is persisted; all state lives for the lifetime of the process.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `broker`: The central component that manages topics, subscribers, and per-subscriber
//!   message delivery.
//! - `config`: Handles loading and managing server configuration.
//! - `transport`: The HTTP surface that maps verbs and paths onto broker operations.
//! - `utils`: Contains shared utilities, such as error handling and logging setup.

pub mod broker;
pub mod config;
pub mod transport;
pub mod utils;
