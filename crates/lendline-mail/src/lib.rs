//! # lendline-mail
//!
//! Mail provider client implementing the `NotificationGateway` port from
//! `lendline-core`. Talks to a Postmark-style JSON API over HTTP; every
//! request is bounded by the configured client timeout.

mod client;
mod payload;

pub use client::PostmarkClient;
