//! Client for the user API, shaped by the contracts in `contract_core::users`.
//!
//! # Overview
//! `UserClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `UserApi` runs those
//! through a [`Transport`] and implements
//! [`ClientContract`](contract_core::ClientContract) for every user contract,
//! so a change to a contract that the client does not follow fails to compile.

pub mod client;
pub mod error;
pub mod http;

pub use client::{UserApi, UserClient};
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
