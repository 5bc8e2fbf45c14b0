//! Compile-time contracts shared by an API client and an API server.
//!
//! # Overview
//! A [`Contract`] names the request params, request body and response body of
//! one API operation. From that single declaration the crate derives:
//! - the client-callable shape, [`ClientContract`], whose one input is the
//!   params and body [`Merged`] together, and
//! - the server-handler shape, [`ApiContract`], which receives params and body
//!   separately in an [`ApiRequest`] and answers through an [`ApiResponse`].
//!
//! # Design
//! - Absent contract fields are [`Absent`]; the [`contract!`] macro fills them
//!   in, [`Inline`] composes a contract from explicit types.
//! - A client or handler that disagrees with its contract does not compile.
//!   The crate does no I/O and has no runtime failure modes besides the flat
//!   wire form of [`Merged`].
//! - The `users` module holds the contracts of the example user API so client
//!   and server depend on one declaration.

pub mod client;
pub mod contract;
pub mod error;
pub mod merge;
pub mod server;
pub mod users;

pub use client::{client_fn, ClientContract, ClientFn, ClientRequest};
pub use contract::{Absent, Contract, Inline};
pub use error::{MergeError, Side};
pub use merge::Merged;
pub use server::{ApiContract, ApiRequest, ApiRequestOf, ApiResponse};
