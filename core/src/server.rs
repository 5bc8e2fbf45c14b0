//! Server-handler shape derived from a contract.
//!
//! # Design
//! A handler receives the params and the body as two separate fields of an
//! [`ApiRequest`] and completes by calling the [`ApiResponse`] capability it
//! is handed. Capability methods consume `self`, so a handler cannot issue a
//! second terminal call (`send` or `send_status`); whether it issues one at
//! all is the host framework's concern.

use std::future::Future;

use crate::contract::Contract;

/// The request a handler for some contract receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest<P, B> {
    pub params: P,
    pub body: B,
}

/// The [`ApiRequest`] derived from contract `C`.
pub type ApiRequestOf<C> = ApiRequest<<C as Contract>::RequestParams, <C as Contract>::RequestBody>;

/// Response-emitting capability for responses of type `B`.
///
/// ```
/// use contract_core::users::User;
/// use contract_core::ApiResponse;
///
/// fn reply<R: ApiResponse<User>>(response: R, user: User) {
///     response.status(200).send(user);
/// }
/// ```
///
/// Only `B` can be sent:
///
/// ```compile_fail
/// use contract_core::users::User;
/// use contract_core::ApiResponse;
///
/// fn reply<R: ApiResponse<User>>(response: R) {
///     response.status(200).send("ada".to_string());
/// }
/// ```
///
/// and only once:
///
/// ```compile_fail
/// use contract_core::users::User;
/// use contract_core::ApiResponse;
///
/// fn reply<R: ApiResponse<User>>(response: R, user: User) {
///     response.send_status(204);
///     response.send(user);
/// }
/// ```
pub trait ApiResponse<B>: Sized {
    /// Finish the response with `body`.
    fn send(self, body: B);

    /// Finish the response with only a status code.
    fn send_status(self, code: u16);

    /// Record a status code for the subsequent `send`.
    #[must_use = "a status alone does not finish the response"]
    fn status(self, code: u16) -> Self;
}

/// What the server side of `C` must look like.
///
/// ```
/// use contract_core::users::{PatchUserContract, User};
/// use contract_core::{ApiContract, ApiRequestOf, ApiResponse};
///
/// struct Patch;
///
/// impl ApiContract<PatchUserContract> for Patch {
///     async fn handle<R>(&self, request: ApiRequestOf<PatchUserContract>, response: R)
///     where
///         R: ApiResponse<User> + Send,
///     {
///         let mut user = request.body;
///         user.username = request.params.username;
///         response.send(user);
///     }
/// }
/// ```
///
/// A handler takes params and body apart, never the client's merged input:
///
/// ```compile_fail
/// use contract_core::users::{PatchUserContract, User, UsernameParams};
/// use contract_core::{ApiContract, ApiResponse, Merged};
///
/// struct Patch;
///
/// impl ApiContract<PatchUserContract> for Patch {
///     async fn handle<R>(&self, request: Merged<UsernameParams, User>, response: R)
///     where
///         R: ApiResponse<User> + Send,
///     {
///         response.send(request.body);
///     }
/// }
/// ```
///
/// and answers with the contract's response body:
///
/// ```compile_fail
/// use contract_core::users::{PatchUserContract, User};
/// use contract_core::{ApiContract, ApiRequestOf, ApiResponse};
///
/// struct Patch;
///
/// impl ApiContract<PatchUserContract> for Patch {
///     async fn handle<R>(&self, request: ApiRequestOf<PatchUserContract>, response: R)
///     where
///         R: ApiResponse<User> + Send,
///     {
///         response.send(request.params);
///     }
/// }
/// ```
pub trait ApiContract<C: Contract>: Send + Sync {
    fn handle<R>(&self, request: ApiRequestOf<C>, response: R) -> impl Future<Output = ()> + Send
    where
        R: ApiResponse<C::ResponseBody> + Send;
}
