//! Client-callable shape derived from a contract.
//!
//! # Design
//! A client for contract `C` is anything that takes one
//! [`ClientRequest<C>`] (params and body merged) and asynchronously resolves
//! to `C::ResponseBody`. Rust futures cannot reject, so the output is a
//! `Result` with an implementation-chosen error type. How the request is
//! transmitted is entirely up to the implementation.

use std::future::Future;

use crate::contract::Contract;
use crate::merge::Merged;

/// The single input a client call for `C` accepts.
///
/// `C` has to be a [`Contract`]:
///
/// ```compile_fail
/// use contract_core::ClientRequest;
///
/// struct NotAContract;
///
/// let _request: Option<ClientRequest<NotAContract>> = None;
/// ```
pub type ClientRequest<C> = Merged<<C as Contract>::RequestParams, <C as Contract>::RequestBody>;

/// What the client side of `C` must look like.
///
/// ```
/// use std::convert::Infallible;
///
/// use contract_core::users::{GetUserContract, User};
/// use contract_core::{client_fn, ClientContract, ClientRequest, Contract};
///
/// fn expects<C: Contract, T: ClientContract<C>>(_: &T) {}
///
/// let client = client_fn(|request: ClientRequest<GetUserContract>| async move {
///     Ok::<_, Infallible>(User {
///         username: request.params.username,
///         first_name: "Ada".to_string(),
///         last_name: "Lovelace".to_string(),
///     })
/// });
/// expects::<GetUserContract, _>(&client);
/// ```
///
/// A client resolving to anything but the response body is not a client of `C`:
///
/// ```compile_fail
/// use std::convert::Infallible;
///
/// use contract_core::users::GetUserContract;
/// use contract_core::{client_fn, ClientContract, ClientRequest, Contract};
///
/// fn expects<C: Contract, T: ClientContract<C>>(_: &T) {}
///
/// let client = client_fn(|request: ClientRequest<GetUserContract>| async move {
///     Ok::<_, Infallible>(request.params)
/// });
/// expects::<GetUserContract, _>(&client);
/// ```
pub trait ClientContract<C: Contract> {
    type Error;

    fn call(
        &self,
        request: ClientRequest<C>,
    ) -> impl Future<Output = Result<C::ResponseBody, Self::Error>> + Send;
}

/// A [`ClientContract`] backed by a plain async closure. See [`client_fn`].
#[derive(Debug, Clone, Copy)]
pub struct ClientFn<F>(F);

/// Use a closure `Fn(ClientRequest<C>) -> impl Future<Output = Result<_, _>>`
/// as a client for `C`.
pub fn client_fn<F>(f: F) -> ClientFn<F> {
    ClientFn(f)
}

impl<C, F, Fut, E> ClientContract<C> for ClientFn<F>
where
    C: Contract,
    F: Fn(ClientRequest<C>) -> Fut,
    Fut: Future<Output = Result<C::ResponseBody, E>> + Send,
{
    type Error = E;

    fn call(&self, request: ClientRequest<C>) -> impl Future<Output = Result<C::ResponseBody, E>> + Send {
        (self.0)(request)
    }
}
