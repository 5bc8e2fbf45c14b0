//! axum glue for contract handlers.
//!
//! # Design
//! - [`Contracted`] extracts `ApiRequestOf<C>`: path parameters become a JSON
//!   object of strings decoded into `C::RequestParams`, the body is decoded
//!   into `C::RequestBody` with an empty body read as `null`.
//! - [`Responder`] is the response capability handed to handlers. Its terminal
//!   calls push an axum `Response` through a oneshot channel.
//! - [`dispatch`] runs a handler and answers with whatever it sent, or 500 if
//!   it finished without sending anything.

use std::any::type_name;
use std::collections::HashMap;
use std::marker::PhantomData;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contract_core::{ApiContract, ApiRequest, ApiRequestOf, ApiResponse, Contract};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Extractor for the request half of contract `C`.
pub struct Contracted<C: Contract>(pub ApiRequestOf<C>);

impl<S, C> FromRequest<S> for Contracted<C>
where
    S: Send + Sync,
    C: Contract,
    C::RequestParams: DeserializeOwned + Send,
    C::RequestBody: DeserializeOwned + Send,
{
    type Rejection = ContractRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let raw = match Path::<HashMap<String, String>>::from_request_parts(&mut parts, state).await {
            Ok(Path(raw)) => raw,
            Err(PathRejection::MissingPathParams(_)) => HashMap::new(),
            Err(rejection) => return Err(rejection.into()),
        };
        let params = decode_params(raw)?;
        let bytes = Bytes::from_request(Request::from_parts(parts, body), state).await?;
        let body = decode_body(&bytes)?;
        Ok(Contracted(ApiRequest { params, body }))
    }
}

fn decode_params<P: DeserializeOwned>(raw: HashMap<String, String>) -> Result<P, ContractRejection> {
    let object: Map<String, Value> = raw.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
    P::deserialize(Value::Object(object)).map_err(ContractRejection::InvalidParams)
}

fn decode_body<B: DeserializeOwned>(bytes: &[u8]) -> Result<B, ContractRejection> {
    if bytes.is_empty() {
        return B::deserialize(Value::Null).map_err(ContractRejection::InvalidBody);
    }
    serde_json::from_slice(bytes).map_err(ContractRejection::InvalidBody)
}

/// Why a request could not be turned into `ApiRequestOf<C>`.
#[derive(Debug, Error)]
pub enum ContractRejection {
    #[error(transparent)]
    Path(#[from] PathRejection),

    #[error("invalid request params: {0}")]
    InvalidParams(#[source] serde_json::Error),

    #[error(transparent)]
    Body(#[from] BytesRejection),

    #[error("invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),
}

impl IntoResponse for ContractRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            ContractRejection::Path(rejection) => rejection.status(),
            ContractRejection::Body(rejection) => rejection.status(),
            ContractRejection::InvalidParams(_) => StatusCode::BAD_REQUEST,
            ContractRejection::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        debug!(%status, error = %self, "rejected request");
        (status, self.to_string()).into_response()
    }
}

/// The response capability axum handlers receive.
pub struct Responder<B> {
    status: StatusCode,
    tx: oneshot::Sender<Response>,
    _body: PhantomData<fn(B)>,
}

impl<B> Responder<B> {
    /// A fresh responder (status 200) and the receiving end of its response.
    pub fn channel() -> (Self, oneshot::Receiver<Response>) {
        let (tx, rx) = oneshot::channel();
        let responder = Responder {
            status: StatusCode::OK,
            tx,
            _body: PhantomData,
        };
        (responder, rx)
    }

    fn finish(self, response: Response) {
        if self.tx.send(response).is_err() {
            debug!("request went away before the response was sent");
        }
    }
}

fn status_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or_else(|_| {
        warn!(code, "handler used an invalid status code");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

impl<B: Serialize> ApiResponse<B> for Responder<B> {
    fn send(self, body: B) {
        let response = (self.status, Json(body)).into_response();
        self.finish(response);
    }

    fn send_status(self, code: u16) {
        self.finish(status_code(code).into_response());
    }

    fn status(mut self, code: u16) -> Self {
        self.status = status_code(code);
        self
    }
}

/// Run `handler` on `request` and return the response it sent.
pub async fn dispatch<C, H>(handler: &H, request: ApiRequestOf<C>) -> Response
where
    C: Contract,
    C::ResponseBody: Serialize,
    H: ApiContract<C>,
{
    let (responder, sent) = Responder::<C::ResponseBody>::channel();
    handler.handle(request, responder).await;
    match sent.await {
        Ok(response) => {
            debug!(contract = type_name::<C>(), status = %response.status(), "handled");
            response
        }
        Err(_) => {
            warn!(contract = type_name::<C>(), "handler finished without responding");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
