//! Request builders, response parsers and the contract-backed user client.
//!
//! # Design
//! `UserClient` holds only a `base_url`. Each contract gets a `build_*` method
//! that produces an `HttpRequest` from the contract's merged input and a
//! `parse_*` method that turns an `HttpResponse` into the contract's response.
//! Requests that carry a body send the whole merged input, so params travel
//! both in the path and in the payload.
//!
//! `UserApi` pairs a `UserClient` with a [`Transport`] and implements
//! [`ClientContract`] for every user contract.

use contract_core::users::{
    CreateUserContract, DeleteUserContract, GetUserContract, ListUsersContract, PatchUserContract, User,
};
use contract_core::{Absent, ClientContract, ClientRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Stateless builder and parser for the user API.
#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: String,
}

impl UserClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/users".to_string())
    }

    pub fn build_get_user(&self, request: &ClientRequest<GetUserContract>) -> HttpRequest {
        self.bare(HttpMethod::Get, user_path(&request.params.username))
    }

    pub fn build_create_user(&self, request: &ClientRequest<CreateUserContract>) -> Result<HttpRequest, ClientError> {
        self.with_body(HttpMethod::Post, "/users".to_string(), request)
    }

    pub fn build_patch_user(&self, request: &ClientRequest<PatchUserContract>) -> Result<HttpRequest, ClientError> {
        self.with_body(
            HttpMethod::Patch,
            user_path(&request.params.username),
            request,
        )
    }

    pub fn build_delete_user(&self, request: &ClientRequest<DeleteUserContract>) -> HttpRequest {
        self.bare(HttpMethod::Delete, user_path(&request.params.username))
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ClientError> {
        parse_json(response, 200)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ClientError> {
        parse_json(response, 200)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ClientError> {
        parse_json(response, 201)
    }

    pub fn parse_patch_user(&self, response: HttpResponse) -> Result<User, ClientError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<Absent, ClientError> {
        check_status(&response, 204)?;
        Ok(Absent)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_body<T: Serialize>(&self, method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(input).map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// `/user/{username}` with the username percent-encoded as one path segment.
fn user_path(username: &str) -> String {
    format!("/user/{}", urlencoding::encode(username))
}

/// Map non-success status codes to the appropriate `ClientError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ClientError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ClientError::NotFound);
    }
    Err(ClientError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ClientError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ClientError::Deserialization(e.to_string()))
}

/// User API client whose calls follow the user contracts.
#[derive(Debug, Clone)]
pub struct UserApi<T> {
    client: UserClient,
    transport: T,
}

impl<T: Transport> UserApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: UserClient::new(base_url),
            transport,
        }
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

impl<T: Transport> ClientContract<ListUsersContract> for UserApi<T> {
    type Error = ClientError;

    async fn call(&self, _request: ClientRequest<ListUsersContract>) -> Result<Vec<User>, ClientError> {
        let response = self.round_trip(self.client.build_list_users()).await?;
        self.client.parse_list_users(response)
    }
}

impl<T: Transport> ClientContract<GetUserContract> for UserApi<T> {
    type Error = ClientError;

    async fn call(&self, request: ClientRequest<GetUserContract>) -> Result<User, ClientError> {
        let response = self.round_trip(self.client.build_get_user(&request)).await?;
        self.client.parse_get_user(response)
    }
}

impl<T: Transport> ClientContract<CreateUserContract> for UserApi<T> {
    type Error = ClientError;

    async fn call(&self, request: ClientRequest<CreateUserContract>) -> Result<User, ClientError> {
        let response = self.round_trip(self.client.build_create_user(&request)?).await?;
        self.client.parse_create_user(response)
    }
}

impl<T: Transport> ClientContract<PatchUserContract> for UserApi<T> {
    type Error = ClientError;

    async fn call(&self, request: ClientRequest<PatchUserContract>) -> Result<User, ClientError> {
        let response = self.round_trip(self.client.build_patch_user(&request)?).await?;
        self.client.parse_patch_user(response)
    }
}

impl<T: Transport> ClientContract<DeleteUserContract> for UserApi<T> {
    type Error = ClientError;

    async fn call(&self, request: ClientRequest<DeleteUserContract>) -> Result<Absent, ClientError> {
        let response = self.round_trip(self.client.build_delete_user(&request)).await?;
        self.client.parse_delete_user(response)
    }
}
