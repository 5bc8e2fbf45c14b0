//! Full user lifecycle against the live server.
//!
//! # Design
//! Starts the server on a random port, then exercises every user contract
//! over real HTTP. ureq is blocking, so the transport runs it on tokio's
//! blocking pool.

use contract_core::users::{
    CreateUserContract, DeleteUserContract, GetUserContract, ListUsersContract, PatchUserContract, User,
    UsernameParams,
};
use contract_core::{Absent, ClientContract, Merged};
use user_client::{ClientError, HttpMethod, HttpRequest, HttpResponse, Transport, UserApi};

struct Ureq;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`.
fn execute_blocking(req: HttpRequest) -> Result<HttpResponse, ClientError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    };
    let mut response = result.map_err(|e| ClientError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

impl Transport for Ureq {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        tokio::task::spawn_blocking(move || execute_blocking(request))
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn user_lifecycle() {
    // Step 1: start the server on a random port.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(user_server::run(listener));

    let api = UserApi::new(&format!("http://{addr}"), Ureq);
    let ada = User {
        username: "ada".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
    };
    let by_name = |username: &str| UsernameParams {
        username: username.to_string(),
    };

    // Step 2: list — should be empty.
    let users = ClientContract::<ListUsersContract>::call(&api, Merged::new(Absent, Absent))
        .await
        .unwrap();
    assert!(users.is_empty(), "expected empty list");

    // Step 3: create.
    let created = ClientContract::<CreateUserContract>::call(&api, Merged::new(Absent, ada.clone()))
        .await
        .unwrap();
    assert_eq!(created, ada);

    // Step 4: patch, renaming through the body's username.
    let renamed = User {
        username: "countess".to_string(),
        ..ada.clone()
    };
    let patched = ClientContract::<PatchUserContract>::call(&api, Merged::new(by_name("ada"), renamed.clone()))
        .await
        .unwrap();
    assert_eq!(patched, renamed);

    // Step 5: the old name is gone.
    let err = ClientContract::<GetUserContract>::call(&api, Merged::new(by_name("ada"), Absent))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound));

    // Step 6: delete, then deleting again is NotFound.
    ClientContract::<DeleteUserContract>::call(&api, Merged::new(by_name("countess"), Absent))
        .await
        .unwrap();
    let err = ClientContract::<DeleteUserContract>::call(&api, Merged::new(by_name("countess"), Absent))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
}
