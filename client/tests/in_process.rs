//! Drive the user API through `ClientContract` against the server router in
//! process, with no socket in between.

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use contract_core::users::{
    CreateUserContract, DeleteUserContract, GetUserContract, ListUsersContract, PatchUserContract, User,
    UsernameParams,
};
use contract_core::{Absent, ClientContract, Merged};
use http_body_util::BodyExt;
use tower::ServiceExt;
use user_client::{ClientError, HttpMethod, HttpRequest, HttpResponse, Transport, UserApi};

/// Sends each request straight into a fresh clone of the router.
struct InProcess(Router);

impl Transport for InProcess {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = Request::builder().method(request.method.as_str()).uri(&request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let http_request = builder
            .body(Body::from(request.body.unwrap_or_default()))
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let response = self
            .0
            .clone()
            .oneshot(http_request)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?
            .to_bytes();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

fn api() -> UserApi<InProcess> {
    UserApi::new("", InProcess(user_server::app()))
}

fn ada() -> User {
    User {
        username: "ada".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
    }
}

fn by_name(username: &str) -> UsernameParams {
    UsernameParams {
        username: username.to_string(),
    }
}

#[tokio::test]
async fn lifecycle_through_contracts() {
    let api = api();

    let users = ClientContract::<ListUsersContract>::call(&api, Merged::new(Absent, Absent))
        .await
        .unwrap();
    assert!(users.is_empty());

    let created = ClientContract::<CreateUserContract>::call(&api, Merged::new(Absent, ada()))
        .await
        .unwrap();
    assert_eq!(created, ada());

    let fetched = ClientContract::<GetUserContract>::call(&api, Merged::new(by_name("ada"), Absent))
        .await
        .unwrap();
    assert_eq!(fetched, created);

    let patched = ClientContract::<PatchUserContract>::call(
        &api,
        Merged::new(
            by_name("ada"),
            User {
                first_name: "Augusta".to_string(),
                ..ada()
            },
        ),
    )
    .await
    .unwrap();
    assert_eq!(patched.first_name, "Augusta");
    assert_eq!(patched.username, "ada");

    ClientContract::<DeleteUserContract>::call(&api, Merged::new(by_name("ada"), Absent))
        .await
        .unwrap();

    let err = ClientContract::<GetUserContract>::call(&api, Merged::new(by_name("ada"), Absent))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
}

#[tokio::test]
async fn duplicate_create_is_an_http_error() {
    let api = api();
    ClientContract::<CreateUserContract>::call(&api, Merged::new(Absent, ada()))
        .await
        .unwrap();
    let err = ClientContract::<CreateUserContract>::call(&api, Merged::new(Absent, ada()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 409, .. }));
}

#[tokio::test]
async fn transport_sees_the_merged_patch_body() {
    let request = user_client::UserClient::new("")
        .build_patch_user(&Merged::new(by_name("ada"), ada()))
        .unwrap();
    assert_eq!(request.method, HttpMethod::Patch);
    assert_eq!(request.path, "/user/ada");
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::to_value(ada()).unwrap());
}

#[tokio::test]
async fn usernames_with_reserved_characters_round_trip() {
    let api = api();

    for name in ["a b", "x/y", "q?z", "all of / them?"] {
        let user = User {
            username: name.to_string(),
            ..ada()
        };
        let created = ClientContract::<CreateUserContract>::call(&api, Merged::new(Absent, user.clone()))
            .await
            .unwrap();
        assert_eq!(created, user, "{name}: create");

        let fetched = ClientContract::<GetUserContract>::call(&api, Merged::new(by_name(name), Absent))
            .await
            .unwrap();
        assert_eq!(fetched, user, "{name}: get");

        let patched = ClientContract::<PatchUserContract>::call(
            &api,
            Merged::new(
                by_name(name),
                User {
                    last_name: "King".to_string(),
                    ..user.clone()
                },
            ),
        )
        .await
        .unwrap();
        assert_eq!(patched.last_name, "King", "{name}: patch");

        ClientContract::<DeleteUserContract>::call(&api, Merged::new(by_name(name), Absent))
            .await
            .unwrap();
        let err = ClientContract::<GetUserContract>::call(&api, Merged::new(by_name(name), Absent))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound), "{name}: gone after delete");
    }
}
