//! axum server for the user API, shaped by the contracts in
//! `contract_core::users`.
//!
//! Every route decodes its request through [`Contracted`] and hands it to a
//! handler implementing [`ApiContract`](contract_core::ApiContract) for the
//! route's contract, so a handler that drifts from its contract fails to
//! compile.

pub mod adapter;
pub mod handlers;

use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, response::Response, routing::get, Router};
use contract_core::users::{
    CreateUserContract, DeleteUserContract, GetUserContract, ListUsersContract, PatchUserContract, User,
};
use tokio::{net::TcpListener, sync::RwLock};

pub use adapter::{dispatch, ContractRejection, Contracted, Responder};
use handlers::{CreateUser, DeleteUser, GetUser, ListUsers, PatchUser};

pub type Db = Arc<RwLock<HashMap<String, User>>>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over an existing store.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/user/{username}",
            get(get_user).patch(patch_user).delete(delete_user),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(
    State(db): State<Db>,
    Contracted(request): Contracted<ListUsersContract>,
) -> Response {
    dispatch::<ListUsersContract, _>(&ListUsers(db), request).await
}

async fn get_user(State(db): State<Db>, Contracted(request): Contracted<GetUserContract>) -> Response {
    dispatch::<GetUserContract, _>(&GetUser(db), request).await
}

async fn create_user(
    State(db): State<Db>,
    Contracted(request): Contracted<CreateUserContract>,
) -> Response {
    dispatch::<CreateUserContract, _>(&CreateUser(db), request).await
}

async fn patch_user(
    State(db): State<Db>,
    Contracted(request): Contracted<PatchUserContract>,
) -> Response {
    dispatch::<PatchUserContract, _>(&PatchUser(db), request).await
}

async fn delete_user(
    State(db): State<Db>,
    Contracted(request): Contracted<DeleteUserContract>,
) -> Response {
    dispatch::<DeleteUserContract, _>(&DeleteUser(db), request).await
}
