//! Route handlers for the user API, one per contract.

use contract_core::users::{
    CreateUserContract, DeleteUserContract, GetUserContract, ListUsersContract, PatchUserContract, User,
};
use contract_core::{Absent, ApiContract, ApiRequest, ApiRequestOf, ApiResponse};

use crate::Db;

pub struct ListUsers(pub Db);

impl ApiContract<ListUsersContract> for ListUsers {
    async fn handle<R>(&self, _request: ApiRequestOf<ListUsersContract>, response: R)
    where
        R: ApiResponse<Vec<User>> + Send,
    {
        let mut users: Vec<User> = self.0.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        response.send(users);
    }
}

pub struct GetUser(pub Db);

impl ApiContract<GetUserContract> for GetUser {
    async fn handle<R>(&self, request: ApiRequestOf<GetUserContract>, response: R)
    where
        R: ApiResponse<User> + Send,
    {
        let found = self.0.read().await.get(&request.params.username).cloned();
        match found {
            Some(user) => response.send(user),
            None => response.send_status(404),
        }
    }
}

pub struct CreateUser(pub Db);

impl ApiContract<CreateUserContract> for CreateUser {
    async fn handle<R>(&self, request: ApiRequestOf<CreateUserContract>, response: R)
    where
        R: ApiResponse<User> + Send,
    {
        let user = request.body;
        let mut users = self.0.write().await;
        if users.contains_key(&user.username) {
            return response.send_status(409);
        }
        users.insert(user.username.clone(), user.clone());
        response.status(201).send(user);
    }
}

/// Replaces the stored user with the body. The body's `username` wins over
/// the path, so a patch can rename a user.
pub struct PatchUser(pub Db);

impl ApiContract<PatchUserContract> for PatchUser {
    async fn handle<R>(&self, request: ApiRequestOf<PatchUserContract>, response: R)
    where
        R: ApiResponse<User> + Send,
    {
        let ApiRequest { params, body } = request;
        let mut users = self.0.write().await;
        if !users.contains_key(&params.username) {
            return response.send_status(404);
        }
        if body.username != params.username && users.contains_key(&body.username) {
            return response.send_status(409);
        }
        users.remove(&params.username);
        users.insert(body.username.clone(), body.clone());
        response.status(200).send(body);
    }
}

pub struct DeleteUser(pub Db);

impl ApiContract<DeleteUserContract> for DeleteUser {
    async fn handle<R>(&self, request: ApiRequestOf<DeleteUserContract>, response: R)
    where
        R: ApiResponse<Absent> + Send,
    {
        match self.0.write().await.remove(&request.params.username) {
            Some(_) => response.send_status(204),
            None => response.send_status(404),
        }
    }
}
