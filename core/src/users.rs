//! Contracts for the user API shared by `user-client` and `user-server`.

use serde::{Deserialize, Serialize};

use crate::contract;

/// A user record, identical on both sides of the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Path parameters of `/user/{username}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsernameParams {
    pub username: String,
}

contract! {
    /// `GET /users`
    pub ListUsersContract {
        response_body: Vec<User>,
    }
}

contract! {
    /// `GET /user/{username}`
    pub GetUserContract {
        request_params: UsernameParams,
        response_body: User,
    }
}

contract! {
    /// `POST /users`
    pub CreateUserContract {
        request_body: User,
        response_body: User,
    }
}

contract! {
    /// `PATCH /user/{username}`. The body replaces the stored record, its
    /// `username` included.
    pub PatchUserContract {
        request_params: UsernameParams,
        request_body: User,
        response_body: User,
    }
}

contract! {
    /// `DELETE /user/{username}`
    pub DeleteUserContract {
        request_params: UsernameParams,
    }
}
