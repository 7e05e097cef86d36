//! Account Surface - session.* and user.* methods

use super::RpcHandler;
use crate::error::to_rpc_error;
use crate::types::{
    CreateUserRequest, CreateUserResponse, CurrentSessionRequest, CurrentSessionResponse,
    DeleteUserRequest, DeleteUserResponse, GetUserRequest, GetUserResponse, ListUsersRequest,
    ListUsersResponse, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse,
    UpdatePasswordRequest, UpdatePasswordResponse, UpdateUsernameRequest, UpdateUsernameResponse,
    UserView,
};
use jsonrpsee::types::ErrorObjectOwned;

impl RpcHandler {
    /// session.login.v1
    pub async fn login(&self, params: LoginRequest) -> Result<LoginResponse, ErrorObjectOwned> {
        // Credential checks share the mutation budget; unthrottled login
        // would be a free brute-force oracle.
        self.throttle()?;

        let user = self
            .ctx
            .users
            .authenticate(&params.username, &params.password)
            .await
            .map_err(to_rpc_error)?;

        let session = self
            .ctx
            .sessions
            .start(&user.id)
            .await
            .map_err(to_rpc_error)?;

        Ok(LoginResponse {
            session: session.token,
            expires_at: session.expires_at,
            user: UserView::from_user(&user),
        })
    }

    /// session.logout.v1
    pub async fn logout(&self, params: LogoutRequest) -> Result<LogoutResponse, ErrorObjectOwned> {
        self.throttle()?;

        self.ctx
            .sessions
            .end(&params.session)
            .await
            .map_err(to_rpc_error)?;

        Ok(LogoutResponse { logged_out: true })
    }

    /// session.current.v1
    pub async fn current_session(
        &self,
        params: CurrentSessionRequest,
    ) -> Result<CurrentSessionResponse, ErrorObjectOwned> {
        let caller = self.caller(&params.session).await?;
        let user = self.ctx.users.get_by_id(&caller).await.map_err(to_rpc_error)?;

        Ok(CurrentSessionResponse {
            user: UserView::from_user(&user),
        })
    }

    /// user.create.v1
    pub async fn create_user(
        &self,
        params: CreateUserRequest,
    ) -> Result<CreateUserResponse, ErrorObjectOwned> {
        self.throttle()?;

        let user = self
            .ctx
            .users
            .register(&params.username, &params.password)
            .await
            .map_err(to_rpc_error)?;

        Ok(CreateUserResponse {
            user: UserView::from_user(&user),
        })
    }

    /// user.list.v1
    pub async fn list_users(
        &self,
        _params: ListUsersRequest,
    ) -> Result<ListUsersResponse, ErrorObjectOwned> {
        let users = self.ctx.users.list().await.map_err(to_rpc_error)?;

        Ok(ListUsersResponse {
            users: users.iter().map(UserView::from_user).collect(),
        })
    }

    /// user.get.v1
    pub async fn get_user(
        &self,
        params: GetUserRequest,
    ) -> Result<GetUserResponse, ErrorObjectOwned> {
        let user = self
            .ctx
            .users
            .get_by_username(&params.username)
            .await
            .map_err(to_rpc_error)?;

        Ok(GetUserResponse {
            user: UserView::from_user(&user),
        })
    }

    /// user.update_username.v1
    pub async fn update_username(
        &self,
        params: UpdateUsernameRequest,
    ) -> Result<UpdateUsernameResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        let user = self
            .ctx
            .users
            .update_username(&caller, &params.new_username)
            .await
            .map_err(to_rpc_error)?;

        Ok(UpdateUsernameResponse {
            user: UserView::from_user(&user),
        })
    }

    /// user.update_password.v1
    pub async fn update_password(
        &self,
        params: UpdatePasswordRequest,
    ) -> Result<UpdatePasswordResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .users
            .update_password(&caller, &params.current_password, &params.new_password)
            .await
            .map_err(to_rpc_error)?;

        Ok(UpdatePasswordResponse { updated: true })
    }

    /// user.delete.v1
    pub async fn delete_user(
        &self,
        params: DeleteUserRequest,
    ) -> Result<DeleteUserResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx.users.delete(&caller).await.map_err(to_rpc_error)?;

        Ok(DeleteUserResponse { deleted: true })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{signed_up, test_handler};
    use crate::error::code;
    use crate::types::*;

    #[tokio::test]
    async fn test_login_opens_session_for_valid_credentials() {
        let handler = test_handler(&[]);
        handler.ctx.users.register("mina", "password1").await.unwrap();

        let resp = handler
            .login(LoginRequest {
                username: "mina".to_string(),
                password: "password1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.user.username, "mina");
        assert!(!resp.session.is_empty());

        // The returned token resolves back to the same user
        let current = handler
            .current_session(CurrentSessionRequest {
                session: resp.session,
            })
            .await
            .unwrap();
        assert_eq!(current.user.id, resp.user.id);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password_as_unauthenticated() {
        let handler = test_handler(&[]);
        handler.ctx.users.register("mina", "password1").await.unwrap();

        let err = handler
            .login(LoginRequest {
                username: "mina".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), code::UNAUTHENTICATED);
    }

    #[tokio::test]
    async fn test_logout_invalidates_the_token() {
        let handler = test_handler(&[]);
        let (_, token) = signed_up(&handler, "mina").await;

        handler
            .logout(LogoutRequest {
                session: token.clone(),
            })
            .await
            .unwrap();

        let err = handler
            .current_session(CurrentSessionRequest { session: token })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::UNAUTHENTICATED);
    }

    #[tokio::test]
    async fn test_create_user_then_duplicate_is_conflict() {
        let handler = test_handler(&[]);

        let resp = handler
            .create_user(CreateUserRequest {
                username: "mina".to_string(),
                password: "password1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.user.username, "mina");

        let err = handler
            .create_user(CreateUserRequest {
                username: "mina".to_string(),
                password: "password2".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_username_applies_to_the_caller_only() {
        let handler = test_handler(&[]);
        let (user_id, token) = signed_up(&handler, "mina").await;
        signed_up(&handler, "june").await;

        let resp = handler
            .update_username(UpdateUsernameRequest {
                session: token,
                new_username: "mina_market".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.user.id, user_id);
        assert_eq!(resp.user.username, "mina_market");

        let others = handler.list_users(ListUsersRequest {}).await.unwrap();
        assert!(others.users.iter().any(|u| u.username == "june"));
        assert!(!others.users.iter().any(|u| u.username == "mina"));
    }

    #[tokio::test]
    async fn test_delete_user_ends_their_sessions() {
        let handler = test_handler(&[]);
        let (_, token) = signed_up(&handler, "mina").await;

        handler
            .delete_user(DeleteUserRequest {
                session: token.clone(),
            })
            .await
            .unwrap();

        let err = handler
            .current_session(CurrentSessionRequest { session: token })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::UNAUTHENTICATED);
    }
}
