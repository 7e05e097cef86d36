//! Social Surface - post.*, comment.* and friend.* methods

use super::RpcHandler;
use crate::error::to_rpc_error;
use crate::types::{
    AcceptFriendRequest, AcceptFriendResponse, CommentResponse, CommentView, CreateCommentRequest,
    CreatePostRequest, DeleteCommentRequest, DeleteCommentResponse, DeletePostRequest,
    DeletePostResponse, FriendRequestView, FriendRequestsRequest, FriendRequestsResponse,
    FriendView, ListCommentsRequest, ListCommentsResponse, ListFriendsRequest,
    ListFriendsResponse, ListPostsRequest, ListPostsResponse, PostResponse, PostView,
    RejectFriendRequest, RejectFriendResponse, RemoveFriendRequest, RemoveFriendRequestRequest,
    RemoveFriendRequestResponse, RemoveFriendResponse, SendFriendRequestRequest,
    SendFriendRequestResponse, UpdateCommentRequest, UpdatePostRequest,
};
use jsonrpsee::types::ErrorObjectOwned;
use tradepost_core::domain::UserId;

impl RpcHandler {
    /// post.create.v1
    pub async fn create_post(
        &self,
        params: CreatePostRequest,
    ) -> Result<PostResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        let post = self
            .ctx
            .posts
            .create(&caller, &params.content, params.options)
            .await
            .map_err(to_rpc_error)?;

        let author_username = self.display_name(&caller).await?;
        Ok(PostResponse {
            post: PostView::from_post(&post, author_username),
        })
    }

    /// post.list.v1
    pub async fn list_posts(
        &self,
        params: ListPostsRequest,
    ) -> Result<ListPostsResponse, ErrorObjectOwned> {
        let posts = match &params.author_id {
            Some(author) => self.ctx.posts.list_by_author(author).await,
            None => self.ctx.posts.list().await,
        }
        .map_err(to_rpc_error)?;

        let author_ids: Vec<UserId> = posts.iter().map(|p| p.author.clone()).collect();
        let usernames = self.display_names(&author_ids).await?;

        Ok(ListPostsResponse {
            posts: posts
                .iter()
                .zip(usernames)
                .map(|(post, username)| PostView::from_post(post, username))
                .collect(),
        })
    }

    /// post.update.v1
    pub async fn update_post(
        &self,
        params: UpdatePostRequest,
    ) -> Result<PostResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .posts
            .assert_author(&params.post_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        let post = self
            .ctx
            .posts
            .update(&params.post_id, params.content, params.options)
            .await
            .map_err(to_rpc_error)?;

        let author_username = self.display_name(&post.author).await?;
        Ok(PostResponse {
            post: PostView::from_post(&post, author_username),
        })
    }

    /// post.delete.v1
    pub async fn delete_post(
        &self,
        params: DeletePostRequest,
    ) -> Result<DeletePostResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .posts
            .assert_author(&params.post_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        self.ctx
            .posts
            .delete(&params.post_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(DeletePostResponse { deleted: true })
    }

    /// comment.create.v1
    pub async fn create_comment(
        &self,
        params: CreateCommentRequest,
    ) -> Result<CommentResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        let comment = self
            .ctx
            .comments
            .create(&params.item_id, &caller, &params.body)
            .await
            .map_err(to_rpc_error)?;

        let author_username = self.display_name(&caller).await?;
        Ok(CommentResponse {
            comment: CommentView::from_comment(&comment, author_username),
        })
    }

    /// comment.list.v1
    pub async fn list_comments(
        &self,
        params: ListCommentsRequest,
    ) -> Result<ListCommentsResponse, ErrorObjectOwned> {
        let comments = self
            .ctx
            .comments
            .list_for_item(&params.item_id)
            .await
            .map_err(to_rpc_error)?;

        let author_ids: Vec<UserId> = comments.iter().map(|c| c.author.clone()).collect();
        let usernames = self.display_names(&author_ids).await?;

        Ok(ListCommentsResponse {
            comments: comments
                .iter()
                .zip(usernames)
                .map(|(comment, username)| CommentView::from_comment(comment, username))
                .collect(),
        })
    }

    /// comment.update.v1
    pub async fn update_comment(
        &self,
        params: UpdateCommentRequest,
    ) -> Result<CommentResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .comments
            .assert_commenter(&params.comment_id, &params.item_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        let comment = self
            .ctx
            .comments
            .update(&params.comment_id, &params.body)
            .await
            .map_err(to_rpc_error)?;

        let author_username = self.display_name(&comment.author).await?;
        Ok(CommentResponse {
            comment: CommentView::from_comment(&comment, author_username),
        })
    }

    /// comment.delete.v1
    pub async fn delete_comment(
        &self,
        params: DeleteCommentRequest,
    ) -> Result<DeleteCommentResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .comments
            .assert_commenter(&params.comment_id, &params.item_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        self.ctx
            .comments
            .delete(&params.comment_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(DeleteCommentResponse { deleted: true })
    }

    /// friend.send_request.v1
    pub async fn send_friend_request(
        &self,
        params: SendFriendRequestRequest,
    ) -> Result<SendFriendRequestResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        // The target must be a live account; the friend graph itself only
        // stores IDs and would accept anything.
        self.ctx
            .users
            .get_by_id(&params.to_user_id)
            .await
            .map_err(to_rpc_error)?;

        let request = self
            .ctx
            .friends
            .send_request(&caller, &params.to_user_id)
            .await
            .map_err(to_rpc_error)?;

        let from_username = self.display_name(&request.from_user).await?;
        let to_username = self.display_name(&request.to_user).await?;
        Ok(SendFriendRequestResponse {
            request: FriendRequestView::from_request(&request, from_username, to_username),
        })
    }

    /// friend.accept.v1
    pub async fn accept_friend_request(
        &self,
        params: AcceptFriendRequest,
    ) -> Result<AcceptFriendResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .friends
            .accept_request(&params.from_user_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        Ok(AcceptFriendResponse { accepted: true })
    }

    /// friend.reject.v1
    pub async fn reject_friend_request(
        &self,
        params: RejectFriendRequest,
    ) -> Result<RejectFriendResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .friends
            .reject_request(&params.from_user_id, &caller)
            .await
            .map_err(to_rpc_error)?;

        Ok(RejectFriendResponse { rejected: true })
    }

    /// friend.remove_request.v1
    pub async fn remove_friend_request(
        &self,
        params: RemoveFriendRequestRequest,
    ) -> Result<RemoveFriendRequestResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .friends
            .remove_request(&caller, &params.to_user_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(RemoveFriendRequestResponse { removed: true })
    }

    /// friend.remove.v1
    pub async fn remove_friend(
        &self,
        params: RemoveFriendRequest,
    ) -> Result<RemoveFriendResponse, ErrorObjectOwned> {
        self.throttle()?;
        let caller = self.caller(&params.session).await?;

        self.ctx
            .friends
            .remove_friend(&caller, &params.friend_user_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(RemoveFriendResponse { removed: true })
    }

    /// friend.list.v1
    pub async fn list_friends(
        &self,
        params: ListFriendsRequest,
    ) -> Result<ListFriendsResponse, ErrorObjectOwned> {
        let caller = self.caller(&params.session).await?;

        let friend_ids = self
            .ctx
            .friends
            .list_friends(&caller)
            .await
            .map_err(to_rpc_error)?;
        let usernames = self.display_names(&friend_ids).await?;

        Ok(ListFriendsResponse {
            friends: friend_ids
                .into_iter()
                .zip(usernames)
                .map(|(user_id, username)| FriendView { user_id, username })
                .collect(),
        })
    }

    /// friend.requests.v1
    pub async fn list_friend_requests(
        &self,
        params: FriendRequestsRequest,
    ) -> Result<FriendRequestsResponse, ErrorObjectOwned> {
        let caller = self.caller(&params.session).await?;

        let requests = self
            .ctx
            .friends
            .list_requests(&caller)
            .await
            .map_err(to_rpc_error)?;

        let mut views = Vec::with_capacity(requests.len());
        for request in &requests {
            let from_username = self.display_name(&request.from_user).await?;
            let to_username = self.display_name(&request.to_user).await?;
            views.push(FriendRequestView::from_request(
                request,
                from_username,
                to_username,
            ));
        }

        Ok(FriendRequestsResponse { requests: views })
    }
}
