use validator::Validate;

use crate::{
    http::{Actor, Error},
    schema::{Comment, CommentError},
    services::parse_id,
    types::{self, form::posts::TextRequest},
    App,
};

#[derive(Debug)]
pub struct AddComment<'a> {
    pub post_id: &'a str,
    pub form: TextRequest,
}

impl AddComment<'_> {
    #[tracing::instrument(skip_all, fields(post_id = self.post_id), name = "services.posts.add_comment")]
    pub async fn perform(self, app: &App, actor: &Actor) -> Result<Vec<Comment>, Error> {
        self.form.validate()?;

        let Some(author) = app.store.find_user(actor.user_id).await? else {
            return Err(types::Error::UserNotFound.into());
        };

        let Some(post_id) = parse_id(self.post_id) else {
            return Err(types::Error::UnknownPost.into());
        };

        let Some(mut post) = app.store.find_post(post_id).await? else {
            return Err(types::Error::UnknownPost.into());
        };

        post.add_comment(&author, self.form.text);
        app.store.save_post(&post).await?;

        Ok(post.comments)
    }
}

#[derive(Debug)]
pub struct DeleteComment<'a> {
    pub post_id: &'a str,
    pub comment_id: &'a str,
}

impl DeleteComment<'_> {
    #[tracing::instrument(
        skip_all,
        fields(post_id = self.post_id, comment_id = self.comment_id),
        name = "services.posts.delete_comment"
    )]
    pub async fn perform(self, app: &App, actor: &Actor) -> Result<Vec<Comment>, Error> {
        let Some(post_id) = parse_id(self.post_id) else {
            return Err(types::Error::UnknownPost.into());
        };

        let Some(mut post) = app.store.find_post(post_id).await? else {
            return Err(types::Error::UnknownPost.into());
        };

        let Some(comment_id) = parse_id(self.comment_id) else {
            return Err(types::Error::CommentNotFound.into());
        };

        match post.remove_comment(comment_id, actor.user_id) {
            Ok(..) => {}
            Err(CommentError::NotFound) => return Err(types::Error::CommentNotFound.into()),
            Err(CommentError::NotOwner) => return Err(types::Error::NotAuthorized.into()),
        }

        app.store.save_post(&post).await?;
        Ok(post.comments)
    }
}
