use crate::{
    http::{Actor, Error},
    schema::Like,
    services::parse_id,
    types, App,
};

#[derive(Debug)]
pub struct LikePost<'a> {
    pub id: &'a str,
}

impl LikePost<'_> {
    #[tracing::instrument(skip_all, fields(id = self.id), name = "services.posts.like")]
    pub async fn perform(self, app: &App, actor: &Actor) -> Result<Vec<Like>, Error> {
        let Some(id) = parse_id(self.id) else {
            return Err(types::Error::UnknownPost.into());
        };

        let Some(mut post) = app.store.find_post(id).await? else {
            return Err(types::Error::UnknownPost.into());
        };

        if post.like(actor.user_id).is_err() {
            return Err(types::Error::AlreadyLiked.into());
        }

        app.store.save_post(&post).await?;
        Ok(post.likes)
    }
}

#[derive(Debug)]
pub struct UnlikePost<'a> {
    pub id: &'a str,
}

impl UnlikePost<'_> {
    #[tracing::instrument(skip_all, fields(id = self.id), name = "services.posts.unlike")]
    pub async fn perform(self, app: &App, actor: &Actor) -> Result<Vec<Like>, Error> {
        let Some(id) = parse_id(self.id) else {
            return Err(types::Error::UnknownPost.into());
        };

        let Some(mut post) = app.store.find_post(id).await? else {
            return Err(types::Error::UnknownPost.into());
        };

        if post.unlike(actor.user_id).is_err() {
            return Err(types::Error::NotYetLiked.into());
        }

        app.store.save_post(&post).await?;
        Ok(post.likes)
    }
}
