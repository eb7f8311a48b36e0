use validator::Validate;

use super::parse_id;
use crate::{
    http::{Actor, Error},
    schema::Post,
    types::{self, form::posts::TextRequest},
    App,
};

mod comments;
mod likes;

pub use comments::{AddComment, DeleteComment};
pub use likes::{LikePost, UnlikePost};

#[derive(Debug)]
pub struct CreatePost {
    pub form: TextRequest,
}

impl CreatePost {
    #[tracing::instrument(skip_all, fields(actor = %actor.user_id), name = "services.posts.create")]
    pub async fn perform(self, app: &App, actor: &Actor) -> Result<Post, Error> {
        self.form.validate()?;

        let Some(author) = app.store.find_user(actor.user_id).await? else {
            return Err(types::Error::UserNotFound.into());
        };

        let post = Post::new(&author, self.form.text);
        app.store.save_post(&post).await?;

        Ok(post)
    }
}

#[derive(Debug)]
pub struct ListPosts;

impl ListPosts {
    #[tracing::instrument(skip_all, name = "services.posts.list")]
    pub async fn perform(self, app: &App, _actor: &Actor) -> Result<Vec<Post>, Error> {
        Ok(app.store.list_posts().await?)
    }
}

#[derive(Debug)]
pub struct GetPost<'a> {
    pub id: &'a str,
}

impl GetPost<'_> {
    #[tracing::instrument(skip_all, fields(id = self.id), name = "services.posts.get")]
    pub async fn perform(self, app: &App, _actor: &Actor) -> Result<Post, Error> {
        let Some(id) = parse_id(self.id) else {
            return Err(types::Error::PostNotFound.into());
        };

        match app.store.find_post(id).await? {
            Some(post) => Ok(post),
            None => Err(types::Error::PostNotFound.into()),
        }
    }
}

#[derive(Debug)]
pub struct DeletePost<'a> {
    pub id: &'a str,
}

impl DeletePost<'_> {
    #[tracing::instrument(skip_all, fields(id = self.id), name = "services.posts.delete")]
    pub async fn perform(self, app: &App, actor: &Actor) -> Result<(), Error> {
        let Some(id) = parse_id(self.id) else {
            return Err(types::Error::PostNotFound.into());
        };

        let Some(post) = app.store.find_post(id).await? else {
            return Err(types::Error::PostNotFound.into());
        };

        if !post.is_owned_by(actor.user_id) {
            return Err(types::Error::NotAuthorized.into());
        }

        // someone else may have deleted it in the meantime
        if !app.store.delete_post(post.id).await? {
            return Err(types::Error::PostNotFound.into());
        }

        Ok(())
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Store;
    use crate::test_utils::{self, users, TestResultExt};

    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn text(text: &str) -> CreatePost {
        CreatePost {
            form: TextRequest {
                text: text.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn should_reject_empty_text() {
        let (app, store) = test_utils::build_test_app();
        let alice = users::create(&store, "alice").await;

        let error = text("   ")
            .perform(&app, &users::actor(&alice))
            .await
            .expect_error_json();

        assert_json_eq!(
            error,
            json!({
                "errors": [{ "msg": "Text is required", "param": "text", "location": "body" }]
            })
        );
        assert!(store.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_snapshot_author() {
        let (app, store) = test_utils::build_test_app();
        let alice = users::create(&store, "alice").await;

        let post = text("Hello, World!")
            .perform(&app, &users::actor(&alice))
            .await
            .unwrap();

        assert_eq!(post.user, alice.id);
        assert_eq!(post.name, alice.name);
        assert_eq!(post.avatar, alice.avatar);
        assert_eq!(post.text, "Hello, World!");
        assert_eq!(store.find_post(post.id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn should_reject_unknown_author() {
        let (app, store) = test_utils::build_test_app();
        let ghost = Actor {
            user_id: types::id::Id::new(404),
        };

        let error = text("boo").perform(&app, &ghost).await.expect_error_json();
        assert_json_eq!(error, json!({ "msg": "User not found" }));
        assert!(store.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_newest_first() {
        let (app, store) = test_utils::build_test_app();
        let alice = users::create(&store, "alice").await;
        let actor = users::actor(&alice);

        for content in ["A", "B", "C"] {
            text(content).perform(&app, &actor).await.unwrap();
        }

        let texts = ListPosts
            .perform(&app, &actor)
            .await
            .unwrap()
            .into_iter()
            .map(|post| post.text)
            .collect::<Vec<_>>();

        assert_eq!(texts, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn should_not_find_malformed_or_missing_post() {
        let (app, store) = test_utils::build_test_app();
        let alice = users::create(&store, "alice").await;
        let actor = users::actor(&alice);

        for id in ["not-an-id", "0", "-1", "123"] {
            let error = GetPost { id }.perform(&app, &actor).await.expect_error_json();
            assert_json_eq!(error, json!({ "msg": "Post not found" }));
        }
    }

    #[tokio::test]
    async fn should_only_let_owner_delete() {
        let (app, store) = test_utils::build_test_app();
        let alice = users::create(&store, "alice").await;
        let bob = users::create(&store, "bob").await;

        let post = text("mine").perform(&app, &users::actor(&alice)).await.unwrap();
        let id = post.id.to_string();

        let error = DeletePost { id: &id }
            .perform(&app, &users::actor(&bob))
            .await
            .expect_error_json();
        assert_json_eq!(error, json!({ "msg": "User not authorized" }));

        // still there
        GetPost { id: &id }
            .perform(&app, &users::actor(&bob))
            .await
            .unwrap();

        DeletePost { id: &id }
            .perform(&app, &users::actor(&alice))
            .await
            .unwrap();

        let error = DeletePost { id: &id }
            .perform(&app, &users::actor(&alice))
            .await
            .expect_error_json();
        assert_json_eq!(error, json!({ "msg": "Post not found" }));
    }
}
