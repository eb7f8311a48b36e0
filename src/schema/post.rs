use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use thiserror::Error;

use super::User;
use crate::{
    database::{Connection, ErrorExt, Result},
    types::id::{
        marker::{CommentMarker, PostMarker, UserMarker},
        Id,
    },
};

/// A user-authored text document together with its likes and comments.
///
/// `name` and `avatar` are copied from the author when the post is
/// created and are never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub user: Id<UserMarker>,
    pub text: String,
    pub name: String,
    pub avatar: String,
    /// Most recent first, at most one entry per user.
    pub likes: Vec<Like>,
    /// Most recent first.
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Like {
    pub user: Id<UserMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub user: Id<UserMarker>,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LikeError {
    #[error("post is already liked by this user")]
    AlreadyLiked,
    #[error("post is not liked by this user")]
    NotLiked,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommentError {
    #[error("comment does not exist")]
    NotFound,
    #[error("comment belongs to another user")]
    NotOwner,
}

/// Postgres keeps timestamps in microseconds, so documents get the
/// same precision before they are stored.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl Post {
    #[must_use]
    pub fn new(author: &User, text: String) -> Self {
        Self {
            id: Id::generate(),
            user: author.id,
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: now(),
        }
    }

    #[must_use]
    pub fn is_owned_by(&self, user: Id<UserMarker>) -> bool {
        self.user == user
    }

    #[must_use]
    pub fn has_liked(&self, user: Id<UserMarker>) -> bool {
        self.likes.iter().any(|like| like.user == user)
    }

    pub fn like(&mut self, user: Id<UserMarker>) -> std::result::Result<(), LikeError> {
        if self.has_liked(user) {
            return Err(LikeError::AlreadyLiked);
        }
        self.likes.insert(0, Like { user });
        Ok(())
    }

    pub fn unlike(&mut self, user: Id<UserMarker>) -> std::result::Result<(), LikeError> {
        let Some(index) = self.likes.iter().position(|like| like.user == user) else {
            return Err(LikeError::NotLiked);
        };
        self.likes.remove(index);
        Ok(())
    }

    /// Prepends a new comment written by `author` and returns its id.
    pub fn add_comment(&mut self, author: &User, text: String) -> Id<CommentMarker> {
        let comment = Comment {
            id: Id::generate(),
            user: author.id,
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            date: now(),
        };
        let id = comment.id;
        self.comments.insert(0, comment);
        id
    }

    /// Removes exactly the comment with `comment_id` if `user` wrote it.
    pub fn remove_comment(
        &mut self,
        comment_id: Id<CommentMarker>,
        user: Id<UserMarker>,
    ) -> std::result::Result<Comment, CommentError> {
        let index = self
            .comments
            .iter()
            .position(|comment| comment.id == comment_id)
            .ok_or(CommentError::NotFound)?;

        if self.comments[index].user != user {
            return Err(CommentError::NotOwner);
        }

        Ok(self.comments.remove(index))
    }
}

#[derive(FromRow)]
struct PostRow {
    id: Id<PostMarker>,
    user_id: Id<UserMarker>,
    text: String,
    name: String,
    avatar: String,
    likes: Json<Vec<Like>>,
    comments: Json<Vec<Comment>>,
    date: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            user: row.user_id,
            text: row.text,
            name: row.name,
            avatar: row.avatar,
            likes: row.likes.0,
            comments: row.comments.0,
            date: row.date,
        }
    }
}

impl Post {
    #[tracing::instrument(skip(conn), name = "db.posts.find")]
    pub async fn find(conn: &mut Connection, id: Id<PostMarker>) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, PostRow>(r#"SELECT * FROM "posts" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(conn)
            .await
            .into_db_error()?;

        Ok(row.map(Self::from))
    }

    #[tracing::instrument(skip(conn), name = "db.posts.list")]
    pub async fn list(conn: &mut Connection) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"SELECT * FROM "posts" ORDER BY date DESC, id DESC"#,
        )
        .fetch_all(conn)
        .await
        .into_db_error()?;

        Ok(rows.into_iter().map(Self::from).collect())
    }

    /// Inserts the whole document or replaces its mutable parts.
    #[tracing::instrument(skip_all, fields(id = %self.id), name = "db.posts.save")]
    pub async fn save(&self, conn: &mut Connection) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO "posts" (id, user_id, text, name, avatar, likes, comments, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET text = EXCLUDED.text,
                likes = EXCLUDED.likes,
                comments = EXCLUDED.comments"#,
        )
        .bind(self.id)
        .bind(self.user)
        .bind(&self.text)
        .bind(&self.name)
        .bind(&self.avatar)
        .bind(Json(&self.likes))
        .bind(Json(&self.comments))
        .bind(self.date)
        .execute(conn)
        .await
        .into_db_error()?;

        Ok(())
    }

    /// Returns `false` if nothing was deleted.
    #[tracing::instrument(skip(conn), name = "db.posts.delete")]
    pub async fn delete(conn: &mut Connection, id: Id<PostMarker>) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM "posts" WHERE id = $1"#)
            .bind(id)
            .execute(conn)
            .await
            .into_db_error()?;

        Ok(result.rows_affected() > 0)
    }
}
