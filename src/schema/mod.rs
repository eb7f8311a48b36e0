pub mod post;
pub mod user;

pub use post::{Comment, CommentError, Like, LikeError, Post};
pub use user::User;
