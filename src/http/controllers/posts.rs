use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    http::{Actor, Error},
    services::posts::{
        AddComment, CreatePost, DeleteComment, DeletePost, GetPost, LikePost, ListPosts,
        UnlikePost,
    },
    types::form::posts::TextRequest,
    App,
};

pub async fn create(
    app: web::Data<App>,
    actor: Actor,
    form: web::Json<TextRequest>,
) -> Result<HttpResponse, Error> {
    let post = CreatePost {
        form: form.into_inner(),
    }
    .perform(&app, &actor)
    .await?;

    Ok(HttpResponse::Ok().json(post))
}

pub async fn list(app: web::Data<App>, actor: Actor) -> Result<HttpResponse, Error> {
    let posts = ListPosts.perform(&app, &actor).await?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get(
    app: web::Data<App>,
    actor: Actor,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let post = GetPost { id: &path }.perform(&app, &actor).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete(
    app: web::Data<App>,
    actor: Actor,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    DeletePost { id: &path }.perform(&app, &actor).await?;
    Ok(HttpResponse::Ok().json(json!({ "msg": "Post removed" })))
}

pub async fn like(
    app: web::Data<App>,
    actor: Actor,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let likes = LikePost { id: &path }.perform(&app, &actor).await?;
    Ok(HttpResponse::Ok().json(likes))
}

pub async fn unlike(
    app: web::Data<App>,
    actor: Actor,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let likes = UnlikePost { id: &path }.perform(&app, &actor).await?;
    Ok(HttpResponse::Ok().json(likes))
}

pub async fn add_comment(
    app: web::Data<App>,
    actor: Actor,
    path: web::Path<String>,
    form: web::Json<TextRequest>,
) -> Result<HttpResponse, Error> {
    let comments = AddComment {
        post_id: &path,
        form: form.into_inner(),
    }
    .perform(&app, &actor)
    .await?;

    Ok(HttpResponse::Ok().json(comments))
}

pub async fn delete_comment(
    app: web::Data<App>,
    actor: Actor,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, Error> {
    let (post_id, comment_id) = path.into_inner();
    let comments = DeleteComment {
        post_id: &post_id,
        comment_id: &comment_id,
    }
    .perform(&app, &actor)
    .await?;

    Ok(HttpResponse::Ok().json(comments))
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use actix_web::{
        http::{header, StatusCode},
        middleware::NormalizePath,
        test, web,
    };
    use assert_json_diff::{assert_json_eq, assert_json_include};
    use serde_json::{json, Value};

    use crate::http::{actor::AUTH_TOKEN_HEADER, controllers::configure};
    use crate::test_utils::{self, users};

    macro_rules! init_service {
        ($app:expr) => {
            test::init_service(
                actix_web::App::new()
                    .app_data(web::Data::new($app))
                    .wrap(NormalizePath::trim())
                    .configure(configure),
            )
            .await
        };
    }

    fn bearer(token: &str) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_index_and_unknown_route() {
        let (app, _) = test_utils::build_test_app();
        let service = init_service!(app);

        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&service, req).await;
        assert_eq!(body, "API Running");

        let req = test::TestRequest::get().uri("/welcome").to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "Welcome to the site");

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_json_eq!(body, json!({ "msg": "Not found" }));
    }

    #[actix_web::test]
    async fn test_requires_token() {
        let (app, _) = test_utils::build_test_app();
        let service = init_service!(app);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_json_eq!(body, json!({ "msg": "No token, authorization denied" }));

        let req = test::TestRequest::get()
            .uri("/api/posts")
            .insert_header((AUTH_TOKEN_HEADER, "not a token"))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_json_eq!(body, json!({ "msg": "Token is not valid" }));
    }

    #[actix_web::test]
    async fn test_post_lifecycle() {
        let (app, store) = test_utils::build_test_app();
        let alice = users::create(&store, "alice").await;
        let token = test_utils::token_for(&app, alice.id);
        let service = init_service!(app);

        // trailing slashes are trimmed
        let req = test::TestRequest::post()
            .uri("/api/posts/")
            .insert_header(bearer(&token))
            .set_json(json!({ "text": "Hello, World!" }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let post: Value = test::read_body_json(resp).await;
        assert_json_include!(
            actual: &post,
            expected: json!({
                "user": alice.id.to_string(),
                "text": "Hello, World!",
                "name": "alice",
                "likes": [],
                "comments": [],
            })
        );

        let id = post["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/like/{id}"))
            .insert_header(bearer(&token))
            .to_request();
        let likes: Value = test::call_and_read_body_json(&service, req).await;
        assert_json_eq!(likes, json!([{ "user": alice.id.to_string() }]));

        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/comment/{id}"))
            .insert_header(bearer(&token))
            .set_json(json!({ "text": "nice" }))
            .to_request();
        let comments: Value = test::call_and_read_body_json(&service, req).await;
        let comment_id = comments[0]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/comment/{id}/{comment_id}"))
            .insert_header(bearer(&token))
            .to_request();
        let comments: Value = test::call_and_read_body_json(&service, req).await;
        assert_json_eq!(comments, json!([]));

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&service, req).await;
        assert_json_eq!(body, json!({ "msg": "Post removed" }));

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_rejection_statuses() {
        let (app, store) = test_utils::build_test_app();
        let alice = users::create(&store, "alice").await;
        let token = test_utils::token_for(&app, alice.id);
        let service = init_service!(app);

        let cases = [
            (test::TestRequest::get().uri("/api/posts/garbage"), StatusCode::NOT_FOUND),
            (test::TestRequest::delete().uri("/api/posts/123"), StatusCode::NOT_FOUND),
            (test::TestRequest::put().uri("/api/posts/like/123"), StatusCode::BAD_REQUEST),
            (test::TestRequest::put().uri("/api/posts/unlike/x"), StatusCode::BAD_REQUEST),
            (
                test::TestRequest::delete().uri("/api/posts/comment/123/456"),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (req, status) in cases {
            let req = req.insert_header(bearer(&token)).to_request();
            let resp = test::call_service(&service, req).await;
            assert_eq!(resp.status(), status);
        }
    }

    #[actix_web::test]
    async fn test_invalid_bodies() {
        let (app, store) = test_utils::build_test_app();
        let alice = users::create(&store, "alice").await;
        let token = test_utils::token_for(&app, alice.id);
        let service = init_service!(app);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&token))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_json_eq!(
            body,
            json!({
                "errors": [{ "msg": "Text is required", "param": "text", "location": "body" }]
            })
        );

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&token))
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_json_include!(
            actual: body,
            expected: json!({ "errors": [{ "param": "body", "location": "body" }] })
        );
    }
}
