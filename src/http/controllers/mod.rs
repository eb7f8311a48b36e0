use actix_web::web;

use super::util;

pub mod posts;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(util::index))
        .route("/welcome", web::get().to(util::welcome))
        .service(
            web::scope("/api/posts")
                .app_data(util::json_config())
                .service(
                    web::resource("")
                        .route(web::get().to(posts::list))
                        .route(web::post().to(posts::create)),
                )
                .route("/like/{id}", web::put().to(posts::like))
                .route("/unlike/{id}", web::put().to(posts::unlike))
                .route("/comment/{id}", web::post().to(posts::add_comment))
                .route(
                    "/comment/{id}/{comment_id}",
                    web::delete().to(posts::delete_comment),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(posts::get))
                        .route(web::delete().to(posts::delete)),
                ),
        )
        .default_service(web::to(util::not_found));
}
