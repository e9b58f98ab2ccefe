mod create_user;
mod get_user;
mod get_user_tasks;

use actix_web::web;
use create_user::create_user_controller;
use get_user::get_user_controller;
use get_user_tasks::get_user_tasks_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(create_user_controller));
    cfg.route("/users/{user_id}", web::get().to(get_user_controller));
    cfg.route(
        "/users/{user_id}/tasks",
        web::get().to(get_user_tasks_controller),
    );
}
