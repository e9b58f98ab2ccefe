mod create_task;
mod delete_task;
mod get_task;
mod notification;
pub mod send_task_reminders;
mod update_task;
mod update_task_reminders;

use actix_web::web;
use create_task::create_task_controller;
use delete_task::delete_task_controller;
use get_task::get_task_controller;
use update_task::update_task_controller;
use update_task_reminders::update_task_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/users/{user_id}/tasks",
        web::post().to(create_task_controller),
    );
    cfg.route("/tasks/{task_id}", web::get().to(get_task_controller));
    cfg.route("/tasks/{task_id}", web::put().to(update_task_controller));
    cfg.route("/tasks/{task_id}", web::delete().to(delete_task_controller));
    cfg.route(
        "/tasks/{task_id}/reminders",
        web::put().to(update_task_reminders_controller),
    );
}
