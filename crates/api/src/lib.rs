mod error;
mod job_schedulers;
mod shared;
mod status;
mod task;
mod user;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::start_send_reminders_job;
use std::net::TcpListener;
use taskbell_infra::TaskbellContext;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use job_schedulers::send_reminders;
pub use task::send_task_reminders::ReminderScanReport;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
    task::configure_routes(cfg);
    user::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: TaskbellContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: TaskbellContext) {
        if context.config.reminder_jobs_enabled {
            start_send_reminders_job(context);
        } else {
            info!("Reminder jobs are disabled");
        }
    }

    async fn configure_server(context: TaskbellContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
