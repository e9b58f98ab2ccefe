mod telemetry;

use taskbell_api::Application;
use taskbell_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("taskbell_server".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
