use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};
use taskbell_api::Application;
use taskbell_infra::{ISys, InMemoryMailer, TaskbellContext};
use taskbell_sdk::TaskbellSDK;

/// Clock the tests move forward by hand
pub struct MockSys {
    now: AtomicI64,
}

impl MockSys {
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl ISys for MockSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub struct TestApp {
    pub ctx: TaskbellContext,
    pub sys: Arc<MockSys>,
    pub mailer: Arc<InMemoryMailer>,
}

// Launch the application as a background task
pub async fn spawn_app(now: i64) -> (TestApp, TaskbellSDK) {
    let mut ctx = TaskbellContext::create_inmemory();
    ctx.config.port = 0; // Random port
    // Scans are triggered by the tests
    ctx.config.reminder_jobs_enabled = false;

    let sys = Arc::new(MockSys {
        now: AtomicI64::new(now),
    });
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.sys = sys.clone();
    ctx.mailer = mailer.clone();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { ctx, sys, mailer };
    let sdk = TaskbellSDK::new(address);
    (app, sdk)
}
