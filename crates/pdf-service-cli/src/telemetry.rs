use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pdf_service=info,pdf_service_client=info")),
        )
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}
