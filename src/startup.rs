use anyhow::Context;
use axum::{
    Router,
    http::{HeaderName, Request},
    routing::{get, post},
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info, info_span, instrument, warn};

use crate::{
    acquirer::{Acquirer, YtDlp},
    configuration::Settings,
    fetcher::AudioFetcher,
    resolver::{GoogleSearchClient, Resolver},
    routes::{download, health_check},
    state::AppState,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct Application {
    listener: TcpListener,
    port: u16,
    pub app: Router,
}

impl Application {
    /// Builds the application with the real search API and downloader.
    #[instrument(name = "Building Application", skip_all)]
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        debug!("Search configuration: {:?}", settings.search_cfg);
        if settings.search_cfg.api_key.expose_secret().is_empty() {
            warn!("No search API key configured, every search will be rejected.");
        }
        let resolver = GoogleSearchClient::try_from(settings.search_cfg.clone())
            .context("Failed to build the search client")?;

        debug!("Acquisition configuration: {:?}", settings.acquisition_cfg);
        let acquirer = YtDlp::from(settings.acquisition_cfg.clone());

        Self::build_with(settings, Arc::new(resolver), Arc::new(acquirer)).await
    }

    /// Builds the application around the given collaborators.
    pub async fn build_with(
        Settings {
            application_cfg, ..
        }: Settings,
        resolver: Arc<dyn Resolver>,
        acquirer: Arc<dyn Acquirer>,
    ) -> anyhow::Result<Self> {
        info!("Building application.");
        let listener = application_cfg
            .listener()
            .await
            .with_context(|| format!("Failed to bind {}", application_cfg.address()))?;
        let port = listener.local_addr()?.port();
        debug!("Listener bound to port: {}", port);

        let app = Self::get_router(AppState {
            fetcher: AudioFetcher::new(resolver, acquirer),
        });

        Ok(Self {
            listener,
            port,
            app,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn get_router(app_state: AppState) -> Router {
        let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                MakeRequestUuid,
            ))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                    let request_id = request.headers().get(REQUEST_ID_HEADER);

                    match request_id {
                        Some(request_id) => info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = ?request_id,
                        ),
                        None => {
                            error!("could not extract request_id");
                            info_span!("http_request")
                        }
                    }
                }),
            )
            .layer(PropagateRequestIdLayer::new(x_request_id));

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/health_check", get(health_check))
            .route("/download", post(download))
            .with_state(app_state)
            .layer(middleware)
            .layer(cors)
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        let Application { listener, app, .. } = self;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received.");
}
