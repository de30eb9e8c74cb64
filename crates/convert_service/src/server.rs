use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    body::BoxBody,
    dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpServer,
};
use log::{error, info, warn};
use tokio::sync::oneshot;

use crate::config::ServiceConfig;
use crate::controllers::{convert_controller, static_controller, system_controller};
use crate::middleware::RequestTracing;
use crate::services::{AssetLocator, ConversionService, PublicDirLocator};

pub struct AppState {
    pub converter: ConversionService,
    pub assets: Arc<dyn AssetLocator>,
}

impl AppState {
    pub fn new(converter: ConversionService, assets: Arc<dyn AssetLocator>) -> Self {
        Self { converter, assets }
    }
}

/// Looks up the public directory once, before any worker serves a request.
pub fn build_state(config: &ServiceConfig) -> AppState {
    let assets = PublicDirLocator::from_environment(config.public_dir.clone());
    match assets.locate() {
        Some(dir) => info!("Serving static assets from {}", dir.display()),
        None => warn!("No public directory with index.html found"),
    }
    AppState::new(
        ConversionService::with_default_generator(config.pipeline),
        Arc::new(assets),
    )
}

/// Routes in match order: the conversion endpoint first, the static
/// catch-all last.
///
/// CORS only covers the scope after the conversion routes, so a preflight
/// `OPTIONS /convert` still gets the JSON 405.
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(convert_controller::config).service(
        web::scope("")
            .wrap(Cors::permissive())
            .configure(system_controller::config)
            .configure(static_controller::config),
    );
}

/// The application every server worker runs.
pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(RequestTracing)
        .configure(app_config)
}

fn build_server(config: &ServiceConfig, state: web::Data<AppState>) -> Result<Server, String> {
    let address = config.bind_address();
    let server = HttpServer::new(move || build_app(state.clone()))
        .workers(config.workers)
        .bind(&address)
        .map_err(|e| format!("Failed to bind server: {e}"))?
        .run();

    info!(
        "Conversion service listening on http://{address} (repair: {}, validation: {})",
        config.pipeline.repair, config.pipeline.validation
    );
    Ok(server)
}

pub async fn run(config: ServiceConfig) -> Result<(), String> {
    info!("Starting conversion service...");

    let state = web::Data::new(build_state(&config));
    let server = build_server(&config, state)?;

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}

/// Handle for running the service in the background of another runtime.
pub struct WebService {
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_handle: Option<tokio::task::JoinHandle<()>>,
    config: ServiceConfig,
}

impl WebService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            shutdown_tx: None,
            server_handle: None,
            config,
        }
    }

    pub async fn start(&mut self) -> Result<(), String> {
        if self.server_handle.is_some() {
            return Err("Web service is already running".to_string());
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let state = web::Data::new(build_state(&self.config));
        let server = build_server(&self.config, state)?;
        let handle = server.handle();

        let server_handle = tokio::spawn(async move {
            tokio::select! {
                result = server => {
                    if let Err(e) = result {
                        error!("Web server error: {}", e);
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("Web service shutdown signal received");
                    handle.stop(true).await;
                }
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.server_handle = Some(server_handle);

        info!("Web service started successfully");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), String> {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            if shutdown_tx.send(()).is_err() {
                error!("Failed to send shutdown signal");
            }
        }

        if let Some(handle) = self.server_handle.take() {
            if let Err(e) = handle.await {
                error!("Error waiting for server shutdown: {}", e);
                return Err(format!("Error waiting for server shutdown: {e}"));
            }
        }

        info!("Web service stopped successfully");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.server_handle.is_some()
    }
}

impl Drop for WebService {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}
