//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use taskdeck::Trace;
#[cfg(debug_assertions)]
use taskdeck::doc::ApiDoc;
use taskdeck::inbound::http::error::{json_error_handler, route_not_found};
use taskdeck::inbound::http::health::{HealthState, live, ready};
use taskdeck::inbound::http::state::HttpState;
use taskdeck::inbound::http::{auth, tasks};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .configure(auth::configure)
        .configure(tasks::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] carrying the bind address, signing
///   key, token lifetime, hash cost, and optional storage pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building adapters, binding the socket,
/// or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config)?);
    let bind_addr = config.bind_addr;
    #[cfg(feature = "metrics")]
    let prometheus = build_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Prometheus middleware serving `/metrics`.
#[cfg(feature = "metrics")]
fn build_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    actix_web_prom::PrometheusMetricsBuilder::new("taskdeck")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}
