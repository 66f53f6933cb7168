pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use domain::ports::OrderRepository;
use handlers::orders;

pub use config::{DatabaseSettings, Settings};
pub use db::{create_pool, Database, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// The service as shared by all workers.
pub type AppService = OrderService<Box<dyn OrderRepository>>;

pub fn app_service<R: OrderRepository>(repo: R) -> web::Data<AppService> {
    let repo: Box<dyn OrderRepository> = Box::new(repo);
    web::Data::new(OrderService::new(repo))
}

/// Register every order desk route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(orders::home))
        .service(
            web::resource("/place-order")
                .route(web::get().to(orders::place_order_form))
                .route(web::post().to(orders::place_order)),
        )
        .service(
            web::resource("/search-customer")
                .route(web::get().to(orders::search_customer_form))
                .route(web::post().to(orders::search_customer)),
        )
        .service(
            web::resource("/search-order")
                .route(web::get().to(orders::search_order_form))
                .route(web::post().to(orders::search_order)),
        )
        .route("/reports", web::get().to(orders::reports))
        .service(
            web::resource("/change-status")
                .route(web::get().to(orders::change_status_form))
                .route(web::post().to(orders::change_status)),
        )
        .service(
            web::resource("/delete-order")
                .route(web::get().to(orders::delete_order_form))
                .route(web::post().to(orders::delete_order)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: web::Data<AppService>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
