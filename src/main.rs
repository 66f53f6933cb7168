use std::io;

use dotenvy::dotenv;
use order_desk::infrastructure::DieselOrderRepository;
use order_desk::{app_service, build_server, Database, Settings};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().map_err(io::Error::other)?;

    let db = Database::connect(&settings.database).map_err(io::Error::other)?;
    db.run_migrations().map_err(io::Error::other)?;

    let service = app_service(DieselOrderRepository::new(db));

    log::info!("Starting server at http://{}:{}", settings.host, settings.port);

    build_server(service, &settings.host, settings.port)?.await?;

    log::info!("Server stopped");
    Ok(())
}
