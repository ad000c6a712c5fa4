use std::{error::Error, sync::Arc};

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;
use metabolic_api::{config::Config, routes};
use metabolic_store::{
    connection::Connection,
    measurement::{MeasurementRepository, MeasurementRepositoryImpl},
    profile::{ProfileRepository, ProfileRepositoryImpl},
};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;
    let config = Config::from_env();

    info!("Connecting to database");
    let conn = Connection::establish().await?;
    let measurement_repository: Arc<dyn MeasurementRepository> =
        Arc::new(MeasurementRepositoryImpl::new(conn.clone()));
    let profile_repository: Arc<dyn ProfileRepository> =
        Arc::new(ProfileRepositoryImpl::new(conn.clone()));

    info!("Listening on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::from(measurement_repository.clone()))
            .app_data(web::Data::from(profile_repository.clone()))
            .configure(routes::configure)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await?;

    Ok(())
}
