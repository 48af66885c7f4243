use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use relatix_server::{
    app_state::AppState,
    config::Config,
    graphql::create_schema,
    handlers::{self, graphiql, graphql_endpoint},
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.validate_for_production();

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let app_state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let schema = create_schema(app_state.clone());
    let jwt_service = web::Data::from(app_state.jwt_service.clone());

    log::info!("Starting Relatix server on http://{}:{}", host, port);
    log::info!("GraphiQL playground: http://{}:{}/graphiql", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .app_data(jwt_service.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
            .service(graphql_endpoint)
            .service(graphiql)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
