use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use sqr_api::database::init_database;
use sqr_api::handlers::{roles, squares, teams, timers};
use sqr_api::middleware::RequestId;
use sqr_api::{Config, SquareService};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Square console API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    log::info!(
        "Configuration loaded (environment: {})",
        config.environment
    );

    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    let square_service = SquareService::new(pool.clone());

    let service_data = web::Data::new(square_service);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    let client_base_url = config.client_base_url.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(service_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                        "X-User-Name",
                        "X-User-Roles",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
            .service(
                web::scope("/sqr-square")
                    .route("", web::get().to(squares::get_squares))
                    .route("", web::post().to(squares::create_square))
                    .route("/{id}", web::get().to(squares::get_square))
                    .route("/{id}", web::put().to(squares::update_square))
                    .route("/{ids}", web::delete().to(squares::delete_squares))
                    .service(
                        web::scope("/{square_id}")
                            .route("/sqr-role", web::get().to(roles::get_square_roles))
                            .route(
                                "/sqr-role/{role_id}/user",
                                web::get().to(roles::get_square_role_users),
                            )
                            .route(
                                "/sqr-role/{role_ids}/user/{user_ids}",
                                web::post().to(roles::add_users_to_square_role),
                            )
                            .route(
                                "/sqr-role/{role_ids}/user/{user_ids}",
                                web::delete().to(roles::remove_users_from_square_role),
                            )
                            .route("/sqr-team", web::get().to(teams::get_square_teams))
                            .route("/sqr-team", web::post().to(teams::create_team))
                            .route("/sqr-team/{team_id}", web::get().to(teams::get_square_team))
                            .route("/sqr-team/{team_id}", web::put().to(teams::update_team))
                            .route("/sqr-team/{team_ids}", web::delete().to(teams::delete_teams))
                            .route(
                                "/sqr-team/{team_id}/user",
                                web::get().to(teams::get_square_team_users),
                            )
                            .route(
                                "/sqr-team/{team_ids}/user/{user_ids}",
                                web::post().to(teams::add_users_to_square_team),
                            )
                            .route(
                                "/sqr-team/{team_ids}/user/{user_ids}",
                                web::delete().to(teams::remove_users_from_square_team),
                            )
                            .route("/sqr-timer", web::get().to(timers::get_square_timers))
                            .route(
                                "/sqr-timer/recreate",
                                web::post().to(timers::recreate_timers),
                            )
                            .route(
                                "/sqr-timer/set-count/{count}",
                                web::patch().to(timers::set_all_timer_count),
                            )
                            .route(
                                "/sqr-timer/{timer_id}/set-count/{count}",
                                web::patch().to(timers::set_timer_count),
                            )
                            .route(
                                "/sqr-timer/{timer_id}/detail",
                                web::get().to(timers::get_timer_details),
                            ),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
