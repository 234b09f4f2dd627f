use actix_web::web;
use anyhow::Result;
use sqlx::SqlitePool;
use tempfile::TempDir;

use sqr_api::database::init_database;
use sqr_api::handlers::{roles, squares, teams, timers};
use sqr_api::SquareService;

// Test database wrapper; the tempdir lives as long as the pool.
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            pool,
            _temp_dir: temp_dir,
        })
    }
}

/// Route table identical to the server binary, for `test::init_service`.
pub fn routes(pool: SqlitePool) -> impl FnOnce(&mut web::ServiceConfig) {
    let service_data = web::Data::new(SquareService::new(pool));
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(service_data).service(
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
        );
    }
}

// Seeding helpers; tests insert fixture rows directly, bypassing the API.

pub async fn seed_user(pool: &SqlitePool, name: &str, caption: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO adm_user (name, caption) VALUES (?, ?) RETURNING id")
        .bind(name)
        .bind(caption)
        .fetch_one(pool)
        .await
        .expect("Failed to insert test user")
}

pub async fn seed_group(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO adm_group (name, caption) VALUES (?, ?) RETURNING id",
    )
    .bind(name)
    .bind(name)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test group")
}

pub async fn seed_role(pool: &SqlitePool, name: &str, group_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO sqr_role (name, caption, group_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(name)
    .bind(group_id)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test role")
}

pub async fn seed_square(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO sqr_square (name, caption) VALUES (?, ?) RETURNING id",
    )
    .bind(name)
    .bind(name)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test square")
}

pub async fn seed_team(pool: &SqlitePool, square_id: i64, caption: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO sqr_team (square_id, name, caption) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(square_id)
    .bind(caption)
    .bind(caption)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test team")
}

pub async fn record_count(pool: &SqlitePool, table: &str) -> i64 {
    let query = format!("SELECT COUNT(*) FROM {}", table);
    sqlx::query_scalar::<_, i64>(&query)
        .fetch_one(pool)
        .await
        .expect("Failed to count records")
}

/// Headers identifying an admin caller, as the auth gateway would set them.
pub fn admin_headers() -> [(&'static str, &'static str); 2] {
    [("X-User-Name", "chief"), ("X-User-Roles", "admin")]
}
