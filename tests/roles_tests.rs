mod common;

use actix_web::{http::StatusCode, test, App};
use pretty_assertions::assert_eq;
use sqlx::SqlitePool;

use common::{record_count, seed_group, seed_role, seed_square, seed_user, TestDb};
use sqr_api::database::models::{SqrRole, SqrSquareUser};

async fn user_in_group(pool: &SqlitePool, user_id: i64, group_id: i64) -> bool {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM adm_user_group WHERE user_id = ? AND group_id = ?)",
    )
    .bind(user_id)
    .bind(group_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[actix_rt::test]
async fn roles_are_global() {
    let db = TestDb::new().await.unwrap();
    let app = test::init_service(App::new().configure(common::routes(db.pool.clone()))).await;

    let group_id = seed_group(&db.pool, "participants").await;
    seed_role(&db.pool, "participant", group_id).await;
    seed_role(&db.pool, "teamExpert", group_id).await;
    let square_id = seed_square(&db.pool, "alpha").await;

    let req = test::TestRequest::get()
        .uri(&format!("/sqr-square/{}/sqr-role", square_id))
        .to_request();
    let roles: Vec<SqrRole> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(roles.len(), 2);
}

#[actix_rt::test]
async fn granting_a_role_flags_members_active() {
    let db = TestDb::new().await.unwrap();
    let app = test::init_service(App::new().configure(common::routes(db.pool.clone()))).await;

    let group_id = seed_group(&db.pool, "participants").await;
    let role_id = seed_role(&db.pool, "participant", group_id).await;
    let square_id = seed_square(&db.pool, "alpha").await;
    let anna = seed_user(&db.pool, "anna", "Anna").await;
    let dan = seed_user(&db.pool, "dan", "Dan").await;
    seed_user(&db.pool, "bob", "Bob").await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user/{},{}",
            square_id, role_id, anna, dan
        ))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Default listing: current holders only, all flagged active
    let req = test::TestRequest::get()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user",
            square_id, role_id
        ))
        .to_request();
    let users: Vec<SqrSquareUser> = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["anna", "dan"]);
    assert!(users.iter().all(|u| u.active_in_square_role));

    // Grants were mirrored into the role's group
    assert!(user_in_group(&db.pool, anna, group_id).await);
    assert!(user_in_group(&db.pool, dan, group_id).await);

    // showAllUsers widens the listing; non-holders are flagged inactive
    let req = test::TestRequest::get()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user?showAllUsers=true",
            square_id, role_id
        ))
        .to_request();
    let users: Vec<SqrSquareUser> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users.len(), 3);
    let bob = users.iter().find(|u| u.name == "bob").unwrap();
    assert!(!bob.active_in_square_role);
}

#[actix_rt::test]
async fn fast_filter_matches_captions_case_insensitively() {
    let db = TestDb::new().await.unwrap();
    let app = test::init_service(App::new().configure(common::routes(db.pool.clone()))).await;

    let group_id = seed_group(&db.pool, "participants").await;
    let role_id = seed_role(&db.pool, "participant", group_id).await;
    let square_id = seed_square(&db.pool, "alpha").await;
    seed_user(&db.pool, "anna", "Anna").await;
    seed_user(&db.pool, "dan", "Dan").await;
    seed_user(&db.pool, "bob", "Bob").await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user?showAllUsers=true&fastFilter=an",
            square_id, role_id
        ))
        .to_request();
    let users: Vec<SqrSquareUser> = test::call_and_read_body_json(&app, req).await;
    let captions: Vec<&str> = users.iter().map(|u| u.caption.as_str()).collect();
    assert_eq!(captions, vec!["Anna", "Dan"]);
}

#[actix_rt::test]
async fn fast_filter_wildcards_match_literally() {
    let db = TestDb::new().await.unwrap();
    let app = test::init_service(App::new().configure(common::routes(db.pool.clone()))).await;

    let group_id = seed_group(&db.pool, "participants").await;
    let role_id = seed_role(&db.pool, "participant", group_id).await;
    let square_id = seed_square(&db.pool, "alpha").await;
    seed_user(&db.pool, "pct", "100% ready").await;
    seed_user(&db.pool, "anna", "Anna").await;

    // A literal % in the filter is not a wildcard
    let req = test::TestRequest::get()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user?showAllUsers=true&fastFilter=%25",
            square_id, role_id
        ))
        .to_request();
    let users: Vec<SqrSquareUser> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].caption, "100% ready");

    // Same for _
    let req = test::TestRequest::get()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user?showAllUsers=true&fastFilter=_",
            square_id, role_id
        ))
        .to_request();
    let users: Vec<SqrSquareUser> = test::call_and_read_body_json(&app, req).await;
    assert!(users.is_empty());
}

#[actix_rt::test]
async fn admin_user_is_excluded_from_listings() {
    let db = TestDb::new().await.unwrap();
    let app = test::init_service(App::new().configure(common::routes(db.pool.clone()))).await;

    let group_id = seed_group(&db.pool, "participants").await;
    let role_id = seed_role(&db.pool, "participant", group_id).await;
    let square_id = seed_square(&db.pool, "alpha").await;
    seed_user(&db.pool, "admin", "Administrator").await;
    seed_user(&db.pool, "anna", "Anna").await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user?showAllUsers=true",
            square_id, role_id
        ))
        .to_request();
    let users: Vec<SqrSquareUser> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "anna");
}

#[actix_rt::test]
async fn regranting_is_not_idempotent() {
    let db = TestDb::new().await.unwrap();
    let app = test::init_service(App::new().configure(common::routes(db.pool.clone()))).await;

    let group_id = seed_group(&db.pool, "participants").await;
    let role_id = seed_role(&db.pool, "participant", group_id).await;
    let square_id = seed_square(&db.pool, "alpha").await;
    let anna = seed_user(&db.pool, "anna", "Anna").await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!(
                "/sqr-square/{}/sqr-role/{}/user/{}",
                square_id, role_id, anna
            ))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    assert_eq!(record_count(&db.pool, "sqr_square_user").await, 2);
}

#[actix_rt::test]
async fn revoking_reconciles_the_group_cache() {
    let db = TestDb::new().await.unwrap();
    let app = test::init_service(App::new().configure(common::routes(db.pool.clone()))).await;

    // Two roles sharing one authorization group
    let group_id = seed_group(&db.pool, "experts").await;
    let expert = seed_role(&db.pool, "teamExpert", group_id).await;
    let chief_expert = seed_role(&db.pool, "chiefExpert", group_id).await;
    let square_id = seed_square(&db.pool, "alpha").await;
    let anna = seed_user(&db.pool, "anna", "Anna").await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{},{}/user/{}",
            square_id, expert, chief_expert, anna
        ))
        .to_request();
    test::call_service(&app, req).await;
    assert!(user_in_group(&db.pool, anna, group_id).await);

    // Revoking one of the two roles must keep the group: the other role
    // still implies it.
    let req = test::TestRequest::delete()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user/{}",
            square_id, expert, anna
        ))
        .to_request();
    test::call_service(&app, req).await;
    assert!(user_in_group(&db.pool, anna, group_id).await);

    // Revoking the last role drops the group membership.
    let req = test::TestRequest::delete()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user/{}",
            square_id, chief_expert, anna
        ))
        .to_request();
    test::call_service(&app, req).await;
    assert!(!user_in_group(&db.pool, anna, group_id).await);
    assert_eq!(record_count(&db.pool, "sqr_square_user").await, 0);
}

#[actix_rt::test]
async fn revoked_users_disappear_from_the_member_listing() {
    let db = TestDb::new().await.unwrap();
    let app = test::init_service(App::new().configure(common::routes(db.pool.clone()))).await;

    let group_id = seed_group(&db.pool, "participants").await;
    let role_id = seed_role(&db.pool, "participant", group_id).await;
    let square_id = seed_square(&db.pool, "alpha").await;
    let anna = seed_user(&db.pool, "anna", "Anna").await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user/{}",
            square_id, role_id, anna
        ))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user/{}",
            square_id, role_id, anna
        ))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/sqr-square/{}/sqr-role/{}/user",
            square_id, role_id
        ))
        .to_request();
    let users: Vec<SqrSquareUser> = test::call_and_read_body_json(&app, req).await;
    assert!(users.is_empty());
}
