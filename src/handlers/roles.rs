use actix_web::{web, HttpResponse, Result};

use crate::{
    handlers::shared::{parse_id_list, UserListQuery},
    services::SquareService,
};

pub async fn get_square_roles(
    path: web::Path<i64>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let roles = service.get_square_roles(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(roles))
}

pub async fn get_square_role_users(
    path: web::Path<(i64, i64)>,
    query: web::Query<UserListQuery>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, role_id) = path.into_inner();
    let users = service
        .get_square_role_users(
            square_id,
            role_id,
            query.fast_filter.as_deref(),
            query.show_all_users.unwrap_or(false),
        )
        .await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn add_users_to_square_role(
    path: web::Path<(i64, String, String)>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, role_ids, user_ids) = path.into_inner();
    let role_ids = parse_id_list(&role_ids)?;
    let user_ids = parse_id_list(&user_ids)?;
    service
        .add_users_to_square_role(square_id, &role_ids, &user_ids)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn remove_users_from_square_role(
    path: web::Path<(i64, String, String)>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, role_ids, user_ids) = path.into_inner();
    let role_ids = parse_id_list(&role_ids)?;
    let user_ids = parse_id_list(&user_ids)?;
    service
        .remove_users_from_square_role(square_id, &role_ids, &user_ids)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
