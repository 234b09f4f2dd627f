use actix_web::{web, HttpResponse, Result};

use crate::{
    database::models::SqrTeamInput,
    handlers::shared::{parse_id_list, UserListQuery},
    services::SquareService,
};

pub async fn get_square_teams(
    path: web::Path<i64>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let teams = service.get_square_teams(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(teams))
}

pub async fn get_square_team(
    path: web::Path<(i64, i64)>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, team_id) = path.into_inner();
    let team = service.get_square_team(square_id, team_id).await?;
    Ok(HttpResponse::Ok().json(team))
}

pub async fn create_team(
    path: web::Path<i64>,
    input: web::Json<SqrTeamInput>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let team = service
        .create_team(path.into_inner(), input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(team))
}

pub async fn update_team(
    path: web::Path<(i64, i64)>,
    input: web::Json<SqrTeamInput>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, team_id) = path.into_inner();
    let team = service
        .update_team(square_id, team_id, input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(team))
}

pub async fn delete_teams(
    path: web::Path<(i64, String)>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, team_ids) = path.into_inner();
    let ids = parse_id_list(&team_ids)?;
    service.delete_teams(square_id, &ids).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn get_square_team_users(
    path: web::Path<(i64, i64)>,
    query: web::Query<UserListQuery>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, team_id) = path.into_inner();
    let users = service
        .get_square_team_users(
            square_id,
            team_id,
            query.fast_filter.as_deref(),
            query.show_all_users.unwrap_or(false),
        )
        .await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn add_users_to_square_team(
    path: web::Path<(i64, String, String)>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, team_ids, user_ids) = path.into_inner();
    let team_ids = parse_id_list(&team_ids)?;
    let user_ids = parse_id_list(&user_ids)?;
    service
        .add_users_to_square_team(square_id, &team_ids, &user_ids)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn remove_users_from_square_team(
    path: web::Path<(i64, String, String)>,
    service: web::Data<SquareService>,
) -> Result<HttpResponse> {
    let (square_id, team_ids, user_ids) = path.into_inner();
    let team_ids = parse_id_list(&team_ids)?;
    let user_ids = parse_id_list(&user_ids)?;
    service
        .remove_users_from_square_team(square_id, &team_ids, &user_ids)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
