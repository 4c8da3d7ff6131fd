use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use team_membership_sdk::{MemberSide, Membership, NewJoinRequest, NewMembership, Role};

use super::auth::AuthCaller;
use super::dto::{
    CoachTeamDto, CreateCoachTeamReq, CreateJoinRequestReq, CreatePlayerTeamReq, JoinRequestDto,
    PlayerTeamDto, RejectJoinRequestReq, UpdateCoachTeamReq, UpdatePlayerTeamReq,
    UpdateStatusReq, positive_id,
};
use super::error::ApiResult;
use crate::domain::service::Service;

const STAFF: &[Role] = &[Role::Admin, Role::Coach];
const ADMIN: &[Role] = &[Role::Admin];
const COACH: &[Role] = &[Role::Coach];
const PLAYER: &[Role] = &[Role::Player];

fn dtos<T, D: From<T>>(items: Vec<T>) -> Vec<D> {
    items.into_iter().map(D::from).collect()
}

// -- join requests --------------------------------------------------------

pub async fn list_join_requests(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
) -> ApiResult<Json<Vec<JoinRequestDto>>> {
    caller.require(STAFF)?;
    let requests = svc.list_join_requests().await?;
    Ok(Json(dtos(requests)))
}

pub async fn get_join_request(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<Json<JoinRequestDto>> {
    caller.require(STAFF)?;
    let request = svc.get_join_request(positive_id("id", id)?).await?;
    Ok(Json(request.into()))
}

pub async fn list_my_join_requests(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
) -> ApiResult<Json<Vec<JoinRequestDto>>> {
    let caller = caller.require(PLAYER)?;
    let requests = svc.list_my_join_requests(&caller).await?;
    Ok(Json(dtos(requests)))
}

pub async fn list_team_join_requests(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(team_id): Path<i32>,
) -> ApiResult<Json<Vec<JoinRequestDto>>> {
    caller.require(STAFF)?;
    let requests = svc
        .list_pending_join_requests(positive_id("teamId", team_id)?)
        .await?;
    Ok(Json(dtos(requests)))
}

pub async fn create_join_request(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Json(req): Json<CreateJoinRequestReq>,
) -> ApiResult<(StatusCode, Json<JoinRequestDto>)> {
    let caller = caller.require(PLAYER)?;
    let new_request = NewJoinRequest {
        team_id: positive_id("teamId", req.team_id)?,
    };
    let request = svc.create_join_request(&caller, new_request).await?;
    Ok((StatusCode::CREATED, Json(request.into())))
}

pub async fn approve_join_request(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<Json<JoinRequestDto>> {
    let caller = caller.require(COACH)?;
    let request = svc
        .approve_join_request(&caller, positive_id("id", id)?)
        .await?;
    Ok(Json(request.into()))
}

pub async fn reject_join_request(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
    body: Option<Json<RejectJoinRequestReq>>,
) -> ApiResult<Json<JoinRequestDto>> {
    let caller = caller.require(COACH)?;
    let Json(req) = body.unwrap_or_default();
    let request = svc
        .reject_join_request(&caller, positive_id("id", id)?, req.review_comment)
        .await?;
    Ok(Json(request.into()))
}

pub async fn cancel_join_request(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<Json<JoinRequestDto>> {
    let caller = caller.require(PLAYER)?;
    let request = svc
        .cancel_join_request(&caller, positive_id("id", id)?)
        .await?;
    Ok(Json(request.into()))
}

pub async fn delete_join_request(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    caller.require(ADMIN)?;
    svc.delete_join_request(positive_id("id", id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- membership ledger (shared by both sides) ------------------------------

async fn list_side<D: From<Membership>>(
    svc: &Service,
    caller: AuthCaller,
    side: MemberSide,
    include_inactive: bool,
) -> ApiResult<Json<Vec<D>>> {
    caller.require(STAFF)?;
    let memberships = svc.list_memberships(side, include_inactive).await?;
    Ok(Json(dtos(memberships)))
}

async fn get_side<D: From<Membership>>(
    svc: &Service,
    caller: AuthCaller,
    side: MemberSide,
    id: i32,
    include_inactive: bool,
) -> ApiResult<Json<D>> {
    caller.require(STAFF)?;
    let membership = svc
        .get_membership(side, positive_id("id", id)?, include_inactive)
        .await?;
    Ok(Json(membership.into()))
}

async fn list_by_member<D: From<Membership>>(
    svc: &Service,
    caller: AuthCaller,
    side: MemberSide,
    member_id: i32,
) -> ApiResult<Json<Vec<D>>> {
    caller.require(STAFF)?;
    let field = if side == MemberSide::Player { "playerId" } else { "coachId" };
    let memberships = svc
        .list_member_memberships(side, positive_id(field, member_id)?)
        .await?;
    Ok(Json(dtos(memberships)))
}

async fn create_side<D: From<Membership>>(
    svc: &Service,
    caller: AuthCaller,
    new_membership: NewMembership,
) -> ApiResult<(StatusCode, Json<D>)> {
    let caller = caller.require(STAFF)?;
    let membership = svc.create_membership(&caller, new_membership).await?;
    Ok((StatusCode::CREATED, Json(membership.into())))
}

async fn update_status_side<D: From<Membership>>(
    svc: &Service,
    caller: AuthCaller,
    side: MemberSide,
    id: i32,
    status: bool,
) -> ApiResult<Json<D>> {
    caller.require(STAFF)?;
    let membership = svc
        .update_membership_status(side, positive_id("id", id)?, status)
        .await?;
    Ok(Json(membership.into()))
}

async fn delete_side(
    svc: &Service,
    caller: AuthCaller,
    side: MemberSide,
    id: i32,
) -> ApiResult<StatusCode> {
    caller.require(ADMIN)?;
    svc.delete_membership(side, positive_id("id", id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- player teams ----------------------------------------------------------

pub async fn list_player_teams(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
) -> ApiResult<Json<Vec<PlayerTeamDto>>> {
    list_side(&svc, caller, MemberSide::Player, false).await
}

pub async fn list_all_player_teams(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
) -> ApiResult<Json<Vec<PlayerTeamDto>>> {
    list_side(&svc, caller, MemberSide::Player, true).await
}

pub async fn get_player_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<Json<PlayerTeamDto>> {
    get_side(&svc, caller, MemberSide::Player, id, false).await
}

pub async fn get_any_player_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<Json<PlayerTeamDto>> {
    get_side(&svc, caller, MemberSide::Player, id, true).await
}

pub async fn list_teams_of_player(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(player_id): Path<i32>,
) -> ApiResult<Json<Vec<PlayerTeamDto>>> {
    list_by_member(&svc, caller, MemberSide::Player, player_id).await
}

pub async fn create_player_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Json(req): Json<CreatePlayerTeamReq>,
) -> ApiResult<(StatusCode, Json<PlayerTeamDto>)> {
    let new_membership = NewMembership::try_from(req)?;
    create_side(&svc, caller, new_membership).await
}

pub async fn update_player_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
    Json(req): Json<UpdatePlayerTeamReq>,
) -> ApiResult<Json<PlayerTeamDto>> {
    caller.require(STAFF)?;
    let membership = svc
        .update_membership(MemberSide::Player, positive_id("id", id)?, req.try_into()?)
        .await?;
    Ok(Json(membership.into()))
}

pub async fn update_player_team_status(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
    Json(req): Json<UpdateStatusReq>,
) -> ApiResult<Json<PlayerTeamDto>> {
    update_status_side(&svc, caller, MemberSide::Player, id, req.status).await
}

pub async fn delete_player_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    delete_side(&svc, caller, MemberSide::Player, id).await
}

// -- coach teams -----------------------------------------------------------

pub async fn list_coach_teams(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
) -> ApiResult<Json<Vec<CoachTeamDto>>> {
    list_side(&svc, caller, MemberSide::Coach, false).await
}

pub async fn list_all_coach_teams(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
) -> ApiResult<Json<Vec<CoachTeamDto>>> {
    list_side(&svc, caller, MemberSide::Coach, true).await
}

pub async fn get_coach_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<Json<CoachTeamDto>> {
    get_side(&svc, caller, MemberSide::Coach, id, false).await
}

pub async fn get_any_coach_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<Json<CoachTeamDto>> {
    get_side(&svc, caller, MemberSide::Coach, id, true).await
}

pub async fn list_teams_of_coach(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(coach_id): Path<i32>,
) -> ApiResult<Json<Vec<CoachTeamDto>>> {
    list_by_member(&svc, caller, MemberSide::Coach, coach_id).await
}

pub async fn create_coach_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Json(req): Json<CreateCoachTeamReq>,
) -> ApiResult<(StatusCode, Json<CoachTeamDto>)> {
    let new_membership = NewMembership::try_from(req)?;
    create_side(&svc, caller, new_membership).await
}

pub async fn update_coach_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
    Json(req): Json<UpdateCoachTeamReq>,
) -> ApiResult<Json<CoachTeamDto>> {
    caller.require(STAFF)?;
    let membership = svc
        .update_membership(MemberSide::Coach, positive_id("id", id)?, req.try_into()?)
        .await?;
    Ok(Json(membership.into()))
}

pub async fn update_coach_team_status(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
    Json(req): Json<UpdateStatusReq>,
) -> ApiResult<Json<CoachTeamDto>> {
    update_status_side(&svc, caller, MemberSide::Coach, id, req.status).await
}

pub async fn delete_coach_team(
    Extension(svc): Extension<Arc<Service>>,
    caller: AuthCaller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    delete_side(&svc, caller, MemberSide::Coach, id).await
}
