//! Membership and community-plan endpoint handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bookwell_common::db::models::{CommunityPlan, Membership};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::server::AppContext;
use crate::membership::{CreateCommunityPlanRequest, CreateMembershipRequest};

#[derive(Debug, Serialize)]
pub struct MembershipsResponse {
    pub memberships: Vec<Membership>,
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateMembershipsRequest {
    pub memberships: Vec<CreateMembershipRequest>,
}

/// POST /memberships - Create a membership after its referential preconditions
pub async fn create_membership(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateMembershipRequest>,
) -> std::result::Result<(StatusCode, Json<Membership>), ApiError> {
    let membership = ctx.memberships.create(&req).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

/// POST /memberships/bulk - All-or-nothing batch creation
pub async fn bulk_create_memberships(
    State(ctx): State<AppContext>,
    Json(req): Json<BulkCreateMembershipsRequest>,
) -> std::result::Result<(StatusCode, Json<MembershipsResponse>), ApiError> {
    let memberships = ctx.memberships.bulk_create(&req.memberships).await?;
    Ok((StatusCode::CREATED, Json(MembershipsResponse { memberships })))
}

/// GET /memberships/:membership_id
pub async fn get_membership(
    State(ctx): State<AppContext>,
    Path(membership_id): Path<Uuid>,
) -> std::result::Result<Json<Membership>, ApiError> {
    let membership = ctx.memberships.get(membership_id).await?;
    Ok(Json(membership))
}

/// DELETE /memberships/:membership_id
pub async fn delete_membership(
    State(ctx): State<AppContext>,
    Path(membership_id): Path<Uuid>,
) -> std::result::Result<StatusCode, ApiError> {
    ctx.memberships.delete(membership_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /community-plans - Associate a plan with a community
pub async fn create_community_plan(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateCommunityPlanRequest>,
) -> std::result::Result<(StatusCode, Json<CommunityPlan>), ApiError> {
    let association = ctx.memberships.create_community_plan(&req).await?;
    Ok((StatusCode::CREATED, Json(association)))
}
