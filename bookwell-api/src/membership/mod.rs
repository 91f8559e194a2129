//! Membership creation and its referential preconditions
//!
//! A membership may only bind a user to a community+plan pair for which a
//! CommunityPlan association already exists. The precondition check runs
//! inside the same transaction as the insert, so it cannot race a concurrent
//! association delete.

use bookwell_common::db::models::{CommunityPlan, Membership, MembershipStatus};
use bookwell_common::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::SqliteConnection;
use tracing::info;
use uuid::Uuid;

use crate::bulk;
use crate::store::{self, Store};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMembershipRequest {
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<MembershipStatus>,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommunityPlanRequest {
    pub community_id: Uuid,
    pub plan_id: Uuid,
}

#[derive(Clone)]
pub struct MembershipService {
    store: Store,
}

impl MembershipService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: &CreateMembershipRequest) -> Result<Membership> {
        let req = req.clone();
        self.store
            .with_write_tx(move |conn| {
                let req = req.clone();
                Box::pin(async move { create_membership_tx(conn, &req).await })
            })
            .await
    }

    /// Create a batch of memberships under one transaction; empty batches
    /// are rejected and the first failing item rolls back the whole batch.
    pub async fn bulk_create(&self, reqs: &[CreateMembershipRequest]) -> Result<Vec<Membership>> {
        bulk::require_items(reqs, "memberships")?;
        let reqs = reqs.to_vec();
        self.store
            .with_write_tx(move |conn| {
                let reqs = reqs.clone();
                Box::pin(async move {
                    bulk::apply_ordered(conn, &reqs, |conn, req| {
                        Box::pin(create_membership_tx(conn, req))
                    })
                    .await
                })
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Membership> {
        let mut conn = self.store.acquire().await?;
        store::memberships::get_membership(&mut conn, id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store
            .with_write_tx(|conn| Box::pin(store::memberships::delete_membership(conn, id)))
            .await
    }

    /// Create a community+plan association; the duplicate pair is a conflict.
    pub async fn create_community_plan(
        &self,
        req: &CreateCommunityPlanRequest,
    ) -> Result<CommunityPlan> {
        let req = req.clone();
        self.store
            .with_write_tx(move |conn| {
                let req = req.clone();
                Box::pin(async move { create_community_plan_tx(conn, &req).await })
            })
            .await
    }
}

/// The membership precondition: the CommunityPlan association must exist.
async fn ensure_community_plan(
    conn: &mut SqliteConnection,
    community_id: Uuid,
    plan_id: Uuid,
) -> Result<()> {
    if store::memberships::community_plan_exists(conn, community_id, plan_id).await? {
        Ok(())
    } else {
        Err(Error::Precondition(
            "Community-Plan association not found".to_string(),
        ))
    }
}

async fn create_membership_tx(
    conn: &mut SqliteConnection,
    req: &CreateMembershipRequest,
) -> Result<Membership> {
    if req.start_date > req.end_date {
        return Err(Error::Validation(
            "start_date must not be after end_date".to_string(),
        ));
    }

    if !store::catalog::user_exists(conn, req.user_id).await? {
        return Err(Error::NotFound("User not found".to_string()));
    }
    if !store::catalog::community_exists(conn, req.community_id).await? {
        return Err(Error::NotFound("Community not found".to_string()));
    }
    if !store::catalog::plan_exists(conn, req.plan_id).await? {
        return Err(Error::NotFound("Plan not found".to_string()));
    }
    ensure_community_plan(conn, req.community_id, req.plan_id).await?;

    let membership = Membership {
        id: Uuid::new_v4(),
        description: req.description.clone(),
        start_date: req.start_date,
        end_date: req.end_date,
        status: req.status.unwrap_or(MembershipStatus::Active),
        community_id: req.community_id,
        user_id: req.user_id,
        plan_id: req.plan_id,
    };
    store::memberships::insert_membership(conn, &membership).await?;

    info!(membership_id = %membership.id, user_id = %membership.user_id, "created membership");
    Ok(membership)
}

async fn create_community_plan_tx(
    conn: &mut SqliteConnection,
    req: &CreateCommunityPlanRequest,
) -> Result<CommunityPlan> {
    if !store::catalog::community_exists(conn, req.community_id).await? {
        return Err(Error::NotFound("Community not found".to_string()));
    }
    if !store::catalog::plan_exists(conn, req.plan_id).await? {
        return Err(Error::NotFound("Plan not found".to_string()));
    }
    if store::memberships::community_plan_exists(conn, req.community_id, req.plan_id).await? {
        return Err(Error::Conflict(
            "Community-Plan association already exists".to_string(),
        ));
    }

    let association = CommunityPlan {
        community_id: req.community_id,
        plan_id: req.plan_id,
    };
    store::memberships::insert_community_plan(conn, &association).await?;

    Ok(association)
}
