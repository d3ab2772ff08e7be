use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dashboard::{filter_by_name, sort_profiles, SortKey, SortOrder};
use crate::errors::AppError;
use crate::models::candidate::CandidateProfile;
use crate::state::AppState;
use crate::store::SessionStore;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CandidateQuery {
    pub search: String,
    pub sort: SortKey,
    pub order: SortOrder,
}

/// One row of the dashboard list.
#[derive(Debug, Serialize)]
pub struct CandidateSummary {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub name: Option<String>,
    pub final_score: Option<u32>,
    pub final_summary: String,
}

impl From<&CandidateProfile> for CandidateSummary {
    fn from(profile: &CandidateProfile) -> Self {
        CandidateSummary {
            id: profile.id,
            timestamp: profile.timestamp,
            name: profile.details.name.clone(),
            final_score: profile.final_score,
            final_summary: profile.final_summary.clone(),
        }
    }
}

/// GET /api/v1/candidates?search=&sort=name|score&order=asc|desc
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<Vec<CandidateSummary>>, AppError> {
    let snap = state.store.load().await?;
    let mut filtered = filter_by_name(&snap.profiles, &query.search);
    sort_profiles(&mut filtered, query.sort, query.order);
    Ok(Json(filtered.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateProfile>, AppError> {
    let snap = state.store.load().await?;
    snap.profiles
        .into_iter()
        .find(|p| p.id == id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}
