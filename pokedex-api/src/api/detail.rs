//! Entity detail lookup
//!
//! Resolves one of `id`, `idx`, `nameZh`, `nameEn`, `nameJa` (first present
//! wins) to a canonical entity joined with its forms and detail record.

use axum::{extract::State, Json};
use tracing::debug;

use pokedex_common::{resolve, EntityProfile, Lookup};

use super::{ApiError, ApiResponse, QueryParams};
use crate::AppState;

/// Query parameters for the detail lookup
#[derive(Debug, Default)]
pub struct DetailQuery {
    pub id: Option<String>,
    pub idx: Option<String>,
    pub name_zh: Option<String>,
    pub name_en: Option<String>,
    pub name_ja: Option<String>,
}

impl From<&QueryParams> for DetailQuery {
    fn from(params: &QueryParams) -> Self {
        Self {
            id: params.first_owned("id"),
            idx: params.first_owned("idx"),
            name_zh: params.first_owned("nameZh"),
            name_en: params.first_owned("nameEn"),
            name_ja: params.first_owned("nameJa"),
        }
    }
}

impl DetailQuery {
    fn lookup(&self) -> pokedex_common::Result<Option<Lookup>> {
        Lookup::from_params(
            self.id.as_deref(),
            self.idx.as_deref(),
            self.name_zh.as_deref(),
            self.name_en.as_deref(),
            self.name_ja.as_deref(),
        )
    }
}

/// GET /api/detail?id=|idx=|nameZh=|nameEn=|nameJa=
pub async fn get_entity_detail(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<ApiResponse<EntityProfile>>, ApiError> {
    let store = state.store().await?;
    let query = DetailQuery::from(&params);

    let lookup = match query.lookup() {
        Ok(Some(lookup)) => lookup,
        Ok(None) => return Err(ApiError::entity_not_found()),
        Err(e) => {
            debug!("Unusable lookup key: {}", e);
            return Err(ApiError::entity_not_found());
        }
    };

    let profile = resolve(store, &lookup).ok_or_else(ApiError::entity_not_found)?;
    debug!("Resolved {:?} to id {}", lookup, profile.id);

    Ok(ApiResponse::ok(profile))
}
