//! Entity list, simple id lookup and enumerations
//!
//! The list here returns raw records. Without `page`/`limit` the payload is
//! `{pokemons, total_count}`; with either it is `{pokemons, pagination}`.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use pokedex_common::catalog::{
    distinct_generations, distinct_types, filter_entities, find_by_id_or_idx, ListFilter,
};
use pokedex_common::numeric::parse_leading_int;
use pokedex_common::Entity;

use super::{ApiError, ApiResponse, QueryParams};
use crate::pagination::{calculate_pagination, PageRequest, Pagination};
use crate::AppState;

/// Query parameters shared by both list endpoints
#[derive(Debug, Default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub name_zh: Option<String>,
    pub name_ja: Option<String>,
    pub name_en: Option<String>,
    pub type_name: Option<String>,
    pub generation: Option<String>,
}

impl From<&QueryParams> for ListQuery {
    fn from(params: &QueryParams) -> Self {
        Self {
            page: params.first_owned("page"),
            limit: params.first_owned("limit"),
            name_zh: params.first_owned("nameZh"),
            name_ja: params.first_owned("nameJa"),
            name_en: params.first_owned("nameEn"),
            type_name: params.first_owned("type"),
            generation: params.first_owned("generation"),
        }
    }
}

impl ListQuery {
    pub fn filter(&self) -> ListFilter {
        ListFilter {
            name_zh: self.name_zh.clone(),
            name_ja: self.name_ja.clone(),
            name_en: self.name_en.clone(),
            type_name: self.type_name.clone(),
            generation: self.generation.clone(),
        }
        .normalized()
    }

    pub fn page_request(&self) -> Option<PageRequest> {
        PageRequest::from_params(self.page.as_deref(), self.limit.as_deref())
    }
}

/// One page of results
#[derive(Debug, Serialize)]
pub struct PagedEntities<T> {
    pub pokemons: Vec<T>,
    pub pagination: Pagination,
}

/// Unpaginated results with their count
#[derive(Debug, Serialize)]
pub struct CountedEntities<T> {
    pub pokemons: Vec<T>,
    pub total_count: usize,
}

/// GET /api/pokemon/list
pub async fn list_pokemon(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Response, ApiError> {
    let store = state.store().await?;
    let query = ListQuery::from(&params);
    let filtered = filter_entities(store, &query.filter());

    let response = match query.page_request() {
        Some(request) => {
            let (pagination, range) = calculate_pagination(filtered.len(), request);
            ApiResponse::ok(PagedEntities {
                pokemons: filtered[range].to_vec(),
                pagination,
            })
            .into_response()
        }
        None => {
            let total_count = filtered.len();
            ApiResponse::ok(CountedEntities {
                pokemons: filtered,
                total_count,
            })
            .into_response()
        }
    };

    Ok(response)
}

/// GET /api/pokemon/:id
///
/// Exact id, else first record of the group; no name fallback.
pub async fn get_pokemon_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Entity>>, ApiError> {
    let store = state.store().await?;

    let id = parse_leading_int(&id).ok_or_else(ApiError::record_not_found)?;
    let entity = find_by_id_or_idx(store, id).ok_or_else(ApiError::record_not_found)?;

    Ok(ApiResponse::ok(entity.clone()))
}

/// GET /api/types
pub async fn list_types(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let store = state.store().await?;
    Ok(ApiResponse::ok(distinct_types(store)))
}

/// GET /api/generations
pub async fn list_generations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<i64>>>, ApiError> {
    let store = state.store().await?;
    Ok(ApiResponse::ok(distinct_generations(store)))
}
