//! Entity list with image enrichment
//!
//! Same filters and pagination as `/api/pokemon/list`, but every record
//! carries `image_url` from its detail record (`null` when none). Without
//! `page`/`limit` the envelope is `{success, total, data: [...]}`.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use pokedex_common::catalog::filter_entities;
use pokedex_common::{DataStore, Entity};

use super::list::{ListQuery, PagedEntities};
use super::{ApiError, ApiResponse, QueryParams};
use crate::pagination::calculate_pagination;
use crate::AppState;

/// Entity record plus its resolved image URL
#[derive(Debug, Serialize)]
pub struct EntityWithImage<'a> {
    #[serde(flatten)]
    pub entity: &'a Entity,
    pub image_url: Option<&'a str>,
}

fn with_image<'a>(store: &'a DataStore, entity: &'a Entity) -> EntityWithImage<'a> {
    EntityWithImage {
        entity,
        image_url: store.image_url_for(entity),
    }
}

/// GET /api/pokemon
pub async fn list_pokemon_with_images(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Response, ApiError> {
    let store = state.store().await?;
    let query = ListQuery::from(&params);
    let filtered = filter_entities(store, &query.filter());

    let response = match query.page_request() {
        Some(request) => {
            let (pagination, range) = calculate_pagination(filtered.len(), request);
            let pokemons: Vec<EntityWithImage<'_>> = filtered[range]
                .iter()
                .map(|e| with_image(store, *e))
                .collect();
            ApiResponse::ok(PagedEntities {
                pokemons,
                pagination,
            })
            .into_response()
        }
        None => {
            let total = filtered.len();
            let pokemons: Vec<EntityWithImage<'_>> =
                filtered.iter().map(|e| with_image(store, *e)).collect();
            ApiResponse::with_total(pokemons, total).into_response()
        }
    };

    Ok(response)
}
