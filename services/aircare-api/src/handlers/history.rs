//! History retrieval.

use tracing::{debug, instrument};

use aircare_common::{normalize_location_key, AirCareResult, HistoryResponse};

use crate::params::{HistoryParams, QueryParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// `history`: stored samples for a location, oldest first.
///
/// The store is queried with the normalized key, but the response echoes
/// the location exactly as supplied. Advice is recomputed from the stored
/// AQI so older records follow the current mapping.
#[instrument(skip(state, params))]
pub async fn history(state: &AppState, params: &QueryParams) -> AirCareResult<ApiResponse> {
    let params = HistoryParams::from_query(params)?;

    let key = normalize_location_key(&params.location);
    let records = state.store.query(&key, params.user_id.as_deref()).await?;
    debug!(location = %key, count = records.len(), "Loaded history");

    let response = HistoryResponse {
        location: params.location,
        history: records
            .into_iter()
            .map(|record| record.with_current_advice())
            .collect(),
    };

    Ok(ApiResponse::ok(&response))
}
