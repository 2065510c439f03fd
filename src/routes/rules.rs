use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    game::Rules,
    models::{Kind, KindInfo},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct RulesResponse {
    pub rules: Rules,
    pub kinds: Vec<KindInfo>,
}

/// Active rules and the tile catalogue renderers draw from
pub async fn get_rules(State(state): State<Arc<AppState>>) -> Json<RulesResponse> {
    Json(RulesResponse {
        rules: state.config.game.rules(),
        kinds: Kind::catalogue(),
    })
}
