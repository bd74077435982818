// HTTP handler bindings for the judge's agent API
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's methods. Handlers are responsible for:
// - Deserializing incoming JSON requests and query strings
// - Extracting the Bot instance from Rocket's managed state
// - Delegating to Bot methods

use rocket::http::Status;
use rocket::serde::json::Json;
use serde_json::Value;

use crate::bot::{Bot, MoveRequest};
use crate::types::GameState;

/// GET / endpoint
/// Returns agent identity
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /send-state endpoint
/// Called by the judge whenever the board changes
#[post("/send-state", format = "json", data = "<state>")]
pub fn send_state(bot: &rocket::State<Bot>, state: Json<GameState>) -> Status {
    bot.receive_state(state.into_inner());

    Status::Ok
}

/// GET /send-move endpoint
/// Called each turn to compute and return the next move
#[get("/send-move?<player_number>&<attempt_number>&<random_moves_left>&<turn_count>")]
pub async fn send_move(
    bot: &rocket::State<Bot>,
    player_number: Option<i64>,
    attempt_number: Option<i64>,
    random_moves_left: Option<i64>,
    turn_count: Option<i64>,
) -> Json<Value> {
    let request = MoveRequest {
        player_number,
        attempt_number,
        random_moves_left,
        turn_count,
    };

    Json(bot.get_move(request).await)
}

/// POST /end endpoint
/// Called when a game ends
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<GameState>) -> Status {
    bot.end(&end_req);

    Status::Ok
}
