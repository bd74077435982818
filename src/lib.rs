// Library exports for the Tron agent
// This allows the server binary, the replay tool and the tests to share the core logic

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod handler;
pub mod replay;
pub mod types;

use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};

/// Mounts the judge-facing routes around an already configured Bot
pub fn build_rocket(bot: bot::Bot) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "tron-agent");
            })
        }))
        .mount(
            "/",
            routes![
                handler::index,
                handler::send_state,
                handler::send_move,
                handler::end
            ],
        )
}
