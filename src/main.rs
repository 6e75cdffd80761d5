#[macro_use]
extern crate rocket;

mod ai;
mod boot;
mod config;
mod error;
mod pipeline;
mod recover;
mod routes;
mod schema;
mod tests;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::serde::json::Json;
use serde_json::{json, Value};

use config::AppConfig;
use pipeline::FailureSink;

/// Reflects the request origin back when it's on the configured allow
/// list. Origins come from `AppConfig`, shared via managed state.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS Headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r rocket::Request<'_>, res: &mut rocket::Response<'r>) {
        let Some(config) = req.rocket().state::<AppConfig>() else {
            return;
        };
        let Some(origin) = req.headers().get_one("Origin") else {
            return;
        };
        if config.allowed_origins.iter().any(|o| o == origin) {
            res.set_header(Header::new(
                "Access-Control-Allow-Origin",
                origin.to_string(),
            ));
            res.set_header(Header::new(
                "Access-Control-Allow-Methods",
                "GET, POST, OPTIONS",
            ));
            res.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
            res.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
        }
    }
}

/// Empty 200 for preflight; the fairing adds the CORS headers.
#[options("/<_..>")]
fn preflight() {}

#[catch(404)]
fn not_found() -> Json<Value> {
    Json(json!({ "error": "Not found" }))
}

#[catch(500)]
fn server_error() -> Json<Value> {
    Json(json!({ "error": "Internal server error" }))
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    // Boot check: verify credentials and the failure dump directory
    // before accepting traffic.
    let config = AppConfig::from_env();
    boot::run(&config);

    let failures = FailureSink::new(&config.failure_dir);

    rocket::build()
        .manage(config)
        .manage(failures)
        .attach(Cors)
        .mount("/", routes![preflight])
        .mount("/strategy", routes::strategy::routes())
        .mount("/recommendation", routes::recommendation::routes())
        .mount("/content", routes::content::routes())
        .mount("/script", routes::script::routes())
        .mount("/image", routes::image::routes())
        .mount("/trends", routes::trends::routes())
        .register("/", catchers![not_found, server_error])
}
