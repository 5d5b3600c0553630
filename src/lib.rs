pub mod animations;
pub mod auth;
pub mod config;
pub mod core;
pub mod follow;
pub mod models;
pub mod users;

use spin_sdk::http::{Request, Response};

use crate::core::errors::ApiError;

#[cfg(target_arch = "wasm32")]
use spin_sdk::http_component;

#[cfg(target_arch = "wasm32")]
#[http_component]
fn handle(req: Request) -> Response {
    route(req)
}

/// Single route table shared by the Spin component and the native adapter
/// binary. Domain failures come back as 4xx responses from the handlers;
/// anything escaping as an `Err` is an unexpected failure and turns into a
/// generic 500.
pub fn route(req: Request) -> Response {
    // Seed sample content on first touch; a failed seed never blocks a request.
    let _ = crate::core::db::ensure_seeded(&crate::core::helpers::store());

    match dispatch(req) {
        Ok(resp) => resp,
        Err(e) => Response::from(ApiError::InternalError(e.to_string())),
    }
}

fn dispatch(req: Request) -> anyhow::Result<Response> {
    let method = req.method().to_string();
    let path = req.path().to_string();

    match (method.as_str(), path.as_str()) {
        ("POST", "/auth/register") => auth::register(req),
        ("POST", "/auth/login") => auth::login(req),
        ("GET", "/auth/me") => auth::me(req),
        ("GET", "/users/search") => users::search_users(req),
        ("GET", "/animations") => animations::list_animations(req),
        ("POST", "/animations") => animations::create_animation(req),
        // Fixed sub-paths must win over the `/animations/{id}` fallthrough.
        ("GET", "/animations/following") => animations::list_following_animations(req),
        ("GET", "/animations/categories/list") => animations::categories(),
        ("POST", p) if p.starts_with("/users/") && p.ends_with("/follow") => {
            follow::handle_follow(req)
        }
        ("POST", p) if p.starts_with("/users/") && p.ends_with("/unfollow") => {
            follow::handle_unfollow(req)
        }
        ("GET", p) if p.starts_with("/users/") && p.ends_with("/animations") => {
            animations::list_user_animations(req)
        }
        ("POST", p) if p.starts_with("/animations/") && p.ends_with("/like") => {
            animations::toggle_like(req)
        }
        ("GET", p) if p.starts_with("/animations/") => animations::get_animation(req),
        ("GET", p) if p.starts_with("/users/") => users::get_user_profile(req),
        _ => Ok(ApiError::NotFound("Not found".to_string()).into()),
    }
}
