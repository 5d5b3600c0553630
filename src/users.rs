use spin_sdk::http::{Request, Response};
use crate::models::User;
use crate::core::errors::ApiError;
use crate::core::helpers::{json_response, store, validate_uuid};
use crate::core::query_params::{get_usize, parse_query_params};
use crate::animations::count_by_author;
use crate::config::*;

/// Wire projection of a user document. The password hash never appears in
/// any response, so every serialization path goes through here.
pub fn build_user_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "bio": user.bio,
        "profile_picture": user.profile_picture,
        "joined_date": user.joined_date,
        "followers": user.followers,
        "following": user.following,
    })
}

pub fn search_users(req: Request) -> anyhow::Result<Response> {
    let store = store();
    let params = parse_query_params(req.uri());

    let query = match params.get("q") {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return Ok(ApiError::BadRequest("Search query required".to_string()).into()),
    };
    let limit = get_usize(&params, "limit", SEARCH_LIMIT);

    let users: Vec<String> = store.get_json(USERS_LIST_KEY)?.unwrap_or_default();
    let mut matches = Vec::new();
    for id in users {
        if let Some(u) = store.get_json::<User>(&user_key(&id))? {
            if u.username.to_lowercase().contains(&query) {
                matches.push(build_user_json(&u));
                if matches.len() >= limit {
                    break;
                }
            }
        }
    }

    json_response(200, &serde_json::Value::Array(matches))
}

pub fn get_user_profile(req: Request) -> anyhow::Result<Response> {
    let user_id = req.path().trim_start_matches("/users/").to_string();

    if user_id.is_empty() || !validate_uuid(&user_id) {
        return Ok(ApiError::BadRequest("User ID required".to_string()).into());
    }

    let store = store();
    let user = match store.get_json::<User>(&user_key(&user_id))? {
        Some(u) => u,
        None => return Ok(ApiError::NotFound("User not found".to_string()).into()),
    };

    // The animation count lives with the content store; follower counts are
    // derived from the document's own edge lists.
    let animations_count = count_by_author(&store, &user.id)?;

    json_response(
        200,
        &serde_json::json!({
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "bio": user.bio,
            "profile_picture": user.profile_picture,
            "joined_date": user.joined_date,
            "followers_count": user.followers.len(),
            "following_count": user.following.len(),
            "animations_count": animations_count,
        }),
    )
}
