use spin_sdk::http::{Request, Response};
use spin_sdk::key_value::Store;
use crate::models::User;
use crate::core::errors::ApiError;
use crate::core::helpers::{json_response, store, validate_uuid};
use crate::auth::authenticate;
use crate::config::*;

// Edges are stored redundantly on both user documents so either direction
// reads without a scan. Each write re-checks membership, so repeated calls
// can't grow the lists; the two documents are updated without cross-document
// atomicity (an interrupted pair self-heals on retry).

pub fn follow_user(store: &Store, follower_id: &str, target_id: &str) -> anyhow::Result<()> {
    if let Some(mut follower) = store.get_json::<User>(&user_key(follower_id))? {
        if !follower.following.iter().any(|id| id == target_id) {
            follower.following.push(target_id.to_string());
            store.set_json(&user_key(follower_id), &follower)?;
        }
    }

    if let Some(mut target) = store.get_json::<User>(&user_key(target_id))? {
        if !target.followers.iter().any(|id| id == follower_id) {
            target.followers.push(follower_id.to_string());
            store.set_json(&user_key(target_id), &target)?;
        }
    }

    Ok(())
}

pub fn unfollow_user(store: &Store, follower_id: &str, target_id: &str) -> anyhow::Result<()> {
    if let Some(mut follower) = store.get_json::<User>(&user_key(follower_id))? {
        let before = follower.following.len();
        follower.following.retain(|id| id != target_id);
        if follower.following.len() != before {
            store.set_json(&user_key(follower_id), &follower)?;
        }
    }

    if let Some(mut target) = store.get_json::<User>(&user_key(target_id))? {
        let before = target.followers.len();
        target.followers.retain(|id| id != follower_id);
        if target.followers.len() != before {
            store.set_json(&user_key(target_id), &target)?;
        }
    }

    Ok(())
}

// === HTTP Handlers ===

pub fn handle_follow(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let target_id = req
        .path()
        .trim_start_matches("/users/")
        .trim_end_matches("/follow")
        .to_string();

    if target_id.is_empty() || !validate_uuid(&target_id) {
        return Ok(ApiError::BadRequest("Invalid target user".to_string()).into());
    }
    if target_id == user_id {
        return Ok(ApiError::BadRequest("Cannot follow yourself".to_string()).into());
    }

    let store = store();
    if store.get_json::<User>(&user_key(&target_id))?.is_none() {
        return Ok(ApiError::NotFound("User not found".to_string()).into());
    }

    follow_user(&store, &user_id, &target_id)?;

    json_response(200, &serde_json::json!({ "success": true }))
}

pub fn handle_unfollow(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let target_id = req
        .path()
        .trim_start_matches("/users/")
        .trim_end_matches("/unfollow")
        .to_string();

    if target_id.is_empty() || !validate_uuid(&target_id) {
        return Ok(ApiError::BadRequest("Invalid target user".to_string()).into());
    }

    // Removing an absent edge is a no-op, never an error.
    unfollow_user(&store(), &user_id, &target_id)?;

    json_response(200, &serde_json::json!({ "success": true }))
}
