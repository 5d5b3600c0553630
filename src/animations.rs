use spin_sdk::http::{Request, Response};
use spin_sdk::key_value::Store;
use uuid::Uuid;
use crate::models::{Animation, User};
use crate::core::errors::ApiError;
use crate::core::helpers::{json_response, now_iso, sanitize_text, store, validate_uuid};
use crate::core::query_params::{get_usize, parse_query_params};
use crate::auth::authenticate;
use crate::config::*;

pub fn animation_json(anim: &Animation) -> serde_json::Value {
    serde_json::json!({
        "id": anim.id,
        "title": anim.title,
        "css_code": anim.css_code,
        "category": anim.category,
        "shape_type": anim.shape_type,
        "user_id": anim.user_id,
        "username": anim.username,
        "user_profile_picture": anim.user_profile_picture,
        "created_at": anim.created_at,
        "likes": anim.likes,
        // Derived from the like set on every read, never stored as truth.
        "likes_count": anim.likes.len(),
    })
}

pub fn is_valid_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

/// Load every animation document referenced by the index, newest first.
fn load_feed(store: &Store) -> anyhow::Result<Vec<Animation>> {
    let index: Vec<String> = store.get_json(ANIMATIONS_LIST_KEY)?.unwrap_or_default();

    let mut animations = Vec::new();
    for id in index.iter() {
        if let Some(a) = store.get_json::<Animation>(&animation_key(id))? {
            animations.push(a);
        }
    }

    // The index is prepend-ordered already; sort to keep the contract
    // independent of index maintenance. Equal timestamps stay unspecified.
    animations.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(animations)
}

/// Collaborator interface for the user directory's profile aggregates.
pub fn count_by_author(store: &Store, user_id: &str) -> anyhow::Result<usize> {
    let index: Vec<String> = store.get_json(ANIMATIONS_LIST_KEY)?.unwrap_or_default();

    let mut count = 0;
    for id in index.iter() {
        if let Some(a) = store.get_json::<Animation>(&animation_key(id))? {
            if a.user_id == user_id {
                count += 1;
            }
        }
    }

    Ok(count)
}

pub fn create_animation(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let store = store();
    let author = match store.get_json::<User>(&user_key(&user_id))? {
        Some(u) => u,
        None => return Ok(ApiError::NotFound("User not found".to_string()).into()),
    };

    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };
    let title = sanitize_text(body["title"].as_str().unwrap_or(""));
    // CSS is opaque content; stored exactly as submitted.
    let css_code = body["css_code"].as_str().unwrap_or("").to_string();
    let category = body["category"].as_str().unwrap_or("").to_string();
    let shape_type = sanitize_text(body["shape_type"].as_str().unwrap_or(""));

    if title.is_empty() || title.len() > MAX_TITLE_LENGTH {
        return Ok(ApiError::BadRequest("Title must be 1-120 characters".to_string()).into());
    }
    if css_code.is_empty() || css_code.len() > MAX_CSS_LENGTH {
        return Ok(ApiError::BadRequest("Invalid CSS code".to_string()).into());
    }
    if !is_valid_category(&category) {
        return Ok(ApiError::BadRequest("Unknown category".to_string()).into());
    }
    if shape_type.len() > MAX_SHAPE_LENGTH {
        return Ok(ApiError::BadRequest("Shape type too long".to_string()).into());
    }

    let id = Uuid::new_v4().to_string();
    let animation = Animation {
        id: id.clone(),
        title,
        css_code,
        category,
        shape_type,
        user_id: author.id.clone(),
        // Author display fields are copied once at creation; later profile
        // edits intentionally do not propagate here.
        username: author.username.clone(),
        user_profile_picture: author.profile_picture.clone(),
        created_at: now_iso(),
        likes: Vec::new(),
    };

    store.set_json(&animation_key(&id), &animation)?;

    let mut index: Vec<String> = store.get_json(ANIMATIONS_LIST_KEY)?.unwrap_or_default();
    index.insert(0, id.clone()); // prepend newest
    store.set_json(ANIMATIONS_LIST_KEY, &index)?;

    tracing::info!("user {} posted animation {}", author.username, id);

    json_response(201, &animation_json(&animation))
}

pub fn get_animation(req: Request) -> anyhow::Result<Response> {
    let animation_id = req.path().trim_start_matches("/animations/").to_string();

    if animation_id.is_empty() || !validate_uuid(&animation_id) {
        return Ok(ApiError::BadRequest("Animation ID required".to_string()).into());
    }

    let store = store();
    match store.get_json::<Animation>(&animation_key(&animation_id))? {
        Some(anim) => json_response(200, &animation_json(&anim)),
        None => Ok(ApiError::NotFound("Animation not found".to_string()).into()),
    }
}

pub fn list_animations(req: Request) -> anyhow::Result<Response> {
    let params = parse_query_params(req.uri());
    let limit = get_usize(&params, "limit", DEFAULT_PAGE_LIMIT);
    let skip = get_usize(&params, "skip", 0);

    let animations = load_feed(&store())?;
    let page: Vec<_> = animations
        .iter()
        .skip(skip)
        .take(limit)
        .map(animation_json)
        .collect();

    json_response(200, &serde_json::Value::Array(page))
}

pub fn list_user_animations(req: Request) -> anyhow::Result<Response> {
    let user_id = req
        .path()
        .trim_start_matches("/users/")
        .trim_end_matches("/animations")
        .to_string();

    if user_id.is_empty() || !validate_uuid(&user_id) {
        return Ok(ApiError::BadRequest("User ID required".to_string()).into());
    }

    let animations = load_feed(&store())?;
    let items: Vec<_> = animations
        .iter()
        .filter(|a| a.user_id == user_id)
        .take(AUTHOR_LIST_CEILING)
        .map(animation_json)
        .collect();

    json_response(200, &serde_json::Value::Array(items))
}

pub fn list_following_animations(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let params = parse_query_params(req.uri());
    let limit = get_usize(&params, "limit", DEFAULT_PAGE_LIMIT);
    let skip = get_usize(&params, "skip", 0);

    let store = store();
    let user = match store.get_json::<User>(&user_key(&user_id))? {
        Some(u) => u,
        None => return Ok(ApiError::NotFound("User not found".to_string()).into()),
    };

    // Following nobody is an empty feed, not an error.
    let animations = load_feed(&store)?;
    let page: Vec<_> = animations
        .iter()
        .filter(|a| user.following.iter().any(|id| id == &a.user_id))
        .skip(skip)
        .take(limit)
        .map(animation_json)
        .collect();

    json_response(200, &serde_json::Value::Array(page))
}

pub fn toggle_like(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let animation_id = req
        .path()
        .trim_start_matches("/animations/")
        .trim_end_matches("/like")
        .to_string();

    if animation_id.is_empty() || !validate_uuid(&animation_id) {
        return Ok(ApiError::BadRequest("Animation ID required".to_string()).into());
    }

    let store = store();
    let mut anim = match store.get_json::<Animation>(&animation_key(&animation_id))? {
        Some(a) => a,
        None => return Ok(ApiError::NotFound("Animation not found".to_string()).into()),
    };

    // Membership decides direction; the conditional re-check keeps the set
    // duplicate-free. Two simultaneous toggles by one user can still race
    // between this read and the write below: the store has no
    // compare-and-swap, so that narrow window is accepted.
    let liked = if anim.likes.iter().any(|id| id == &user_id) {
        anim.likes.retain(|id| id != &user_id);
        false
    } else {
        anim.likes.push(user_id.clone());
        true
    };

    store.set_json(&animation_key(&animation_id), &anim)?;

    json_response(
        200,
        &serde_json::json!({
            "liked": liked,
            "likes_count": anim.likes.len(),
        }),
    )
}

pub fn categories() -> anyhow::Result<Response> {
    // Fixed enumeration; never read from storage.
    json_response(200, &serde_json::json!({ "categories": CATEGORIES }))
}
