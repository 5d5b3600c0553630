use spin_sdk::http::{Request, Response};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;
use crate::models::User;
use crate::core::errors::ApiError;
use crate::core::helpers::{
    hash_password, json_response, now_iso, sanitize_text, store, verify_password,
};
use crate::core::query_params::{get_string, parse_query_params};
use crate::users::build_user_json;
use crate::config::*;

/// Stateless bearer credential. Nothing is persisted for a session; the
/// signature plus `exp` are the whole contract.
#[derive(Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn create_token(user_id: &str) -> anyhow::Result<String> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + chrono::Duration::hours(token_expiration_hours())).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret_key().as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
}

pub fn decode_token(token: &str) -> Result<String, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret_key().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.sub)
    .map_err(|_| ApiError::InvalidToken)
}

/// Resolve the caller's identity. The observed interface carries the token
/// as a `token` query parameter; an `Authorization: Bearer` header is
/// accepted as well.
pub fn authenticate(req: &Request) -> Result<String, ApiError> {
    let params = parse_query_params(req.uri());
    if let Some(token) = get_string(&params, "token", None) {
        return decode_token(&token);
    }

    let auth_header = req
        .header("Authorization")
        .and_then(|h| h.as_str())
        .unwrap_or_default();
    if let Some(token) = auth_header.strip_prefix("Bearer ") {
        return decode_token(token);
    }

    Err(ApiError::InvalidToken)
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Regex should compile")
    })
}

pub fn register(req: Request) -> anyhow::Result<Response> {
    let store = store();

    let body: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };
    let username = sanitize_text(body["username"].as_str().unwrap_or(""));
    let email = body["email"].as_str().unwrap_or("").to_string();
    let password = body["password"].as_str().unwrap_or("");
    let bio = sanitize_text(body["bio"].as_str().unwrap_or(""));
    // A URL, not display text; escaping would corrupt it.
    let profile_picture = body["profile_picture"].as_str().unwrap_or("").to_string();

    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        return Ok(ApiError::BadRequest("Username must be 3-50 characters".to_string()).into());
    }
    if !email_regex().is_match(&email) {
        return Ok(ApiError::BadRequest("Invalid email address".to_string()).into());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Ok(ApiError::BadRequest("Password must be at least 3 characters".to_string()).into());
    }
    if bio.len() > MAX_BIO_LENGTH {
        return Ok(ApiError::BadRequest("Bio too long (max 500 chars)".to_string()).into());
    }

    // Username and email are two independent uniqueness constraints,
    // checked by exact case-sensitive match.
    let existing_users: Vec<String> = store.get_json(USERS_LIST_KEY)?.unwrap_or_default();
    for id in &existing_users {
        if let Some(u) = store.get_json::<User>(&user_key(id))? {
            if u.username == username {
                return Ok(ApiError::Conflict("Username already exists".to_string()).into());
            }
        }
    }
    for id in &existing_users {
        if let Some(u) = store.get_json::<User>(&user_key(id))? {
            if u.email == email {
                return Ok(ApiError::Conflict("Email already exists".to_string()).into());
            }
        }
    }

    let id = Uuid::new_v4().to_string();
    let user = User {
        id: id.clone(),
        username,
        email,
        password: hash_password(password)?,
        bio,
        profile_picture,
        joined_date: now_iso(),
        followers: Vec::new(),
        following: Vec::new(),
    };

    store.set_json(&user_key(&id), &user)?;

    let mut users = existing_users;
    users.push(id.clone());
    store.set_json(USERS_LIST_KEY, &users)?;

    let token = create_token(&id)?;
    tracing::info!("registered user {}", user.username);

    json_response(
        201,
        &serde_json::json!({
            "token": token,
            "user": build_user_json(&user),
        }),
    )
}

pub fn login(req: Request) -> anyhow::Result<Response> {
    let store = store();

    let creds: serde_json::Value = match serde_json::from_slice(req.body()) {
        Ok(v) => v,
        Err(_) => return Ok(ApiError::BadRequest("Invalid JSON body".to_string()).into()),
    };
    let username = creds["username"].as_str().unwrap_or_default();
    let password = creds["password"].as_str().unwrap_or_default();

    let users: Vec<String> = store.get_json(USERS_LIST_KEY)?.unwrap_or_default();
    let mut found: Option<User> = None;
    for id in users {
        if let Some(u) = store.get_json::<User>(&user_key(&id))? {
            if u.username == username {
                found = Some(u);
                break;
            }
        }
    }

    // Unknown username and wrong password take the same exit so the
    // response carries no existence signal.
    match found {
        Some(user) if verify_password(password, &user.password) => {
            let token = create_token(&user.id)?;
            json_response(
                200,
                &serde_json::json!({
                    "token": token,
                    "user": build_user_json(&user),
                }),
            )
        }
        _ => Ok(ApiError::Unauthorized.into()),
    }
}

pub fn me(req: Request) -> anyhow::Result<Response> {
    let user_id = match authenticate(&req) {
        Ok(uid) => uid,
        Err(e) => return Ok(e.into()),
    };

    let store = store();
    match store.get_json::<User>(&user_key(&user_id))? {
        Some(user) => json_response(200, &build_user_json(&user)),
        None => Ok(ApiError::NotFound("User not found".to_string()).into()),
    }
}
