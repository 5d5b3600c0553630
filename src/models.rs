use serde::{Serialize, Deserialize};

/// Stored user document. `password` holds the argon2 hash and must never
/// reach a response body; handlers serialize users through `users::build_user_json`.
#[derive(Serialize, Deserialize, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_picture: String,
    pub joined_date: String,
    #[serde(default)]
    pub followers: Vec<String>,
    #[serde(default)]
    pub following: Vec<String>,
}

/// Stored animation document. `username` and `user_profile_picture` are
/// copies of the author's fields taken at creation time and are not kept in
/// sync with later profile edits. `likes` is a list with set semantics; the
/// wire-level `likes_count` is always computed from its length at read time.
#[derive(Serialize, Deserialize, Clone)]
pub struct Animation {
    pub id: String,
    pub title: String,
    pub css_code: String,
    pub category: String,
    pub shape_type: String,
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub user_profile_picture: String,
    pub created_at: String,
    #[serde(default)]
    pub likes: Vec<String>,
}
