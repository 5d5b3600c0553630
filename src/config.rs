pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MIN_PASSWORD_LENGTH: usize = 3;
pub const MAX_BIO_LENGTH: usize = 500;
pub const MAX_TITLE_LENGTH: usize = 120;
pub const MAX_CSS_LENGTH: usize = 20_000;
pub const MAX_SHAPE_LENGTH: usize = 50;

pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const SEARCH_LIMIT: usize = 20;
// Per-author listings are unpaginated; cap them so a response can't grow without bound.
pub const AUTHOR_LIST_CEILING: usize = 1000;

pub const USERS_LIST_KEY: &str = "users_list";
pub const ANIMATIONS_LIST_KEY: &str = "animations_list";

pub const CATEGORIES: [&str; 6] = [
    "Fade",
    "Slide",
    "Rotate",
    "Bounce",
    "Scale",
    "Special Effects",
];

pub fn user_key(id: &str) -> String {
    format!("user:{}", id)
}

pub fn animation_key(id: &str) -> String {
    format!("animation:{}", id)
}

pub fn secret_key() -> String {
    std::env::var("ANIM8_SECRET_KEY")
        .unwrap_or_else(|_| "change-me-in-production".to_string())
}

pub fn token_expiration_hours() -> i64 {
    std::env::var("ANIM8_TOKEN_EXPIRATION_HOURS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(24)
}
