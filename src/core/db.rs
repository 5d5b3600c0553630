use spin_sdk::key_value::Store;
use uuid::Uuid;
use crate::models::{Animation, User};
use crate::core::helpers::{hash_password, now_iso};
use crate::config::*;

const SEED_USERNAME: &str = "cssmaster";

// One starter snippet per category so a fresh install has something to browse.
const SEED_ANIMATIONS: [(&str, &str, &str, &str); 6] = [
    (
        "Fade In",
        "Fade",
        "square",
        "@keyframes fadeIn {\n  0% { opacity: 0; }\n  100% { opacity: 1; }\n}\n\n.animated-element {\n  animation: fadeIn 1.5s ease-in;\n}",
    ),
    (
        "Slide In Left",
        "Slide",
        "square",
        "@keyframes slideInLeft {\n  0% { transform: translateX(-100%); }\n  100% { transform: translateX(0); }\n}\n\n.animated-element {\n  animation: slideInLeft 0.8s ease-out;\n}",
    ),
    (
        "Spin",
        "Rotate",
        "circle",
        "@keyframes spin {\n  0% { transform: rotate(0deg); }\n  100% { transform: rotate(360deg); }\n}\n\n.animated-element {\n  animation: spin 2s linear infinite;\n}",
    ),
    (
        "Bounce",
        "Bounce",
        "circle",
        "@keyframes bounce {\n  0%, 100% { transform: translateY(0); }\n  50% { transform: translateY(-30px); }\n}\n\n.animated-element {\n  animation: bounce 1s ease-in-out infinite;\n}",
    ),
    (
        "Pulse",
        "Scale",
        "circle",
        "@keyframes pulse {\n  0%, 100% { transform: scale(1); }\n  50% { transform: scale(1.15); }\n}\n\n.animated-element {\n  animation: pulse 1.2s ease-in-out infinite;\n}",
    ),
    (
        "Glow",
        "Special Effects",
        "square",
        "@keyframes glow {\n  0%, 100% { box-shadow: 0 0 5px #4f46e5; }\n  50% { box-shadow: 0 0 30px #4f46e5; }\n}\n\n.animated-element {\n  animation: glow 2s ease-in-out infinite;\n}",
    ),
];

/// Populate the store with a system author and one sample animation per
/// category. Safe to call on every request; the username scan makes it a
/// no-op once seeded.
pub fn ensure_seeded(store: &Store) -> anyhow::Result<()> {
    let users: Vec<String> = store.get_json(USERS_LIST_KEY)?.unwrap_or_default();
    for id in &users {
        if let Some(u) = store.get_json::<User>(&user_key(id))? {
            if u.username == SEED_USERNAME {
                return Ok(());
            }
        }
    }

    let author_id = Uuid::new_v4().to_string();
    let author = User {
        id: author_id.clone(),
        username: SEED_USERNAME.to_string(),
        email: "hub@anim8.dev".to_string(),
        // Random credential: the system author cannot be logged into.
        password: hash_password(&Uuid::new_v4().to_string())?,
        bio: "Curated collection of starter CSS animations".to_string(),
        profile_picture: String::new(),
        joined_date: now_iso(),
        followers: Vec::new(),
        following: Vec::new(),
    };
    store.set_json(&user_key(&author_id), &author)?;

    let mut users = users;
    users.push(author_id.clone());
    store.set_json(USERS_LIST_KEY, &users)?;

    let mut index: Vec<String> = store.get_json(ANIMATIONS_LIST_KEY)?.unwrap_or_default();
    for (title, category, shape_type, css_code) in SEED_ANIMATIONS {
        let id = Uuid::new_v4().to_string();
        let animation = Animation {
            id: id.clone(),
            title: title.to_string(),
            css_code: css_code.to_string(),
            category: category.to_string(),
            shape_type: shape_type.to_string(),
            user_id: author_id.clone(),
            username: author.username.clone(),
            user_profile_picture: String::new(),
            created_at: now_iso(),
            likes: Vec::new(),
        };
        store.set_json(&animation_key(&id), &animation)?;
        index.insert(0, id);
    }
    store.set_json(ANIMATIONS_LIST_KEY, &index)?;

    tracing::info!("seeded {} sample animations", SEED_ANIMATIONS.len());

    Ok(())
}
