// src/handlers/contact.rs
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::session::ContactMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    email.len() > 2 && email.contains('@') && !email.starts_with('@') && !email.ends_with('@')
}

pub async fn submit_contact(form: ContactForm, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling contact form submission");

    if form.email.trim().is_empty() || form.message.trim().is_empty() {
        warn!("Contact form missing fields");
        return Err(warp::reject::custom(ApiError::invalid_input(
            "Please fill in both email and message fields.",
        )));
    }
    if !looks_like_email(&form.email) {
        return Err(warp::reject::custom(ApiError::invalid_input(format!(
            "{:?} is not a valid email address",
            form.email
        ))));
    }

    state
        .session
        .add_contact(ContactMessage {
            email: form.email.trim().to_string(),
            message: Some(form.message.trim().to_string()),
        })
        .await;

    Ok(warp::reply::json(&json!({
        "status": "ok",
        "message": "Thanks for reaching out! I'll get back to you soon."
    })))
}

pub async fn subscribe(form: SubscribeForm, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling report subscription");

    if !looks_like_email(&form.email) {
        return Err(warp::reject::custom(ApiError::invalid_input(
            "Enter your email to get reports or updates",
        )));
    }

    state
        .session
        .add_contact(ContactMessage {
            email: form.email.trim().to_string(),
            message: None,
        })
        .await;

    Ok(warp::reply::json(&json!({
        "status": "ok",
        "message": "Thanks! We'll be in touch via email."
    })))
}
