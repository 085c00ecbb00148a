use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use axum_extra::extract::Form;
use validator::Validate;

use crate::{contact::ContactForm, error::AppError, routes::AppState};

/// GET /contact
pub async fn page() -> impl IntoResponse {
    Html(include_str!("../../templates/contact.html"))
}

/// POST /contact
pub async fn action(
    State(app_state): State<AppState>,
    Form(input): Form<ContactForm>,
) -> Result<impl IntoResponse, AppError> {
    input.validate()?;

    app_state
        .contact
        .notify(&app_state.config.contact.to_address, &input)
        .await?;

    Ok(Html("<p>Thanks for getting in touch, we will reply shortly.</p>"))
}
