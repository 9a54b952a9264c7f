//! Page views
//!
//! HTML is produced by an external renderer. Handlers hand it the template
//! name plus everything the template reads, serialised as JSON.

use axum::Json;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::PrivateCookieJar;
use serde::Serialize;

use super::flash::{self, Flash};
use crate::auth::SessionUser;

#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub template: &'static str,
    pub flashes: Vec<Flash>,
    pub user: Option<SessionUser>,
    pub context: T,
}

/// Render `template`, consuming any queued flash notices
pub fn render<T: Serialize>(
    jar: PrivateCookieJar,
    template: &'static str,
    user: Option<SessionUser>,
    context: T,
) -> Response {
    let (jar, flashes) = flash::take(jar);
    let page = Page {
        template,
        flashes,
        user,
        context,
    };
    (jar, Json(page)).into_response()
}
