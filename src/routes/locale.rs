use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::domain::types::Locale;
use crate::negotiation::switch_locale_path;
use crate::preferences::{CookieStore, store_locale};
use crate::routes::redirect_with;

#[derive(Deserialize)]
struct SwitchLocaleQueryParams {
    next: Option<String>,
}

/// Language switcher: remember the choice and show the same page in `lang`.
#[get("/locale/{lang}")]
pub async fn switch_locale(
    lang: web::Path<String>,
    params: web::Query<SwitchLocaleQueryParams>,
    req: HttpRequest,
) -> impl Responder {
    let Some(locale) = Locale::parse(&lang) else {
        return HttpResponse::NotFound().finish();
    };

    let mut store = CookieStore::from_request(&req);
    store_locale(&mut store, locale);

    redirect_with(&switch_target(params.next.as_deref(), locale), &store)
}

/// Same page in `locale`; only site-relative targets are followed.
fn switch_target(next: Option<&str>, locale: Locale) -> String {
    let next = next
        .filter(|next| next.starts_with('/') && !next.starts_with("//"))
        .unwrap_or("/");
    match next.split_once('?') {
        Some((path, query)) => format!("{}?{}", switch_locale_path(path, locale), query),
        None => switch_locale_path(next, locale),
    }
}
