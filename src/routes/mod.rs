use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::types::{Category, Locale};
use crate::fetch::{AsyncData, FetchError, Snapshot};
use crate::i18n::Dictionary;
use crate::negotiation::path_locale;
use crate::preferences::CookieStore;
use crate::repository::Catalog;
use crate::repository::fixture::FixtureSource;
use crate::search::RecentSearches;
use crate::seo::PageMeta;
use crate::states::{StatePanel, ViewState};

pub mod api;
pub mod categories;
pub mod companies;
pub mod locale;
pub mod main;
pub mod search;
pub mod sitemap;

/// Results per page on the search and category pages.
pub const RESULTS_PER_PAGE: usize = 12;

/// Register every route of the site.
pub fn configure(cfg: &mut web::ServiceConfig, assets_dir: &str) {
    cfg.service(actix_files::Files::new("/assets", assets_dir))
        .service(
            web::scope("/api")
                .service(api::api_v1_companies)
                .service(api::api_v1_company_reviews),
        )
        .service(sitemap::sitemap)
        .service(locale::switch_locale)
        .service(main::index)
        .service(companies::show_companies)
        .service(companies::show_company)
        .service(companies::mark_helpful)
        .service(categories::show_category)
        .service(search::show_search)
        .service(search::suggest)
        .service(search::clear_recent)
        .service(search::remove_recent)
        .default_service(web::to(main::not_found));
}

/// Shared catalog loaded from the fixture directory.
///
/// The catalog is reloaded when a fixture file changes on disk and on
/// explicit retry.
pub struct CatalogState {
    data: AsyncData<Catalog>,
    source: FixtureSource,
}

impl CatalogState {
    pub fn new(source: FixtureSource, latency: Duration) -> Self {
        let loader_source = source.clone();
        let data = AsyncData::new(move || {
            let source = loader_source.clone();
            async move {
                if !latency.is_zero() {
                    actix_web::rt::time::sleep(latency).await;
                }
                source.load_catalog().map_err(FetchError::from)
            }
        })
        .on_error(|e| log::error!("Failed to load catalog: {e}"));

        Self { data, source }
    }

    /// Current catalog state, fetching when needed.
    ///
    /// `retry` forces a new load even if the fixtures did not change.
    pub async fn snapshot(&self, retry: bool) -> Snapshot<Catalog> {
        if retry {
            self.data.refetch().await
        } else {
            self.data.fetch_on_change(&self.source.modified_times()).await
        }
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_page(HttpResponse::Ok(), tera, template, context)
}

/// Render `template` into a response prepared by the caller.
pub fn render_page(
    mut builder: HttpResponseBuilder,
    tera: &Tera,
    template: &str,
    context: &Context,
) -> HttpResponse {
    builder
        .content_type(ContentType::html())
        .body(tera.render(template, context).unwrap_or_else(|e| {
            log::error!("Failed to render template '{template}': {e}");
            String::new()
        }))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Redirect that also writes the visitor's changed preferences.
pub fn redirect_with(location: &str, store: &CookieStore) -> HttpResponse {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location));
    store.apply(&mut builder);
    builder.finish()
}

#[derive(Serialize)]
struct NavCategory<'a> {
    slug: &'static str,
    label: &'a str,
}

/// Context shared by every localized page.
pub fn base_context(
    locale: Locale,
    t: &Dictionary,
    current_page: &str,
    meta: &PageMeta,
    req: &HttpRequest,
    recent: &RecentSearches,
) -> Context {
    let current_url = current_url(req);
    let nav_categories: Vec<NavCategory> = Category::ALL
        .into_iter()
        .map(|category| NavCategory {
            slug: category.slug(),
            label: t.category_label(category),
        })
        .collect();

    let mut context = Context::new();
    context.insert("lang", locale.as_str());
    context.insert("other_lang", locale.other().as_str());
    context.insert(
        "switch_locale_url",
        &format!(
            "/locale/{}?next={}",
            locale.other().as_str(),
            urlencoding::encode(&current_url)
        ),
    );
    context.insert("t", t);
    context.insert("current_page", current_page);
    context.insert("current_url", &current_url);
    context.insert("current_path", req.path());
    context.insert("meta", meta);
    context.insert("nav_categories", &nav_categories);
    context.insert("recent_searches", recent.entries());
    context.insert("popular_searches", &t.search.search_suggestions.ordered());
    context
}

/// Request path below the locale segment, e.g. `/companies` for `/en/companies`.
pub fn localized_path(req: &HttpRequest) -> &str {
    let path = req.path();
    match path_locale(path) {
        Some(locale) => &path[locale.as_str().len() + 1..],
        None => path,
    }
}

/// Request path and query without the `retry` flag.
pub fn current_url(req: &HttpRequest) -> String {
    let query = query_without_retry(req.query_string());
    if query.is_empty() {
        req.path().to_string()
    } else {
        format!("{}?{}", req.path(), query)
    }
}

/// Link that reloads the current page and forces a new catalog load.
pub fn retry_url(req: &HttpRequest) -> String {
    let query = query_without_retry(req.query_string());
    if query.is_empty() {
        format!("{}?retry=1", req.path())
    } else {
        format!("{}?{}&retry=1", req.path(), query)
    }
}

fn query_without_retry(query: &str) -> String {
    query
        .split('&')
        .filter(|pair| !pair.is_empty() && *pair != "retry" && !pair.starts_with("retry="))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Panel a page renders instead of its content, with the response status.
pub struct PanelResponse {
    pub status: StatusCode,
    pub panel: StatePanel,
}

impl PanelResponse {
    pub fn new(status: StatusCode, panel: StatePanel) -> Self {
        Self { status, panel }
    }

    /// Render `template` with the panel in place of the page content.
    pub fn render(self, tera: &Tera, template: &str, mut context: Context) -> HttpResponse {
        context.insert("panel", &self.panel);
        render_page(HttpResponse::build(self.status), tera, template, &context)
    }
}

/// The loaded catalog, or the loading, error or empty panel to show instead.
pub fn catalog_or_panel<'a>(
    snapshot: &'a Snapshot<Catalog>,
    locale: Locale,
    t: &Dictionary,
    req: &HttpRequest,
) -> Result<&'a Catalog, PanelResponse> {
    match ViewState::from_snapshot(snapshot) {
        ViewState::Content(catalog) => Ok(catalog),
        ViewState::Loading => Err(PanelResponse::new(
            StatusCode::OK,
            StatePanel::loading(t, Some(t.states.loading.companies.as_str())),
        )),
        ViewState::Error(error) => Err(PanelResponse::new(
            StatusCode::SERVICE_UNAVAILABLE,
            StatePanel::error(t, error, &retry_url(req), &format!("/{}", locale.as_str())),
        )),
        ViewState::Empty => Err(PanelResponse::new(
            StatusCode::OK,
            StatePanel::empty(
                t,
                Some(t.states.empty.title.as_str()),
                Some(t.states.empty.companies.as_str()),
            ),
        )),
    }
}
