//! Helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use finscope::i18n::Dictionaries;
use finscope::models::config::ServerConfig;
use finscope::repository::fixture::{COMPANIES_FILE, FixtureSource, REVIEWS_FILE};
use finscope::routes::{CatalogState, configure};
use tempfile::TempDir;
use tera::Tera;

pub const SITE_URL: &str = "https://finscope.example";

pub const COMPANIES_JSON: &str = r#"[
  {
    "id": "truemoney",
    "name": "TrueMoney",
    "logo": "/assets/logos/truemoney.svg",
    "category": "Payment",
    "averageScore": 4.2,
    "reviewCount": 2100,
    "description": {
      "en": "Digital wallet for bill payments and QR payments.",
      "th": "กระเป๋าเงินดิจิทัลสำหรับจ่ายบิลและสแกนจ่าย"
    },
    "website": "https://www.truemoney.com"
  },
  {
    "id": "kasikorn-bank",
    "name": "Kasikorn Bank",
    "logo": "/assets/logos/kasikorn-bank.svg",
    "category": "Bank",
    "averageScore": 4.3,
    "reviewCount": 1250,
    "description": {
      "en": "Commercial bank with savings accounts and a mobile app.",
      "th": "ธนาคารพาณิชย์พร้อมบัญชีออมทรัพย์และแอปมือถือ"
    },
    "website": "https://www.kasikornbank.com"
  },
  {
    "id": "liberator",
    "name": "Liberator",
    "logo": "/assets/logos/liberator.svg",
    "category": "Broker",
    "averageScore": 4.6,
    "reviewCount": 520,
    "description": {
      "en": "Zero-commission stock broker app.",
      "th": "แอปโบรกเกอร์หุ้นค่าคอมมิชชันศูนย์บาท"
    },
    "website": "https://www.liberator.co.th"
  },
  {
    "id": "bitkub",
    "name": "Bitkub",
    "logo": "/assets/logos/bitkub.svg",
    "category": "Fintech",
    "averageScore": 3.6,
    "reviewCount": 1870,
    "description": {
      "en": "Thai crypto exchange.",
      "th": "ตลาดซื้อขายคริปโตของไทย"
    },
    "website": "https://www.bitkub.com"
  }
]"#;

pub const REVIEWS_JSON: &str = r#"[
  {
    "id": "r1",
    "companyId": "truemoney",
    "reviewerName": "Wichai Boonmee",
    "reviewerInitials": "WB",
    "rating": 5,
    "title": "Pay everything in one place",
    "content": { "en": "I pay all my bills with it.", "th": "จ่ายบิลทุกอย่างได้" },
    "date": "2024-05-12",
    "verified": true,
    "helpful": 31
  },
  {
    "id": "r2",
    "companyId": "truemoney",
    "reviewerName": "Siriporn Kaew",
    "reviewerInitials": "SK",
    "rating": 3,
    "title": "Handy at shops",
    "content": { "en": "QR payments are quick.", "th": "สแกนจ่ายได้เร็ว" },
    "date": "2024-04-22",
    "verified": false,
    "helpful": 7,
    "companyReply": {
      "content": { "en": "Thank you!", "th": "ขอบคุณครับ" },
      "date": "2024-04-23"
    }
  },
  {
    "id": "r3",
    "companyId": "kasikorn-bank",
    "reviewerName": "Somchai Jaidee",
    "reviewerInitials": "SJ",
    "rating": 4,
    "title": "Great mobile app",
    "content": { "en": "Transfers are instant.", "th": "โอนเงินได้ทันที" },
    "date": "2024-05-02",
    "verified": true,
    "helpful": 24
  }
]"#;

/// Fixture directory in a temporary location.
pub struct TestFixtures {
    dir: TempDir,
}

impl TestFixtures {
    pub fn new() -> Self {
        Self::with(COMPANIES_JSON, REVIEWS_JSON)
    }

    pub fn with(companies: &str, reviews: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let fixtures = TestFixtures { dir };
        fixtures.write_companies(companies);
        fixtures.write_reviews(reviews);
        fixtures
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn source(&self) -> FixtureSource {
        FixtureSource::new(self.path())
    }

    pub fn write_companies(&self, json: &str) {
        fs::write(self.path().join(COMPANIES_FILE), json).expect("Failed to write companies");
    }

    pub fn write_reviews(&self, json: &str) {
        fs::write(self.path().join(REVIEWS_FILE), json).expect("Failed to write reviews");
    }
}

pub fn server_config(fixtures: &TestFixtures) -> ServerConfig {
    ServerConfig {
        data_dir: fixtures.path().display().to_string(),
        assets_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/assets").to_string(),
        templates_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*").to_string(),
        site_url: SITE_URL.to_string(),
        simulated_latency_ms: 0,
        ..ServerConfig::default()
    }
}

/// The full site wired the same way `main` does, without latency.
pub async fn init_app(
    fixtures: &TestFixtures,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let server_config = server_config(fixtures);
    let tera = Tera::new(&server_config.templates_dir).expect("Failed to load templates");
    let dictionaries = Dictionaries::load().expect("Failed to load dictionaries");
    let catalog = CatalogState::new(fixtures.source(), std::time::Duration::ZERO);
    let assets_dir = server_config.assets_dir.clone();

    test::init_service(
        App::new()
            .app_data(web::Data::new(catalog))
            .app_data(web::Data::new(tera))
            .app_data(web::Data::new(dictionaries))
            .app_data(web::Data::new(server_config))
            .configure(|cfg| configure(cfg, &assets_dir)),
    )
    .await
}

pub async fn body_text(response: ServiceResponse) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8")
}
