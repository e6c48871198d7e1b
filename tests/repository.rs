use finscope::domain::types::{Category, CompanyId, Rating};
use finscope::repository::fixture::FixtureSource;
use finscope::repository::{CompanyReader, RepositoryError, ReviewListQuery, ReviewReader};

mod common;

#[test]
fn bundled_fixtures_are_valid() {
    let source = FixtureSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
    let catalog = source.load_catalog().expect("bundled fixtures should load");

    let companies = catalog.list_companies().unwrap();
    assert!(!companies.is_empty());
    for category in Category::ALL {
        assert!(
            companies.iter().any(|company| company.category == category),
            "no company in {category}"
        );
    }

    let reviews = catalog.list_reviews(ReviewListQuery::default()).unwrap();
    assert!(
        reviews
            .iter()
            .all(|review| companies.iter().any(|company| company.id == review.company_id))
    );
}

#[test]
fn loads_temp_fixtures_and_filters_reviews() {
    let fixtures = common::TestFixtures::new();
    let catalog = fixtures.source().load_catalog().unwrap();

    let company_id = CompanyId::new("truemoney").unwrap();
    let company = catalog.get_company_by_id(&company_id).unwrap().unwrap();
    assert_eq!(company.name.as_str(), "TrueMoney");

    let reviews = catalog
        .list_reviews(
            ReviewListQuery::default()
                .company(company_id)
                .rating(Rating::new(3).unwrap()),
        )
        .unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].id.as_str(), "r2");
    assert!(reviews[0].company_reply.is_some());
}

#[test]
fn missing_file_is_an_io_error() {
    let fixtures = common::TestFixtures::new();
    std::fs::remove_file(fixtures.path().join("reviews.json")).unwrap();

    let err = fixtures.source().load_catalog().unwrap_err();
    assert!(matches!(err, RepositoryError::Io { .. }));
    assert_eq!(fixtures.source().modified_times()[1], None);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let fixtures = common::TestFixtures::with("[{", "[]");
    let err = fixtures.source().load_catalog().unwrap_err();
    assert!(matches!(err, RepositoryError::Parse { .. }));
}

#[test]
fn invalid_record_is_rejected() {
    let fixtures = common::TestFixtures::with(
        &common::COMPANIES_JSON.replace("\"Payment\"", "\"Insurance\""),
        "[]",
    );
    assert!(fixtures.source().load_catalog().is_err());
}
