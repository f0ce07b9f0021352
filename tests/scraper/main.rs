//! Catalogue ingestion against an in-memory page source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use librarium::domain::Author;
use librarium::Aggregate;
use librarium::repository::{AuthorQuery, BookQuery};
use librarium::scraper::{BnBib, BnPage, CatalogSource, IngestReport, Ingestor, ScraperError};
use librarium::store::{Database, Pagination};

/// Serves canned pages by URL and counts the requests.
#[derive(Default)]
struct FakeCatalog {
    pages: HashMap<String, serde_json::Value>,
    requests: AtomicUsize,
}

impl FakeCatalog {
    fn page(mut self, url: &str, next: Option<&str>, bibs: serde_json::Value) -> Self {
        self.pages
            .insert(url.to_string(), json!({ "nextPage": next, "bibs": bibs }));
        self
    }

    fn broken(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), json!("not a page"));
        self
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_page(&self, url: &str) -> Result<BnPage, ScraperError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let body = self.pages.get(url).cloned().unwrap_or(json!({ "bibs": [] }));
        serde_json::from_value(body).map_err(|source| ScraperError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn bib(title: &str, author: &str, isbn: &str) -> serde_json::Value {
    json!({
        "title": title,
        "author": author,
        "isbnIssn": isbn,
        "publicationYear": "1961",
        "publisher": "Wydawnictwo MON,",
        "language": "polski",
        "domain": "Literatura",
        "genre": "Powieść",
    })
}

fn books(db: &Database) -> Vec<librarium::repository::BookDetails> {
    db.books()
        .find_many(&BookQuery::default(), Pagination::new(1, 100))
        .unwrap()
        .data
}

#[tokio::test]
async fn follows_the_cursor_and_creates_books() {
    let db = Database::in_memory();
    let catalog = FakeCatalog::default()
        .page(
            "start",
            Some("page-2"),
            json!([
                bib("Solaris /", "Lem, Stanisław (1921-2006)", "9788308045135"),
                bib("Cyberiada", "Lem, Stanisław", "9788308049256"),
            ]),
        )
        .page(
            "page-2",
            Some(""),
            json!([
                bib("Lalka", "Prus, Bolesław", "9788373271644"),
                { "title": "Untitled", "isbnIssn": "9788373271651" },
            ]),
        );

    let report = Ingestor::new(&db, catalog).run("start", None).await.unwrap();

    assert_eq!(
        report,
        IngestReport {
            pages: 2,
            records: 4,
            books_created: 3,
            authors_created: 2,
            categories_created: 1,
            genres_created: 1,
            skipped_incomplete: 1,
            skipped_existing: 0,
        }
    );

    let stored = books(&db);
    assert_eq!(stored.len(), 3);
    let solaris = stored.iter().find(|book| book.isbn == "9788308045135").unwrap();
    assert_eq!(solaris.title, "Solaris");
    assert_eq!(solaris.language, "pl");
    assert_eq!(solaris.publisher, "Wydawnictwo MON");
    assert_eq!(solaris.category.name, "Literatura");
    assert_eq!(solaris.authors[0].name, "Stanisław Lem");
    assert!(solaris.is_approved);
    assert_eq!(solaris.created_by, None);
}

#[tokio::test]
async fn reuses_stored_authors_and_skips_known_isbns() {
    let db = Database::in_memory();
    let mut lem = Author::create("Stanisław Lem", true).unwrap();
    db.commit(&mut lem).unwrap();

    let first = FakeCatalog::default().page(
        "start",
        None,
        json!([bib("Solaris", "Lem, Stanisław", "9788308045135")]),
    );
    Ingestor::new(&db, first).run("start", None).await.unwrap();

    let again = FakeCatalog::default().page(
        "start",
        None,
        json!([
            bib("Solaris", "Lem, Stanisław", "978-83-08-04513-5"),
            bib("Eden", "Lem, Stanisław", "9788308049263"),
            bib("Eden", "Lem, Stanisław", "9788308049263"),
        ]),
    );
    let report = Ingestor::new(&db, again).run("start", None).await.unwrap();

    assert_eq!(report.books_created, 1);
    assert_eq!(report.skipped_existing, 2);
    assert_eq!(report.authors_created, 0);
    assert_eq!(report.categories_created, 0);

    let authors = db
        .authors()
        .find_many(&AuthorQuery::default(), Pagination::default())
        .unwrap();
    assert_eq!(authors.metadata.total, 1);
    assert!(books(&db).iter().all(|book| book.authors[0].id == lem.id()));
}

#[tokio::test]
async fn missing_domain_falls_back_to_other() {
    let db = Database::in_memory();
    let mut record = bib("Ferdydurke", "Gombrowicz, Witold", "9788308040000");
    record["domain"] = json!(null);
    record["publisher"] = json!(null);
    let catalog = FakeCatalog::default().page("start", None, json!([record]));

    Ingestor::new(&db, catalog).run("start", None).await.unwrap();

    let stored = books(&db);
    assert_eq!(stored[0].category.name, "Other");
    assert_eq!(stored[0].publisher, "Unknown");
}

#[tokio::test]
async fn stops_at_the_page_limit() {
    let db = Database::in_memory();
    let catalog = FakeCatalog::default()
        .page("start", Some("page-2"), json!([bib("Solaris", "Lem, Stanisław", "9788308045135")]))
        .page("page-2", Some("page-3"), json!([bib("Eden", "Lem, Stanisław", "9788308049263")]))
        .page("page-3", None, json!([bib("Lalka", "Prus, Bolesław", "9788373271644")]));

    let report = Ingestor::new(&db, catalog).run("start", Some(2)).await.unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(books(&db).len(), 2);
}

#[tokio::test]
async fn stops_when_the_cursor_repeats() {
    let db = Database::in_memory();
    let catalog = FakeCatalog::default()
        .page("start", Some("page-2"), json!([]))
        .page("page-2", Some("start"), json!([]));
    let ingestor = Ingestor::new(&db, catalog);

    let report = ingestor.run("start", None).await.unwrap();

    assert_eq!(report.pages, 2);
}

#[tokio::test]
async fn decode_failure_keeps_earlier_pages() {
    let db = Database::in_memory();
    let catalog = FakeCatalog::default()
        .page("start", Some("page-2"), json!([bib("Solaris", "Lem, Stanisław", "9788308045135")]))
        .broken("page-2");

    let err = Ingestor::new(&db, catalog).run("start", None).await.unwrap_err();

    match err {
        ScraperError::Decode { url, .. } => assert_eq!(url, "page-2"),
        other => panic!("expected a decode error, got {other}"),
    }
    assert_eq!(books(&db).len(), 1);
}

#[test]
fn records_decode_from_the_listing_shape() {
    let page: BnPage = serde_json::from_value(json!({
        "nextPage": "https://data.bn.org.pl/api/institutions/bibs.json?sinceId=2",
        "bibs": [{ "id": 1, "title": "Lalka", "unknownField": true }],
    }))
    .unwrap();

    assert_eq!(page.bibs.len(), 1);
    assert_eq!(
        page.bibs[0],
        BnBib {
            id: Some(1),
            title: Some("Lalka".into()),
            ..BnBib::default()
        }
    );
}
