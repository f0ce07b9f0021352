use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::domain::author::normalize_name;
use crate::domain::{Author, Book, BookFormat, Category, Genre, NewBook};
use crate::entity::Persist;
use crate::store::Database;

use super::mapper::{self, BookDraft};
use super::model::BnBib;
use super::source::CatalogSource;
use super::ScraperError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub pages: usize,
    pub records: usize,
    pub books_created: usize,
    pub authors_created: usize,
    pub categories_created: usize,
    pub genres_created: usize,
    /// Records missing a title, ISBN, author or year, or failing validation.
    pub skipped_incomplete: usize,
    /// Records whose ISBN is already catalogued.
    pub skipped_existing: usize,
}

/// Entities created while ingesting one page, committed together.
#[derive(Default)]
struct PageBatch {
    authors: Vec<Author>,
    categories: Vec<Category>,
    genres: Vec<Genre>,
    books: Vec<Book>,
    author_ids: HashMap<String, Uuid>,
    category_ids: HashMap<String, Uuid>,
    genre_ids: HashMap<String, Uuid>,
}

impl PageBatch {
    fn persistables(&mut self) -> Vec<&mut dyn Persist> {
        let mut batch: Vec<&mut dyn Persist> = Vec::new();
        batch.extend(self.authors.iter_mut().map(|author| author as &mut dyn Persist));
        batch.extend(self.categories.iter_mut().map(|category| category as &mut dyn Persist));
        batch.extend(self.genres.iter_mut().map(|genre| genre as &mut dyn Persist));
        batch.extend(self.books.iter_mut().map(|book| book as &mut dyn Persist));
        batch
    }
}

/// Walks the catalogue cursor and stores new books.
pub struct Ingestor<'a, S> {
    db: &'a Database,
    source: S,
}

impl<'a, S: CatalogSource> Ingestor<'a, S> {
    pub fn new(db: &'a Database, source: S) -> Self {
        Self { db, source }
    }

    /// Follow `nextPage` from `start_url` until it is empty, repeats, or
    /// `max_pages` pages were read. Each page is committed on its own.
    pub async fn run(
        &self,
        start_url: &str,
        max_pages: Option<usize>,
    ) -> Result<IngestReport, ScraperError> {
        let mut report = IngestReport::default();
        let mut visited = HashSet::new();
        let mut next = Some(start_url.to_string());

        while let Some(url) = next.take() {
            if max_pages.is_some_and(|max| report.pages >= max) {
                info!(pages = report.pages, "page limit reached");
                break;
            }
            if !visited.insert(url.clone()) {
                warn!(%url, "catalogue cursor repeated, stopping");
                break;
            }

            let page = self.source.fetch_page(&url).await?;
            report.pages += 1;
            let created = self.ingest_page(&page.bibs, &mut report)?;
            info!(
                page = report.pages,
                records = page.bibs.len(),
                books = created,
                "ingested catalogue page"
            );

            next = page.next_page.filter(|cursor| !cursor.trim().is_empty());
        }

        Ok(report)
    }

    /// Store the new books of one page. Returns how many were created.
    fn ingest_page(&self, bibs: &[BnBib], report: &mut IngestReport) -> Result<usize, ScraperError> {
        report.records += bibs.len();

        let mut seen = HashSet::new();
        let mut drafts = Vec::new();
        for bib in bibs {
            match mapper::map_record(bib) {
                Some(draft) if seen.insert(draft.isbn.clone()) => drafts.push(draft),
                Some(_) => report.skipped_existing += 1,
                None => {
                    debug!(id = ?bib.id, "skipping incomplete record");
                    report.skipped_incomplete += 1;
                }
            }
        }

        let isbns: Vec<String> = drafts.iter().map(|draft| draft.isbn.clone()).collect();
        let existing = self.db.books().existing_isbns(&isbns)?;
        drafts.retain(|draft| !existing.contains(&draft.isbn));
        report.skipped_existing += isbns.len() - drafts.len();
        if drafts.is_empty() {
            return Ok(0);
        }

        let mut batch = self.prepare(&drafts)?;
        for draft in &drafts {
            match self.build_book(draft, &mut batch)? {
                Some(book) => batch.books.push(book),
                None => report.skipped_incomplete += 1,
            }
        }

        self.db.commit(&mut batch.persistables())?;

        report.books_created += batch.books.len();
        report.authors_created += batch.authors.len();
        report.categories_created += batch.categories.len();
        report.genres_created += batch.genres.len();
        Ok(batch.books.len())
    }

    /// Resolve the authors of every draft against the store in one read.
    fn prepare(&self, drafts: &[BookDraft]) -> Result<PageBatch, ScraperError> {
        let names: Vec<String> = drafts
            .iter()
            .flat_map(|draft| draft.author_names.iter().cloned())
            .collect();

        let mut batch = PageBatch::default();
        for author in self.db.authors().find_by_names(&names)? {
            batch.author_ids.insert(normalize_name(author.name()), author.id());
        }
        Ok(batch)
    }

    /// `None` when a field fails validation.
    fn build_book(&self, draft: &BookDraft, batch: &mut PageBatch) -> Result<Option<Book>, ScraperError> {
        let mut author_ids = Vec::new();
        for name in &draft.author_names {
            let key = normalize_name(name);
            let id = match batch.author_ids.get(&key) {
                Some(id) => *id,
                None => match Author::create(name.clone(), true) {
                    Ok(author) => {
                        let id = author.id();
                        batch.author_ids.insert(key, id);
                        batch.authors.push(author);
                        id
                    }
                    Err(err) => {
                        debug!(isbn = %draft.isbn, %err, "skipping record with invalid author");
                        return Ok(None);
                    }
                },
            };
            author_ids.push(id);
        }

        let Some(category_id) = self.category_id(&draft.category, batch)? else {
            return Ok(None);
        };
        let genre_ids = match &draft.genre {
            Some(genre) => self.genre_id(genre, batch)?.into_iter().collect(),
            None => Vec::new(),
        };

        let book = Book::create(NewBook {
            title: draft.title.clone(),
            isbn: draft.isbn.clone(),
            publisher: draft.publisher.clone(),
            release_year: draft.release_year,
            language: draft.language.clone(),
            translator: None,
            format: BookFormat::Paperback,
            pages: None,
            image_url: None,
            category_id,
            is_approved: true,
            created_by: None,
            author_ids,
            genre_ids,
        });
        match book {
            Ok(book) => Ok(Some(book)),
            Err(err) => {
                debug!(isbn = %draft.isbn, %err, "skipping invalid record");
                Ok(None)
            }
        }
    }

    fn category_id(&self, name: &str, batch: &mut PageBatch) -> Result<Option<Uuid>, ScraperError> {
        let key = normalize_name(name);
        if let Some(id) = batch.category_ids.get(&key) {
            return Ok(Some(*id));
        }
        let id = match self.db.categories().find_by_name(name)? {
            Some(category) => category.id(),
            None => match Category::create(name) {
                Ok(category) => {
                    let id = category.id();
                    batch.categories.push(category);
                    id
                }
                Err(err) => {
                    debug!(category = name, %err, "invalid category");
                    return Ok(None);
                }
            },
        };
        batch.category_ids.insert(key, id);
        Ok(Some(id))
    }

    /// An invalid genre name is dropped rather than failing the record.
    fn genre_id(&self, name: &str, batch: &mut PageBatch) -> Result<Option<Uuid>, ScraperError> {
        let key = normalize_name(name);
        if let Some(id) = batch.genre_ids.get(&key) {
            return Ok(Some(*id));
        }
        let id = match self.db.genres().find_by_name(name)? {
            Some(genre) => genre.id(),
            None => match Genre::create(name) {
                Ok(genre) => {
                    let id = genre.id();
                    batch.genres.push(genre);
                    id
                }
                Err(_) => return Ok(None),
            },
        };
        batch.genre_ids.insert(key, id);
        Ok(Some(id))
    }
}
