//! Row removal shared by the cascading deletes.

use chrono::Utc;
use uuid::Uuid;

use crate::store::Tables;

pub(crate) fn delete_user_books(tables: &mut Tables, ids: &[Uuid]) {
    for id in ids {
        tables.user_books.remove(id);
        tables.user_book_collections.remove_left(*id);
    }
    tables
        .book_readings
        .remove_where(|reading| ids.contains(&reading.user_book_id));
    tables
        .borrowings
        .remove_where(|borrowing| ids.contains(&borrowing.user_book_id));
}

/// Remove a book with its joins, change requests, user books and quotes.
pub(crate) fn delete_book(tables: &mut Tables, book_id: Uuid) -> bool {
    if tables.books.remove(&book_id).is_none() {
        return false;
    }
    tables.book_authors.remove_left(book_id);
    tables.book_genres.remove_left(book_id);
    tables
        .book_change_requests
        .remove_where(|request| request.book_id == book_id);
    tables.quotes.remove_where(|quote| quote.book_id == book_id);

    let user_books: Vec<Uuid> = tables
        .user_books
        .iter()
        .filter(|row| row.book_id == book_id)
        .map(|row| row.id)
        .collect();
    delete_user_books(tables, &user_books);
    true
}

/// Remove a user and everything they own. Books they created stay in the
/// catalog without a creator.
pub(crate) fn delete_user(tables: &mut Tables, user_id: Uuid) -> bool {
    if tables.users.remove(&user_id).is_none() {
        return false;
    }
    tables.tokens.retain(|_, token| token.user_id != user_id);

    let user_books: Vec<Uuid> = tables
        .user_books
        .iter()
        .filter(|row| row.user_id == user_id)
        .map(|row| row.id)
        .collect();
    delete_user_books(tables, &user_books);

    tables.bookshelves.remove_where(|shelf| shelf.user_id == user_id);
    for collection in tables.collections.remove_where(|c| c.user_id == user_id) {
        tables.user_book_collections.remove_right(collection);
    }
    tables.quotes.remove_where(|quote| quote.user_id == user_id);
    tables
        .book_change_requests
        .remove_where(|request| request.user_id == user_id);

    let created: Vec<Uuid> = tables
        .books
        .iter()
        .filter(|book| book.created_by == Some(user_id))
        .map(|book| book.id)
        .collect();
    let now = Utc::now();
    for book_id in created {
        tables.books.rewrite(book_id, now, |book| book.created_by = None);
    }
    true
}

pub(crate) fn delete_collection(tables: &mut Tables, collection_id: Uuid) -> bool {
    if tables.collections.remove(&collection_id).is_none() {
        return false;
    }
    tables.user_book_collections.remove_right(collection_id);
    true
}
