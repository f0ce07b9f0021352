//! REST endpoints of the library and the commands they dispatch.

use crate::microsvc::{Route, Verb};

pub static ROUTES: &[Route] = &[
    // users
    Route::new(Verb::Post, "/users/register", "users.register").created().public(),
    Route::new(Verb::Post, "/users/login", "users.login").public(),
    Route::new(Verb::Post, "/users/token/refresh", "users.refresh").public(),
    Route::new(Verb::Post, "/users/logout", "users.logout").no_content(),
    Route::new(Verb::Get, "/users/me", "users.me"),
    Route::new(Verb::Patch, "/users/me", "users.update_me"),
    Route::new(Verb::Get, "/users", "users.find_many"),
    Route::new(Verb::Delete, "/users/:id", "users.delete"),
    // authors
    Route::new(Verb::Post, "/authors", "authors.create").created(),
    Route::new(Verb::Get, "/authors", "authors.find_many"),
    Route::new(Verb::Patch, "/authors/:id", "authors.update"),
    Route::new(Verb::Delete, "/authors/:id", "authors.delete"),
    // catalog
    Route::new(Verb::Post, "/categories", "categories.create").created(),
    Route::new(Verb::Get, "/categories", "categories.find_many"),
    Route::new(Verb::Post, "/genres", "genres.create").created(),
    Route::new(Verb::Get, "/genres", "genres.find_many"),
    // books
    Route::new(Verb::Post, "/books", "books.create").created(),
    Route::new(Verb::Get, "/books", "books.find_many"),
    Route::new(Verb::Get, "/books/:id", "books.find"),
    Route::new(Verb::Patch, "/books/:id", "books.update"),
    Route::new(Verb::Delete, "/books/:id", "books.delete"),
    // book change requests
    Route::new(Verb::Post, "/book-change-requests", "book_change_requests.create").created(),
    Route::new(Verb::Get, "/book-change-requests", "book_change_requests.find_many"),
    Route::new(Verb::Post, "/book-change-requests/:id/apply", "book_change_requests.apply"),
    Route::new(Verb::Delete, "/book-change-requests/:id", "book_change_requests.delete"),
    // bookshelves
    Route::new(Verb::Post, "/bookshelves", "bookshelves.create").created(),
    Route::new(Verb::Get, "/bookshelves", "bookshelves.find_many"),
    Route::new(Verb::Get, "/bookshelves/:id", "bookshelves.find"),
    Route::new(Verb::Patch, "/bookshelves/:id", "bookshelves.update"),
    Route::new(Verb::Delete, "/bookshelves/:id", "bookshelves.delete"),
    // user books
    Route::new(Verb::Post, "/user-books", "user_books.create").created(),
    Route::new(Verb::Get, "/user-books", "user_books.find_many"),
    Route::new(Verb::Get, "/user-books/:id", "user_books.find"),
    Route::new(Verb::Patch, "/user-books/:id", "user_books.update"),
    Route::new(Verb::Delete, "/user-books/:id", "user_books.delete"),
    // book readings
    Route::new(Verb::Post, "/user-books/:userBookId/readings", "book_readings.create").created(),
    Route::new(Verb::Get, "/user-books/:userBookId/readings", "book_readings.find_many"),
    Route::new(Verb::Get, "/book-readings", "book_readings.find_many"),
    Route::new(Verb::Patch, "/user-books/:userBookId/readings/:id", "book_readings.update"),
    Route::new(Verb::Delete, "/user-books/:userBookId/readings/:id", "book_readings.delete"),
    // borrowings
    Route::new(Verb::Post, "/user-books/:userBookId/borrowings", "borrowings.create").created(),
    Route::new(Verb::Get, "/user-books/:userBookId/borrowings", "borrowings.find_many"),
    Route::new(Verb::Get, "/borrowings", "borrowings.find_many"),
    Route::new(Verb::Patch, "/user-books/:userBookId/borrowings/:id", "borrowings.update"),
    Route::new(Verb::Delete, "/user-books/:userBookId/borrowings/:id", "borrowings.delete"),
    // quotes
    Route::new(Verb::Post, "/quotes", "quotes.create").created(),
    Route::new(Verb::Get, "/quotes", "quotes.find_many"),
    Route::new(Verb::Patch, "/quotes/:id", "quotes.update"),
    Route::new(Verb::Delete, "/quotes/:id", "quotes.delete"),
    // collections
    Route::new(Verb::Post, "/collections", "collections.create").created(),
    Route::new(Verb::Get, "/collections", "collections.find_many"),
    Route::new(Verb::Patch, "/collections/:id", "collections.update"),
    Route::new(Verb::Delete, "/collections/:id", "collections.delete"),
];
