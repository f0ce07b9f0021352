//! Library integration tests: every command driven through `Service::dispatch`.

mod support;

mod accounts;
mod catalog;
mod change_requests;
mod notes;
mod shelves;
