//! Command handlers behind a transport-agnostic service.
//!
//! Every REST operation is a named command. A command module exports three
//! items, and [`register_handlers!`](crate::register_handlers) wires them
//! into a [`Service`]:
//!
//! ```ignore
//! pub const COMMAND: &str = "quotes.create";
//!
//! pub fn guard(ctx: &Context<Library>) -> bool {
//!     ctx.has_fields(&["userBookId", "content"])
//! }
//!
//! pub fn handle(ctx: &Context<Library>) -> Result<Value, HandlerError> {
//!     let input = ctx.input::<Input>()?;
//!     // ...
//! }
//! ```
//!
//! The HTTP transport (feature `http`) maps a static route table onto these
//! commands and turns [`HandlerError`] into status codes.

mod context;
mod error;
pub mod params;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::Service;
pub use session::Session;

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve, Authenticate, Route, Verb};

/// Register command modules on a service.
///
/// ```ignore
/// let service = librarium::register_handlers!(
///     Service::new(Library::in_memory()),
///     handlers::quotes::create,
///     handlers::quotes::delete,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
