//! Incremental list loading for the Taskify frontend.
//!
//! Two loader flavors drive every list view in the app:
//!
//! - [`CursorLoader`] accumulates pages behind an opaque cursor until the
//!   server signals exhaustion (infinite scroll).
//! - [`PageLoader`] holds exactly one page at a time and navigates by page
//!   number ("page 3 of 10").
//!
//! Both are single-owner, single-threaded objects driven by `async` fetch
//! closures. They are framework-agnostic: the Yew hooks in
//! `taskify-frontend` wrap them, but they can be driven directly from any
//! `spawn_local`-style executor.

pub mod cursor;
pub mod deps;
pub mod error;
pub mod page;
pub mod state;
pub mod trigger;

pub use cursor::{CursorFetcher, CursorLoader, CursorLoaderBuilder, CursorPage, CursorSnapshot};
pub use deps::DepTracker;
pub use error::FetchError;
pub use page::{CountedPage, PageFetcher, PageLoader, PageSnapshot};
pub use state::{FetchState, FetchStatus};
pub use trigger::{should_load_more, ViewportTrigger};
