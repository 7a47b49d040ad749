//! countries-rs
//!
//! A lightweight Rust library for browsing and searching the countries of
//! the world via the REST Countries API. Pairs with the `countries` CLI and
//! the `countries-gui` desktop app.
//!
//! ### Features
//! - Fetch the full country list or search by name, restricted to the
//!   `name`, `flags`, `population` fields
//! - A debounced search/fetch controller with loading and error state,
//!   immune to out-of-order responses
//! - Save results as CSV or JSON; quick population statistics
//!
//! ### Example
//! ```no_run
//! use countries_rs::{Client, Query};
//!
//! let client = Client::default();
//! let countries = client.fetch(&Query::Named("germany".into()))?;
//! for country in &countries {
//!     println!("{}: {}", country.name.common, country.population);
//! }
//! # Ok::<(), countries_rs::FetchError>(())
//! ```

pub mod api;
pub mod controller;
pub mod debounce;
pub mod display;
pub mod models;
pub mod stats;
pub mod storage;

pub use api::{Client, CountrySource, FetchError, Query};
pub use controller::{ControllerState, SearchController};
pub use debounce::Debouncer;
pub use models::Country;
