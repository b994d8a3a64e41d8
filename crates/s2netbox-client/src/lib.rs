//! S2 NetBox XML API Client
//!
//! A Rust client library for the S2 NetBox physical-access-control API.
//! Wraps the vendor's session-based XML command protocol and normalizes its
//! legacy user-defined-field record schema into typed, null-safe person,
//! access-card, and vehicle entities.
//!
//! # Example
//!
//! ```no_run
//! use s2netbox_client::{S2NetboxClient, SearchTerms};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect and authenticate
//! let client = S2NetboxClient::connect(
//!     "https://netbox.example.com",
//!     "apiuser",
//!     "secret",
//! )
//! .await?;
//!
//! // Fetch one person by badge number
//! if let Some(person) = client.get_person(12345).await? {
//!     println!("{} holds {} card(s)", person.full_name(), person.access_cards.len());
//! }
//!
//! // Search with the active-holder filter, walking all result pages
//! let matches = client
//!     .search_people(&SearchTerms {
//!         last_name: Some("Smith".to_string()),
//!         active_only: true,
//!         ..SearchTerms::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Session lifecycle**: one login exchange per client; the granted
//!   session id rides on every subsequent command
//! - **Cursor pagination**: search walks `NEXTKEY` pages until the −1
//!   sentinel
//! - **Schema normalization**: three boolean encodings, blank-means-unset
//!   strings, vendor timestamps, and singleton-vs-list XML all coerced at
//!   the boundary

pub mod client;
pub mod coerce;
pub mod envelope;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;
pub mod wire;

pub use client::{S2NetboxClient, SearchTerms};
pub use envelope::{Envelope, Params, Reply};
pub use error::S2NetboxError;
pub use models::{AccessCard, CardStatus, Person, Vehicle};
pub use session::Session;
pub use transport::{HttpTransport, Transport};
