//! Denkmal client library exports.
//!
//! Fetch gateway, entity caches, application store and route
//! synchronization for the literary-landscape map. Rendering lives with the
//! consumer; this crate only maintains the state it renders from.

pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod events;
pub mod gateway;
pub mod i18n;
pub mod route;
pub mod store;

pub use cache::EntityCache;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use events::{Command, StoreEvent};
pub use gateway::{FetchGateway, HttpGateway, MemorialsQuery};
pub use i18n::Translator;
pub use route::{Route, RouteSync, DEFAULT_MAP_TOKEN};
pub use store::{AppStore, CurrentAuthor, LoadErrors};
