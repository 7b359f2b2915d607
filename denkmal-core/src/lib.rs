//! Denkmal Core - shared data types for the literary-landscape map client.
//!
//! Pure data structures and pure functions. No I/O, no async; everything
//! here can be exercised without a runtime.

pub mod entities;
pub mod enums;
pub mod error;
pub mod geo;
pub mod token;
pub mod util;

pub use entities::{
    AuthorId, AuthorLevelDetail, AuthorName, AuthorProfile, AuthorRef, Memorial, MemorialId,
    MemorialList, Page, Position, Tag, TagId,
};
pub use enums::{Language, Level, ParseLanguageError, ParseLevelError};
pub use error::{GatewayError, TokenError};
pub use geo::{LatLng, MapView, DEFAULT_CENTER, DEFAULT_ZOOM, MAX_BOUNDS};
