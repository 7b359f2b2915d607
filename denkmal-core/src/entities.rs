//! Domain entities as delivered by the CMS JSON API.
//!
//! List and detail endpoints share one type per entity; fields that only the
//! detail serializer emits are optional or defaulted, so a listing result can
//! seed the same cache a detail fetch fills.

use crate::geo::LatLng;
use serde::{Deserialize, Serialize};

pub type MemorialId = i64;
pub type AuthorId = i64;
pub type TagId = i64;

/// A (lng, lat) pair, in the order the CMS serializes point geometries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub f64, pub f64);

impl Position {
    pub fn lng(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }

    pub fn to_lat_lng(&self) -> LatLng {
        LatLng {
            lat: self.1,
            lng: self.0,
        }
    }
}

/// A classification tag: memorial type, genre, language or literary period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub title: String,
}

/// A memorial site shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memorial {
    pub id: MemorialId,
    pub title: String,
    #[serde(default)]
    pub thumb: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub memorial_types: Vec<Tag>,

    // Detail-only fields, absent in listing responses.
    #[serde(default)]
    pub authors: Vec<AuthorRef>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub directions: Option<String>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub description: Vec<serde_json::Value>,
    #[serde(default)]
    pub detailed_description: Vec<serde_json::Value>,
}

/// Compact author reference embedded in memorial details and listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: AuthorId,
    pub slug: String,
    #[serde(default)]
    pub academic_title: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_name: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    pub url: String,
}

/// One of the recorded names of an author, pseudonyms included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorName {
    pub is_pseudonym: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_name: Option<String>,
}

/// Full author profile from the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: AuthorId,
    pub slug: String,
    #[serde(default)]
    pub academic_title: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_name: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub also_known_as: Vec<AuthorName>,
    #[serde(default)]
    pub genres: Vec<Tag>,
    #[serde(default)]
    pub languages: Vec<Tag>,
    #[serde(default)]
    pub periods: Vec<Tag>,
    #[serde(default)]
    pub memorials: Vec<MemorialId>,
    pub url: String,
}

/// Per-level page content of an author: discover, research or material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorLevelDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub body: Vec<serde_json::Value>,
}

/// A static CMS page, body as stream blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub body: Vec<serde_json::Value>,
}

/// Paginated memorial listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorialList {
    pub count: i64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Memorial>,
}
