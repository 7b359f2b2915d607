//! Route table and map-state synchronization.
//!
//! Routes mirror the public URL scheme of the site. The map carries its view
//! state as a path token; [`RouteSync`] reconciles navigation events with the
//! store and derives the canonical token for link generation.

use crate::error::ClientError;
use crate::events::Command;
use crate::gateway::FetchGateway;
use crate::store::AppStore;
use denkmal_core::{token, Level, MemorialId};
use std::sync::Arc;

/// Path token of the map view linked from navigation when none is present
/// in the URL yet.
pub const DEFAULT_MAP_TOKEN: &str = "@13.5901,50.7121,8z";

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Page { slug: String },
    /// `/map/` without a token; canonically redirected to [`DEFAULT_MAP_TOKEN`].
    MapDefault,
    Map { token: String },
    MemorialDetail { token: String, id: MemorialId },
    AuthorList,
    /// `/authors/{slug}` without a level; canonically redirected to discover.
    AuthorDefault { slug: String },
    AuthorDetail { slug: String, level: Level },
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["page", slug] => Route::Page {
                slug: (*slug).to_string(),
            },
            ["map"] => Route::MapDefault,
            ["map", token] => Route::Map {
                token: (*token).to_string(),
            },
            ["map", token, "memorial", id] => match id.parse::<MemorialId>() {
                Ok(id) => Route::MemorialDetail {
                    token: (*token).to_string(),
                    id,
                },
                Err(_) => Route::NotFound,
            },
            ["authors"] => Route::AuthorList,
            ["authors", slug] => Route::AuthorDefault {
                slug: (*slug).to_string(),
            },
            ["authors", slug, level] => match level.parse::<Level>() {
                Ok(level) => Route::AuthorDetail {
                    slug: (*slug).to_string(),
                    level,
                },
                Err(_) => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home | Route::NotFound => "/".to_string(),
            Route::Page { slug } => format!("/page/{}", slug),
            Route::MapDefault => format!("/map/{}", DEFAULT_MAP_TOKEN),
            Route::Map { token } => format!("/map/{}", token),
            Route::MemorialDetail { token, id } => format!("/map/{}/memorial/{}", token, id),
            Route::AuthorList => "/authors".to_string(),
            Route::AuthorDefault { slug } => format!("/authors/{}/{}", slug, Level::default()),
            Route::AuthorDetail { slug, level } => format!("/authors/{}/{}", slug, level),
        }
    }
}

/// Keeps the store's map view in sync with navigation and derives shareable
/// path tokens from it.
pub struct RouteSync<G> {
    store: Arc<AppStore<G>>,
}

impl<G> RouteSync<G>
where
    G: FetchGateway + 'static,
{
    pub fn new(store: Arc<AppStore<G>>) -> Self {
        Self { store }
    }

    /// Apply the view-state token of a navigation event, if any.
    ///
    /// A malformed token is recovered locally: the previous map view stays
    /// in place and nothing propagates to the caller.
    pub fn handle_navigation(&self, token: Option<&str>) {
        let Some(token) = token else {
            return;
        };
        if let Err(err) = self.store.set_map_state(token) {
            tracing::warn!(%err, token, "ignoring malformed map token, keeping previous view");
        }
    }

    /// Canonical path token of the current map view, for building links.
    /// Always derived through the encoder, so links decode back to exactly
    /// the view they were derived from.
    pub fn map_state_path(&self) -> String {
        token::encode(&self.store.map_view())
    }

    /// Drive the store operations a navigation target requires.
    pub async fn navigate(&self, route: &Route) -> Result<(), ClientError> {
        match route {
            Route::Home | Route::AuthorList | Route::NotFound => Ok(()),
            Route::Page { slug } => {
                self.store
                    .dispatch(Command::FetchPage { slug: slug.clone() })
                    .await
            }
            Route::MapDefault => {
                self.handle_navigation(Some(DEFAULT_MAP_TOKEN));
                Ok(())
            }
            Route::Map { token } => {
                self.handle_navigation(Some(token));
                Ok(())
            }
            Route::MemorialDetail { token, id } => {
                self.handle_navigation(Some(token));
                self.store.dispatch(Command::FetchMemorial { id: *id }).await
            }
            Route::AuthorDefault { slug } => {
                self.store
                    .dispatch(Command::FetchAuthor {
                        slug: slug.clone(),
                        level: Level::default(),
                    })
                    .await
            }
            Route::AuthorDetail { slug, level } => {
                self.store
                    .dispatch(Command::FetchAuthor {
                        slug: slug.clone(),
                        level: *level,
                    })
                    .await
            }
        }
    }
}


#[cfg(test)]
mod sync_tests {
    use super::*;
    use async_trait::async_trait;
    use denkmal_core::{
        AuthorLevelDetail, AuthorProfile, GatewayError, Memorial, MemorialList, Page,
    };

    struct EmptyGateway;

    fn unavailable() -> GatewayError {
        GatewayError::Status {
            status: 503,
            message: "unavailable".to_string(),
        }
    }

    #[async_trait]
    impl FetchGateway for EmptyGateway {
        async fn get_memorial(&self, _id: MemorialId) -> Result<Memorial, GatewayError> {
            Err(unavailable())
        }

        async fn get_author(&self, _slug: &str) -> Result<AuthorProfile, GatewayError> {
            Err(unavailable())
        }

        async fn get_level(
            &self,
            _slug: &str,
            _level: Level,
        ) -> Result<AuthorLevelDetail, GatewayError> {
            Err(unavailable())
        }

        async fn get_memorials(
            &self,
            _query: &crate::gateway::MemorialsQuery,
        ) -> Result<MemorialList, GatewayError> {
            Err(unavailable())
        }

        async fn get_page(&self, _slug: &str) -> Result<Page, GatewayError> {
            Err(unavailable())
        }
    }

    #[tokio::test]
    async fn test_navigation_commits_valid_token() {
        let store = Arc::new(AppStore::new(Arc::new(EmptyGateway)));
        let sync = RouteSync::new(Arc::clone(&store));

        sync.handle_navigation(Some("@13.5901,50.7121,9z"));

        let view = store.map_view();
        assert_eq!(view.center.lng, 13.5901);
        assert_eq!(view.zoom, 9.0);
    }

    #[tokio::test]
    async fn test_malformed_token_keeps_previous_view() {
        let store = Arc::new(AppStore::new(Arc::new(EmptyGateway)));
        let sync = RouteSync::new(Arc::clone(&store));

        sync.handle_navigation(Some("@13.5901,50.7121,9z"));
        let before = store.map_view();

        sync.handle_navigation(Some("13.5901,50.7121"));

        assert_eq!(store.map_view(), before);
    }

    #[tokio::test]
    async fn test_absent_token_keeps_previous_view() {
        let store = Arc::new(AppStore::new(Arc::new(EmptyGateway)));
        let sync = RouteSync::new(Arc::clone(&store));
        let before = store.map_view();

        sync.handle_navigation(None);

        assert_eq!(store.map_view(), before);
    }

    #[tokio::test]
    async fn test_map_state_path_matches_what_decode_reconstructs() {
        let store = Arc::new(AppStore::new(Arc::new(EmptyGateway)));
        let sync = RouteSync::new(Arc::clone(&store));

        sync.handle_navigation(Some("@13.5901,50.7121,9z"));

        let path = sync.map_state_path();
        assert_eq!(path, "@13.5901,50.7121,9z");
        assert_eq!(token::decode(&path).unwrap(), store.map_view());
    }

    #[tokio::test]
    async fn test_navigate_map_route_syncs_view() {
        let store = Arc::new(AppStore::new(Arc::new(EmptyGateway)));
        let sync = RouteSync::new(Arc::clone(&store));

        sync.navigate(&Route::Map {
            token: "@14.42,50.09,11z".to_string(),
        })
        .await
        .unwrap();

        assert_eq!(store.map_view().zoom, 11.0);
    }
}
