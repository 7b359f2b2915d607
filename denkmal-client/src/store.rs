//! Application state store.
//!
//! Owns one entity cache per resource kind plus the current selection and
//! map view. Constructed once and injected into consumers; there is no
//! ambient global instance.

use crate::cache::EntityCache;
use crate::error::ClientError;
use crate::events::{Command, StoreEvent};
use crate::gateway::{FetchGateway, MemorialsQuery};
use denkmal_core::{
    token, AuthorLevelDetail, AuthorProfile, Level, MapView, Memorial, MemorialId, Page,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Upper bound of the associated-memorials listing fetched with an author.
const AUTHOR_MEMORIALS_LIMIT: u32 = 100;

/// The author selection, committed as one unit. Profile, level detail and
/// associated memorials always stem from the same load; readers can never
/// observe them mismatched.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentAuthor {
    pub profile: AuthorProfile,
    pub level: Level,
    pub detail: AuthorLevelDetail,
    pub memorials: Vec<Memorial>,
}

/// Per-entity-kind load failure flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadErrors {
    pub memorial: bool,
    pub author: bool,
    pub page: bool,
}

#[derive(Debug, Clone)]
struct CurrentState {
    memorial: Option<Memorial>,
    author: Option<CurrentAuthor>,
    page: Option<Page>,
    map: MapView,
    errors: LoadErrors,
}

/// Monotonic load counters, one per "current" slot. A load takes a ticket
/// when it starts and may only commit while its ticket is still the newest,
/// so a slow, superseded load cannot clobber a newer selection.
#[derive(Debug, Default)]
struct LoadTickets {
    memorial: AtomicU64,
    author: AtomicU64,
    page: AtomicU64,
}

impl LoadTickets {
    fn take(slot: &AtomicU64) -> u64 {
        slot.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(slot: &AtomicU64, ticket: u64) -> bool {
        slot.load(Ordering::SeqCst) == ticket
    }
}

pub struct AppStore<G> {
    gateway: Arc<G>,
    memorials: EntityCache<MemorialId, Memorial>,
    authors: EntityCache<String, AuthorProfile>,
    levels: EntityCache<(String, Level), AuthorLevelDetail>,
    pages: EntityCache<String, Page>,
    current: Mutex<CurrentState>,
    tickets: LoadTickets,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<StoreEvent>>>,
}

impl<G> AppStore<G>
where
    G: FetchGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            memorials: EntityCache::new(),
            authors: EntityCache::new(),
            levels: EntityCache::new(),
            pages: EntityCache::new(),
            current: Mutex::new(CurrentState {
                memorial: None,
                author: None,
                page: None,
                map: MapView::default(),
                errors: LoadErrors::default(),
            }),
            tickets: LoadTickets::default(),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register for change notifications. Every committed update to a
    /// "current" slot is announced; dropped receivers are pruned lazily.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StoreEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push(tx);
        rx
    }

    fn notify(&self, event: StoreEvent) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|subscriber| subscriber.send(event).is_ok());
    }

    // ------------------------------------------------------------------
    // Snapshot access
    // ------------------------------------------------------------------

    pub fn current_memorial(&self) -> Option<Memorial> {
        self.current.lock().unwrap().memorial.clone()
    }

    pub fn current_author(&self) -> Option<CurrentAuthor> {
        self.current.lock().unwrap().author.clone()
    }

    pub fn current_page(&self) -> Option<Page> {
        self.current.lock().unwrap().page.clone()
    }

    pub fn map_view(&self) -> MapView {
        self.current.lock().unwrap().map
    }

    pub fn load_errors(&self) -> LoadErrors {
        self.current.lock().unwrap().errors
    }

    /// Cached memorial, if a fetch or a listing seed stored one. Never
    /// triggers a request.
    pub fn cached_memorial(&self, id: MemorialId) -> Option<Memorial> {
        self.memorials.get(&id)
    }

    pub fn cached_author(&self, slug: &str) -> Option<AuthorProfile> {
        self.authors.get(&slug.to_string())
    }

    pub fn cached_page(&self, slug: &str) -> Option<Page> {
        self.pages.get(&slug.to_string())
    }

    /// Seed the memorial cache from a listing response, sparing the detail
    /// fetch for entries the map already delivered.
    pub fn seed_memorials(&self, memorials: &[Memorial]) {
        for memorial in memorials {
            self.memorials.put(memorial.id, memorial.clone());
        }
    }

    // ------------------------------------------------------------------
    // Load operations
    // ------------------------------------------------------------------

    /// Route a command to its load operation.
    pub async fn dispatch(&self, command: Command) -> Result<(), ClientError> {
        match command {
            Command::FetchMemorial { id } => self.load_memorial(id).await,
            Command::FetchAuthor { slug, level } => self.load_author(&slug, level).await,
            Command::FetchPage { slug } => self.load_page(&slug).await,
            Command::SyncMapState { token } => self.set_map_state(&token),
        }
    }

    /// Fetch a memorial through the cache and make it the current one.
    pub async fn load_memorial(&self, id: MemorialId) -> Result<(), ClientError> {
        let ticket = LoadTickets::take(&self.tickets.memorial);

        let gateway = Arc::clone(&self.gateway);
        let result = self
            .memorials
            .get_or_fetch(id, move || async move { gateway.get_memorial(id).await })
            .await;

        match result {
            Ok(memorial) => {
                let committed = {
                    let mut current = self.current.lock().unwrap();
                    if LoadTickets::is_current(&self.tickets.memorial, ticket) {
                        current.memorial = Some(memorial);
                        current.errors.memorial = false;
                        true
                    } else {
                        false
                    }
                };
                if committed {
                    self.notify(StoreEvent::MemorialChanged);
                } else {
                    tracing::debug!(id, "discarding superseded memorial load");
                }
                Ok(())
            }
            Err(err) => {
                let mut current = self.current.lock().unwrap();
                if LoadTickets::is_current(&self.tickets.memorial, ticket) {
                    current.errors.memorial = true;
                }
                Err(err.into())
            }
        }
    }

    /// Fetch an author's profile, level detail and associated memorials,
    /// then commit all three together.
    ///
    /// Profile and level detail go through their caches; the memorial
    /// listing is volatile context and is refetched on every call.
    pub async fn load_author(&self, slug: &str, level: Level) -> Result<(), ClientError> {
        let ticket = LoadTickets::take(&self.tickets.author);

        let profile_fetch = {
            let gateway = Arc::clone(&self.gateway);
            let slug = slug.to_string();
            self.authors
                .get_or_fetch(slug.clone(), move || async move {
                    gateway.get_author(&slug).await
                })
        };
        let detail_fetch = {
            let gateway = Arc::clone(&self.gateway);
            let slug = slug.to_string();
            self.levels
                .get_or_fetch((slug.clone(), level), move || async move {
                    gateway.get_level(&slug, level).await
                })
        };

        let fetched = tokio::try_join!(profile_fetch, detail_fetch);
        let (profile, detail) = match fetched {
            Ok(pair) => pair,
            Err(err) => {
                return Err(self.fail_author(ticket, err));
            }
        };

        let query = MemorialsQuery {
            author: Some(profile.id),
            limit: AUTHOR_MEMORIALS_LIMIT,
            offset: None,
        };
        let memorials = match self.gateway.get_memorials(&query).await {
            Ok(list) => list.results,
            Err(err) => {
                return Err(self.fail_author(ticket, err));
            }
        };

        let committed = {
            let mut current = self.current.lock().unwrap();
            if LoadTickets::is_current(&self.tickets.author, ticket) {
                current.author = Some(CurrentAuthor {
                    profile,
                    level,
                    detail,
                    memorials,
                });
                current.errors.author = false;
                true
            } else {
                false
            }
        };
        if committed {
            self.notify(StoreEvent::AuthorChanged);
        } else {
            tracing::debug!(slug, %level, "discarding superseded author load");
        }
        Ok(())
    }

    fn fail_author(&self, ticket: u64, err: denkmal_core::GatewayError) -> ClientError {
        let mut current = self.current.lock().unwrap();
        if LoadTickets::is_current(&self.tickets.author, ticket) {
            current.errors.author = true;
        }
        err.into()
    }

    /// Fetch a static page through the cache and make it the current one.
    ///
    /// On failure the previous page stays visible and only the error flag
    /// flips; a later successful load clears it again.
    pub async fn load_page(&self, slug: &str) -> Result<(), ClientError> {
        let ticket = LoadTickets::take(&self.tickets.page);

        let gateway = Arc::clone(&self.gateway);
        let owned_slug = slug.to_string();
        let result = self
            .pages
            .get_or_fetch(owned_slug.clone(), move || async move {
                gateway.get_page(&owned_slug).await
            })
            .await;

        match result {
            Ok(page) => {
                let committed = {
                    let mut current = self.current.lock().unwrap();
                    if LoadTickets::is_current(&self.tickets.page, ticket) {
                        current.page = Some(page);
                        current.errors.page = false;
                        true
                    } else {
                        false
                    }
                };
                if committed {
                    self.notify(StoreEvent::PageChanged);
                } else {
                    tracing::debug!(slug, "discarding superseded page load");
                }
                Ok(())
            }
            Err(err) => {
                let mut current = self.current.lock().unwrap();
                if LoadTickets::is_current(&self.tickets.page, ticket) {
                    current.errors.page = true;
                }
                Err(err.into())
            }
        }
    }

    /// Decode a path token and take over its center and zoom. The pan
    /// bounds are static configuration and stay untouched.
    pub fn set_map_state(&self, token: &str) -> Result<(), ClientError> {
        let view = token::decode(token)?;
        {
            let mut current = self.current.lock().unwrap();
            current.map.center = view.center;
            current.map.zoom = view.zoom;
        }
        self.notify(StoreEvent::MapChanged);
        Ok(())
    }
}
