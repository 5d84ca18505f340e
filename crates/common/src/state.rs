//! Application state
//!
//! Holds the player list from the most recent committed fetch. Every fetch
//! takes a [`FetchTicket`] before it goes out; only the most recently issued
//! ticket may commit, so a slow response can never overwrite a newer one.

use parking_lot::Mutex;
use tracing::warn;

use crate::types::Player;

/// Generation number taken by a fetch before it is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

/// Outcome of offering a fetch result to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    /// A newer fetch was issued after this one
    Stale { latest: FetchTicket },
}

#[derive(Debug, Default)]
struct Inner {
    players: Vec<Player>,
    issued: u64,
    committed: u64,
}

/// The current player list plus fetch bookkeeping
#[derive(Debug, Default)]
pub struct AppState {
    inner: Mutex<Inner>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a fetch that is about to start
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut inner = self.inner.lock();
        inner.issued += 1;
        FetchTicket(inner.issued)
    }

    /// Replace the player list wholesale if `ticket` is still the newest
    pub fn commit(&self, ticket: FetchTicket, players: Vec<Player>) -> Commit {
        let mut inner = self.inner.lock();
        if ticket.0 != inner.issued {
            let latest = FetchTicket(inner.issued);
            warn!(
                "Discarding stale fetch {} (latest issued: {})",
                ticket.0, latest.0
            );
            return Commit::Stale { latest };
        }
        inner.players = players;
        inner.committed = ticket.0;
        Commit::Applied
    }

    /// Snapshot of the committed players
    pub fn players(&self) -> Vec<Player> {
        self.inner.lock().players.clone()
    }

    /// Run `f` against the committed players without cloning them
    pub fn with_players<R>(&self, f: impl FnOnce(&[Player]) -> R) -> R {
        f(&self.inner.lock().players)
    }

    /// Generation of the last committed fetch, 0 before the first one
    pub fn committed_generation(&self) -> u64 {
        self.inner.lock().committed
    }
}
