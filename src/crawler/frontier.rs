//! Shared frontier and termination detection
//!
//! The frontier owns every piece of state that decides whether more work can
//! appear: the pending queue, the visited set, the active-worker count, the
//! crawled-page count and the stop flag. All of it sits behind one mutex so a
//! worker never observes "queue empty" and "nobody active" from two different
//! moments. The mutex is only held for queue and set operations, never across
//! an `.await`.
//!
//! Waiting uses `tokio::sync::Notify`. A waiter registers its `Notified`
//! future before inspecting the state, so a wake issued between the check and
//! the `.await` is never lost. Every wake re-checks the state.

use std::collections::{HashSet, VecDeque};
use std::pin::pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// One pending crawl target plus the page that linked to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized URL to fetch
    pub url: String,

    /// URL of the page whose processing admitted this entry (empty for the seed)
    pub referrer_url: String,

    /// Title of that page (empty for the seed)
    pub referrer_title: String,
}

impl FrontierEntry {
    /// Creates the entry for the start URL
    pub fn seed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            referrer_url: String::new(),
            referrer_title: String::new(),
        }
    }
}

/// Why a worker was told to exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `request_stop` was called
    Stopped,
    /// The page budget has been spent
    BudgetReached,
    /// Queue empty and no worker left that could refill it
    Exhausted,
}

/// What an idle worker gets back from `next_entry`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dequeued {
    /// Process this entry, then call `complete`
    Entry(FrontierEntry),
    /// Exit the worker loop
    Terminate(Termination),
}

/// Point-in-time copy of the frontier counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierSnapshot {
    pub queued: usize,
    pub visited: usize,
    pub active: usize,
    pub pages_crawled: usize,
    pub stopped: bool,
}

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    active: usize,
    pages_crawled: usize,
    stop: bool,
}

/// The shared work queue of one crawl run
#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    notify: Notify,
    page_budget: usize,
}

impl Frontier {
    /// Creates an empty frontier with the given page budget
    pub fn new(page_budget: usize) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            notify: Notify::new(),
            page_budget,
        }
    }

    /// The page budget this frontier was created with
    pub fn page_budget(&self) -> usize {
        self.page_budget
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        // Critical sections never panic half-way, so a poisoned lock still
        // guards consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues the start entry
    ///
    /// The seed is always queued, even with a zero budget; workers then
    /// terminate before fetching it.
    pub fn seed(&self, entry: FrontierEntry) {
        let mut state = self.lock();
        if state.visited.insert(entry.url.clone()) {
            state.queue.push_back(entry);
            self.notify.notify_one();
        }
    }

    /// Submits an admission batch
    ///
    /// For each candidate in order: a URL already in the visited set is
    /// dropped. Otherwise it is marked visited at once, and queued only while
    /// the budget is not yet spent. A URL marked visited past the budget stays
    /// unqueued for the rest of the run.
    ///
    /// Returns the number of entries queued.
    pub fn admit(&self, entries: Vec<FrontierEntry>) -> usize {
        let mut state = self.lock();
        let mut queued = 0;

        for entry in entries {
            if !state.visited.insert(entry.url.clone()) {
                continue;
            }

            if state.pages_crawled < self.page_budget {
                tracing::trace!("Admitted {} (from {})", entry.url, entry.referrer_url);
                state.queue.push_back(entry);
                self.notify.notify_one();
                queued += 1;
            } else {
                tracing::trace!("Budget spent, marked {} visited without queueing", entry.url);
            }
        }

        queued
    }

    /// Waits for the next entry or a termination signal
    ///
    /// # Decision Order
    ///
    /// 1. Stop requested → `Terminate(Stopped)`
    /// 2. Budget spent → wake everyone, `Terminate(BudgetReached)`
    /// 3. Queue non-empty → pop the head and count this worker active
    /// 4. Queue empty and nobody active → wake everyone, `Terminate(Exhausted)`
    /// 5. Queue empty while others are active → wait; they may admit more
    pub async fn next_entry(&self) -> Dequeued {
        loop {
            let mut notified = pin!(self.notify.notified());
            notified.as_mut().enable();

            {
                let mut state = self.lock();

                if state.stop {
                    return Dequeued::Terminate(Termination::Stopped);
                }

                if state.pages_crawled >= self.page_budget {
                    self.notify.notify_waiters();
                    return Dequeued::Terminate(Termination::BudgetReached);
                }

                if let Some(entry) = state.queue.pop_front() {
                    state.active += 1;
                    return Dequeued::Entry(entry);
                }

                if state.active == 0 {
                    self.notify.notify_waiters();
                    return Dequeued::Terminate(Termination::Exhausted);
                }
            }

            notified.await;
        }
    }

    /// Reports that a dequeued entry has been fully processed
    ///
    /// Counts the page as crawled and the worker as idle, then wakes all
    /// waiters: the worker may have admitted new entries, and its leaving the
    /// active set may itself complete the crawl.
    ///
    /// Returns the crawled-page count including this page.
    pub fn complete(&self) -> usize {
        let pages_crawled = {
            let mut state = self.lock();
            state.pages_crawled += 1;
            state.active = state.active.saturating_sub(1);
            state.pages_crawled
        };

        self.notify.notify_waiters();
        pages_crawled
    }

    /// Requests every worker to stop at its next wait point
    ///
    /// Queued entries are abandoned; work already in flight finishes.
    pub fn request_stop(&self) {
        self.lock().stop = true;
        self.notify.notify_waiters();
    }

    /// Returns true once `request_stop` has been called
    pub fn is_stopped(&self) -> bool {
        self.lock().stop
    }

    /// Returns true if `url` has already been admitted
    pub fn is_visited(&self, url: &str) -> bool {
        self.lock().visited.contains(url)
    }

    /// Returns a copy of the current counters
    pub fn snapshot(&self) -> FrontierSnapshot {
        let state = self.lock();
        FrontierSnapshot {
            queued: state.queue.len(),
            visited: state.visited.len(),
            active: state.active,
            pages_crawled: state.pages_crawled,
            stopped: state.stop,
        }
    }
}
