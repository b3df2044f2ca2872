//! Persisted ledgers: favorites and view statistics.
//!
//! Both ledgers follow the same cycle: read their whole document, mutate it
//! in memory, write the whole document back. Storage failures never reach
//! the caller: an unreadable document reads as empty, and a failed write
//! drops the mutation. Mutating calls report which of those paths was taken
//! through [`Persistence`], so the fail-open behavior stays testable.

pub use favorites::FavoritesLedger;
pub use views::ViewLedger;

mod favorites;
mod views;

/// How a ledger mutation landed.
///
/// Deliberately not a `Result`: storage failure is absorbed, not surfaced,
/// and callers are free to ignore the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Read and write both succeeded
    Saved,

    /// The existing document was unreadable or corrupt; the mutation was
    /// applied on top of an empty ledger and written successfully
    RecoveredEmpty,

    /// The write failed and the mutation was discarded
    WriteDropped,
}

impl Persistence {
    /// True unless the mutation was discarded
    pub fn persisted(&self) -> bool {
        !matches!(self, Persistence::WriteDropped)
    }
}
