pub mod ledger;

pub use ledger::{run_listing, LedgerService, ListingSnapshot};
