/// CSV export of per-hour records.
pub mod export;
/// CSV import of raw curves.
pub mod import;
