// Adapters layer: concrete implementations of the domain ports and of item intake.

pub mod clock;
pub mod csv_ingest;
