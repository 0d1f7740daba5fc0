/// CSV export of reference tables and sizing sweeps.
pub mod export;
