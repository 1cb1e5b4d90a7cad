mod common;
mod expiry;
mod listing;
