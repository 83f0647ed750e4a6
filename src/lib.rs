// Shelfwatch watch-tracking core library

pub mod constants;
pub mod logging;
pub mod lookup;
pub mod media;
pub mod poster_cache;
pub mod settings;
pub mod storage;
pub mod watchlist;
