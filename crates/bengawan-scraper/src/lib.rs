pub mod availability;
pub mod cards;
pub mod check;
pub mod client;
pub mod error;
pub mod extract;
pub mod headers;

pub use availability::{classify_seat_text, AvailabilityStatus};
pub use cards::{CardBoundary, TrainTarget};
pub use check::{AvailabilityChecker, CheckResult, TrainReport};
pub use client::PageClient;
pub use error::ScraperError;
pub use extract::{extract_train_details, TrainDetails};
pub use headers::{BrowserHeaders, FixedChooser, HeaderPool, IndexChooser, RandomChooser};
