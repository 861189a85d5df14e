pub mod walkthrough;

pub use walkthrough::{Walkthrough, WalkthroughResult, WalkthroughSequence};
