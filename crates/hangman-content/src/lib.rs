//! Offline content for Tamil Hangman
//!
//! A [`WordBank`] serves words from a JSON word list and draws simple label
//! cards for the pictures, so the game runs without any network service.

pub mod bank;
pub mod card;
pub mod error;

pub use bank::{BankEntry, WordBank, MAX_WORD_LIST_SIZE};
pub use error::{Result, WordBankError};
