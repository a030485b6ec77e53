//! Store-owner screens.

pub mod ai_feedback;
pub mod main;
pub mod my_page;
