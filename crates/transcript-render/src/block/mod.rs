//! Line-oriented block transformers.
//!
//! Each transformer takes the whole text and returns the whole text, leaving
//! content it does not recognize untouched. None of them escape: cell, item,
//! quote and heading text keeps its raw `<`, `>` and `&` for the escaper.

mod heading;
mod list;
mod quote;
mod table;

pub(crate) use heading::{process_headings, process_rules};
pub(crate) use list::process_lists;
pub(crate) use quote::process_blockquotes;
pub(crate) use table::process_tables;
