//! Multilingual rendering for crisis-documentation pages.
//!
//! A page is a JSON dataset published on a static site, plus optional
//! page-specific and shared translation dictionaries. The
//! [`controller::LanguageController`] loads them, keeps one language active
//! and re-renders the [`page::Document`] whenever it changes.

pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod i18n;
pub mod page;
pub mod preference;
pub mod retry;
