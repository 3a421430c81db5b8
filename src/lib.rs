// ABOUTME: Library crate for visionhub exposing the form domain and TUI for testing and external use

#![allow(missing_docs)]

pub mod app;
pub mod chat;
pub mod cli;
pub mod components;
pub mod config;
pub mod form;
