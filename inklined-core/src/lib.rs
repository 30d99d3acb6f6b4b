// src/lib.rs

pub mod db;
pub mod mail;
pub mod platforms;
pub mod repositories;
pub mod services;

pub use db::Database;
pub use inklined_common::error::Error;
