// src/repositories/postgres/mod.rs

pub mod supporter;

pub use supporter::PostgresSupporterRepository;
