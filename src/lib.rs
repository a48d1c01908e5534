pub mod api;
pub mod auth;
pub mod config;
pub mod dto;
pub mod models;
pub mod repository;
pub mod services;
