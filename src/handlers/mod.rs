pub mod addresses;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod common;
pub mod inventory;
pub mod orders;
pub mod store;
pub mod wishlist;
