//! Client for the crossover analysis form: field filters, the submit
//! lifecycle, the HTTP exchange and native rendering of the result.

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod render;
pub mod transport;
pub mod utils;
