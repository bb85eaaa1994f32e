pub mod cli;
pub mod errors;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod providers;
