use crate::cli::run;

mod cache;
pub mod cli;
mod config;
pub mod domain;
pub mod http;
pub mod lastfm;
pub mod widget;

fn main() -> anyhow::Result<()> {
    run()
}
