pub mod config;
pub mod logging;

pub mod browser;
pub mod downloader;
pub mod driver;
pub mod extract;
pub mod harvest;
pub mod input;
pub mod naming;
pub mod storage;
pub mod url_list;
