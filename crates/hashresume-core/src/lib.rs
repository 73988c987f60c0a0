pub mod config;
pub mod logging;

pub mod accumulator;
pub mod checkpoint;
pub mod checksum;
pub mod control;
pub mod demo;
pub mod md5;
pub mod worker;
