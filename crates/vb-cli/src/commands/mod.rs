//! Command handlers. Each returns the number of failures it recorded; the
//! binary turns a non-zero total into exit status 1.

pub mod explore;
pub mod replay;
pub mod run;
pub mod scenarios;
