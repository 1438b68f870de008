pub mod penman;
pub mod statistics;
pub mod umr;
pub mod utility;
