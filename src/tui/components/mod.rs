pub mod header;
pub mod filters;
pub mod countries_table;
pub mod details;
pub mod help;
pub mod logs;
