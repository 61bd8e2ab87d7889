pub mod category_table;
pub mod report;
pub mod tag;
