pub mod costume_table;
