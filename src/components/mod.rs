pub mod app;
pub mod data_table;
pub mod filter_bar;
pub mod plot_key_picker;
