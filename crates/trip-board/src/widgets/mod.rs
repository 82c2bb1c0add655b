pub mod price_input;
pub mod status_bar;
