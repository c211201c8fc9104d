pub mod http_rates;

pub use http_rates::HttpRatesProvider;
