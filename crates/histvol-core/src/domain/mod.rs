mod bar;
mod series;

pub use bar::PriceBar;
pub use series::PriceSeries;
