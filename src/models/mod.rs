pub mod progress;
pub mod record;
pub mod series;
pub mod symbol;
