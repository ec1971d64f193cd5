mod health_oracle;
mod input_oracle;
mod log_oracle;
mod state_oracle;

pub use health_oracle::HealthOracle;
pub use input_oracle::InputOracle;
pub use log_oracle::LogOracle;
pub use state_oracle::StateOracle;
