mod mocks;
mod unit_config;
