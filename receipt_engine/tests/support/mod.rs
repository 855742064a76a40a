pub mod mocks;
pub mod prepare_env;
pub mod stub_server;
