pub mod figment;
pub mod logging;
pub mod validator;
