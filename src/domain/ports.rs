use crate::domain::model::SignInAck;
use std::net::SocketAddr;

/// One-line human readable description of a record.
pub trait DisplayInfo {
    fn display_info(&self) -> String;
}

/// Role-tagged sign-in. Has no effect beyond the returned acknowledgement and a log line.
pub trait SignIn {
    fn sign_in(&self) -> SignInAck;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> SocketAddr;
    fn seed_sample_data(&self) -> bool;
    fn json_logs(&self) -> bool;
}
