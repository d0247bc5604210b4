pub mod env {
    pub const ENV_PREFIX: &str = "TOLLGATE";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const CONFIG_FILE: &str = "config/tollgate";

pub mod defaults {
    pub const COOKIE_NAME: &str = "jwt";
    pub const VERSION_CLAIM: &str = "version";
    pub const EXPIRY_CLAIM: &str = "expiry";
}
