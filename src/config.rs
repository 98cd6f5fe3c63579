use serde::Deserialize;

/// Runtime configuration read from the environment at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Cookie signing key, at least 64 bytes.
    pub secret: String,
    /// Cookie domain for the session and flash cookies.
    pub domain: String,
    /// Email address the admin signs in with.
    pub admin_email: String,
    /// Password the admin signs in with.
    pub admin_password: String,
    /// Base URL under which uploaded images are served.
    pub public_base_url: String,
    pub ftp: FtpConfig,
}

/// Credentials of the image storage host.
#[derive(Debug, Clone, Deserialize)]
pub struct FtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}
