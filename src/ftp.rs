use std::io;
use std::net::{Shutdown, TcpStream};
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::config::FtpConfig;

const FTP_PORT: u16 = 21;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FileTransferError {
    #[error("failed to connect to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("not connected")]
    NotConnected,
    #[error("failed to transfer {remote}: {source}")]
    Transfer {
        remote: String,
        #[source]
        source: io::Error,
    },
}

/// Connection to the host that serves uploaded images.
#[cfg_attr(test, mockall::automock)]
pub trait FileTransfer {
    fn connect(&mut self) -> Result<(), FileTransferError>;
    /// Upload the file at `local` under the name `remote`.
    fn upload(&mut self, local: &Path, remote: &str) -> Result<(), FileTransferError>;
    fn close(&mut self);
}

/// FTP transport to the image host.
///
/// The control connection is real; the transfer itself is a placeholder
/// until the storage host exposes its final protocol.
pub struct FtpClient {
    config: FtpConfig,
    stream: Option<TcpStream>,
}

impl FtpClient {
    pub fn new(config: FtpConfig) -> Self {
        Self {
            config,
            stream: None,
        }
    }
}

impl FileTransfer for FtpClient {
    fn connect(&mut self) -> Result<(), FileTransferError> {
        let address = (self.config.host.as_str(), FTP_PORT);
        let addrs: Vec<_> = std::net::ToSocketAddrs::to_socket_addrs(&address)
            .map_err(|source| FileTransferError::Connect {
                host: self.config.host.clone(),
                source,
            })?
            .collect();

        let mut last_error = io::Error::other("no addresses resolved");
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT) {
                Ok(stream) => {
                    log::info!("connected to image host {}", self.config.host);
                    self.stream = Some(stream);
                    return Ok(());
                }
                Err(err) => last_error = err,
            }
        }

        Err(FileTransferError::Connect {
            host: self.config.host.clone(),
            source: last_error,
        })
    }

    fn upload(&mut self, local: &Path, remote: &str) -> Result<(), FileTransferError> {
        if self.stream.is_none() {
            return Err(FileTransferError::NotConnected);
        }

        // TODO: replace with a real RETR/STOR exchange once the storage
        // host credentials are provisioned.
        log::info!(
            "upload placeholder: {} as {} ({})",
            local.display(),
            remote,
            self.config.username
        );
        Ok(())
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.shutdown(Shutdown::Both) {
                log::debug!("image host connection close failed: {err}");
            }
        }
    }
}

impl Drop for FtpClient {
    fn drop(&mut self) {
        self.close();
    }
}
