//! Serve command - expose the local catalog over HTTP

use super::Result;
use crate::DealerError;
use crate::config::{Backend, DealerConfig};
use crate::server::ApiServer;
use crate::service::LocalCatalog;
use crate::ui::OutputWriter;

/// Execute the serve command; blocks until the process is stopped
pub fn execute(
    config: &DealerConfig,
    listen: Option<&str>,
    output: &dyn OutputWriter,
) -> Result<()> {
    if config.backend != Backend::Local {
        return Err(DealerError::InvalidInput(
            "Serving needs the local backend. Run with --backend local".into(),
        ));
    }

    let catalog = LocalCatalog::open(config.catalog_path()?)?;
    let server = ApiServer::bind(listen.unwrap_or(&config.listen), catalog)?;

    let addr = server
        .local_addr()
        .map_or_else(|| config.listen.clone(), |addr| addr.to_string());
    output.success(&format!("Serving the catalog on http://{addr}/api/cars"));
    output.info("Press Ctrl-C to stop");

    server.run();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::ServerError;
    use crate::ui::output::MemoryWriter;

    #[test]
    fn test_http_backend_is_refused() {
        let config = DealerConfig {
            backend: Backend::Http,
            ..DealerConfig::default()
        };
        let err = execute(&config, None, &MemoryWriter::new());
        assert!(matches!(err, Err(DealerError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_listen_address() {
        let dir = tempfile::tempdir().unwrap();
        let config = DealerConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..DealerConfig::default()
        };
        let err = execute(&config, Some("not an address"), &MemoryWriter::new());
        assert!(matches!(
            err,
            Err(DealerError::ServerError(ServerError::Bind { .. }))
        ));
    }
}
