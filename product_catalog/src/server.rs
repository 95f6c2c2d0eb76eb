use anyhow::{Context, Result};
use sqlx::{Pool, Postgres};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot::Receiver;
use tracing::{error, info};

use crate::constant::BAD_REQUEST;
use crate::product::repo::ProductRepository;
use crate::req::Request;
use crate::svc::Service;
use crate::utils::Reply;

pub struct Server {
    svc: Arc<Service>,
}

impl Server {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            svc: Arc::new(Service::new(ProductRepository::new(pool))),
        }
    }

    pub async fn start(self, addr: &str, shutdown_rx: Receiver<()>) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!("Server running on http://{}", addr);
        self.serve(listener, shutdown_rx).await;
        Ok(())
    }

    /// Accepts connections until `shutdown_rx` fires. Accept failures are
    /// logged and do not stop the loop.
    pub async fn serve(self, listener: TcpListener, mut shutdown_rx: Receiver<()>) {
        loop {
            tokio::select! {
                conn = listener.accept() => {
                    let Some((stream, peer)) = accepted(conn) else {
                        continue;
                    };
                    let svc = Arc::clone(&self.svc);
                    tokio::spawn(async move {
                        if let Err(e) = Self::handle_client(stream, &svc).await {
                            error!("Connection error from {}: {}", peer, e);
                        }
                    });
                },
                _ = &mut shutdown_rx => {
                    info!("shutting down ...");
                    break;
                }
            }
        }
    }

    async fn handle_client(mut stream: TcpStream, svc: &Service) -> Result<()> {
        let reply = match Request::read(&mut stream).await {
            Ok(request) => svc.handle(&request).await,
            Err(e) => {
                info!("error {}", e);
                Reply::error(BAD_REQUEST, &e.to_string())
            }
        };
        stream
            .write_all(&reply.to_bytes())
            .await
            .context("Failed to write")?;
        stream.flush().await.context("Failed to flush")?;
        Ok(())
    }
}

fn accepted<S>(conn: io::Result<(S, SocketAddr)>) -> Option<(S, SocketAddr)> {
    match conn {
        Ok(conn) => Some(conn),
        Err(e) => {
            error!("accept failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::NOT_FOUND;
    use sqlx::postgres::PgPoolOptions;
    use tokio::io::AsyncReadExt;
    use tokio::sync::oneshot;

    #[test]
    fn accept_errors_are_skipped() {
        let err = io::Error::new(io::ErrorKind::ConnectionAborted, "aborted");
        assert!(accepted::<()>(Err(err)).is_none());

        let err = io::Error::other("Too many open files");
        assert!(accepted::<()>(Err(err)).is_none());

        let peer: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        assert_eq!(accepted(Ok(((), peer))), Some(((), peer)));
    }

    async fn get(addr: SocketAddr, target: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(format!("GET {} HTTP/1.1\r\n\r\n", target).as_bytes())
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn serves_connections_until_shutdown() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://catalog@127.0.0.1:1/catalog")
            .unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let server = tokio::spawn(Server::new(pool).serve(listener, shutdown_rx));

        for _ in 0..2 {
            let response = get(addr, "/orders").await;
            assert!(response.starts_with(NOT_FOUND));
        }
        let response = get(addr, "/products/abc").await;
        assert!(response.starts_with(BAD_REQUEST));

        shutdown_tx.send(()).unwrap();
        server.await.unwrap();
    }
}
