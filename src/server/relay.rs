//! Default coordination server: a per-session line relay
//!
//! Each TCP connection speaks newline-delimited JSON. The first line must be
//! a login:
//!
//! ```json
//! {"type":"login","params":{"sessionId":"abc","role":"tester"}}
//! ```
//!
//! After the server acknowledges with `loggedIn`, every further line is
//! forwarded verbatim to the peer of the opposite role in the same session.
//! Lines sent while the other side is absent are dropped.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};

use super::launcher::{CoordinationServer, ServerConfig};
use crate::error::DetoxError;

/// Which side of a session a connection is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tester,
    App,
}

impl Role {
    fn counterpart(self) -> Role {
        match self {
            Role::Tester => Role::App,
            Role::App => Role::Tester,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Tester => write!(f, "tester"),
            Role::App => write!(f, "app"),
        }
    }
}

/// Parameters of a `login` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginParams {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
struct LoginMessage {
    #[serde(rename = "type")]
    kind: String,
    params: LoginParams,
}

type Peer = mpsc::UnboundedSender<String>;

#[derive(Debug, Default)]
struct Session {
    peers: HashMap<Role, Peer>,
}

type Sessions = Arc<Mutex<HashMap<String, Session>>>;

/// Standalone Detox server
pub struct DetoxServer {
    config: ServerConfig,
    sessions: Sessions,
}

impl DetoxServer {
    async fn run(self) -> Result<(), DetoxError> {
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| {
                DetoxError::Server(format!("Failed to bind {}: {}", self.config.addr(), e))
            })?;
        tracing::info!("Detox server listening on {}", listener.local_addr()?);

        self.serve(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Accept connections on `listener` until `shutdown` resolves
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), DetoxError> {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down Detox server");
                    break;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, addr)) => {
                            tracing::debug!("Connection from {}", addr);
                            let sessions = Arc::clone(&self.sessions);
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, addr, sessions).await {
                                    tracing::warn!("Connection {} closed with error: {}", addr, e);
                                }
                            });
                        }
                        Err(e) => {
                            tracing::error!("Accept error: {}", e);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl CoordinationServer for DetoxServer {
    fn new(config: ServerConfig) -> Self {
        Self {
            config,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn start(self) -> impl Future<Output = Result<(), DetoxError>> + Send {
        self.run()
    }
}

/// Parse the first line of a connection
pub fn parse_login(line: &str) -> Result<LoginParams, DetoxError> {
    let message: LoginMessage = serde_json::from_str(line)
        .map_err(|e| DetoxError::Server(format!("Invalid login message: {}", e)))?;

    if message.kind != "login" {
        return Err(DetoxError::Server(format!(
            "Expected a login message, got \"{}\"",
            message.kind
        )));
    }

    Ok(message.params)
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    sessions: Sessions,
) -> Result<(), DetoxError> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    let Some(first) = lines.next_line().await? else {
        return Ok(());
    };
    let login = parse_login(&first)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    register(&sessions, &login, tx.clone()).await;
    tracing::info!(
        "{} logged in as {} for session {}",
        addr,
        login.role,
        login.session_id
    );

    let result = async {
        let ack = serde_json::json!({ "type": "loggedIn", "params": &login });
        write_line(&mut writer, &ack.to_string()).await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line? {
                        Some(line) => forward(&sessions, &login, line).await,
                        None => break,
                    }
                }
                Some(message) = rx.recv() => {
                    write_line(&mut writer, &message).await?;
                }
            }
        }

        Ok::<(), DetoxError>(())
    }
    .await;

    unregister(&sessions, &login, &tx).await;
    tracing::info!(
        "{} ({}) left session {}",
        addr,
        login.role,
        login.session_id
    );

    result
}

async fn write_line(writer: &mut OwnedWriteHalf, line: &str) -> Result<(), DetoxError> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    Ok(())
}

async fn register(sessions: &Sessions, login: &LoginParams, peer: Peer) {
    let mut sessions = sessions.lock().await;
    let session = sessions.entry(login.session_id.clone()).or_default();
    if session.peers.insert(login.role, peer).is_some() {
        tracing::warn!(
            "Replacing existing {} in session {}",
            login.role,
            login.session_id
        );
    }
}

async fn unregister(sessions: &Sessions, login: &LoginParams, peer: &Peer) {
    let mut sessions = sessions.lock().await;
    let Some(session) = sessions.get_mut(&login.session_id) else {
        return;
    };

    // A newer login for the same role may have replaced this peer
    if session
        .peers
        .get(&login.role)
        .is_some_and(|current| current.same_channel(peer))
    {
        session.peers.remove(&login.role);
    }
    if session.peers.is_empty() {
        sessions.remove(&login.session_id);
    }
}

async fn forward(sessions: &Sessions, from: &LoginParams, line: String) {
    let sessions = sessions.lock().await;
    let target = sessions
        .get(&from.session_id)
        .and_then(|s| s.peers.get(&from.role.counterpart()));

    match target {
        Some(peer) => {
            if peer.send(line).is_err() {
                tracing::debug!(
                    "{} in session {} went away",
                    from.role.counterpart(),
                    from.session_id
                );
            }
        }
        None => {
            tracing::debug!(
                "No {} in session {}, dropping message",
                from.role.counterpart(),
                from.session_id
            );
        }
    }
}
