//! The websocket server.
//!
//! Every accepted connection gets its own session thread running a
//! [`SessionDriver`]. The async side only moves text frames:
//!
//! ```text
//!  browser ──frames──▶ reader task ──Incoming──▶ session thread
//!     ▲                    │ answers                  │ scripts
//!     │                    ▼                          ▼
//!     └────frames──── writer task ◀──────────── SocketSink
//! ```
//!
//! Answers are handed to the answer slots directly by the reader, so a
//! session blocked in a synchronous request is woken without its own loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use async_channel::{Receiver, Sender};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use rui_core::SessionContent;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, error, info, warn};

use crate::driver::SessionDriver;
use crate::error::{DisconnectReason, WebError};
use crate::options::ServerOptions;
use crate::protocol::Incoming;
use crate::sink::{self, SharedAnswers, SocketSink};

struct Shared<F> {
    factory: F,
    options: ServerOptions,
    next_id: AtomicU64,
}

/// A bound websocket listener serving sessions.
///
/// ```no_run
/// use rui_core::{Session, SessionContent, View};
/// use rui_web::{Server, ServerOptions};
///
/// struct App;
///
/// impl SessionContent for App {
///     fn create_root_view(&mut self, _session: &Session) -> Option<View> {
///         None
///     }
/// }
///
/// # async fn serve() -> Result<(), rui_web::WebError> {
/// let server = Server::bind(ServerOptions::default()).await?;
/// server.serve(|| App).await
/// # }
/// ```
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    options: ServerOptions,
}

impl Server {
    /// Binds the listener of `options`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Bind`] when the address cannot be bound.
    pub async fn bind(options: ServerOptions) -> Result<Self, WebError> {
        let listener = TcpListener::bind(options.address()).await.map_err(WebError::Bind)?;
        if let Ok(address) = listener.local_addr() {
            info!(%address, path = options.path(), "websocket server listening");
        }
        Ok(Self { listener, options })
    }

    /// The bound address.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Bind`] when the socket has no local address.
    pub fn local_addr(&self) -> Result<SocketAddr, WebError> {
        self.listener.local_addr().map_err(WebError::Bind)
    }

    /// Serves connections forever; `factory` builds the content of each session.
    ///
    /// # Errors
    ///
    /// Never returns an error today; accept failures are logged and skipped.
    pub async fn serve<F, C>(self, factory: F) -> Result<(), WebError>
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: SessionContent + 'static,
    {
        self.serve_with_shutdown(factory, core::future::pending()).await
    }

    /// Serves connections until `shutdown` completes.
    ///
    /// Running sessions are not interrupted; they end with their connection.
    ///
    /// # Errors
    ///
    /// Never returns an error today; accept failures are logged and skipped.
    pub async fn serve_with_shutdown<F, C>(self, factory: F, shutdown: impl Future<Output = ()>) -> Result<(), WebError>
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: SessionContent + 'static,
    {
        let shared = Arc::new(Shared {
            factory,
            options: self.options,
            next_id: AtomicU64::new(1),
        });
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("websocket server stopped");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let shared = Arc::clone(&shared);
                        tokio::spawn(async move {
                            match serve_connection(stream, peer, shared).await {
                                Ok(reason) => info!(%peer, %reason, "connection ended"),
                                Err(error) => warn!(%peer, %error, "connection failed"),
                            }
                        });
                    }
                    Err(error) => error!(%error, "accept failed"),
                }
            }
        }
    }
}

/// Binds `options` and serves sessions on a new multi-threaded runtime.
///
/// # Errors
///
/// Fails when the runtime cannot start or the address cannot be bound.
pub fn run<F, C>(options: ServerOptions, factory: F) -> Result<(), WebError>
where
    F: Fn() -> C + Send + Sync + 'static,
    C: SessionContent + 'static,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(WebError::Runtime)?;
    runtime.block_on(async move { Server::bind(options).await?.serve(factory).await })
}

async fn serve_connection<F, C>(
    stream: TcpStream,
    peer: SocketAddr,
    shared: Arc<Shared<F>>,
) -> Result<DisconnectReason, WebError>
where
    F: Fn() -> C + Send + Sync + 'static,
    C: SessionContent + 'static,
{
    let options = shared.options.clone();
    let check_path = move |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
        if options.accepts_path(request.uri().path()) {
            Ok(response)
        } else {
            let mut refusal = ErrorResponse::new(Some("unknown websocket path".to_string()));
            *refusal.status_mut() = StatusCode::NOT_FOUND;
            Err(refusal)
        }
    };
    let socket = tokio_tungstenite::accept_hdr_async(stream, check_path)
        .await
        .map_err(|error| WebError::Handshake(error.to_string()))?;
    let (write, read) = socket.split();

    let id = shared.next_id.fetch_add(1, Ordering::Relaxed);
    info!(%peer, session = id, "connection accepted");
    let (scripts, outgoing) = async_channel::unbounded::<String>();
    let (events, incoming) = async_channel::unbounded::<Incoming>();
    let answers = SharedAnswers::default();
    let sink = SocketSink::new(scripts, Arc::clone(&answers));

    let session_shared = Arc::clone(&shared);
    thread::Builder::new()
        .name(format!("rui-session-{id}"))
        .spawn(move || {
            let content = (session_shared.factory)();
            let timeout = session_shared.options.answer_timeout();
            SessionDriver::new(id, sink, content, timeout).run(&incoming);
            debug!(session = id, "session thread finished");
        })
        .map_err(WebError::Runtime)?;

    let reason = tokio::select! {
        reason = read_frames(read, &events, &answers) => reason,
        result = write_scripts(write, outgoing) => match result {
            Ok(()) => DisconnectReason::SessionClosed,
            Err(error) => DisconnectReason::Abnormal { details: error.to_string() },
        },
    };
    events.close();
    if let Some(slots) = answers.get() {
        slots.close();
    }
    Ok(reason)
}

async fn read_frames<S>(mut read: S, events: &Sender<Incoming>, answers: &SharedAnswers) -> DisconnectReason
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = read.next().await {
        match frame {
            Ok(Message::Text(text)) => match Incoming::parse(&text) {
                Ok(Incoming::Answer(answer)) => {
                    if !sink::fulfill(answers, &answer) {
                        debug!(answer = answer.text("answerID"), "late answer dropped");
                    }
                }
                Ok(message) => {
                    if events.send(message).await.is_err() {
                        return DisconnectReason::SessionClosed;
                    }
                }
                Err(error) => warn!(%error, frame = %text, "malformed message"),
            },
            Ok(Message::Close(frame)) => {
                return DisconnectReason::Graceful {
                    code: frame.map(|frame| u16::from(frame.code)),
                };
            }
            Ok(_) => {}
            Err(error) => {
                return DisconnectReason::Abnormal {
                    details: error.to_string(),
                };
            }
        }
    }
    DisconnectReason::Graceful { code: None }
}

async fn write_scripts<S>(mut write: S, outgoing: Receiver<String>) -> Result<(), WebError>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    let socket_error = |error: tungstenite::Error| WebError::Socket(error.to_string());
    while let Ok(script) = outgoing.recv().await {
        write.send(Message::Text(script)).await.map_err(socket_error)?;
    }
    write.close().await.map_err(socket_error)
}

#[cfg(test)]
mod tests {
    use rui_core::{Params, Session, View};
    use rui_text::TextView;
    use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

    use super::*;

    struct Hello;

    impl SessionContent for Hello {
        fn create_root_view(&mut self, session: &Session) -> Option<View> {
            Some(TextView::create(session, Params::new().with("text", "hello")))
        }
    }

    type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

    async fn next_text(client: &mut Client) -> Option<String> {
        while let Some(frame) = client.next().await {
            match frame {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Close(_)) | Err(_) => return None,
                Ok(_) => {}
            }
        }
        None
    }

    async fn start_server() -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
        let server = Server::bind(ServerOptions::new("127.0.0.1:0")).await.unwrap();
        let address = server.local_addr().unwrap();
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(server.serve_with_shutdown(|| Hello, async {
            let _ = stopped.await;
        }));
        (address, stop)
    }

    #[tokio::test]
    async fn session_lifecycle_over_websocket() {
        let (address, stop) = start_server().await;
        let (mut client, _) = connect_async(format!("ws://{address}/ws")).await.unwrap();

        client
            .send(Message::Text("startSession{language=en}".to_string()))
            .await
            .unwrap();
        assert_eq!(next_text(&mut client).await.as_deref(), Some("sessionID = '1';"));
        let root = next_text(&mut client).await.unwrap();
        assert!(root.starts_with("updateInnerHTML('ruiRootView', "));
        assert!(root.contains("hello"));

        client
            .send(Message::Text("session-close{}".to_string()))
            .await
            .unwrap();
        assert_eq!(next_text(&mut client).await, None);
        let _ = stop.send(());
    }

    #[tokio::test]
    async fn other_paths_are_refused() {
        let (address, stop) = start_server().await;
        assert!(connect_async(format!("ws://{address}/other")).await.is_err());

        let (mut client, _) = connect_async(format!("ws://{address}/ws")).await.unwrap();
        client
            .send(Message::Text("click-event{id=".to_string()))
            .await
            .unwrap();
        client
            .send(Message::Text("startSession{}".to_string()))
            .await
            .unwrap();
        // refused handshakes do not take a session id
        assert_eq!(next_text(&mut client).await.as_deref(), Some("sessionID = '1';"));
        let _ = stop.send(());
    }
}
