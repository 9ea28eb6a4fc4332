use actix::fut::wrap_future;
use actix::{Actor, ActorContext, AsyncContext, StreamHandler};
use actix_web::{get, web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use qdart_broadcast::{Broadcaster, ConnectionId, RoomEvent};
use qdart_engine::Engine;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::state::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

/// Frames a client may send over the stream socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ClientFrame {
    Join {
        room: String,
    },
    Leave {
        room: String,
    },
    Message {
        sender: String,
        target_room: String,
        content: String,
    },
}

/// One connected dashboard or field client. Room events arrive on the inbox
/// channel registered with the broadcaster and are forwarded as JSON text.
pub struct StreamSession {
    connection: ConnectionId,
    broadcaster: Arc<Broadcaster>,
    engine: Engine,
    sender: UnboundedSender<RoomEvent>,
    inbox: Option<UnboundedReceiver<RoomEvent>>,
    last_heartbeat: Instant,
}

impl StreamSession {
    pub fn new(broadcaster: Arc<Broadcaster>, engine: Engine) -> Self {
        let (sender, inbox) = unbounded();
        Self {
            connection: ConnectionId::new(),
            broadcaster,
            engine,
            sender,
            inbox: Some(inbox),
            last_heartbeat: Instant::now(),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                ctx.stop();
                return;
            }
            ctx.ping(b"ping");
        });
    }
}

impl Actor for StreamSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.start_heartbeat(ctx);
        if let Some(inbox) = self.inbox.take() {
            ctx.add_stream(inbox);
        }
        debug!(connection = %self.connection, "stream session started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.broadcaster.disconnect(self.connection);
        debug!(connection = %self.connection, "stream session closed");
    }
}

impl StreamHandler<RoomEvent> for StreamSession {
    fn handle(&mut self, event: RoomEvent, ctx: &mut Self::Context) {
        match serde_json::to_string(&event) {
            Ok(frame) => ctx.text(frame),
            Err(err) => warn!(error = %err, event = %event.event, "event was not serializable"),
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for StreamSession {
    fn handle(&mut self, item: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match item {
            Ok(ws::Message::Ping(message)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&message);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientFrame>(&text) {
                    Ok(ClientFrame::Join { room }) => {
                        self.broadcaster
                            .join(self.connection, &room, self.sender.clone());
                    }
                    Ok(ClientFrame::Leave { room }) => {
                        self.broadcaster.leave(self.connection, &room);
                    }
                    Ok(ClientFrame::Message {
                        sender,
                        target_room,
                        content,
                    }) => {
                        let engine = self.engine.clone();
                        ctx.spawn(wrap_future(async move {
                            if let Err(err) =
                                engine.send_message(&sender, &target_room, &content).await
                            {
                                warn!(error = %err, "chat message was not delivered");
                            }
                        }));
                    }
                    Err(_) => {
                        ctx.text(r#"{"error":"unrecognized frame"}"#);
                    }
                }
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => {
                ctx.stop();
            }
        }
    }
}

#[get("/v1/stream/ws")]
pub async fn ws_route(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = StreamSession::new(state.broadcaster.clone(), state.engine.clone());
    ws::start(session, &req, stream)
}
