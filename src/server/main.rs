mod config;
mod player;
mod tick;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::StreamExt;
use frontline::game::{Match, Reject};
use frontline::shared::cb_packet::{LoginAccepted, Snapshot, SyncPlayers};
use frontline::shared::{CBPacket, Phase, PlayerSlot, SBPacket, StateDelta};
use log::{info, warn};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::config::SharedConfig;
use crate::player::Player;

async fn ws_handler(ws: WebSocketUpgrade, server: Arc<Server>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, server.clone()))
}

async fn handle_socket(socket: WebSocket, server: Arc<Server>) {
    // Split the socket into read and write parts
    let (write, mut read) = socket.split();

    let player_id = Uuid::new_v4();
    let player = Arc::new(Player::new(player_id, "Connecting...".to_string(), write));

    while let Some(Ok(msg)) = read.next().await {
        if let Message::Binary(data) = msg {
            match bincode::deserialize::<SBPacket>(&data) {
                Ok(SBPacket::Login(login)) => server.login(&player, login.username),
                Ok(other) => player.handle_packet(other, &server).await,
                Err(err) => warn!("bad packet: {}", err),
            }
        }
    }

    server.disconnect(&player);
}

pub struct Server {
    pub players: RwLock<HashMap<Uuid, Arc<Player>>>,
    pub game: Mutex<Match>,
    pub config: SharedConfig,
}

impl Server {
    fn new(game: Match, config: SharedConfig) -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
            game: Mutex::new(game),
            config,
        }
    }

    /// Applies one mutating request under the authority lock and broadcasts
    /// whatever it replicated. Requests never interleave.
    pub fn with_game<T>(
        &self,
        f: impl FnOnce(&mut Match) -> Result<T, Reject>,
    ) -> Result<T, Reject> {
        let (result, deltas) = {
            let mut game = self.game.lock();
            let result = f(&mut game);
            (result, game.drain_deltas())
        };
        self.broadcast_deltas(deltas);
        result
    }

    /// One-to-all fan-out, preserving the order the authority issued.
    pub fn broadcast_deltas(&self, deltas: Vec<StateDelta>) {
        if deltas.is_empty() {
            return;
        }
        let players = self.players.read();
        for delta in deltas {
            if let Ok(bytes) = bincode::serialize(&CBPacket::Delta(delta)) {
                for player in players.values() {
                    player.send_bytes(bytes.clone());
                }
            }
        }
    }

    pub fn sync_players(&self) {
        let players = self.players.read();
        let views = players.values().filter_map(|p| p.to_view()).collect();
        let packet = CBPacket::SyncPlayers(SyncPlayers { players: views });
        if let Ok(bytes) = bincode::serialize(&packet) {
            for player in players.values() {
                player.send_bytes(bytes.clone());
            }
        }
    }

    /// Seats a participant: first vacant slot wins, a reconnect claims the
    /// slot its predecessor vacated, a third participant is turned away.
    /// When the roster is complete the match leaves the lobby.
    pub fn login(&self, player: &Arc<Player>, username: String) {
        if player.slot.read().is_some() {
            info!(
                "received login packet from already logged in player {}",
                player.name.read()
            );
            return;
        }
        *player.name.write() = username.clone();

        let (slot, deltas) = {
            let mut game = self.game.lock();
            let slot = [PlayerSlot::One, PlayerSlot::Two]
                .into_iter()
                .find(|slot| !game.turn().connected[slot.index()]);
            if let Some(slot) = slot {
                game.set_connected(slot, true);
                if game.both_connected() && game.turn().phase == Phase::Lobby {
                    if let Err(e) = game.begin() {
                        warn!("failed to start match: {}", e);
                    }
                }
            }
            (slot, game.drain_deltas())
        };

        let Some(slot) = slot else {
            info!("rejecting {}: match is full", username);
            player.reject(Reject::MatchFull);
            return;
        };

        *player.slot.write() = Some(slot);
        self.players.write().insert(player.id(), player.clone());
        info!("player {} logged in as {:?}", username, slot);

        player.send(&CBPacket::LoginAccepted(LoginAccepted {
            player_id: player.id(),
            slot,
            color: slot.color(),
        }));
        let snapshot = self.game.lock().snapshot();
        player.send(&CBPacket::Snapshot(Snapshot { snapshot }));
        self.sync_players();
        self.broadcast_deltas(deltas);
    }

    /// A dropped participant pauses the match rather than faulting it; the
    /// seat stays reserved for a reconnect.
    pub fn disconnect(&self, player: &Arc<Player>) {
        self.players.write().remove(&player.id());
        if let Some(slot) = *player.slot.read() {
            info!("player {} ({:?}) disconnected", player.name.read(), slot);
            let deltas = {
                let mut game = self.game.lock();
                game.set_connected(slot, false);
                game.drain_deltas()
            };
            self.broadcast_deltas(deltas);
            self.sync_players();
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = config::create_shared_config(std::env::args().nth(1));
    let (rules, tick_ms, bind_addr) = {
        let config = config.read();
        (
            config.rules.clone(),
            config.tick_ms,
            config.bind_addr.clone(),
        )
    };

    let server = Arc::new(Server::new(Match::new(rules), config));

    info!("frontline server (WS) starting on {}/ws...", bind_addr);

    // Start tick loop
    let tick_server = server.clone();
    tokio::spawn(async move {
        let dt = (tick_ms / 1000.0) as f32;
        let mut interval =
            tokio::time::interval(tokio::time::Duration::from_millis(tick_ms as u64));
        loop {
            interval.tick().await;
            tick_server.tick(dt);
        }
    });

    let app = Router::new().route("/ws", get(move |ws| ws_handler(ws, server.clone())));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
