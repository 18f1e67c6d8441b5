use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{stream::SplitSink, SinkExt};
use tokio::sync::mpsc::{self, UnboundedSender};

use frontline::shared::cb_packet::Rejected;
use frontline::shared::sb_packet::Deploy;
use frontline::shared::{CBPacket, PlayerSlot, PlayerView, SBPacket};
use log::{info, warn};
use uuid::Uuid;

use parking_lot::RwLock;

use crate::Server;

/// One connected participant. Outbound packets go through a dedicated
/// writer task so broadcasting never blocks the authority.
pub struct Player {
    pub id: Uuid,
    pub name: RwLock<String>,
    pub slot: RwLock<Option<PlayerSlot>>,
    pub tx: UnboundedSender<Vec<u8>>,
}

impl Player {
    pub fn new(id: Uuid, name: String, mut sink: SplitSink<WebSocket, Message>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        // Spawn a dedicated task for handling this player's connection
        tokio::spawn(async move {
            while let Some(bytes) = rx.recv().await {
                let _ = sink.send(Message::Binary(bytes)).await;
            }
        });

        Self {
            id,
            name: RwLock::new(name),
            slot: RwLock::new(None),
            tx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn send(&self, packet: &CBPacket) {
        if let Ok(bytes) = bincode::serialize(packet) {
            let _ = self.tx.send(bytes);
        }
    }

    pub fn send_bytes(&self, bytes: Vec<u8>) {
        let _ = self.tx.send(bytes);
    }

    /// Answers a rejected request point-to-point; rejections never broadcast.
    pub fn reject(&self, reason: impl ToString) {
        self.send(&CBPacket::Rejected(Rejected {
            reason: reason.to_string(),
        }));
    }

    pub async fn handle_packet(&self, packet: SBPacket, server: &Arc<Server>) {
        let Some(slot) = *self.slot.read() else {
            warn!(
                "request from {} before login completed",
                self.name.read()
            );
            self.reject("log in first");
            return;
        };

        match packet {
            SBPacket::Login(_login) => {
                info!(
                    "received login packet from already logged in player {}",
                    self.name.read()
                );
            }
            SBPacket::Deploy(Deploy { kind, col, row }) => {
                let result = server.with_game(|game| game.deploy(slot, kind, col, row));
                if let Err(reject) = result {
                    info!("deploy by {} rejected: {}", self.name.read(), reject);
                    self.reject(reject);
                }
            }
            SBPacket::EndTurn => {
                let result = server.with_game(|game| game.end_turn(slot));
                if let Err(reject) = result {
                    info!("end turn by {} rejected: {}", self.name.read(), reject);
                    self.reject(reject);
                }
            }
            SBPacket::RematchReady(ready) => {
                let result = server.with_game(|game| game.set_rematch_ready(slot, ready));
                if let Err(reject) = result {
                    info!("rematch toggle by {} rejected: {}", self.name.read(), reject);
                    self.reject(reject);
                }
            }
            SBPacket::GiveMeState => {
                let snapshot = server.game.lock().snapshot();
                self.send(&CBPacket::Snapshot(
                    frontline::shared::cb_packet::Snapshot { snapshot },
                ));
            }
        }
    }

    pub fn to_view(&self) -> Option<PlayerView> {
        let slot = (*self.slot.read())?;
        Some(PlayerView {
            id: self.id,
            name: self.name.read().clone(),
            slot,
            color: slot.color(),
        })
    }
}
