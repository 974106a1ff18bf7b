use axum::{
    extract::{Extension, ws::{Message, WebSocket, WebSocketUpgrade}},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use sqlx::SqlitePool;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::dto::{match_dto::LivescoresUpdate, standings_dto::StandingsUpdate};
use crate::services::{
    league_queries::{MatchOrder, fetch_group, fetch_matches},
    match_rules::MatchFilter,
    standings::load_group_standings,
};

fn broadcast_json<T: serde::Serialize>(tx: &broadcast::Sender<String>, update: &T) {
    match serde_json::to_string(update) {
        // No subscribers is not an error.
        Ok(json) => {
            let _ = tx.send(json);
        }
        Err(e) => error!("Failed to serialize update: {}", e),
    }
}

pub async fn send_livescores_update(pool: &SqlitePool, tx: &broadcast::Sender<String>) {
    let live_matches = match fetch_matches(pool, &MatchFilter::live(), MatchOrder::Earliest, None, None).await {
        Ok(matches) => matches,
        Err(e) => {
            error!("Failed to load live matches for update: {}", e);
            return;
        }
    };

    let update = LivescoresUpdate {
        r#type: "livescores_update".to_string(),
        live_matches,
    };
    broadcast_json(tx, &update);
}

pub async fn send_standings_update(
    pool: &SqlitePool,
    tx: &broadcast::Sender<String>,
    config: &AppConfig,
    group_id: i64,
) {
    let group = match fetch_group(pool, group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => return,
        Err(e) => {
            error!("Failed to load group {} for update: {}", group_id, e);
            return;
        }
    };

    match load_group_standings(pool, group, config.qualifiers_per_group).await {
        Ok(table) => {
            let update = StandingsUpdate {
                r#type: "standings_update".to_string(),
                group_id,
                standings: table.standings,
                qualified: table.qualified,
            };
            broadcast_json(tx, &update);
        }
        Err(e) => error!("Failed to compute standings for group {}: {}", group_id, e),
    }
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Extension(tx): Extension<broadcast::Sender<String>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, tx))
}

async fn handle_socket(socket: WebSocket, tx: broadcast::Sender<String>) {
    info!("Websocket client connected.");
    let (mut sender, mut receiver) = socket.split();
    let mut rx = tx.subscribe();

    let send_task = tokio::spawn(async move {
        while let Some(msg) = next_update(&mut rx).await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Updates only flow server to client; read until the client goes away.
    while let Some(Ok(msg)) = receiver.next().await {
        if let Message::Close(_) = msg {
            break;
        }
    }

    send_task.abort();
    info!("Websocket client disconnected.");
}

/// Waits for the next update. A lagging client skips what it missed and
/// keeps receiving; `None` once the channel is closed.
async fn next_update(rx: &mut broadcast::Receiver<String>) -> Option<String> {
    loop {
        match rx.recv().await {
            Ok(msg) => return Some(msg),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Websocket client lagged, skipped {} updates.", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}
