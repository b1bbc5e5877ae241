//! Example lobby walking a few clients through the session lifecycle.
//!
//! Run with: `RUST_LOG=debug cargo run --example lobby`

use bytes::Bytes;
use cardroom::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

/// Stand-in for a connection writer task: prints every queued frame.
fn spawn_writer(id: SessionId, mut rx: UnboundedReceiver<Bytes>) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut frames = 0;
        while let Some(frame) = rx.recv().await {
            frames += 1;
            println!(
                "[Client {}] <- {}",
                id,
                String::from_utf8_lossy(frame.as_ref())
            );
        }
        println!("[Client {}] connection closed after {} frames", id, frames);
        frames
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let manager = SessionManager::builder()
        .max_sessions(16)
        .removal_policy(RemovalPolicy::CloseTransport)
        .build();

    let mut writers = Vec::new();
    for (raw, addr) in [(1, "10.0.0.1"), (2, "10.0.0.2"), (3, "10.0.0.3")] {
        let id = SessionId::new(raw);
        let (transport, rx) = ChannelTransport::channel();
        manager.add_session(Arc::new(Session::new(id, addr, transport)))?;
        writers.push(spawn_writer(id, rx));
    }

    // Authentication completes for two of the three clients.
    for (raw, name) in [(2, "alice"), (3, "bob")] {
        let id = SessionId::new(raw);
        manager.set_session_player_data(id, Arc::new(PlayerData::new(raw * 10, name)));
        if let Some(session) = manager.get_session_by_id(id) {
            session.set_state(SessionState::Established)?;
        }
    }
    println!(
        "{} sessions, {} established",
        manager.raw_session_count(),
        manager.established_session_count()
    );

    let lobby_update = Bytes::from_static(b"lobby: 2 players online");
    manager.send_lobby_msg_to_all_sessions(
        &TransportSender,
        &lobby_update,
        SessionState::Established,
    )?;

    // Bob opens a table and alice joins it.
    manager.for_each(|session| {
        if session.state() == SessionState::Established {
            if let Err(e) = session.set_state(SessionState::Game) {
                tracing::error!("{}", e);
            }
        }
    });
    let roster: Vec<String> = manager
        .get_player_data_list()?
        .iter()
        .map(|player| player.name().to_string())
        .collect();
    println!("Table roster: {:?}", roster);

    if let Some(bob) = manager.get_session_by_player_name("bob")? {
        manager.send_to_all_but_one_sessions(
            &TransportSender,
            &Bytes::from_static(b"bob raises"),
            bob.id(),
            SessionState::Game,
        )?;
    }

    // The unauthenticated client drops.
    manager.remove_session(SessionId::new(1));

    manager.clear();
    for writer in writers {
        writer.await?;
    }

    println!("Lobby stopped");
    Ok(())
}
