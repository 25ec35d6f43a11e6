use dlm_core::PlayerId;
use dlm_gameroom::Coordinator;
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;

/// Spawns the WebSocket bridge for one participant.
///
/// Registers an outbound channel under `id`, then forwards coordinator
/// messages to the socket and socket text frames to the coordinator until
/// either side closes. The participant is disconnected on the way out,
/// unless a newer connection has taken over their outbound channel.
pub async fn bridge(
    coordinator: Arc<Coordinator>,
    id: PlayerId,
    mut session: actix_ws::Session,
    mut streams: actix_ws::MessageStream,
) {
    use futures::StreamExt;
    let (tx, mut rx) = unbounded_channel::<String>();
    coordinator.connect(id.clone(), tx).await;
    log::debug!("[bridge {}] connected", id);
    actix_web::rt::spawn(async move {
        let replaced = 'sesh: loop {
            tokio::select! {
                biased;
                msg = rx.recv() => match msg {
                    Some(json) => if session.text(json).await.is_err() { break 'sesh false },
                    None => break 'sesh true,
                },
                msg = streams.next() => match msg {
                    Some(Ok(actix_ws::Message::Text(text))) => coordinator.dispatch(&id, &text).await,
                    Some(Ok(actix_ws::Message::Ping(bytes))) => if session.pong(&bytes).await.is_err() { break 'sesh false },
                    Some(Ok(actix_ws::Message::Close(_))) => break 'sesh false,
                    Some(Err(_)) => break 'sesh false,
                    None => break 'sesh false,
                    _ => continue 'sesh,
                },
            }
        };
        // a newer connection under the same id owns the registry entry now
        if !replaced {
            coordinator.disconnect(&id).await;
        }
        let _ = session.close(None).await;
        log::debug!("[bridge {}] disconnected", id);
    });
}
