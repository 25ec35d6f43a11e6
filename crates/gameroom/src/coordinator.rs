use super::*;
use dlm_core::*;
use dlm_records::Archive;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// Live operational counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub active_games: usize,
    pub waiting_players: usize,
    pub connected_players: usize,
}

/// Owns every live session, the lobby, and the connection registry.
///
/// Each session sits behind its own mutex; recording a choice and
/// resolving the round happen under that one lock, so a round resolves
/// at most once no matter how submissions interleave. Collection locks
/// are never held while a session lock is being acquired. The seat index
/// is always taken before the lobby, live-session, and agent locks.
pub struct Coordinator {
    timing: Timing,
    archive: Arc<dyn Archive>,
    registry: Registry,
    lobby: Lobby,
    sessions: RwLock<HashMap<ID<Session>, Arc<Mutex<Session>>>>,
    seats: RwLock<HashMap<PlayerId, ID<Session>>>,
    agents: Mutex<HashMap<ID<Session>, Vec<Agent>>>,
}

impl Coordinator {
    pub fn new(archive: Arc<dyn Archive>, timing: Timing) -> Self {
        Self {
            timing,
            archive,
            registry: Registry::default(),
            lobby: Lobby::default(),
            sessions: RwLock::new(HashMap::new()),
            seats: RwLock::new(HashMap::new()),
            agents: Mutex::new(HashMap::new()),
        }
    }
    pub fn timing(&self) -> &Timing {
        &self.timing
    }
    pub fn archive(&self) -> &Arc<dyn Archive> {
        &self.archive
    }
    pub async fn stats(&self) -> Stats {
        Stats {
            active_games: self.sessions.read().await.len(),
            waiting_players: self.lobby.len().await,
            connected_players: self.registry.len().await,
        }
    }
}

impl Coordinator {
    /// Registers a participant's outbound channel.
    pub async fn connect(&self, id: PlayerId, outbox: Outbox) {
        log::info!("[coordinator] {} connected", id);
        self.registry.register(id, outbox).await;
    }
    /// Forgets a participant's connection and lobby entry.
    /// A session they are seated in keeps running without them.
    pub async fn disconnect(&self, id: &PlayerId) {
        self.registry.unregister(id).await;
        if self.lobby.cancel(id).await {
            log::info!("[coordinator] {} left the lobby", id);
        }
        log::info!("[coordinator] {} disconnected", id);
    }
    /// Decodes one inbound frame and routes it.
    /// Rejections go back to the sender as `error` messages.
    pub async fn dispatch(self: &Arc<Self>, id: &PlayerId, text: &str) {
        let result = match Protocol::decode(text) {
            Ok(Command::Join { username }) => self.join(id.clone(), username).await,
            Ok(Command::Choose(choice)) => self.choose(id, choice).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            self.reject(id, &e).await;
        }
    }
    /// Submits a raw choice token on behalf of a participant.
    /// Rejections are also sent back to that participant.
    pub async fn submit(self: &Arc<Self>, id: &PlayerId, raw: &str) -> Result<(), ProtocolError> {
        let result = match Choice::try_from(raw) {
            Ok(choice) => self.choose(id, choice).await,
            Err(e) => Err(e),
        };
        if let Err(ref e) = result {
            self.reject(id, e).await;
        }
        result
    }
    async fn reject(&self, id: &PlayerId, e: &ProtocolError) {
        log::debug!("[coordinator] rejected {}: {:?}", id, e);
        self.registry.send(id, ServerMessage::error(e)).await;
    }
}

impl Coordinator {
    /// Queues a participant and arms their wait-window timer.
    pub async fn join(self: &Arc<Self>, id: PlayerId, username: String) -> Result<(), ProtocolError> {
        {
            let index = self.seats.write().await;
            if index.contains_key(&id) {
                return Err(ProtocolError::AlreadySeated);
            }
            self.lobby.enqueue(id.clone(), username).await;
        }
        self.registry.send(&id, ServerMessage::waiting()).await;
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.timing.wait).await;
            this.claim(id).await;
        });
        Ok(())
    }

    /// Seats a waiting participant against a bot once their window closes.
    /// The lobby claim and the seating share the index lock with `join`.
    async fn claim(self: &Arc<Self>, id: PlayerId) -> Option<ID<Session>> {
        let mut index = self.seats.write().await;
        let Some(name) = self.lobby.take(&id).await else {
            log::debug!("[lobby] {} gone before the wait window closed", id);
            return None;
        };
        Some(self.open(&mut index, [Seat::human(id, name), Seat::bot()]).await)
    }

    /// Seats two participants in a new session and announces it to both.
    /// Simulated seats get a bot agent bound to the session.
    pub async fn create_session(self: &Arc<Self>, a: Seat, b: Seat) -> ID<Session> {
        let mut index = self.seats.write().await;
        self.open(&mut index, [a, b]).await
    }

    async fn open(
        self: &Arc<Self>,
        index: &mut HashMap<PlayerId, ID<Session>>,
        seats: [Seat; N],
    ) -> ID<Session> {
        let session = Session::new(seats, self.timing.rounds());
        let game = session.id();
        let starts = [session.start(0), session.start(1)];
        let seats = session.seats().clone();
        log::info!(
            "[coordinator] session {} opened: {} vs {} over {} rounds",
            game,
            seats[0].name(),
            seats[1].name(),
            session.total()
        );
        self.sessions
            .write()
            .await
            .insert(game, Arc::new(Mutex::new(session)));
        for seat in seats.iter() {
            index.insert(seat.player().clone(), game);
        }
        for (seat, start) in seats.iter().zip(starts) {
            self.registry.send(seat.player(), start).await;
        }
        let agents = seats
            .iter()
            .filter(|seat| seat.is_bot())
            .map(|seat| Agent::spawn(self.clone(), seat.player().clone(), Box::new(Fish)))
            .collect::<Vec<_>>();
        if !agents.is_empty() {
            self.agents.lock().await.insert(game, agents);
        }
        game
    }

    /// Records a validated choice and resolves the round when both seats
    /// have chosen. Terminates the session after its final round.
    pub async fn choose(self: &Arc<Self>, id: &PlayerId, choice: Choice) -> Result<(), ProtocolError> {
        let (game, session) = self.locate(id).await.ok_or(ProtocolError::NoActiveGame)?;
        let mut session = session.lock().await;
        if !session.is_live() {
            return Err(ProtocolError::NoActiveGame);
        }
        let pos = session.position(id).ok_or(ProtocolError::NoActiveGame)?;
        let Some(resolution) = session.choose(pos, choice) else {
            log::debug!("[coordinator] session {} {} chose, waiting on opponent", game, id);
            return Ok(());
        };
        log::debug!(
            "[coordinator] session {} resolved round {}: {:?}",
            game,
            resolution.round() - 1,
            resolution.points()
        );
        for (pos, seat) in session.seats().iter().enumerate() {
            self.registry.send(seat.player(), resolution.report(pos)).await;
        }
        drop(session);
        if resolution.is_over() {
            self.terminate(game).await;
        }
        Ok(())
    }

    /// Closes a session: final scores to both seats, out of the live set,
    /// bots stopped, tally archived.
    pub async fn terminate(&self, game: ID<Session>) {
        let Some(session) = self.sessions.write().await.remove(&game) else {
            return;
        };
        let tally = {
            let mut session = session.lock().await;
            let tally = session.close();
            for (pos, seat) in session.seats().iter().enumerate() {
                self.registry.send(seat.player(), session.summary(pos)).await;
            }
            tally
        };
        {
            let mut index = self.seats.write().await;
            for entrant in tally.entrants() {
                if index.get(entrant.player()) == Some(&game) {
                    index.remove(entrant.player());
                }
            }
        }
        if let Some(agents) = self.agents.lock().await.remove(&game) {
            agents.into_iter().for_each(Agent::stop);
        }
        log::info!("[coordinator] session {} closed after {} rounds", game, tally.rounds());
        if let Err(e) = self.archive.record(&tally).await {
            log::error!("[coordinator] failed to archive session {}: {}", game, e);
        }
    }

    async fn locate(&self, id: &PlayerId) -> Option<(ID<Session>, Arc<Mutex<Session>>)> {
        let game = *self.seats.read().await.get(id)?;
        let session = self.sessions.read().await.get(&game)?.clone();
        Some((game, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlm_records::Memory;
    use serde_json::Value;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    fn coordinator(timing: Timing) -> Arc<Coordinator> {
        Arc::new(Coordinator::new(Arc::new(Memory::default()), timing))
    }

    async fn connect(c: &Arc<Coordinator>, id: &str) -> UnboundedReceiver<String> {
        let (tx, rx) = unbounded_channel();
        c.connect(PlayerId::from(id), tx).await;
        rx
    }

    async fn next(rx: &mut UnboundedReceiver<String>) -> Value {
        serde_json::from_str(&rx.recv().await.expect("channel open")).expect("valid json")
    }

    fn quiet(rx: &mut UnboundedReceiver<String>) -> bool {
        rx.try_recv().is_err()
    }

    async fn join(c: &Arc<Coordinator>, id: &str, name: &str) {
        let frame = serde_json::json!({ "type": "join_game", "username": name }).to_string();
        c.dispatch(&PlayerId::from(id), &frame).await;
    }

    async fn choose(c: &Arc<Coordinator>, id: &str, choice: &str) {
        let frame = serde_json::json!({ "type": "make_choice", "choice": choice }).to_string();
        c.dispatch(&PlayerId::from(id), &frame).await;
    }

    /// Two connected humans seated against each other.
    async fn duel(
        c: &Arc<Coordinator>,
    ) -> (UnboundedReceiver<String>, UnboundedReceiver<String>, ID<Session>) {
        let mut a = connect(c, "a").await;
        let mut b = connect(c, "b").await;
        let game = c
            .create_session(
                Seat::human(PlayerId::from("a"), "Alice".into()),
                Seat::human(PlayerId::from("b"), "Bob".into()),
            )
            .await;
        assert_eq!(next(&mut a).await["type"], "game_start");
        assert_eq!(next(&mut b).await["type"], "game_start");
        (a, b, game)
    }

    #[tokio::test(start_paused = true)]
    async fn join_then_bot_session_after_wait_window() {
        let c = coordinator(Timing::default());
        let mut rx = connect(&c, "alice").await;
        let start = tokio::time::Instant::now();
        join(&c, "alice", "Alice").await;
        let waiting = next(&mut rx).await;
        assert_eq!(waiting["type"], "waiting");
        assert_eq!(c.stats().await.waiting_players, 1);
        let started = next(&mut rx).await;
        assert!(start.elapsed() >= WAIT_WINDOW);
        assert_eq!(started["type"], "game_start");
        assert!(started["opponent"].as_str().unwrap().starts_with("Bot_"));
        let total = started["total_rounds"].as_u64().unwrap();
        assert!((5..=15).contains(&total));
        assert_eq!(
            c.stats().await,
            Stats {
                active_games: 1,
                waiting_players: 0,
                connected_players: 1,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn disconnect_before_window_prevents_session() {
        let c = coordinator(Timing::default());
        let mut rx = connect(&c, "alice").await;
        join(&c, "alice", "Alice").await;
        assert_eq!(next(&mut rx).await["type"], "waiting");
        tokio::time::sleep(Duration::from_secs(2)).await;
        c.disconnect(&PlayerId::from("alice")).await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(
            c.stats().await,
            Stats {
                active_games: 0,
                waiting_players: 0,
                connected_players: 0,
            }
        );
    }

    #[tokio::test]
    async fn mutual_cooperation_pays_five_each() {
        let c = coordinator(Timing::default());
        let (mut a, mut b, game) = duel(&c).await;
        choose(&c, "a", "cooperate").await;
        choose(&c, "b", "cooperate").await;
        for rx in [&mut a, &mut b] {
            let r = next(rx).await;
            assert_eq!(r["type"], "round_result");
            assert_eq!(r["game_id"], game.to_string());
            assert_eq!(r["round_number"], 2);
            assert_eq!(r["points"], 5);
            assert_eq!(r["total_points"], 5);
            assert_eq!(r["opponent_points"], 5);
        }
    }

    #[tokio::test]
    async fn lone_defector_takes_eight() {
        let c = coordinator(Timing::default());
        let (mut a, mut b, _) = duel(&c).await;
        choose(&c, "a", "cooperate").await;
        choose(&c, "b", "defect").await;
        let ra = next(&mut a).await;
        let rb = next(&mut b).await;
        assert_eq!(ra["points"], 2);
        assert_eq!(ra["player_choice"], "cooperate");
        assert_eq!(ra["opponent_choice"], "defect");
        assert_eq!(rb["points"], 8);
        assert_eq!(rb["total_points"], 8);
        assert_eq!(rb["opponent_points"], 2);
    }

    #[tokio::test]
    async fn resubmission_overwrites_without_resolving() {
        let c = coordinator(Timing::default());
        let (mut a, mut b, _) = duel(&c).await;
        choose(&c, "a", "cooperate").await;
        choose(&c, "a", "defect").await;
        assert!(quiet(&mut a));
        assert!(quiet(&mut b));
        choose(&c, "b", "cooperate").await;
        let ra = next(&mut a).await;
        assert_eq!(ra["player_choice"], "defect");
        assert_eq!(ra["points"], 8);
        assert_eq!(ra["round_number"], 2);
    }

    #[tokio::test]
    async fn final_round_ends_game_from_each_perspective() {
        let c = coordinator(Timing::default().with_rounds(2));
        let (mut a, mut b, game) = duel(&c).await;
        for (x, y) in [("cooperate", "defect"), ("defect", "defect")] {
            choose(&c, "a", x).await;
            choose(&c, "b", y).await;
            assert_eq!(next(&mut a).await["type"], "round_result");
            assert_eq!(next(&mut b).await["type"], "round_result");
        }
        let ea = next(&mut a).await;
        let eb = next(&mut b).await;
        assert_eq!(ea["type"], "game_end");
        assert_eq!(ea["game_id"], game.to_string());
        assert_eq!(ea["final_score"]["player"], 2);
        assert_eq!(ea["final_score"]["opponent"], 8);
        assert_eq!(eb["final_score"]["player"], 8);
        assert_eq!(eb["final_score"]["opponent"], 2);
        assert_eq!(c.stats().await.active_games, 0);
        choose(&c, "a", "cooperate").await;
        let err = next(&mut a).await;
        assert_eq!(err["type"], "error");
        assert_eq!(err["message"], "No active game found");
    }

    #[tokio::test]
    async fn finished_session_is_archived() {
        let c = coordinator(Timing::default().with_rounds(1));
        let (mut a, _b, _) = duel(&c).await;
        choose(&c, "a", "defect").await;
        choose(&c, "b", "cooperate").await;
        assert_eq!(next(&mut a).await["type"], "round_result");
        assert_eq!(next(&mut a).await["type"], "game_end");
        let alice = c
            .archive()
            .player(&PlayerId::from("a"))
            .await
            .unwrap()
            .expect("archived");
        assert_eq!(alice.username, "Alice");
        assert_eq!(alice.total_points, 8);
        assert_eq!(alice.games_played, 1);
    }

    #[tokio::test]
    async fn protocol_errors_reach_only_the_sender() {
        let c = coordinator(Timing::default());
        let (mut a, mut b, _) = duel(&c).await;
        let id = PlayerId::from("a");
        c.dispatch(&id, "{not json").await;
        assert_eq!(next(&mut a).await["message"], "Invalid message");
        c.dispatch(&id, r#"{"type":"surrender"}"#).await;
        assert_eq!(next(&mut a).await["message"], "Invalid message type");
        choose(&c, "a", "maybe").await;
        assert_eq!(next(&mut a).await["message"], "Invalid choice");
        assert!(quiet(&mut b));
        choose(&c, "b", "cooperate").await;
        assert!(quiet(&mut a));
    }

    #[tokio::test]
    async fn choice_without_session_is_rejected() {
        let c = coordinator(Timing::default());
        let mut rx = connect(&c, "loner").await;
        choose(&c, "loner", "defect").await;
        let err = next(&mut rx).await;
        assert_eq!(err["type"], "error");
        assert_eq!(err["message"], "No active game found");
    }

    #[tokio::test]
    async fn join_while_seated_is_rejected() {
        let c = coordinator(Timing::default());
        let (mut a, _b, _) = duel(&c).await;
        join(&c, "a", "Alice").await;
        assert_eq!(next(&mut a).await["message"], "Already in a game");
        assert_eq!(c.stats().await.waiting_players, 0);
    }

    #[tokio::test]
    async fn submit_rejects_invalid_token() {
        let c = coordinator(Timing::default());
        let (mut a, _b, _) = duel(&c).await;
        let result = c.submit(&PlayerId::from("a"), "betray").await;
        assert!(matches!(result, Err(ProtocolError::InvalidChoice(_))));
        assert_eq!(next(&mut a).await["message"], "Invalid choice");
    }

    #[tokio::test]
    async fn disconnect_keeps_session_alive() {
        let c = coordinator(Timing::default());
        let (mut a, _b, _) = duel(&c).await;
        c.disconnect(&PlayerId::from("b")).await;
        assert_eq!(c.stats().await.active_games, 1);
        choose(&c, "b", "cooperate").await;
        choose(&c, "a", "cooperate").await;
        assert_eq!(next(&mut a).await["points"], 5);
    }

    #[tokio::test(start_paused = true)]
    async fn bot_session_plays_to_completion() {
        let c = coordinator(Timing::default().with_rounds(5));
        let mut rx = connect(&c, "alice").await;
        join(&c, "alice", "Alice").await;
        assert_eq!(next(&mut rx).await["type"], "waiting");
        assert_eq!(next(&mut rx).await["type"], "game_start");
        let mut rounds = Vec::new();
        loop {
            choose(&c, "alice", "cooperate").await;
            let msg = next(&mut rx).await;
            match msg["type"].as_str() {
                Some("round_result") => rounds.push(msg["round_number"].as_u64().unwrap()),
                _ => panic!("unexpected {}", msg),
            }
            if rounds.len() == 5 {
                break;
            }
        }
        assert_eq!(rounds, vec![2, 3, 4, 5, 6]);
        let end = next(&mut rx).await;
        assert_eq!(end["type"], "game_end");
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(quiet(&mut rx));
        assert_eq!(c.stats().await.active_games, 0);
        assert!(c.agents.lock().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn repeated_joins_never_seat_twice() {
        let timing = Timing {
            wait: Duration::from_millis(5),
            ..Timing::default()
        };
        for _ in 0..50 {
            let c = coordinator(timing);
            let _rx = connect(&c, "alice").await;
            join(&c, "alice", "Alice").await;
            let deadline = tokio::time::Instant::now() + Duration::from_millis(15);
            while tokio::time::Instant::now() < deadline {
                join(&c, "alice", "Alice").await;
                tokio::task::yield_now().await;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
            let stats = c.stats().await;
            assert_eq!(stats.active_games, 1);
            assert_eq!(stats.waiting_players, 0);
            assert_eq!(c.agents.lock().await.len(), 1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_submissions_resolve_exactly_once() {
        for _ in 0..64 {
            let c = coordinator(Timing::default());
            let (mut a, mut b, _) = duel(&c).await;
            let barrier = Arc::new(tokio::sync::Barrier::new(2));
            let racers = ["a", "b"].map(|id| {
                let c = c.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    choose(&c, id, "cooperate").await;
                })
            });
            for racer in racers {
                racer.await.unwrap();
            }
            for rx in [&mut a, &mut b] {
                let r = next(rx).await;
                assert_eq!(r["type"], "round_result");
                assert_eq!(r["round_number"], 2);
                assert_eq!(r["total_points"], 5);
                assert!(quiet(rx));
            }
        }
    }
}
