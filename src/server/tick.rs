use crate::Server;

impl Server {
    /// Periodic authority tick: advances the turn/rematch countdowns and
    /// fans the resulting deltas out to every connection.
    pub fn tick(&self, dt: f32) {
        let deltas = {
            let mut game = self.game.lock();
            game.tick(dt);
            game.drain_deltas()
        };
        self.broadcast_deltas(deltas);
    }
}
