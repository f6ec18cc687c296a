use baize_engine::{
    ConfigError, FrameClock, GameEvent, InputEvent, InputQueue, SimConfig, Simulation,
};
#[cfg(feature = "vectors")]
use baize_engine::TableMesh;

/// Wires a [`Simulation`] to the browser's animation loop.
///
/// The page pushes slider and button input as it happens and calls
/// [`frame`](Self::frame) from `requestAnimationFrame` for as long as it
/// returns true. After a strike or an aim change the page calls `frame` once
/// more to kick the loop off again.
pub struct TableRunner {
    sim: Simulation,
    input: InputQueue,
    clock: FrameClock,
    /// A shot is rolling; frames should keep coming.
    running: bool,
    /// Events from every tick of the last frame, flat for linear-memory reads.
    events: Vec<GameEvent>,
    #[cfg(feature = "vectors")]
    mesh: TableMesh,
}

impl TableRunner {
    pub fn new(sim: Simulation) -> Self {
        let clock = FrameClock::new(sim.config().fixed_dt);
        Self {
            sim,
            input: InputQueue::new(),
            clock,
            running: false,
            events: Vec::with_capacity(32),
            #[cfg(feature = "vectors")]
            mesh: TableMesh::new(),
        }
    }

    /// Draw the opening table. Call once after construction.
    pub fn init(&mut self) {
        self.sim.tick();
        self.finish_frame();
    }

    /// Swap in a new configuration and start a fresh rack.
    /// On error the current session is left untouched.
    pub fn load_config(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = SimConfig::from_json(json)?;
        let clock = FrameClock::new(config.fixed_dt);
        self.sim = Simulation::new(config)?;
        self.clock = clock;
        self.running = false;
        self.input.drain();
        self.init();
        log::info!("config loaded");
        Ok(())
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one animation frame of `dt` seconds. Returns whether the page
    /// should schedule another.
    pub fn frame(&mut self, dt: f32) -> bool {
        self.sim.clear_events();
        self.events.clear();

        let redraw = self.sim.apply_input(self.input.drain());
        if !self.sim.is_settled() && !self.running {
            // Fresh shot: this frame's tick is the launch tick, the clock
            // takes over from the next frame.
            self.clock.reset();
            self.running = self.sim.tick();
        } else if self.running {
            for _ in 0..self.clock.ticks_due(dt) {
                self.events.extend_from_slice(self.sim.events());
                self.sim.clear_events();
                if !self.sim.tick() {
                    self.running = false;
                    self.clock.reset();
                    break;
                }
            }
        } else if redraw {
            self.sim.tick();
        }

        self.finish_frame();
        self.running
    }

    fn finish_frame(&mut self) {
        self.events.extend_from_slice(self.sim.events());
        self.sim.clear_events();

        #[cfg(feature = "vectors")]
        {
            self.mesh.clear();
            self.sim.draw_list().replay(Some(&mut self.mesh));
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    // ---- Pointer accessors for linear-memory reads ----

    pub fn draw_records_ptr(&self) -> *const f32 {
        self.sim.draw_list().records_ptr()
    }

    pub fn draw_record_count(&self) -> u32 {
        self.sim.draw_list().records().len() as u32
    }

    pub fn draw_record_floats(&self) -> &[f32] {
        self.sim.draw_list().record_floats()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.events.len() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn mesh_vertices_ptr(&self) -> *const f32 {
        self.mesh.vertices_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn mesh_vertex_count(&self) -> u32 {
        self.mesh.vertex_count() as u32
    }
}
