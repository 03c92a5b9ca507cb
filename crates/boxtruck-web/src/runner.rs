use boxtruck_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, ShapeBuffer, ShapeInstance,
    FixedTimestep, IntervalTimer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
///
/// All state lives on the page's main thread and is touched only from
/// `push_input` and `tick`, so the game needs no locking.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    shapes: ShapeBuffer,
    timestep: FixedTimestep,
    timer: Option<IntervalTimer>,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let timer = config.timer_interval.map(IntervalTimer::new);
        let shapes = ShapeBuffer::with_capacity(config.max_shapes);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            shapes,
            timestep,
            timer,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ctx.build_shapes(&mut self.shapes);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: timer firings, then fixed steps, then the shape buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        if let Some(timer) = self.timer.as_mut() {
            for _ in 0..timer.accumulate(dt) {
                self.game.timer(&mut self.ctx);
            }
        }

        // Fixed timestep accumulation. Queued input is seen by the first step
        // only, and stays queued across frames that run no step at all.
        let steps = self.timestep.accumulate(dt);
        for i in 0..steps {
            self.step();
            if i == 0 {
                self.input.clear();
            }
        }

        self.ctx.events.truncate(self.config.max_events);
        self.ctx.build_shapes(&mut self.shapes);
    }

    fn step(&mut self) {
        self.game.update(&mut self.ctx, &self.input);

        #[cfg(feature = "physics")]
        {
            self.ctx.step_physics();
            let started = self.ctx.started_collisions();
            if !started.is_empty() {
                self.game.collisions_started(&mut self.ctx, &started);
            }
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for JS memory-view reads ----

    pub fn shapes_ptr(&self) -> *const f32 {
        self.shapes.instances_ptr()
    }

    pub fn shape_count(&self) -> u32 {
        self.shapes.instance_count()
    }

    pub fn shape_floats(&self) -> u32 {
        ShapeInstance::FLOATS as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}
