use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::{
    config::EngineConfig,
    direction::Direction,
    error::{ConfigError, EngineError, NoSpaceError},
    food::{FoodPlacer, RandomFoodPlacer},
    snapshot::EngineSnapshot,
    state::{centered_chain, Cell, CollisionType, EngineState, GridBounds, Status},
};

/// The simulation engine that handles all game logic
///
/// The engine never schedules itself. A host calls [`Engine::tick`] every
/// `snapshot.speed` milliseconds and feeds turns through
/// [`Engine::set_intent`] in between.
#[derive(Debug, Clone)]
pub struct Engine<P = RandomFoodPlacer> {
    config: EngineConfig,
    state: EngineState,
    placer: P,
}

impl Engine<RandomFoodPlacer> {
    /// Start a game with food placed from OS entropy
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_placer(config, RandomFoodPlacer::new())
    }

    /// Start a reproducible game
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_placer(config, RandomFoodPlacer::seeded(seed))
    }
}

impl<P: FoodPlacer> Engine<P> {
    pub fn with_placer(config: EngineConfig, mut placer: P) -> Result<Self, EngineError> {
        let state = initial_state(&config, &mut placer)?;
        Ok(Self {
            config,
            state,
            placer,
        })
    }

    /// Resume from a previously captured state
    ///
    /// The state is checked against every invariant the engine maintains
    /// itself, so a resumed game behaves exactly like a fresh one.
    pub fn from_state(
        config: EngineConfig,
        state: EngineState,
        placer: P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        check_state(&config, &state).map_err(ConfigError::InconsistentState)?;
        Ok(Self {
            config,
            state,
            placer,
        })
    }

    /// Start a new game, replacing the current one
    ///
    /// On error the current game is left untouched.
    pub fn reset(&mut self, config: EngineConfig) -> Result<EngineSnapshot, EngineError> {
        let state = initial_state(&config, &mut self.placer)?;
        self.config = config;
        self.state = state;
        Ok(self.snapshot())
    }

    /// Request a heading change for the next tick
    ///
    /// A reversal of the current heading is dropped. Later calls overwrite
    /// earlier ones until the next tick consumes the intent.
    pub fn set_intent(&mut self, direction: Direction) {
        if self.state.status.is_terminal() {
            return;
        }

        if self.state.heading.is_opposite(direction) {
            debug!(?direction, heading = ?self.state.heading, "ignoring reversal");
            return;
        }

        self.state.pending_intent = Some(direction);
    }

    /// Advance the simulation by one cell
    ///
    /// If food cannot be re-placed on a board with free cells left, the
    /// previous state is kept as it was.
    pub fn tick(&mut self) -> EngineSnapshot {
        if self.state.status.is_terminal() {
            return self.snapshot();
        }

        match self.advance() {
            Ok(next) => self.state = next,
            Err(err) => warn!(%err, "food placement failed; tick discarded"),
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::from(&self.state)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::from(&self.config)
    }

    /// Compute the state after one tick without touching `self.state`
    ///
    /// A placer failure while free cells remain aborts the whole tick.
    fn advance(&mut self) -> Result<EngineState, NoSpaceError> {
        let current = &self.state;
        let bounds = GridBounds::from(&self.config);
        let mut next = current.clone();

        next.heading = match current.pending_intent {
            Some(intent) if !current.heading.is_opposite(intent) => intent,
            _ => current.heading,
        };
        next.pending_intent = None;
        next.ticks += 1;

        let new_head = current.head().moved_in_direction(next.heading);

        // Wall first: leaving the grid onto food is still a loss
        if !bounds.contains(new_head) {
            return Ok(game_over(next, CollisionType::Wall));
        }

        let grew = current.food == Some(new_head);

        // The tail vacates its cell this tick unless the snake grows
        let hits_body = current.is_occupied(new_head) && (grew || new_head != current.tail());
        if hits_body {
            return Ok(game_over(next, CollisionType::SelfCollision));
        }

        next.segments.insert(0, new_head);
        if !grew {
            next.segments.pop();
            return Ok(next);
        }

        next.score += 1;
        next.speed = self.config.next_speed(current.speed);

        if next.len() == bounds.cell_count() {
            info!(score = next.score, ticks = next.ticks, "board filled");
            next.food = None;
            next.status = Status::Won;
            return Ok(next);
        }

        let occupied: HashSet<Cell> = next.segments.iter().copied().collect();
        let food = self.placer.place(bounds, &occupied)?;
        debug!(score = next.score, speed = next.speed, ?food, "snake grew");
        next.food = Some(food);

        Ok(next)
    }
}

fn initial_state<P: FoodPlacer>(
    config: &EngineConfig,
    placer: &mut P,
) -> Result<EngineState, EngineError> {
    config.validate()?;

    let segments = centered_chain(config);
    let occupied: HashSet<Cell> = segments.iter().copied().collect();
    let food = placer.place(GridBounds::from(config), &occupied)?;

    debug!(
        width = config.grid_width,
        height = config.grid_height,
        length = segments.len(),
        ?food,
        "game reset"
    );

    Ok(EngineState::new(
        segments,
        Direction::Right,
        food,
        config.initial_speed_ms,
    ))
}

fn game_over(mut state: EngineState, collision: CollisionType) -> EngineState {
    info!(?collision, score = state.score, ticks = state.ticks, "game over");
    state.status = Status::GameOver;
    state.collision = Some(collision);
    state
}

fn check_state(config: &EngineConfig, state: &EngineState) -> Result<(), String> {
    let bounds = GridBounds::from(config);

    if state.segments.is_empty() {
        return Err("snake has no segments".to_string());
    }

    if state.segments.len() != config.initial_length + state.score as usize {
        return Err(format!(
            "snake length {} does not match initial_length {} + score {}",
            state.segments.len(),
            config.initial_length,
            state.score
        ));
    }

    if let Some(cell) = state.segments.iter().find(|&&c| !bounds.contains(c)) {
        return Err(format!("segment {cell:?} is outside the grid"));
    }

    if let Some(pair) = state.segments.windows(2).find(|w| !w[0].is_adjacent(w[1])) {
        return Err(format!("segments {:?} and {:?} are not adjacent", pair[0], pair[1]));
    }

    let unique: HashSet<Cell> = state.segments.iter().copied().collect();
    if unique.len() != state.segments.len() {
        return Err("snake overlaps itself".to_string());
    }

    if state.segments.len() > 1
        && state.head().moved_in_direction(state.heading.opposite()) != state.segments[1]
    {
        return Err(format!("heading {:?} does not match the neck", state.heading));
    }

    if let Some(intent) = state.pending_intent {
        if state.heading.is_opposite(intent) {
            return Err(format!("pending intent {intent:?} reverses the heading"));
        }
    }

    match state.food {
        Some(food) if !bounds.contains(food) => {
            return Err(format!("food {food:?} is outside the grid"));
        }
        Some(food) if unique.contains(&food) => {
            return Err(format!("food {food:?} is on the snake"));
        }
        None if state.status != Status::Won => {
            return Err("only a won game may have no food".to_string());
        }
        _ => {}
    }

    if state.speed < config.speed_floor_ms || state.speed > config.initial_speed_ms {
        return Err(format!(
            "speed {} outside [{}, {}]",
            state.speed, config.speed_floor_ms, config.initial_speed_ms
        ));
    }

    Ok(())
}
